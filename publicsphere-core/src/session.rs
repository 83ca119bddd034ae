//! Live bundling state for an interactive graph view.
//!
//! The renderer owns the graph, but it only tells us about it through
//! events: the layout finished, a node was dragged, an edge was created.
//! `BundleSession` mirrors that state and recomputes the whole graph on the
//! two events that change geometry for good: layout stop and drag release.

use std::collections::HashMap;

use tracing::debug;

use crate::bundle::{bundle_graph, BundleConfig, BundleResult, CurveParams};
use crate::error::Error;
use crate::graph::{compile, EdgeInput, Graph, GraphError, GraphSnapshot, NodeInput, Point};

/// Curve style the renderer should apply to one edge.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum EdgeStyle {
    /// Leave the renderer's default curve.
    Unbundled,
    Bundled(CurveParams),
}

#[derive(Debug, Clone)]
pub struct BundleSession {
    snapshot: GraphSnapshot,
    config: BundleConfig,
    styles: HashMap<String, EdgeStyle>,
}

impl BundleSession {
    pub fn new(mut snapshot: GraphSnapshot) -> Result<Self, Error> {
        let config = snapshot.config.take().unwrap_or_default();
        config.validate()?;
        // Fail early on bad data rather than on the first drag
        compile(&snapshot)?;
        Ok(Self {
            snapshot,
            config,
            styles: HashMap::new(),
        })
    }

    pub fn config(&self) -> &BundleConfig {
        &self.config
    }

    /// Style map of the last pass. Emptied when a node or edge is added or
    /// removed; kept while a node is only being moved.
    pub fn styles(&self) -> &HashMap<String, EdgeStyle> {
        &self.styles
    }

    pub fn style(&self, edge_id: &str) -> Option<EdgeStyle> {
        self.styles.get(edge_id).copied()
    }

    /// Layout finished arranging all nodes. Only the nodes named in
    /// `positions` move; the rest keep their current position. Nothing moves
    /// unless every entry names a known node with a finite position.
    pub fn layout_stop(&mut self, positions: &HashMap<String, Point>) -> Result<(Graph, BundleResult), Error> {
        let updates = positions
            .iter()
            .map(|(id, &pos)| self.resolve_move(id, pos).map(|slot| (slot, pos)))
            .collect::<Result<Vec<_>, _>>()?;
        for (slot, pos) in updates {
            self.place(slot, pos);
        }
        self.recompute()
    }

    /// A dragged node was released. Every group is recomputed, not just the
    /// moved node's: its siblings' geometry depends on it through the centroid.
    pub fn node_free(&mut self, node_id: &str, pos: Point) -> Result<(Graph, BundleResult), Error> {
        self.move_node(node_id, pos)?;
        self.recompute()
    }

    /// Track a node mid-drag without recomputing. The style map of the last
    /// pass stays in place until the drag is released.
    pub fn move_node(&mut self, node_id: &str, pos: Point) -> Result<(), Error> {
        let slot = self.resolve_move(node_id, pos)?;
        self.place(slot, pos);
        Ok(())
    }

    fn resolve_move(&self, node_id: &str, pos: Point) -> Result<usize, GraphError> {
        let slot = self
            .snapshot
            .nodes
            .iter()
            .position(|n| n.id.as_str() == node_id)
            .ok_or_else(|| GraphError::NoSuchNode(node_id.to_string()))?;
        if !pos.is_finite() {
            return Err(GraphError::NonFinitePosition(node_id.to_string()));
        }
        Ok(slot)
    }

    fn place(&mut self, slot: usize, pos: Point) {
        let node = &mut self.snapshot.nodes[slot];
        node.x = pos.x;
        node.y = pos.y;
    }

    pub fn add_node(&mut self, node: NodeInput) -> Result<(), Error> {
        if self.snapshot.nodes.iter().any(|n| n.id == node.id) {
            return Err(GraphError::DuplicateNode(node.id.0).into());
        }
        if !node.pos().is_finite() {
            return Err(GraphError::NonFinitePosition(node.id.0).into());
        }
        self.snapshot.nodes.push(node);
        self.styles.clear();
        Ok(())
    }

    /// Remove a node together with every edge touching it.
    pub fn remove_node(&mut self, node_id: &str) -> Result<(), Error> {
        let before = self.snapshot.nodes.len();
        self.snapshot.nodes.retain(|n| n.id.as_str() != node_id);
        if self.snapshot.nodes.len() == before {
            return Err(GraphError::NoSuchNode(node_id.to_string()).into());
        }
        self.snapshot
            .edges
            .retain(|e| e.source.as_str() != node_id && e.target.as_str() != node_id);
        self.styles.clear();
        Ok(())
    }

    pub fn add_edge(&mut self, edge: EdgeInput) -> Result<(), Error> {
        if self.snapshot.edges.iter().any(|e| e.id == edge.id) {
            return Err(GraphError::DuplicateEdge(edge.id.0).into());
        }
        for end in [&edge.source, &edge.target] {
            if !self.snapshot.nodes.iter().any(|n| &n.id == end) {
                return Err(GraphError::UnknownNode {
                    edge: edge.id.0.clone(),
                    node: end.0.clone(),
                }
                .into());
            }
        }
        self.snapshot.edges.push(edge);
        self.styles.clear();
        Ok(())
    }

    pub fn remove_edge(&mut self, edge_id: &str) -> Result<(), Error> {
        let before = self.snapshot.edges.len();
        self.snapshot.edges.retain(|e| e.id.as_str() != edge_id);
        if self.snapshot.edges.len() == before {
            return Err(GraphError::NoSuchEdge(edge_id.to_string()).into());
        }
        self.styles.clear();
        Ok(())
    }

    fn recompute(&mut self) -> Result<(Graph, BundleResult), Error> {
        let graph = compile(&self.snapshot)?;
        let result = bundle_graph(&graph, &self.config);

        self.styles.clear();
        for e in &graph.edges {
            self.styles.insert(e.id.0.clone(), EdgeStyle::Unbundled);
        }
        for c in result.curves() {
            self.styles
                .insert(graph.edge(c.edge).id.0.clone(), EdgeStyle::Bundled(c.params));
        }

        debug!(
            nodes = graph.nodes.len(),
            edges = graph.edges.len(),
            bundled_groups = result.groups.len(),
            "recomputed edge bundles"
        );
        Ok((graph, result))
    }
}
