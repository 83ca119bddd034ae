//
// Compile step: GraphSnapshot (renderer data) -> Graph (bundling-friendly IR)
//
// What this does:
// - Flattens nodes and edges into indexed vectors
// - Enforces uniqueness of node ids and edge ids
// - Resolves edge endpoints from Ident -> NodeId
// - Rejects non-finite coordinates
// - Normalizes an empty composite_id to "no composite"
// - Preserves input order (groups depend on first-seen order)

use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;

use crate::graph::{GraphSnapshot, Ident, LogicType, NodeKind, Point};

#[derive(Debug, Clone)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    node_by_ident: HashMap<Ident, NodeId>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct NodeId(pub usize);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct EdgeId(pub usize);

#[derive(Debug, Clone, Serialize)]
pub struct Node {
    pub nid: NodeId,
    pub id: Ident,
    pub kind: NodeKind,
    pub content: Option<String>,
    pub pos: Point,
}

#[derive(Debug, Clone, Serialize)]
pub struct Edge {
    pub eid: EdgeId,
    pub id: Ident,
    pub from: NodeId,
    pub to: NodeId,
    pub logic: Option<LogicType>,
    pub notes: Option<String>,
    pub composite: Option<Ident>,
}

/// Invalid renderer data. The snapshot is rejected as a whole.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    #[error("duplicate node id '{0}'")]
    DuplicateNode(String),

    #[error("duplicate edge id '{0}'")]
    DuplicateEdge(String),

    #[error("edge '{edge}' references unknown node '{node}'")]
    UnknownNode { edge: String, node: String },

    #[error("node '{0}' has a non-finite position")]
    NonFinitePosition(String),

    #[error("no node with id '{0}'")]
    NoSuchNode(String),

    #[error("no edge with id '{0}'")]
    NoSuchEdge(String),
}

impl Graph {
    pub fn node(&self, nid: NodeId) -> &Node {
        &self.nodes[nid.0]
    }

    pub fn edge(&self, eid: EdgeId) -> &Edge {
        &self.edges[eid.0]
    }

    pub fn position(&self, nid: NodeId) -> Point {
        self.nodes[nid.0].pos
    }

    pub fn node_index(&self, id: &str) -> Option<NodeId> {
        self.node_by_ident.get(&Ident(id.to_string())).copied()
    }
}

pub fn compile(snapshot: &GraphSnapshot) -> Result<Graph, GraphError> {
    let mut nodes = Vec::with_capacity(snapshot.nodes.len());
    let mut node_by_ident: HashMap<Ident, NodeId> = HashMap::new();

    for n in &snapshot.nodes {
        let pos = n.pos();
        if !pos.is_finite() {
            return Err(GraphError::NonFinitePosition(n.id.0.clone()));
        }
        let nid = NodeId(nodes.len());
        if node_by_ident.insert(n.id.clone(), nid).is_some() {
            return Err(GraphError::DuplicateNode(n.id.0.clone()));
        }
        nodes.push(Node {
            nid,
            id: n.id.clone(),
            kind: n.kind,
            content: n.content.clone(),
            pos,
        });
    }

    let mut edges = Vec::with_capacity(snapshot.edges.len());
    let mut seen_edges: HashMap<&Ident, EdgeId> = HashMap::new();

    for e in &snapshot.edges {
        let eid = EdgeId(edges.len());
        if seen_edges.insert(&e.id, eid).is_some() {
            return Err(GraphError::DuplicateEdge(e.id.0.clone()));
        }
        let resolve = |ident: &Ident| {
            node_by_ident.get(ident).copied().ok_or_else(|| GraphError::UnknownNode {
                edge: e.id.0.clone(),
                node: ident.0.clone(),
            })
        };
        let from = resolve(&e.source)?;
        let to = resolve(&e.target)?;
        let composite = e
            .composite_id
            .as_deref()
            .filter(|c| !c.is_empty())
            .map(Ident::from);

        edges.push(Edge {
            eid,
            id: e.id.clone(),
            from,
            to,
            logic: e.logic,
            notes: e.notes.clone(),
            composite,
        });
    }

    Ok(Graph { nodes, edges, node_by_ident })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{EdgeInput, NodeInput};

    fn snapshot() -> GraphSnapshot {
        GraphSnapshot {
            nodes: vec![NodeInput::new("A", 0.0, 0.0), NodeInput::new("B", 10.0, 5.0)],
            edges: vec![EdgeInput::new("e1", "A", "B").with_composite("k")],
            config: None,
        }
    }

    #[test]
    fn test_compile_resolves_endpoints() {
        let graph = compile(&snapshot()).unwrap();
        let e = &graph.edges[0];
        assert_eq!(e.from, NodeId(0));
        assert_eq!(e.to, NodeId(1));
        assert_eq!(graph.position(e.to), Point::new(10.0, 5.0));
        assert_eq!(graph.node_index("B"), Some(NodeId(1)));
        assert_eq!(e.composite, Some(Ident::from("k")));
    }

    #[test]
    fn test_duplicate_node_rejected() {
        let mut snap = snapshot();
        snap.nodes.push(NodeInput::new("A", 1.0, 1.0));
        assert_eq!(compile(&snap).unwrap_err(), GraphError::DuplicateNode("A".to_string()));
    }

    #[test]
    fn test_duplicate_edge_rejected() {
        let mut snap = snapshot();
        snap.edges.push(EdgeInput::new("e1", "B", "A"));
        assert_eq!(compile(&snap).unwrap_err(), GraphError::DuplicateEdge("e1".to_string()));
    }

    #[test]
    fn test_dangling_edge_rejected() {
        let mut snap = snapshot();
        snap.edges.push(EdgeInput::new("e2", "A", "Z"));
        assert_eq!(
            compile(&snap).unwrap_err(),
            GraphError::UnknownNode { edge: "e2".to_string(), node: "Z".to_string() }
        );
    }

    #[test]
    fn test_nan_position_rejected() {
        let mut snap = snapshot();
        snap.nodes[1].y = f64::NAN;
        assert_eq!(compile(&snap).unwrap_err(), GraphError::NonFinitePosition("B".to_string()));
    }

    #[test]
    fn test_empty_composite_is_none() {
        let mut snap = snapshot();
        snap.edges[0].composite_id = Some(String::new());
        let graph = compile(&snap).unwrap();
        assert!(graph.edges[0].composite.is_none());
    }
}
