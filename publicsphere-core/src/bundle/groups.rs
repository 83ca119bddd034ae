// Compound-group identification.
//
// Partitions the edge set by composite_id. Edges without one are independent
// and never appear in a group. Groups are kept in first-seen order and edges
// inside a group keep input order, so results are stable across passes.

use std::collections::HashMap;

use crate::graph::{EdgeId, Graph, Ident, NodeId};

/// Edges sharing one composite_id.
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundGroup {
    pub composite_id: Ident,
    pub edges: Vec<EdgeId>,
}

impl CompoundGroup {
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Target of the first edge, which stands in for the whole group.
    pub fn target(&self, graph: &Graph) -> Option<NodeId> {
        self.edges.first().map(|&eid| graph.edge(eid).to)
    }
}

/// Insertion-ordered map from composite_id to its group.
#[derive(Debug, Clone, Default)]
pub struct CompoundGroups {
    groups: Vec<CompoundGroup>,
    index: HashMap<Ident, usize>,
}

impl CompoundGroups {
    /// Build the groups from a graph's edges.
    pub fn from_graph(graph: &Graph) -> Self {
        let mut out = Self::default();

        for edge in &graph.edges {
            let Some(composite) = &edge.composite else {
                continue;
            };
            let slot = match out.index.get(composite) {
                Some(&i) => i,
                None => {
                    out.groups.push(CompoundGroup {
                        composite_id: composite.clone(),
                        edges: Vec::new(),
                    });
                    out.index.insert(composite.clone(), out.groups.len() - 1);
                    out.groups.len() - 1
                }
            };
            out.groups[slot].edges.push(edge.eid);
        }

        out
    }

    pub fn get(&self, composite_id: &str) -> Option<&CompoundGroup> {
        self.index
            .get(&Ident(composite_id.to_string()))
            .map(|&i| &self.groups[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompoundGroup> {
        self.groups.iter()
    }

    /// Groups large enough to be bundled.
    pub fn bundleable(&self, min_size: usize) -> impl Iterator<Item = &CompoundGroup> {
        self.groups.iter().filter(move |g| g.len() >= min_size)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
