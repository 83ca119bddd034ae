//! Plain-data graph snapshot as handed over by the rendering layer.
//!
//! This is the JSON boundary: node positions at call time plus the live edge
//! set. Nothing here is validated; see `compile` for that.

use serde::{Deserialize, Serialize};

use crate::bundle::BundleConfig;
use crate::graph::{Ident, LogicType, NodeKind, Point};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphSnapshot {
    #[serde(default)]
    pub nodes: Vec<NodeInput>,
    #[serde(default)]
    pub edges: Vec<EdgeInput>,
    /// Optional overrides for the bundling parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<BundleConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeInput {
    pub id: Ident,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub kind: NodeKind,
    /// Claim text or source title (display only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl NodeInput {
    pub fn new(id: &str, x: f64, y: f64) -> Self {
        Self { id: id.into(), x, y, kind: NodeKind::Claim, content: None }
    }

    pub fn pos(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeInput {
    pub id: Ident,
    pub source: Ident,
    pub target: Ident,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logic: Option<LogicType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Shared by every member of a compound connection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composite_id: Option<String>,
}

impl EdgeInput {
    pub fn new(id: &str, source: &str, target: &str) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            logic: None,
            notes: None,
            composite_id: None,
        }
    }

    pub fn with_composite(mut self, composite_id: &str) -> Self {
        self.composite_id = Some(composite_id.to_string());
        self
    }
}

impl GraphSnapshot {
    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut NodeInput> {
        self.nodes.iter_mut().find(|n| n.id.as_str() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_snapshot() {
        let input = r#"{
            "nodes": [
                {"id": "c1", "x": 100, "y": 100},
                {"id": "s1", "x": 0, "y": 0, "kind": "source", "content": "Study A"}
            ],
            "edges": [
                {"id": "e1", "source": "s1", "target": "c1", "logic": "AND", "composite_id": "k1"}
            ]
        }"#;
        let snap = GraphSnapshot::from_json(input).unwrap();
        assert_eq!(snap.nodes.len(), 2);
        assert_eq!(snap.nodes[1].kind, NodeKind::Source);
        assert_eq!(snap.nodes[0].kind, NodeKind::Claim);
        assert_eq!(snap.edges[0].logic, Some(LogicType::And));
        assert_eq!(snap.edges[0].composite_id.as_deref(), Some("k1"));
        assert!(snap.config.is_none());
    }

    #[test]
    fn test_parse_null_composite_id() {
        let input = r#"{"edges": [{"id": "e1", "source": "a", "target": "b", "composite_id": null}]}"#;
        let snap = GraphSnapshot::from_json(input).unwrap();
        assert!(snap.edges[0].composite_id.is_none());
        assert!(snap.nodes.is_empty());
    }

    #[test]
    fn test_parse_partial_config() {
        let input = r#"{"config": {"convergence_ratio": 0.5}}"#;
        let snap = GraphSnapshot::from_json(input).unwrap();
        let cfg = snap.config.unwrap();
        assert_eq!(cfg.convergence_ratio, 0.5);
        assert_eq!(cfg.min_group_size, 2);
    }
}
