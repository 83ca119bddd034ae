//! Output types for the graph view.
//!
//! These structs are serialized to JSON and handed back to the renderer,
//! which applies them as per-edge bezier control points.

use std::collections::HashMap;

use serde::Serialize;

use crate::bundle::{BundleResult, CompoundGroups};
use crate::error::Error;
use crate::graph::{Graph, Point};
use crate::session::EdgeStyle;

/// Control point for one bundled edge
#[derive(Debug, Clone, Serialize)]
pub struct CurveOutput {
    pub edge_id: String,
    pub weight: f64,
    pub distance: f64,
}

/// A bundled compound group
#[derive(Debug, Clone, Serialize)]
pub struct GroupOutput {
    pub composite_id: String,
    pub target: String,
    /// Where the bundle converges, for drawing a junction marker
    pub convergence: Point,
    pub edge_ids: Vec<String>,
}

/// A compound group that was left unbundled, and why
#[derive(Debug, Clone, Serialize)]
pub struct SkippedOutput {
    pub composite_id: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub kind: String,
    pub message: String,
}

impl From<&Error> for ErrorInfo {
    fn from(e: &Error) -> Self {
        ErrorInfo {
            kind: e.kind().to_string(),
            message: e.to_string(),
        }
    }
}

/// The combined output of one bundling pass
#[derive(Debug, Clone, Default, Serialize)]
pub struct BundleOutput {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub curves: Vec<CurveOutput>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<GroupOutput>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unbundled: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

impl BundleOutput {
    pub fn from_result(graph: &Graph, result: &BundleResult) -> Self {
        let edge_id = |eid| graph.edge(eid).id.0.clone();

        let curves = result
            .curves()
            .map(|c| CurveOutput {
                edge_id: edge_id(c.edge),
                weight: c.params.weight,
                distance: c.params.distance,
            })
            .collect();

        let groups = result
            .groups
            .iter()
            .map(|g| GroupOutput {
                composite_id: g.composite_id.0.clone(),
                target: graph.node(g.target).id.0.clone(),
                convergence: g.convergence,
                edge_ids: g.curves.iter().map(|c| edge_id(c.edge)).collect(),
            })
            .collect();

        let skipped = result
            .skipped
            .iter()
            .map(|s| SkippedOutput {
                composite_id: s.composite_id.0.clone(),
                reason: s.error.to_string(),
            })
            .collect();

        BundleOutput {
            curves,
            groups,
            unbundled: result.unbundled.iter().map(|&e| edge_id(e)).collect(),
            skipped,
            error: None,
        }
    }

    /// Output for a finished pass, or for the error that stopped it.
    pub fn from_pass(pass: &Result<(Graph, BundleResult), Error>) -> Self {
        match pass {
            Ok((graph, result)) => Self::from_result(graph, result),
            Err(e) => Self::from_error(e),
        }
    }

    pub fn from_error(e: &Error) -> Self {
        BundleOutput {
            error: Some(ErrorInfo::from(e)),
            ..Default::default()
        }
    }
}

/// One compound group as identified, before any geometry
#[derive(Debug, Clone, Serialize)]
pub struct CompoundGroupOutput {
    pub composite_id: String,
    pub edge_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GroupsOutput {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<CompoundGroupOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

impl GroupsOutput {
    pub fn from_groups(graph: &Graph, groups: &CompoundGroups) -> Self {
        GroupsOutput {
            groups: groups
                .iter()
                .map(|g| CompoundGroupOutput {
                    composite_id: g.composite_id.0.clone(),
                    edge_ids: g.edges.iter().map(|&e| graph.edge(e).id.0.clone()).collect(),
                })
                .collect(),
            error: None,
        }
    }

    pub fn from_error(e: &Error) -> Self {
        GroupsOutput {
            groups: vec![],
            error: Some(ErrorInfo::from(e)),
        }
    }
}

/// Serializable form of the session style map
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "style", rename_all = "snake_case")]
pub enum StyleOutput {
    Unbundled,
    Bundled { weight: f64, distance: f64 },
}

impl From<EdgeStyle> for StyleOutput {
    fn from(style: EdgeStyle) -> Self {
        match style {
            EdgeStyle::Unbundled => StyleOutput::Unbundled,
            EdgeStyle::Bundled(p) => StyleOutput::Bundled {
                weight: p.weight,
                distance: p.distance,
            },
        }
    }
}

pub fn styles_output(styles: &HashMap<String, EdgeStyle>) -> HashMap<&str, StyleOutput> {
    styles
        .iter()
        .map(|(id, &style)| (id.as_str(), StyleOutput::from(style)))
        .collect()
}
