// Compound edge bundling for the argument-map graph.
//
// Goals:
// - Pure: reads positions, never moves a node
// - Deterministic: same snapshot, same curves
// - Whole-graph: every pass recomputes every group from scratch, because
//   moving one source shifts its group's centroid and with it every sibling
// - Singletons are left alone: the renderer keeps its default curve style
//
// Submodules:
// - groups: composite_id partitioning
// - geometry: convergence point and per-edge projection
//
// Output:
// - BundleResult with per-group convergence points and per-edge curve params.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::graph::{EdgeId, Graph, Ident, NodeId, Point};

mod geometry;
mod groups;

pub use geometry::{centroid, convergence_point, curve_params, CurveParams};
pub use groups::{CompoundGroup, CompoundGroups};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BundleConfig {
    /// How far the convergence point sits from the target toward the sources' centroid.
    pub convergence_ratio: f64,
    /// Curve params for a zero-length edge.
    pub degenerate_weight: f64,
    pub degenerate_distance: f64,
    /// Smallest group that gets bundled.
    pub min_group_size: usize,
    /// Refuse to bundle a group whose edges point at different targets.
    /// When false the first edge's target is used for every member.
    pub strict_targets: bool,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            convergence_ratio: 0.7,
            degenerate_weight: 0.5,
            degenerate_distance: 0.0,
            min_group_size: 2,
            strict_targets: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("convergence_ratio must be within [0, 1], got {0}")]
    RatioOutOfRange(f64),

    #[error("degenerate_weight must be within [0, 1], got {0}")]
    DegenerateWeightOutOfRange(f64),

    #[error("degenerate_distance must be finite")]
    NonFiniteDistance,

    #[error("min_group_size must be at least 2, got {0}")]
    GroupSizeTooSmall(usize),
}

impl BundleConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.convergence_ratio) {
            return Err(ConfigError::RatioOutOfRange(self.convergence_ratio));
        }
        if !(0.0..=1.0).contains(&self.degenerate_weight) {
            return Err(ConfigError::DegenerateWeightOutOfRange(self.degenerate_weight));
        }
        if !self.degenerate_distance.is_finite() {
            return Err(ConfigError::NonFiniteDistance);
        }
        if self.min_group_size < 2 {
            return Err(ConfigError::GroupSizeTooSmall(self.min_group_size));
        }
        Ok(())
    }

    fn degenerate(&self) -> CurveParams {
        CurveParams {
            weight: self.degenerate_weight,
            distance: self.degenerate_distance,
        }
    }
}

/// Why a single group could not be bundled. The rest of the pass goes on.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BundleError {
    #[error("compound group '{0}' has no edges")]
    EmptyGroup(String),

    #[error("compound group '{composite_id}' mixes targets: expected '{expected}', edge '{edge}' targets '{found}'")]
    MixedTargets {
        composite_id: String,
        expected: String,
        edge: String,
        found: String,
    },
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EdgeCurve {
    pub edge: EdgeId,
    pub params: CurveParams,
}

/// One bundled compound group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupBundle {
    pub composite_id: Ident,
    pub target: NodeId,
    pub convergence: Point,
    pub curves: Vec<EdgeCurve>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedGroup {
    pub composite_id: Ident,
    pub error: BundleError,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BundleResult {
    pub groups: Vec<GroupBundle>,
    /// Edges the renderer should leave with the default curve, in input order.
    pub unbundled: Vec<EdgeId>,
    pub skipped: Vec<SkippedGroup>,
}

impl BundleResult {
    pub fn curves(&self) -> impl Iterator<Item = &EdgeCurve> {
        self.groups.iter().flat_map(|g| g.curves.iter())
    }

    pub fn curve_for(&self, edge: EdgeId) -> Option<CurveParams> {
        self.curves().find(|c| c.edge == edge).map(|c| c.params)
    }
}

/// Compute convergence geometry for one group.
///
/// Groups smaller than `min_group_size` are still well-defined here; callers
/// are expected to filter them out before asking.
pub fn bundle_group(graph: &Graph, group: &CompoundGroup, cfg: &BundleConfig) -> Result<GroupBundle, BundleError> {
    let target = group
        .target(graph)
        .ok_or_else(|| BundleError::EmptyGroup(group.composite_id.0.clone()))?;

    if cfg.strict_targets {
        for &eid in &group.edges {
            let edge = graph.edge(eid);
            if edge.to != target {
                return Err(BundleError::MixedTargets {
                    composite_id: group.composite_id.0.clone(),
                    expected: graph.node(target).id.0.clone(),
                    edge: edge.id.0.clone(),
                    found: graph.node(edge.to).id.0.clone(),
                });
            }
        }
    }

    let target_pos = graph.position(target);
    let sources: Vec<Point> = group
        .edges
        .iter()
        .map(|&eid| graph.position(graph.edge(eid).from))
        .collect();

    let convergence = convergence_point(target_pos, &sources, cfg.convergence_ratio)
        .ok_or_else(|| BundleError::EmptyGroup(group.composite_id.0.clone()))?;

    let curves = group
        .edges
        .iter()
        .zip(&sources)
        .map(|(&eid, &source)| EdgeCurve {
            edge: eid,
            params: curve_params(source, target_pos, convergence, cfg.degenerate()),
        })
        .collect();

    Ok(GroupBundle {
        composite_id: group.composite_id.clone(),
        target,
        convergence,
        curves,
    })
}

/// Bundle every compound group in the graph.
pub fn bundle_graph(graph: &Graph, cfg: &BundleConfig) -> BundleResult {
    let groups = CompoundGroups::from_graph(graph);
    let mut result = BundleResult::default();
    let mut bundled = vec![false; graph.edges.len()];

    for group in groups.bundleable(cfg.min_group_size) {
        match bundle_group(graph, group, cfg) {
            Ok(bundle) => {
                for c in &bundle.curves {
                    bundled[c.edge.0] = true;
                }
                result.groups.push(bundle);
            }
            Err(error) => {
                warn!(composite_id = group.composite_id.as_str(), %error, "skipping compound group");
                result.skipped.push(SkippedGroup {
                    composite_id: group.composite_id.clone(),
                    error,
                });
            }
        }
    }

    result.unbundled = graph
        .edges
        .iter()
        .filter(|e| !bundled[e.eid.0])
        .map(|e| e.eid)
        .collect();

    debug!(
        groups = result.groups.len(),
        skipped = result.skipped.len(),
        unbundled = result.unbundled.len(),
        "bundling pass complete"
    );

    result
}
