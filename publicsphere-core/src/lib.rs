//! Graph-view core for the PublicSphere argument map.
//!
//! Compound connections (several claims or sources jointly feeding one
//! target, sharing a `composite_id`) are drawn as a bundle: every member's
//! bezier control point aims at a shared convergence point near the target.
//! This crate computes those control points; the renderer owns everything
//! else.

pub mod bundle;
pub mod error;
pub mod graph;
pub mod output;
pub mod session;
mod wasm;

use bundle::{bundle_graph, BundleConfig, BundleResult, CompoundGroups};
use graph::{compile, Graph, GraphSnapshot};

pub use error::{Error, Result};
pub use output::{BundleOutput, GroupsOutput};
pub use session::{BundleSession, EdgeStyle};

/// Decode a JSON snapshot and run one bundling pass over it.
pub fn bundle_snapshot(input: &str) -> Result<(Graph, BundleResult)> {
    let snapshot = GraphSnapshot::from_json(input)?;
    let cfg = snapshot.config.clone().unwrap_or_default();
    cfg.validate()?;
    let graph = compile(&snapshot)?;
    let result = bundle_graph(&graph, &cfg);
    Ok((graph, result))
}

/// Decode a JSON snapshot and identify its compound groups without geometry.
pub fn group_snapshot(input: &str) -> Result<(Graph, CompoundGroups)> {
    let snapshot = GraphSnapshot::from_json(input)?;
    let graph = compile(&snapshot)?;
    let groups = CompoundGroups::from_graph(&graph);
    Ok((graph, groups))
}

/// JSON-in, JSON-out bundling pass. Errors are reported inside the output.
pub fn bundle_json(input: &str) -> BundleOutput {
    BundleOutput::from_pass(&bundle_snapshot(input))
}

/// Default bundling parameters.
pub fn default_config() -> BundleConfig {
    BundleConfig::default()
}
