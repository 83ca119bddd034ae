//! WASM bindings for the publicsphere-core library.
//!
//! All functions exposed to JavaScript via wasm-bindgen are defined here.
//! Everything crosses the boundary as JSON strings; failures come back as an
//! `error` object in the output and are echoed to the browser console.

use std::collections::HashMap;

use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::console;

use crate::bundle::BundleResult;
use crate::error::Error;
use crate::graph::{EdgeInput, Graph, GraphSnapshot, NodeInput, Point};
use crate::output::{styles_output, BundleOutput, ErrorInfo, GroupsOutput};
use crate::session::BundleSession;

fn console_error(msg: &str) {
    console::error_1(&JsValue::from_str(msg));
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        console_error(&format!("Error serializing output: {}", e));
        "{\"error\": {\"kind\": \"json\", \"message\": \"serialization failed\"}}".to_string()
    })
}

/// Every bundling pass leaves the crate through here.
fn pass_json(pass: Result<(Graph, BundleResult), Error>) -> String {
    if let Err(e) = &pass {
        console_error(&format!("Error bundling edges: {}", e));
    }
    to_json(&BundleOutput::from_pass(&pass))
}

/// Run one bundling pass over a graph snapshot.
#[wasm_bindgen]
pub fn compute_bundles(input: &str) -> String {
    pass_json(crate::bundle_snapshot(input))
}

/// Identify compound groups only. Returns `{groups: [{composite_id, edge_ids}]}`.
#[wasm_bindgen]
pub fn identify_groups(input: &str) -> String {
    let output = match crate::group_snapshot(input) {
        Ok((graph, groups)) => GroupsOutput::from_groups(&graph, &groups),
        Err(e) => {
            console_error(&format!("Error grouping edges: {}", e));
            GroupsOutput::from_error(&e)
        }
    };
    to_json(&output)
}

/// Default bundling parameters as JSON, for the settings panel.
#[wasm_bindgen]
pub fn default_config() -> String {
    to_json(&crate::default_config())
}

/// Stateful bundler bound to one graph view.
///
/// Hook `layout_stop` to the layout's stop event and `node_free` to drag
/// release; both return a full `BundleOutput`.
#[wasm_bindgen]
pub struct BundleEngine {
    session: BundleSession,
}

#[wasm_bindgen]
impl BundleEngine {
    #[wasm_bindgen(constructor)]
    pub fn new(input: &str) -> Result<BundleEngine, JsValue> {
        let session = GraphSnapshot::from_json(input)
            .map_err(Error::from)
            .and_then(BundleSession::new)
            .map_err(|e| {
                console_error(&format!("Error creating bundle engine: {}", e));
                JsValue::from_str(&to_json(&ErrorInfo::from(&e)))
            })?;
        Ok(BundleEngine { session })
    }

    /// `positions` is a JSON object of node id -> `{x, y}`.
    pub fn layout_stop(&mut self, positions: &str) -> String {
        let pass = serde_json::from_str::<HashMap<String, Point>>(positions)
            .map_err(Error::from)
            .and_then(|p| self.session.layout_stop(&p));
        pass_json(pass)
    }

    pub fn node_free(&mut self, node_id: &str, x: f64, y: f64) -> String {
        pass_json(self.session.node_free(node_id, Point::new(x, y)))
    }

    pub fn move_node(&mut self, node_id: &str, x: f64, y: f64) -> bool {
        self.apply(|s| s.move_node(node_id, Point::new(x, y)))
    }

    /// `node` is a JSON node record: `{id, x, y, kind?, content?}`.
    pub fn add_node(&mut self, node: &str) -> bool {
        self.apply(|s| {
            let node: NodeInput = serde_json::from_str(node)?;
            s.add_node(node)
        })
    }

    pub fn remove_node(&mut self, node_id: &str) -> bool {
        self.apply(|s| s.remove_node(node_id))
    }

    /// `edge` is a JSON edge record: `{id, source, target, logic?, notes?, composite_id?}`.
    pub fn add_edge(&mut self, edge: &str) -> bool {
        self.apply(|s| {
            let edge: EdgeInput = serde_json::from_str(edge)?;
            s.add_edge(edge)
        })
    }

    pub fn remove_edge(&mut self, edge_id: &str) -> bool {
        self.apply(|s| s.remove_edge(edge_id))
    }

    /// Style map of the last pass as JSON: edge id -> `{style, weight?, distance?}`.
    pub fn styles(&self) -> String {
        to_json(&styles_output(self.session.styles()))
    }
}

impl BundleEngine {
    fn apply(&mut self, f: impl FnOnce(&mut BundleSession) -> Result<(), Error>) -> bool {
        match f(&mut self.session) {
            Ok(()) => true,
            Err(e) => {
                console_error(&format!("Error updating graph: {}", e));
                false
            }
        }
    }
}
