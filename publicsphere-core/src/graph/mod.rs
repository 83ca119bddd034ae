mod compile;
mod snapshot;
mod types;

pub use compile::{compile, Edge, EdgeId, Graph, GraphError, Node, NodeId};
pub use snapshot::{EdgeInput, GraphSnapshot, NodeInput};
pub use types::*;
