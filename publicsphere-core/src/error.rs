//! Crate-level error type.

use thiserror::Error;

use crate::bundle::ConfigError;
use crate::graph::GraphError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Input JSON could not be decoded.
    #[error("invalid input: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid graph: {0}")]
    Graph(#[from] GraphError),

    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),
}

impl Error {
    /// Short machine-readable tag for the JS side.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Json(_) => "json",
            Error::Graph(_) => "graph",
            Error::Config(_) => "config",
        }
    }
}
