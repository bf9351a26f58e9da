//! Construction-time failures
//!
//! Per-tick simulation logic is total; only building a simulation from a
//! scene or tuning file can fail.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading tuning or building a [`crate::Simulation`]
#[derive(Debug, Error)]
pub enum SimError {
    /// A node the simulation requires is absent from the scene
    #[error("scene is missing required node `{0}`")]
    MissingNode(&'static str),

    /// A scene node is present but unusable
    #[error("invalid scene node `{node}`: {detail}")]
    InvalidScene { node: String, detail: String },

    /// A tuning value is outside its valid range
    #[error("invalid tuning `{field}`: {detail}")]
    InvalidTuning { field: &'static str, detail: String },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {what}: {source}")]
    Parse {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl SimError {
    pub(crate) fn scene(node: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::InvalidScene {
            node: node.into(),
            detail: detail.into(),
        }
    }

    pub(crate) fn tuning(field: &'static str, detail: impl Into<String>) -> Self {
        Self::InvalidTuning {
            field,
            detail: detail.into(),
        }
    }
}
