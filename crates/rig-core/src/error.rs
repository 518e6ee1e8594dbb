//! Error types for rig-core.
//!
//! Nothing in the per-frame path returns these: missing input, missing models
//! and missing joints all degrade silently. Errors only come from building
//! things (configs, model descriptions) and from persistence.

use thiserror::Error;

/// Errors surfaced by configuration, model construction and storage.
#[derive(Debug, Error)]
pub enum RigError {
    /// A config field is out of its valid range.
    #[error("invalid config: {field} = {value}")]
    InvalidConfig {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f32,
    },

    /// A model description had no nodes.
    #[error("model has no nodes")]
    EmptyModel,

    /// Names and parent indices disagree in length.
    #[error("model description mismatch: {names} names, {parents} parents")]
    ModelShape {
        /// Number of node names.
        names: usize,
        /// Number of parent indices.
        parents: usize,
    },

    /// A node referenced a parent that is not declared before it.
    #[error("node {node} has invalid parent {parent}")]
    InvalidParent {
        /// Index of the node.
        node: usize,
        /// Parent index it referenced.
        parent: i32,
    },

    /// The storage backend refused a read or write.
    #[error("storage error: {0}")]
    Storage(String),

    /// Stored data could not be (de)serialized.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RigError>;
