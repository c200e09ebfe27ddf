//! Error types for the toolkit

use crate::id::NodeId;
use thiserror::Error;

/// Toolkit errors.
///
/// Per-frame logic never produces these; they come from explicit scene edits,
/// checked handle lookups and configuration validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HuxError {
    /// Node is not (or no longer) part of the scene
    #[error("Scene node not found: {0}")]
    NodeNotFound(NodeId),

    /// Handle index outside the current handle set
    #[error("Handle index {index} out of range (handle set has {len} handles)")]
    HandleIndexOutOfRange { index: usize, len: usize },

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// App bar received more custom buttons than it can lay out
    #[error("Too many custom buttons: {count} (max {max})")]
    TooManyCustomButtons { count: usize, max: usize },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, HuxError>;
