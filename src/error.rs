//! Error types for tessellation generation

use std::fmt;

/// Errors that can occur during tessellation generation or queries
#[derive(Debug, Clone)]
pub enum TessellationError {
    /// Configuration validation failed
    InvalidConfig(String),
    /// Generation failed due to a broken internal invariant
    ///
    /// This is fatal: it means the frontier bookkeeping handed the loop
    /// closer a polygon it cannot legally triangulate (a cycle shorter than
    /// three edges, or one with no convex corner left to clip).
    GenerationFailed(String),
    /// Requested disk handle does not exist
    DiskNotFound(usize),
}

impl fmt::Display for TessellationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TessellationError::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
            TessellationError::GenerationFailed(msg) => write!(f, "generation failed: {}", msg),
            TessellationError::DiskNotFound(id) => write!(f, "disk not found: {}", id),
        }
    }
}

impl std::error::Error for TessellationError {}

/// Result type alias for tessellation operations
pub type Result<T> = std::result::Result<T, TessellationError>;
