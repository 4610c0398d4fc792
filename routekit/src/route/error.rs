//! Error types for route construction.

use thiserror::Error;

/// Errors that can occur while building routes from already-split names.
///
/// Parsing and formatting never fail; only programmatic misuse does.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// A segment name contains the separator and cannot be a single segment.
    #[error("Node {index} '{name}' contains '/' at {position}")]
    InvalidSegment {
        name: String,
        /// Position of the offending name in the supplied sequence.
        index: usize,
        /// Byte offset of the separator inside the name.
        position: usize,
    },
}

impl RouteError {
    /// Attach the index of the name within a sequence.
    pub(crate) fn at_index(self, index: usize) -> Self {
        match self {
            RouteError::InvalidSegment { name, position, .. } => RouteError::InvalidSegment {
                name,
                index,
                position,
            },
        }
    }
}
