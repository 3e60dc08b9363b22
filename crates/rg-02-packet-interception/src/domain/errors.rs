//! Error types for the packet interception pipeline.

use thiserror::Error;

/// Interceptor chain management errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    /// Insertion index is past the end of the chain.
    #[error("Index {index} invalid for a chain of {len} interceptor(s)")]
    IndexOutOfBounds { index: usize, len: usize },
}
