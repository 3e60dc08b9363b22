//! Error types for the required-component gate.

use std::io;
use thiserror::Error;

/// Registration errors. These are programming errors of the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateError {
    /// A live registration already uses this name.
    #[error("Required component already registered with the name '{name}'")]
    DuplicateName { name: String },

    /// The registration request is malformed.
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },
}

/// Property store failures.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying I/O failed.
    #[error("Property store I/O error: {0}")]
    Io(#[from] io::Error),

    /// Stored data could not be decoded.
    #[error("Property store is corrupt: {0}")]
    Corrupt(String),
}
