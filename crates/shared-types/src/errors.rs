//! # Error Types
//!
//! Defines error types used across the gate crates.

use thiserror::Error;

/// A category token that does not name any member of its enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown {kind} category: '{token}'")]
pub struct UnknownCategory {
    /// Enumeration the token was parsed against.
    pub kind: &'static str,
    /// The offending token.
    pub token: String,
}

/// Errors raised while parsing an address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// Address text is empty.
    #[error("Address is empty")]
    Empty,

    /// Address has no domain part.
    #[error("Address has no domain: '{0}'")]
    MissingDomain(String),
}
