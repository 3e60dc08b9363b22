//! # Verdicts
//!
//! Outcome of a pipeline traversal. Rejection is a value so that callers can
//! treat PRE and POST differently by matching on the tag.

use std::fmt;
use thiserror::Error;

/// Protocol error condition reported back to the sender of a rejected packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    BadRequest,
    Forbidden,
    NotAllowed,
    PolicyViolation,
    ServiceUnavailable,
}

impl Condition {
    /// Wire name of the condition element.
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::BadRequest => "bad-request",
            Condition::Forbidden => "forbidden",
            Condition::NotAllowed => "not-allowed",
            Condition::PolicyViolation => "policy-violation",
            Condition::ServiceUnavailable => "service-unavailable",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rejected packet or room event.
///
/// A rejection with no condition is dropped without any error being returned
/// to the sender.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rejection {
    /// Error condition returned to the sender.
    pub condition: Option<Condition>,
    /// Human-readable error text.
    pub reason: Option<String>,
    /// Text delivered to the sender as a notice message.
    pub notice: Option<String>,
}

impl Rejection {
    /// A rejection that is dropped silently.
    #[must_use]
    pub fn silent() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn new(condition: Condition) -> Self {
        Self {
            condition: Some(condition),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    #[must_use]
    pub fn with_notice(mut self, notice: impl Into<String>) -> Self {
        self.notice = Some(notice.into());
        self
    }

    /// `true` if nothing is reported back to the sender.
    pub fn is_silent(&self) -> bool {
        self.condition.is_none() && self.reason.is_none() && self.notice.is_none()
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.condition, &self.reason) {
            (Some(condition), Some(reason)) => write!(f, "rejected ({}): {}", condition, reason),
            (Some(condition), None) => write!(f, "rejected ({})", condition),
            (None, Some(reason)) => write!(f, "rejected: {}", reason),
            (None, None) => f.write_str("rejected silently"),
        }
    }
}

impl std::error::Error for Rejection {}

/// Result of a pipeline traversal.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Allowed,
    Rejected(Rejection),
}

impl Verdict {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Verdict::Allowed)
    }

    pub fn is_rejected(&self) -> bool {
        !self.is_allowed()
    }

    /// The rejection, if any.
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Verdict::Allowed => None,
            Verdict::Rejected(rejection) => Some(rejection),
        }
    }

    /// Convert into a `Result` for `?`-style callers.
    pub fn into_result(self) -> Result<(), Rejection> {
        match self {
            Verdict::Allowed => Ok(()),
            Verdict::Rejected(rejection) => Err(rejection),
        }
    }
}

/// Failure reported by a third-party interceptor or listener.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComponentFault {
    /// The component rejects the packet or event.
    #[error("{0}")]
    Rejected(Rejection),

    /// The component failed. Logged and otherwise ignored.
    #[error("Component failed: {0}")]
    Failed(String),
}

impl From<Rejection> for ComponentFault {
    fn from(rejection: Rejection) -> Self {
        ComponentFault::Rejected(rejection)
    }
}
