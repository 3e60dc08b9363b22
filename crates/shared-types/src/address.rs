//! # Addresses
//!
//! `node@domain/resource` addresses for principals, rooms and server
//! components. Only the parts the gate needs are modelled.

use crate::errors::AddressError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An entity address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Jid {
    /// Local part (the principal id for user addresses).
    pub node: Option<String>,
    /// Server domain.
    pub domain: String,
    /// Connection-specific resource.
    pub resource: Option<String>,
}

impl Jid {
    /// Address of a bare domain (servers, components).
    pub fn domain(domain: impl Into<String>) -> Self {
        Self {
            node: None,
            domain: domain.into(),
            resource: None,
        }
    }

    /// Bare `node@domain` address.
    pub fn bare(node: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            node: Some(node.into()),
            domain: domain.into(),
            resource: None,
        }
    }

    /// Same address with a resource.
    #[must_use]
    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    /// The local part, if any.
    pub fn node(&self) -> Option<&str> {
        self.node.as_deref()
    }

    /// The address without its resource.
    #[must_use]
    pub fn to_bare(&self) -> Self {
        Self {
            node: self.node.clone(),
            domain: self.domain.clone(),
            resource: None,
        }
    }
}

impl FromStr for Jid {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(AddressError::Empty);
        }

        let (rest, resource) = match s.split_once('/') {
            Some((rest, resource)) => (rest, Some(resource.to_string())),
            None => (s, None),
        };
        let (node, domain) = match rest.split_once('@') {
            Some((node, domain)) => (Some(node.to_string()), domain),
            None => (None, rest),
        };
        if domain.is_empty() {
            return Err(AddressError::MissingDomain(s.to_string()));
        }

        Ok(Self {
            node: node.filter(|n| !n.is_empty()),
            domain: domain.to_string(),
            resource: resource.filter(|r| !r.is_empty()),
        })
    }
}

impl fmt::Display for Jid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(node) = &self.node {
            write!(f, "{}@", node)?;
        }
        f.write_str(&self.domain)?;
        if let Some(resource) = &self.resource {
            write!(f, "/{}", resource)?;
        }
        Ok(())
    }
}
