//! Locality by domain comparison.

use crate::ports::Locality;
use shared_types::Jid;

/// Treats every address in one server domain as local.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainLocality {
    domain: String,
}

impl DomainLocality {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }
}

impl Locality for DomainLocality {
    fn is_local(&self, address: &Jid) -> bool {
        address.domain.eq_ignore_ascii_case(&self.domain)
    }
}
