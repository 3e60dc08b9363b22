//! Adapters for the pipeline's outbound ports.

pub mod locality;

pub use locality::DomainLocality;
