//! Adapters for the gate's outbound ports.

pub mod memory;

pub use memory::InMemoryPropertyStore;
