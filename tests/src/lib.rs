//! # Required-Gate Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Recording components shared by the flows
//! └── integration/      # Cross-crate flows
//!     ├── archiver.rs   # Declared-but-absent archiver end to end
//!     ├── persistence.rs
//!     ├── room_flows.rs
//!     └── concurrency.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p rg-tests
//!
//! # Benchmarks
//! cargo bench -p rg-tests
//! ```

pub mod fixtures;
pub mod integration;
