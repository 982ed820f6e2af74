//! # Folio CMS Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── src/integration/
//! │   ├── scenarios.rs     # Load, allocate, accept, reject across crates
//! │   └── http_backend.rs  # Content workflows over HTTP to a fake backend
//! └── benches/
//!     └── ordering_benchmarks.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p cms-tests
//! cargo bench -p cms-tests
//! ```

pub mod integration;
