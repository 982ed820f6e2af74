//! Domain layer for ordered collection reconciliation.
//!
//! Everything here is synchronous and free of I/O.

pub mod config;
pub mod errors;
pub mod input;
pub mod lifecycle;
pub mod list;
pub mod menu;
pub mod pending;
pub mod slots;
pub mod sort;
