//! Ports for content workflows.
//!
//! Tables and media go through `shared_types::{TableStore, MediaStore}`;
//! only the clock is specific to this crate.

pub mod outbound;

pub use outbound::Clock;
