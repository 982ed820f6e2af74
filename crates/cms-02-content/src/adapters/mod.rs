//! Adapters for content workflows.
//!
//! The in-memory stores stand in for the hosted backend in tests and in
//! the admin tool's demo mode.

pub mod clock;
pub mod memory;

pub use clock::{FixedClock, SystemClock};
pub use memory::{InMemoryMediaStore, InMemoryTableStore, OperationLog};
