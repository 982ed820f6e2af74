//! Adapters for the ordering ports.

pub mod memory;
pub mod notifier;
pub mod table;

pub use memory::InMemoryOrderStore;
pub use notifier::{QueueNotifier, TracingNotifier};
pub use table::TableOrderStore;
