//! Domain models for the admin panel.

mod app;
mod table;

pub use app::{App, AppState, Command, Key, OrderEdit, MAX_INPUT_DIGITS, NOTIFICATION_LIMIT};
pub use table::TableKind;
