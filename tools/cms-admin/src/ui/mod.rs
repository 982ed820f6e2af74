//! UI module - TUI rendering components.
//!
//! - `layout.rs`: Header, body and footer
//! - `list_panel.rs`: Rows of the table being reordered
//! - `widgets/`: Reusable UI components

mod layout;
mod list_panel;

pub mod widgets;

pub use layout::render;
