//! CMS-Admin: terminal admin panel for the Folio CMS
//!
//! Reorders the records of one table (projects, intro banners, services or
//! about-page slides) through the optimistic order mutator.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  main.rs   event loop, terminal, one task per saved edit     │
//! ├──────────────────────────────────────────────────────────────┤
//! │  domain/   App model: keys → Commands, rows, notifications   │
//! │  panel.rs  OrderMutator + QueueNotifier of the open table    │
//! │  ui/       ratatui rendering of the App                      │
//! │  demo.rs   seeded in-memory backend (--demo)                 │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod demo;
pub mod domain;
pub mod panel;
pub mod ui;

pub use domain::{App, AppState, Command, Key, TableKind};
pub use panel::Panel;
