//! Domain layer for content workflows.

pub mod errors;
pub mod featured;
pub mod forms;
pub mod media;
pub mod slug;
