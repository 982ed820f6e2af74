//! Ports for the ordering service.

pub mod inbound;
pub mod outbound;
