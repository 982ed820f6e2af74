//! Cross-crate integration tests.

mod http_backend;
mod scenarios;
