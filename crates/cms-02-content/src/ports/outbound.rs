//! Outbound ports.

/// Wall clock used for media names and `updated_at` stamps.
pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64;

    /// Current time as RFC 3339 text.
    fn now_rfc3339(&self) -> String;
}
