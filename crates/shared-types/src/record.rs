//! # Record Identity and Traits
//!
//! `RecordId` models the server-assigned primary key. Some tables use
//! bigint identities, others UUIDs, so the id is kept in whichever form the
//! backend sent it.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-assigned primary key of a row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    /// Integer identity column.
    Int(i64),
    /// Text or UUID key.
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(id) => write!(f, "{}", id),
            RecordId::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        RecordId::Int(id)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        RecordId::Text(id.to_string())
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        RecordId::Text(id)
    }
}

/// A row type stored in a named backend table.
pub trait TableRecord: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Table name on the backend.
    const TABLE: &'static str;

    /// Primary key, `None` before the row has been inserted.
    fn id(&self) -> Option<&RecordId>;
}

/// A row whose display position is driven by an integer order column.
///
/// The column is optional on the wire: rows without a value sort after
/// every row that has one.
pub trait Orderable: TableRecord {
    /// Column holding the order value (`order`, `order_index`, `sort`).
    const ORDER_FIELD: &'static str;

    /// Current order value.
    fn order(&self) -> Option<i64>;

    /// Replace the order value.
    fn set_order(&mut self, order: Option<i64>);

    /// Short human label used by list views.
    fn label(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_keeps_wire_form() {
        let int: RecordId = serde_json::from_str("42").unwrap();
        let text: RecordId = serde_json::from_str("\"7f3c-uuid\"").unwrap();

        assert_eq!(int, RecordId::Int(42));
        assert_eq!(text, RecordId::Text("7f3c-uuid".into()));
        assert_eq!(serde_json::to_string(&int).unwrap(), "42");
        assert_eq!(text.to_string(), "7f3c-uuid");
    }
}
