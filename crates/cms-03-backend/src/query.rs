//! # PostgREST Query Construction
//!
//! Translates `ListQuery` values into the query-string dialect of the
//! backend's REST layer. Kept free of I/O so the wire form can be checked
//! without a server.
//!
//! ```text
//! ListQuery::new().eq("project_id", 7).order_by_nulls_last("sort", true)
//!   → select=*&order=sort.asc.nullslast&project_id=eq.7
//! ```

use shared_types::{ListQuery, OrderBy, RecordId};

/// Ask for the stored row back in the response.
pub const PREFER_RETURN: &str = "return=representation";

/// Upsert on primary key conflict and return the stored row.
pub const PREFER_UPSERT: &str = "resolution=merge-duplicates,return=representation";

/// Ask for a single JSON object instead of an array.
pub const ACCEPT_OBJECT: &str = "application/vnd.pgrst.object+json";

/// Status returned with `ACCEPT_OBJECT` when zero (or several) rows match.
pub const STATUS_NOT_SINGULAR: u16 = 406;

pub type QueryParams = Vec<(String, String)>;

/// One `order` term, e.g. `order.asc.nullslast`.
pub fn order_term(order: &OrderBy) -> String {
    let mut term = format!(
        "{}.{}",
        order.column,
        if order.ascending { "asc" } else { "desc" }
    );
    if order.nulls_last {
        term.push_str(".nullslast");
    }
    term
}

/// Equality filter value, `eq.<value>`.
pub fn eq_filter(value: impl std::fmt::Display) -> String {
    format!("eq.{}", value)
}

/// Query parameters of a list request.
pub fn list_params(query: &ListQuery) -> QueryParams {
    let mut params = vec![("select".to_string(), "*".to_string())];

    if !query.order.is_empty() {
        let terms: Vec<String> = query.order.iter().map(order_term).collect();
        params.push(("order".to_string(), terms.join(",")));
    }

    params.extend(
        query
            .filters
            .iter()
            .map(|(column, value)| (column.clone(), eq_filter(value))),
    );
    params
}

/// Query parameters selecting one row by primary key.
pub fn id_params(id: &RecordId) -> QueryParams {
    vec![
        ("select".to_string(), "*".to_string()),
        ("id".to_string(), eq_filter(id)),
    ]
}

/// Render parameters as a query string. Only used for logging.
pub fn render(params: &[(String, String)]) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}
