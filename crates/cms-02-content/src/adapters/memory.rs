//! In-memory table and media stores.
//!
//! Both stores can share an `OperationLog` so tests can assert on the
//! interleaving of row and object operations.

use crate::domain::media::public_object_url;
use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use serde_json::{Map, Value};
use shared_types::{ListQuery, MediaStore, OrderBy, RecordId, StoreError, TableRecord, TableStore};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::atomic::{AtomicI64, Ordering as AtomicOrdering};
use std::sync::Arc;

/// Shared, ordered record of store operations (`"delete projects 3"`).
pub type OperationLog = Arc<Mutex<Vec<String>>>;

// =============================================================================
// TABLES
// =============================================================================

/// Table store holding JSON rows per table.
///
/// Ids are assigned from one counter shared by every table. Queued
/// failures are returned by the next calls, whatever their kind.
pub struct InMemoryTableStore {
    tables: RwLock<HashMap<String, Vec<Value>>>,
    next_id: AtomicI64,
    failures: Mutex<VecDeque<StoreError>>,
    log: OperationLog,
}

impl Default for InMemoryTableStore {
    fn default() -> Self {
        Self::with_log(OperationLog::default())
    }
}

impl InMemoryTableStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_log(log: OperationLog) -> Self {
        Self {
            tables: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
            failures: Mutex::new(VecDeque::new()),
            log,
        }
    }

    /// Store records directly, assigning ids where missing.
    pub fn seed<R: TableRecord>(&self, records: &[R]) -> Result<Vec<R>, StoreError> {
        records
            .iter()
            .map(|record| {
                let row = self.store_row(R::TABLE, serde_json::to_value(record)?)?;
                Ok(serde_json::from_value(row)?)
            })
            .collect()
    }

    /// Make the next call fail.
    pub fn fail_next(&self, error: StoreError) {
        self.failures.lock().push_back(error);
    }

    /// Current rows of a table.
    pub fn rows(&self, table: &str) -> Vec<Value> {
        self.tables.read().get(table).cloned().unwrap_or_default()
    }

    pub fn log(&self) -> Vec<String> {
        self.log.lock().clone()
    }

    fn record(&self, entry: String) -> Result<(), StoreError> {
        if let Some(error) = self.failures.lock().pop_front() {
            self.log.lock().push(format!("{} (failed)", entry));
            return Err(error);
        }
        self.log.lock().push(entry);
        Ok(())
    }

    fn store_row(&self, table: &str, row: Value) -> Result<Value, StoreError> {
        let Value::Object(mut fields) = row else {
            return Err(StoreError::Rejected {
                status: 400,
                message: "row must be a JSON object".to_string(),
            });
        };
        if fields.get("id").map_or(true, Value::is_null) {
            let id = self.next_id.fetch_add(1, AtomicOrdering::SeqCst);
            fields.insert("id".to_string(), Value::from(id));
        }

        let row = Value::Object(fields);
        self.tables
            .write()
            .entry(table.to_string())
            .or_default()
            .push(row.clone());
        Ok(row)
    }
}

fn id_matches(row: &Value, id: &RecordId) -> bool {
    match (row.get("id"), id) {
        (Some(Value::Number(n)), RecordId::Int(id)) => n.as_i64() == Some(*id),
        (Some(Value::String(s)), RecordId::Text(id)) => s == id,
        _ => false,
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn matches_filters(row: &Value, filters: &[(String, String)]) -> bool {
    filters.iter().all(|(column, expected)| {
        row.get(column)
            .map_or(false, |value| !value.is_null() && render(value) == *expected)
    })
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (a, b) => a.to_string().cmp(&b.to_string()),
    }
}

/// Postgres semantics: NULLs are largest, so they come last ascending and
/// first descending unless `nulls_last` is set.
fn compare_term(a: &Value, b: &Value, term: &OrderBy) -> Ordering {
    let a = a.get(&term.column).unwrap_or(&Value::Null);
    let b = b.get(&term.column).unwrap_or(&Value::Null);
    let nulls_last = term.nulls_last || term.ascending;

    match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) if nulls_last => Ordering::Greater,
        (true, false) => Ordering::Less,
        (false, true) if nulls_last => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) if term.ascending => compare_values(a, b),
        (false, false) => compare_values(a, b).reverse(),
    }
}

#[async_trait]
impl TableStore for InMemoryTableStore {
    async fn list(&self, table: &str, query: &ListQuery) -> Result<Vec<Value>, StoreError> {
        self.record(format!("list {}", table))?;

        let mut rows: Vec<Value> = self
            .rows(table)
            .into_iter()
            .filter(|row| matches_filters(row, &query.filters))
            .collect();
        rows.sort_by(|a, b| {
            query
                .order
                .iter()
                .map(|term| compare_term(a, b, term))
                .find(|ordering| *ordering != Ordering::Equal)
                .unwrap_or(Ordering::Equal)
        });
        Ok(rows)
    }

    async fn get(&self, table: &str, id: &RecordId) -> Result<Value, StoreError> {
        self.record(format!("get {} {}", table, id))?;

        self.rows(table)
            .into_iter()
            .find(|row| id_matches(row, id))
            .ok_or_else(|| StoreError::not_found(table, id))
    }

    async fn insert(&self, table: &str, row: Value) -> Result<Value, StoreError> {
        self.record(format!("insert {}", table))?;
        self.store_row(table, row)
    }

    async fn update(&self, table: &str, id: &RecordId, patch: Value) -> Result<Value, StoreError> {
        self.record(format!("update {} {}", table, id))?;

        let Value::Object(patch) = patch else {
            return Err(StoreError::Rejected {
                status: 400,
                message: "patch must be a JSON object".to_string(),
            });
        };

        let mut tables = self.tables.write();
        let row = tables
            .get_mut(table)
            .and_then(|rows| rows.iter_mut().find(|row| id_matches(row, id)))
            .ok_or_else(|| StoreError::not_found(table, id))?;
        merge(row, patch);
        Ok(row.clone())
    }

    async fn upsert(&self, table: &str, row: Value) -> Result<Value, StoreError> {
        self.record(format!("upsert {}", table))?;

        let id: Option<RecordId> = row
            .get("id")
            .filter(|id| !id.is_null())
            .and_then(|id| serde_json::from_value(id.clone()).ok());

        if let (Some(id), Value::Object(fields)) = (&id, &row) {
            let mut tables = self.tables.write();
            if let Some(existing) = tables
                .get_mut(table)
                .and_then(|rows| rows.iter_mut().find(|row| id_matches(row, id)))
            {
                merge(existing, fields.clone());
                return Ok(existing.clone());
            }
        }
        self.store_row(table, row)
    }

    async fn delete(&self, table: &str, id: &RecordId) -> Result<(), StoreError> {
        self.record(format!("delete {} {}", table, id))?;

        if let Some(rows) = self.tables.write().get_mut(table) {
            rows.retain(|row| !id_matches(row, id));
        }
        Ok(())
    }
}

fn merge(row: &mut Value, patch: Map<String, Value>) {
    if let Value::Object(fields) = row {
        fields.extend(patch);
    }
}

// =============================================================================
// MEDIA
// =============================================================================

struct StoredObject {
    content_type: String,
    bytes: Vec<u8>,
}

/// One media bucket held in memory.
pub struct InMemoryMediaStore {
    bucket: String,
    base_url: String,
    objects: RwLock<BTreeMap<String, StoredObject>>,
    failures: Mutex<VecDeque<StoreError>>,
    log: OperationLog,
}

impl InMemoryMediaStore {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self::with_log(bucket, OperationLog::default())
    }

    pub fn with_log(bucket: impl Into<String>, log: OperationLog) -> Self {
        Self {
            bucket: bucket.into(),
            base_url: "http://localhost".to_string(),
            objects: RwLock::new(BTreeMap::new()),
            failures: Mutex::new(VecDeque::new()),
            log,
        }
    }

    /// Make the next call fail.
    pub fn fail_next(&self, error: StoreError) {
        self.failures.lock().push_back(error);
    }

    pub fn contains(&self, path: &str) -> bool {
        self.objects.read().contains_key(path)
    }

    /// Stored object paths, sorted.
    pub fn paths(&self) -> Vec<String> {
        self.objects.read().keys().cloned().collect()
    }

    pub fn content_type(&self, path: &str) -> Option<String> {
        self.objects
            .read()
            .get(path)
            .map(|object| object.content_type.clone())
    }

    pub fn size(&self, path: &str) -> Option<usize> {
        self.objects.read().get(path).map(|object| object.bytes.len())
    }

    fn record(&self, entry: String) -> Result<(), StoreError> {
        if let Some(error) = self.failures.lock().pop_front() {
            self.log.lock().push(format!("{} (failed)", entry));
            return Err(error);
        }
        self.log.lock().push(entry);
        Ok(())
    }
}

#[async_trait]
impl MediaStore for InMemoryMediaStore {
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<String, StoreError> {
        self.record(format!("upload {}/{}", self.bucket, path))?;

        let mut objects = self.objects.write();
        if objects.contains_key(path) {
            return Err(StoreError::Rejected {
                status: 409,
                message: "The resource already exists".to_string(),
            });
        }
        objects.insert(
            path.to_string(),
            StoredObject {
                content_type: content_type.to_string(),
                bytes,
            },
        );
        Ok(path.to_string())
    }

    async fn remove(&self, path: &str) -> Result<(), StoreError> {
        self.record(format!("remove {}/{}", self.bucket, path))?;
        self.objects.write().remove(path);
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        public_object_url(&self.base_url, &self.bucket, path)
    }
}
