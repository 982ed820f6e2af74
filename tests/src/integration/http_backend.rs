//! # Reordering over HTTP
//!
//! Runs the order mutator through the REST adapter against an in-process
//! PostgREST stand-in that keeps a `projects` table in memory.

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use axum::body::Bytes;
    use axum::extract::{Query, State};
    use axum::http::{header, Method, StatusCode, Uri};
    use axum::response::IntoResponse;
    use axum::Router;
    use parking_lot::Mutex;
    use serde_json::{json, Value};

    use cms_01_ordering::{MutationOutcome, MutatorConfig, QueueNotifier};
    use cms_02_content::{ContentDependencies, ContentService, FixedClock};
    use cms_03_backend::{BackendClient, BackendConfig};
    use shared_types::{Project, RecordId, TableRecord};

    // =============================================================================
    // FAKE POSTGREST
    // =============================================================================

    #[derive(Default)]
    struct FakeTable {
        rows: Mutex<Vec<Value>>,
        reject_writes: AtomicBool,
        patches: Mutex<Vec<(String, Value)>>,
    }

    impl FakeTable {
        fn order_of(&self, id: i64) -> Option<i64> {
            self.rows
                .lock()
                .iter()
                .find(|row| row["id"] == id)
                .and_then(|row| row["order"].as_i64())
        }
    }

    fn id_filter(query: &[(String, String)]) -> Option<i64> {
        query
            .iter()
            .find(|(key, _)| key == "id")
            .and_then(|(_, value)| value.strip_prefix("eq."))
            .and_then(|id| id.parse().ok())
    }

    async fn handle(
        State(table): State<Arc<FakeTable>>,
        method: Method,
        uri: Uri,
        Query(query): Query<Vec<(String, String)>>,
        body: Bytes,
    ) -> impl IntoResponse {
        let (status, payload) = if uri.path() != "/rest/v1/projects" {
            (StatusCode::NOT_FOUND, json!({"message": "relation does not exist"}))
        } else {
            match (method, id_filter(&query)) {
                (Method::GET, None) => (StatusCode::OK, Value::Array(table.rows.lock().clone())),
                (Method::GET, Some(id)) => match table.rows.lock().iter().find(|row| row["id"] == id) {
                    Some(row) => (StatusCode::OK, row.clone()),
                    None => (
                        StatusCode::NOT_ACCEPTABLE,
                        json!({"code": "PGRST116", "message": "no rows returned"}),
                    ),
                },
                (Method::PATCH, Some(id)) => {
                    let patch: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
                    table.patches.lock().push((id.to_string(), patch.clone()));
                    if table.reject_writes.load(Ordering::SeqCst) {
                        (
                            StatusCode::FORBIDDEN,
                            json!({"message": "new row violates row-level security policy"}),
                        )
                    } else {
                        let mut rows = table.rows.lock();
                        match rows.iter_mut().find(|row| row["id"] == id) {
                            Some(row) => {
                                if let (Some(row), Some(patch)) = (row.as_object_mut(), patch.as_object()) {
                                    for (key, value) in patch {
                                        row.insert(key.clone(), value.clone());
                                    }
                                }
                                (StatusCode::OK, row.clone())
                            }
                            None => (StatusCode::NOT_ACCEPTABLE, json!({"message": "no rows"})),
                        }
                    }
                }
                _ => (StatusCode::METHOD_NOT_ALLOWED, json!({"message": "unsupported"})),
            }
        };

        (status, [(header::CONTENT_TYPE, "application/json")], payload.to_string())
    }

    async fn spawn_postgrest(rows: Vec<Value>) -> (ContentService, Arc<FakeTable>) {
        let table = Arc::new(FakeTable {
            rows: Mutex::new(rows),
            ..Default::default()
        });
        let app = Router::new().fallback(handle).with_state(table.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let backend = BackendClient::new(BackendConfig::new(format!("http://{addr}"), "anon-key")).unwrap();
        (content_over(&backend), table)
    }

    fn content_over(backend: &BackendClient) -> ContentService {
        ContentService::new(ContentDependencies {
            tables: Arc::new(backend.tables()),
            uploads: Arc::new(backend.uploads()),
            images: Arc::new(backend.images()),
            clock: Arc::new(FixedClock::new(1_700_000_000_000)),
        })
    }

    fn seeded_rows() -> Vec<Value> {
        vec![
            json!({"id": 1, "title": "Atlas Rebrand", "slug": "atlas-rebrand", "order": 2}),
            json!({"id": 2, "title": "Birch Editorial", "slug": "birch-editorial", "order": 1}),
            json!({"id": 3, "title": "Cedar Packaging", "slug": "cedar-packaging", "order": null}),
        ]
    }

    fn ids(projects: &[Project]) -> Vec<String> {
        projects
            .iter()
            .filter_map(|p| p.id().map(ToString::to_string))
            .collect()
    }

    // =============================================================================
    // ROUND TRIPS
    // =============================================================================

    #[tokio::test]
    async fn test_accepted_edit_patches_single_column() {
        let (content, table) = spawn_postgrest(seeded_rows()).await;
        let notifier = Arc::new(QueueNotifier::new());
        let mutator = content.mutator::<Project>(notifier.clone(), MutatorConfig::default());

        mutator.load().await.unwrap();
        assert_eq!(ids(&mutator.snapshot()), vec!["2", "1", "3"]);

        let outcome = mutator.change_order(&RecordId::Int(2), 5).await.unwrap();

        assert_eq!(outcome, MutationOutcome::Reconciled);
        assert_eq!(ids(&mutator.snapshot()), vec!["1", "2", "3"]);
        assert_eq!(table.order_of(2), Some(5));
        assert_eq!(
            table.patches.lock().clone(),
            vec![("2".to_string(), json!({"order": 5}))]
        );
        assert!(notifier.is_empty());
    }

    #[tokio::test]
    async fn test_forbidden_edit_rolls_back_from_server() {
        let (content, table) = spawn_postgrest(seeded_rows()).await;
        let notifier = Arc::new(QueueNotifier::new());
        let mutator = content.mutator::<Project>(notifier.clone(), MutatorConfig::default());
        mutator.load().await.unwrap();

        table.reject_writes.store(true, Ordering::SeqCst);
        let outcome = mutator.change_order(&RecordId::Int(2), 5).await.unwrap();

        assert_eq!(
            outcome,
            MutationOutcome::RolledBack {
                authoritative: Some(1)
            }
        );
        assert_eq!(ids(&mutator.snapshot()), vec!["2", "1", "3"]);
        assert!(!mutator.is_pending(&RecordId::Int(2)));

        let notifications = notifier.drain();
        assert_eq!(notifications.len(), 1);
        assert!(notifications[0].is_error());
        assert!(notifications[0].text.starts_with("Order update failed"));
    }

    #[tokio::test]
    async fn test_deleted_row_rolls_back_to_missing() {
        let (content, table) = spawn_postgrest(seeded_rows()).await;
        let notifier = Arc::new(QueueNotifier::new());
        let mutator = content.mutator::<Project>(notifier.clone(), MutatorConfig::default());
        mutator.load().await.unwrap();

        // Someone else deleted the row; the PATCH and the re-fetch both miss.
        table.rows.lock().retain(|row| row["id"] != 3);
        let outcome = mutator.change_order(&RecordId::Int(3), 4).await.unwrap();

        assert!(matches!(outcome, MutationOutcome::RollbackFailed { .. }));
        assert!(!mutator.is_pending(&RecordId::Int(3)));
        assert!(notifier.drain().iter().all(|n| n.is_error()));
    }

    #[tokio::test]
    async fn test_unreachable_backend_reports_load_failure() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let backend = BackendClient::new(BackendConfig::new(format!("http://{addr}"), "anon-key")).unwrap();
        let content = content_over(&backend);
        let notifier = Arc::new(QueueNotifier::new());
        let mutator = content.mutator::<Project>(notifier.clone(), MutatorConfig::default());

        assert!(mutator.load().await.is_err());
        let notifications = notifier.drain();
        assert_eq!(notifications.len(), 1);
        assert!(notifications[0].text.starts_with("Could not load projects"));
    }
}
