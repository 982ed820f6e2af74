//! # Reordering Scenarios
//!
//! Drives the order mutator through `ContentService` over the in-memory
//! backend, the same wiring the admin panel uses.
//!
//! 1. Load: `[{1,2},{2,1},{3,-}]` displays as `[2,1,3]`
//! 2. Allocate: banners in slots `{1,3}` leave slot `2` for the next one
//! 3. Accept: id 2 moved from 1 to 5 lands last among defined orders
//! 4. Reject: id 2 reverts to the stored value, error shown, pending cleared

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use cms_01_ordering::{
        AllocationPolicy, ListState, MutationOutcome, MutationPhase, MutatorConfig, OrderMutator,
        QueueNotifier, BANNER_CAPACITY,
    };
    use cms_02_content::{
        ContentDependencies, ContentService, FixedClock, InMemoryMediaStore, InMemoryTableStore,
        TableOrders,
    };
    use shared_types::{IntroBanner, Project, RecordId, StoreError, TableRecord, TableStore};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    struct Scenario {
        tables: Arc<InMemoryTableStore>,
        content: ContentService,
        notifier: Arc<QueueNotifier>,
    }

    impl Scenario {
        fn new() -> Self {
            let tables = Arc::new(InMemoryTableStore::new());
            let content = ContentService::new(ContentDependencies {
                tables: tables.clone(),
                uploads: Arc::new(InMemoryMediaStore::new("uploads")),
                images: Arc::new(InMemoryMediaStore::new("images")),
                clock: Arc::new(FixedClock::new(1_700_000_000_000)),
            });
            Self {
                tables,
                content,
                notifier: Arc::new(QueueNotifier::new()),
            }
        }

        fn seed_projects(&self) {
            self.tables
                .seed(&[project(1, Some(2)), project(2, Some(1)), project(3, None)])
                .unwrap();
        }

        fn projects(&self) -> OrderMutator<Project, TableOrders> {
            self.content
                .mutator::<Project>(self.notifier.clone(), MutatorConfig::default())
        }
    }

    fn project(id: i64, order: Option<i64>) -> Project {
        Project {
            id: Some(RecordId::Int(id)),
            title: format!("Project {id}"),
            order,
            ..Default::default()
        }
    }

    fn ids(projects: &[Project]) -> Vec<i64> {
        projects
            .iter()
            .filter_map(|p| match p.id() {
                Some(RecordId::Int(id)) => Some(*id),
                _ => None,
            })
            .collect()
    }

    fn stored_order(scenario: &Scenario, id: i64) -> Option<i64> {
        scenario
            .tables
            .rows(Project::TABLE)
            .into_iter()
            .find(|row| row["id"] == id)
            .and_then(|row| row["order"].as_i64())
    }

    // =============================================================================
    // SCENARIOS
    // =============================================================================

    #[tokio::test]
    async fn test_scenario_1_load_sorts_missing_order_last() {
        let scenario = Scenario::new();
        scenario.seed_projects();
        let mutator = scenario.projects();

        assert_eq!(mutator.load().await.unwrap(), ListState::Populated(3));

        assert_eq!(ids(&mutator.snapshot()), vec![2, 1, 3]);
    }

    #[tokio::test]
    async fn test_scenario_2_banner_allocator_fills_gap() {
        let scenario = Scenario::new();
        scenario
            .tables
            .seed(&[
                IntroBanner {
                    order_index: Some(1),
                    ..Default::default()
                },
                IntroBanner {
                    order_index: Some(3),
                    ..Default::default()
                },
            ])
            .unwrap();

        assert_eq!(scenario.content.next_banner_slot().await.unwrap(), Some(2));

        let banners = scenario
            .content
            .mutator::<IntroBanner>(scenario.notifier.clone(), MutatorConfig::default());
        banners.load().await.unwrap();
        assert_eq!(
            banners.next_order(AllocationPolicy::Slots {
                capacity: BANNER_CAPACITY
            }),
            2
        );
    }

    #[tokio::test]
    async fn test_scenario_3_accepted_change_resorts() {
        let scenario = Scenario::new();
        scenario.seed_projects();
        let mutator = scenario.projects();
        mutator.load().await.unwrap();

        let outcome = mutator
            .change_order(&RecordId::Int(2), 5)
            .await
            .unwrap();

        assert_eq!(outcome, MutationOutcome::Reconciled);
        assert_eq!(ids(&mutator.snapshot()), vec![1, 2, 3]);
        assert_eq!(stored_order(&scenario, 2), Some(5));
        assert!(!mutator.is_pending(&RecordId::Int(2)));
        assert!(scenario.notifier.is_empty());
    }

    #[tokio::test]
    async fn test_scenario_4_rejected_change_reverts() {
        let scenario = Scenario::new();
        scenario.seed_projects();
        let mutator = scenario.projects();
        mutator.load().await.unwrap();

        scenario.tables.fail_next(StoreError::Rejected {
            status: 409,
            message: "conflict".into(),
        });
        let outcome = mutator
            .change_order(&RecordId::Int(2), 5)
            .await
            .unwrap();

        assert_eq!(
            outcome,
            MutationOutcome::RolledBack {
                authoritative: Some(1)
            }
        );
        let restored = mutator
            .snapshot()
            .into_iter()
            .find(|p| p.id() == Some(&RecordId::Int(2)))
            .unwrap();
        assert_eq!(restored.order, Some(1));
        assert_eq!(stored_order(&scenario, 2), Some(1));

        assert!(!mutator.is_pending(&RecordId::Int(2)));
        assert_eq!(mutator.phase_of(&RecordId::Int(2)), MutationPhase::Idle);

        let notifications = scenario.notifier.drain();
        assert_eq!(notifications.len(), 1);
        assert!(notifications[0].is_error());
    }

    #[tokio::test]
    async fn test_rollback_converges_to_concurrent_server_value() {
        let scenario = Scenario::new();
        scenario.seed_projects();
        let mutator = scenario.projects();
        mutator.load().await.unwrap();

        // Another editor moved id 2 after our load.
        scenario
            .tables
            .update(Project::TABLE, &RecordId::Int(2), serde_json::json!({"order": 7}))
            .await
            .unwrap();

        scenario
            .tables
            .fail_next(StoreError::Transport("connection reset".into()));
        let outcome = mutator
            .change_order(&RecordId::Int(2), 5)
            .await
            .unwrap();

        assert_eq!(
            outcome,
            MutationOutcome::RolledBack {
                authoritative: Some(7)
            }
        );
        let local = mutator
            .snapshot()
            .into_iter()
            .find(|p| p.id() == Some(&RecordId::Int(2)))
            .and_then(|p| p.order);
        assert_eq!(local, Some(7));
    }

    #[tokio::test]
    async fn test_deleting_a_project_leaves_order_gap() {
        let scenario = Scenario::new();
        scenario.seed_projects();

        scenario
            .content
            .delete_project(&RecordId::Int(2))
            .await
            .unwrap();

        let mutator = scenario.projects();
        mutator.load().await.unwrap();
        let orders: Vec<Option<i64>> = mutator.snapshot().iter().map(|p| p.order).collect();
        assert_eq!(orders, vec![Some(2), None]);
    }
}
