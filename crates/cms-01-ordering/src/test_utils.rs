//! Fixtures shared by unit tests.

use shared_types::{Project, RecordId, TableRecord};

pub fn project(id: i64, order: Option<i64>) -> Project {
    Project {
        id: Some(RecordId::Int(id)),
        title: format!("Project {}", id),
        slug: format!("project-{}", id),
        order,
        ..Default::default()
    }
}

pub fn ids(records: &[Project]) -> Vec<i64> {
    records
        .iter()
        .filter_map(|record| match record.id() {
            Some(RecordId::Int(id)) => Some(*id),
            _ => None,
        })
        .collect()
}
