//! Service (offering) workflows.

use super::ContentService;
use crate::domain::errors::ContentResult;
use crate::domain::forms::ServiceDraft;
use cms_01_ordering::next_dense_order;
use shared_types::{ListQuery, RecordId, Service, TableStoreExt};

impl ContentService {
    pub async fn list_services(&self) -> ContentResult<Vec<Service>> {
        let query = ListQuery::new().order_by("order_index", true);
        Ok(self.tables.list_records::<Service>(&query).await?)
    }

    /// Create a service; without an explicit position it is appended.
    pub async fn create_service(&self, draft: &ServiceDraft) -> ContentResult<Service> {
        draft.validate()?;

        let order_index = match draft.order_index {
            Some(order) => order,
            None => next_dense_order(self.list_services().await?.len()),
        };
        let service = Service {
            id: None,
            title: draft.title.clone(),
            description: draft.description.clone(),
            order_index: Some(order_index),
        };
        Ok(self.tables.insert_record(&service).await?)
    }

    pub async fn update_service(&self, id: &RecordId, draft: &ServiceDraft) -> ContentResult<Service> {
        draft.validate()?;

        let mut patch = serde_json::json!({
            "title": draft.title,
            "description": draft.description,
        });
        if let Some(order) = draft.order_index {
            patch["order_index"] = order.into();
        }
        Ok(self.tables.update_record::<Service>(id, patch).await?)
    }

    /// Delete a service. Remaining services keep their positions.
    pub async fn delete_service(&self, id: &RecordId) -> ContentResult<()> {
        self.tables.delete_record::<Service>(id).await?;
        Ok(())
    }
}
