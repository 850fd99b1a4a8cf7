//! Activity log persistence.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use serde::Deserialize;
use validator::Validate;

use super::types::ActivityType;
use crate::entities::activity_log;
use crate::error::Result;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewActivityLog {
    pub client_id: Option<String>,
    pub activity_type: ActivityType,
    #[validate(length(max = 200))]
    pub subject: Option<String>,
    pub description: Option<String>,
    pub outcome: Option<String>,
    pub contact_method: Option<String>,
    #[validate(range(min = 0))]
    pub duration_minutes: Option<i32>,
    pub performed_by: Option<i32>,
    /// Defaults to now when omitted.
    pub performed_at: Option<DateTime<Utc>>,
}

#[derive(Clone)]
pub struct ActivityStore {
    db: DatabaseConnection,
}

impl ActivityStore {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list_by_client(
        &self,
        org_id: i32,
        client_id: &str,
    ) -> Result<Vec<activity_log::Model>> {
        Ok(activity_log::Entity::find()
            .filter(activity_log::Column::OrganizationId.eq(org_id))
            .filter(activity_log::Column::ClientId.eq(client_id))
            .order_by_desc(activity_log::Column::PerformedAt)
            .all(&self.db)
            .await?)
    }

    pub async fn list_recent(&self, org_id: i32, limit: u64) -> Result<Vec<activity_log::Model>> {
        Ok(activity_log::Entity::find()
            .filter(activity_log::Column::OrganizationId.eq(org_id))
            .order_by_desc(activity_log::Column::PerformedAt)
            .limit(limit)
            .all(&self.db)
            .await?)
    }

    pub async fn create(&self, org_id: i32, data: NewActivityLog) -> Result<activity_log::Model> {
        let now = Utc::now();
        let model = activity_log::ActiveModel {
            organization_id: Set(org_id),
            client_id: Set(data.client_id),
            activity_type: Set(data.activity_type.as_str().to_string()),
            subject: Set(data.subject),
            description: Set(data.description),
            outcome: Set(data.outcome),
            contact_method: Set(data.contact_method),
            duration_minutes: Set(data.duration_minutes),
            performed_by: Set(data.performed_by),
            performed_at: Set(data.performed_at.unwrap_or(now)),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        tracing::debug!(
            org_id,
            log_id = model.id,
            activity_type = %model.activity_type,
            "activity log recorded"
        );

        Ok(model)
    }
}
