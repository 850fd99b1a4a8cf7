//! Custom claim statuses.
//!
//! Admins extend the built-in status set with org-specific values shown in
//! the status dropdown alongside the defaults.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::Deserialize;
use validator::Validate;

use crate::entities::custom_claim_status;
use crate::error::{AppError, Result};

#[derive(Debug, Deserialize, Validate)]
pub struct NewCustomStatus {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub display_name: String,
    pub color: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Clone)]
pub struct StatusStore {
    db: DatabaseConnection,
}

impl StatusStore {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self, org_id: i32) -> Result<Vec<custom_claim_status::Model>> {
        Ok(custom_claim_status::Entity::find()
            .filter(custom_claim_status::Column::OrganizationId.eq(org_id))
            .filter(custom_claim_status::Column::IsActive.eq(true))
            .order_by_asc(custom_claim_status::Column::SortOrder)
            .all(&self.db)
            .await?)
    }

    pub async fn create(
        &self,
        org_id: i32,
        data: NewCustomStatus,
    ) -> Result<custom_claim_status::Model> {
        let duplicate = custom_claim_status::Entity::find()
            .filter(custom_claim_status::Column::OrganizationId.eq(org_id))
            .filter(custom_claim_status::Column::Name.eq(&data.name))
            .one(&self.db)
            .await?
            .is_some();
        if duplicate {
            return Err(AppError::conflict(format!(
                "Claim status '{}' already exists",
                data.name
            )));
        }

        Ok(custom_claim_status::ActiveModel {
            organization_id: Set(org_id),
            name: Set(data.name),
            display_name: Set(data.display_name),
            color: Set(data.color),
            sort_order: Set(data.sort_order),
            is_active: Set(true),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?)
    }

    pub async fn delete(&self, org_id: i32, id: i32) -> Result<()> {
        let existing = custom_claim_status::Entity::find_by_id(id)
            .filter(custom_claim_status::Column::OrganizationId.eq(org_id))
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("Claim status not found"))?;

        custom_claim_status::Entity::delete_by_id(existing.id)
            .exec(&self.db)
            .await?;
        Ok(())
    }
}
