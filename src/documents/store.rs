//! Document metadata persistence.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::Deserialize;
use validator::Validate;

use super::types::DocumentType;
use crate::entities::document;
use crate::error::{AppError, Result};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewDocument {
    pub client_id: Option<String>,
    pub construction_project_id: Option<i32>,
    #[serde(default)]
    pub document_type: DocumentType,
    #[validate(length(min = 1, max = 255))]
    pub file_name: String,
    #[validate(url)]
    pub file_url: String,
    pub mime_type: Option<String>,
    #[validate(range(min = 0))]
    pub file_size: Option<i64>,
    pub description: Option<String>,
    /// JSON array of tags.
    pub tags: Option<String>,
    pub uploaded_by: Option<i32>,
}

#[derive(Clone)]
pub struct DocumentStore {
    db: DatabaseConnection,
}

impl DocumentStore {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list_by_client(
        &self,
        org_id: i32,
        client_id: &str,
    ) -> Result<Vec<document::Model>> {
        Ok(document::Entity::find()
            .filter(document::Column::OrganizationId.eq(org_id))
            .filter(document::Column::ClientId.eq(client_id))
            .order_by_desc(document::Column::UploadedAt)
            .all(&self.db)
            .await?)
    }

    pub async fn list_by_project(
        &self,
        org_id: i32,
        project_id: i32,
    ) -> Result<Vec<document::Model>> {
        Ok(document::Entity::find()
            .filter(document::Column::OrganizationId.eq(org_id))
            .filter(document::Column::ConstructionProjectId.eq(project_id))
            .order_by_desc(document::Column::UploadedAt)
            .all(&self.db)
            .await?)
    }

    pub async fn create(&self, org_id: i32, data: NewDocument) -> Result<document::Model> {
        if data.client_id.is_none() && data.construction_project_id.is_none() {
            return Err(AppError::bad_request(
                "A document must reference a client or a construction project",
            ));
        }

        Ok(document::ActiveModel {
            organization_id: Set(org_id),
            client_id: Set(data.client_id),
            construction_project_id: Set(data.construction_project_id),
            document_type: Set(data.document_type.as_str().to_string()),
            file_name: Set(data.file_name),
            file_url: Set(data.file_url),
            mime_type: Set(data.mime_type),
            file_size: Set(data.file_size),
            description: Set(data.description),
            tags: Set(data.tags),
            uploaded_by: Set(data.uploaded_by),
            uploaded_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?)
    }

    pub async fn delete(&self, org_id: i32, id: i32) -> Result<()> {
        let existing = document::Entity::find_by_id(id)
            .filter(document::Column::OrganizationId.eq(org_id))
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("Document not found"))?;

        document::Entity::delete_by_id(existing.id)
            .exec(&self.db)
            .await?;
        Ok(())
    }
}
