use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// File metadata attached to a client or a construction project.
/// `file_url` points at external storage; upload handling lives outside
/// this service.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "documents")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub organization_id: i32,
    pub client_id: Option<String>,
    pub construction_project_id: Option<i32>,
    pub document_type: String,
    pub file_name: String,
    pub file_url: String,
    pub mime_type: Option<String>,
    pub file_size: Option<i64>,
    pub description: Option<String>,
    /// JSON array of tags, stored as text.
    pub tags: Option<String>,
    pub uploaded_by: Option<i32>,
    pub uploaded_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
