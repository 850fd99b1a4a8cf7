use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Timestamped record of an interaction or milestone on a client.
/// Creating one is what triggers automation rule matching.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "activity_logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub organization_id: i32,
    pub client_id: Option<String>,
    /// One of the `activity::ActivityType` values.
    pub activity_type: String,
    pub subject: Option<String>,
    pub description: Option<String>,
    pub outcome: Option<String>,
    pub contact_method: Option<String>,
    pub duration_minutes: Option<i32>,
    pub performed_by: Option<i32>,
    pub performed_at: DateTimeUtc,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
