use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Maps an activity-type trigger to a task template. Multiple active rules
/// for the same trigger all fire independently.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "automation_rules")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub organization_id: i32,
    pub activity_type: String,
    pub task_title: String,
    pub task_description: Option<String>,
    pub role_id: Option<i32>,
    pub category: String,
    pub priority: String,
    pub due_in_days: Option<i32>,
    pub is_active: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
