use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Tenant root. Plan tier and extra seats drive the seat limit
/// (see `organizations::plans`).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "organizations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub business_type: Option<String>,
    pub plan_tier: String,
    pub extra_seats: i32,
    pub trial_ends_at: Option<DateTimeUtc>,
    pub subscription_status: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
