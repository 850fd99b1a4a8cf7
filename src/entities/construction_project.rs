use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Post-claim construction work for a client: roof/siding measurements,
/// permits, schedule, and costs. Roof fields feed the material-order
/// generator when no estimate extraction is supplied.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "construction_projects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub organization_id: i32,
    pub client_id: Option<String>,
    pub project_name: String,
    pub property_address: Option<String>,

    pub roof_type: Option<String>,
    pub roof_color: Option<String>,
    pub roof_squares: Option<i32>,
    pub siding_type: Option<String>,
    pub siding_color: Option<String>,
    pub siding_squares: Option<i32>,

    pub permit_number: Option<String>,
    pub permit_status: String,
    pub permit_date: Option<DateTimeUtc>,

    pub start_date: Option<DateTimeUtc>,
    pub estimated_completion_date: Option<DateTimeUtc>,
    pub actual_completion_date: Option<DateTimeUtc>,

    pub project_status: String,
    pub estimated_cost: Option<i64>,
    pub actual_cost: Option<i64>,

    pub contractor: Option<String>,
    pub project_manager: Option<String>,
    pub notes: Option<String>,
    pub special_requirements: Option<String>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
