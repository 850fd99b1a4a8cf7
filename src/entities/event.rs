use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Calendar event, optionally tied to a client. Adjustment events carry the
/// insurance adjuster's contact details.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub organization_id: i32,
    pub client_id: Option<String>,
    pub event_type: String,
    pub title: String,
    pub description: Option<String>,
    pub event_date: DateTimeUtc,
    /// "HH:MM"
    pub event_time: Option<String>,
    pub end_time: Option<String>,
    pub address: Option<String>,

    pub adjuster_name: Option<String>,
    pub adjuster_phone: Option<String>,
    pub adjuster_email: Option<String>,
    pub insurance_company: Option<String>,
    pub claim_number: Option<String>,

    pub status: String,
    pub notes: Option<String>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
