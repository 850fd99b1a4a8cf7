use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Client/case record.
///
/// The primary key is a generated semantic id:
/// `[2-letter city][YYYYMMDD][initials]`, e.g. `CH20250114JD`
/// (see `clients::id::generate_client_id`). `claim_status` is a free string
/// so organizations can extend the built-in status set with custom ones.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "clients")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub organization_id: i32,

    // Contact
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub alternate_phone: Option<String>,

    // Property
    pub property_address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub property_type: Option<String>,

    // Insurer
    pub insurance_company: Option<String>,
    pub policy_number: Option<String>,
    pub claim_number: Option<String>,
    pub deductible: Option<i64>,
    pub coverage_amount: Option<i64>,

    // Claim state
    pub claim_status: String,
    pub supplemented: bool,
    pub first_check_status: String,

    // Key dates
    pub date_of_loss: Option<DateTimeUtc>,
    pub claim_submitted_date: Option<DateTimeUtc>,
    pub scheduled_visit: Option<DateTimeUtc>,
    pub adjustment_date: Option<DateTimeUtc>,
    pub last_contact_date: Option<DateTimeUtc>,
    pub next_contact_date: Option<DateTimeUtc>,

    // Assignment
    pub sales_person: Option<String>,
    pub assigned_adjuster: Option<String>,

    // Damage and money
    pub damage_type: Option<String>,
    pub damage_description: Option<String>,
    pub estimated_loss: Option<i64>,
    pub insurance_estimate: Option<i64>,
    pub first_check_amount: Option<i64>,
    pub actual_payout: Option<i64>,

    pub notes: Option<String>,
    pub internal_notes: Option<String>,
    pub construction_status: Option<String>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
