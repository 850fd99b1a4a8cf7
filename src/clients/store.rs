//! Client persistence.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::Deserialize;
use validator::Validate;

use super::id::generate_client_id;
use super::{DEFAULT_CLAIM_STATUS, FirstCheckStatus};
use crate::entities::client;
use crate::error::{AppError, Result};

/// Empty and whitespace-only strings become NULL; the forms send both.
fn clean(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewClient {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub alternate_phone: Option<String>,

    pub property_address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub property_type: Option<String>,

    pub insurance_company: Option<String>,
    pub policy_number: Option<String>,
    pub claim_number: Option<String>,
    pub deductible: Option<i64>,
    pub coverage_amount: Option<i64>,

    pub claim_status: Option<String>,
    #[serde(default)]
    pub supplemented: bool,
    #[serde(default)]
    pub first_check_status: FirstCheckStatus,

    pub date_of_loss: Option<DateTime<Utc>>,
    pub claim_submitted_date: Option<DateTime<Utc>>,
    pub scheduled_visit: Option<DateTime<Utc>>,
    pub adjustment_date: Option<DateTime<Utc>>,
    pub last_contact_date: Option<DateTime<Utc>>,
    pub next_contact_date: Option<DateTime<Utc>>,

    pub sales_person: Option<String>,
    pub assigned_adjuster: Option<String>,

    pub damage_type: Option<String>,
    pub damage_description: Option<String>,
    pub estimated_loss: Option<i64>,
    pub insurance_estimate: Option<i64>,
    pub first_check_amount: Option<i64>,
    pub actual_payout: Option<i64>,

    pub notes: Option<String>,
    pub internal_notes: Option<String>,
    pub construction_status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateClient {
    #[validate(length(min = 1, max = 100))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub last_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub alternate_phone: Option<String>,

    pub property_address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub property_type: Option<String>,

    pub insurance_company: Option<String>,
    pub policy_number: Option<String>,
    pub claim_number: Option<String>,
    pub deductible: Option<i64>,
    pub coverage_amount: Option<i64>,

    pub claim_status: Option<String>,
    pub supplemented: Option<bool>,
    pub first_check_status: Option<FirstCheckStatus>,

    pub date_of_loss: Option<DateTime<Utc>>,
    pub claim_submitted_date: Option<DateTime<Utc>>,
    pub scheduled_visit: Option<DateTime<Utc>>,
    pub adjustment_date: Option<DateTime<Utc>>,
    pub last_contact_date: Option<DateTime<Utc>>,
    pub next_contact_date: Option<DateTime<Utc>>,

    pub sales_person: Option<String>,
    pub assigned_adjuster: Option<String>,

    pub damage_type: Option<String>,
    pub damage_description: Option<String>,
    pub estimated_loss: Option<i64>,
    pub insurance_estimate: Option<i64>,
    pub first_check_amount: Option<i64>,
    pub actual_payout: Option<i64>,

    pub notes: Option<String>,
    pub internal_notes: Option<String>,
    pub construction_status: Option<String>,
}

/// SeaORM-backed client store.
#[derive(Clone)]
pub struct ClientStore {
    db: DatabaseConnection,
}

impl ClientStore {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self, org_id: i32) -> Result<Vec<client::Model>> {
        Ok(client::Entity::find()
            .filter(client::Column::OrganizationId.eq(org_id))
            .order_by_asc(client::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    pub async fn find_by_id(&self, org_id: i32, id: &str) -> Result<Option<client::Model>> {
        Ok(client::Entity::find_by_id(id)
            .filter(client::Column::OrganizationId.eq(org_id))
            .one(&self.db)
            .await?)
    }

    pub async fn get(&self, org_id: i32, id: &str) -> Result<client::Model> {
        self.find_by_id(org_id, id)
            .await?
            .ok_or_else(|| AppError::not_found("Client not found"))
    }

    /// Search on first name, last name, or the concatenated full name.
    pub async fn search(&self, org_id: i32, term: &str) -> Result<Vec<client::Model>> {
        let term = term.trim();
        if term.is_empty() {
            return self.list(org_id).await;
        }

        if term.contains(char::is_whitespace) {
            // Multi-word terms match against "first last".
            let needle = term.to_lowercase();
            let all = self.list(org_id).await?;
            return Ok(all
                .into_iter()
                .filter(|c| {
                    format!("{} {}", c.first_name, c.last_name)
                        .to_lowercase()
                        .contains(&needle)
                })
                .collect());
        }

        Ok(client::Entity::find()
            .filter(client::Column::OrganizationId.eq(org_id))
            .filter(
                Condition::any()
                    .add(client::Column::FirstName.contains(term))
                    .add(client::Column::LastName.contains(term)),
            )
            .all(&self.db)
            .await?)
    }

    /// Create a client with a generated semantic id.
    ///
    /// Same-day clients sharing city code and initials would collide on the
    /// generated id; a numeric suffix disambiguates them.
    pub async fn create(&self, org_id: i32, data: NewClient) -> Result<client::Model> {
        let base_id = generate_client_id(
            data.city.as_deref().unwrap_or(""),
            &data.first_name,
            &data.last_name,
        );

        let mut id = base_id.clone();
        let mut suffix = 2;
        while client::Entity::find_by_id(&id).one(&self.db).await?.is_some() {
            id = format!("{}-{}", base_id, suffix);
            suffix += 1;
        }

        tracing::debug!(org_id, client_id = %id, "creating client");

        let now = Utc::now();
        let model = client::ActiveModel {
            id: Set(id),
            organization_id: Set(org_id),
            first_name: Set(data.first_name),
            last_name: Set(data.last_name),
            email: Set(clean(data.email)),
            phone: Set(clean(data.phone)),
            alternate_phone: Set(clean(data.alternate_phone)),
            property_address: Set(clean(data.property_address)),
            city: Set(clean(data.city)),
            state: Set(clean(data.state)),
            zip_code: Set(clean(data.zip_code)),
            property_type: Set(clean(data.property_type)),
            insurance_company: Set(clean(data.insurance_company)),
            policy_number: Set(clean(data.policy_number)),
            claim_number: Set(clean(data.claim_number)),
            deductible: Set(data.deductible),
            coverage_amount: Set(data.coverage_amount),
            claim_status: Set(clean(data.claim_status)
                .unwrap_or_else(|| DEFAULT_CLAIM_STATUS.to_string())),
            supplemented: Set(data.supplemented),
            first_check_status: Set(data.first_check_status.as_str().to_string()),
            date_of_loss: Set(data.date_of_loss),
            claim_submitted_date: Set(data.claim_submitted_date),
            scheduled_visit: Set(data.scheduled_visit),
            adjustment_date: Set(data.adjustment_date),
            last_contact_date: Set(data.last_contact_date),
            next_contact_date: Set(data.next_contact_date),
            sales_person: Set(clean(data.sales_person)),
            assigned_adjuster: Set(clean(data.assigned_adjuster)),
            damage_type: Set(clean(data.damage_type)),
            damage_description: Set(clean(data.damage_description)),
            estimated_loss: Set(data.estimated_loss),
            insurance_estimate: Set(data.insurance_estimate),
            first_check_amount: Set(data.first_check_amount),
            actual_payout: Set(data.actual_payout),
            notes: Set(clean(data.notes)),
            internal_notes: Set(clean(data.internal_notes)),
            construction_status: Set(clean(data.construction_status)),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(model.insert(&self.db).await?)
    }

    pub async fn update(&self, org_id: i32, id: &str, data: UpdateClient) -> Result<client::Model> {
        let existing = self.get(org_id, id).await?;
        let mut active: client::ActiveModel = existing.into();

        macro_rules! set_if_some {
            ($field:ident) => {
                if let Some(value) = data.$field {
                    active.$field = Set(Some(value));
                }
            };
        }

        if let Some(first_name) = data.first_name {
            active.first_name = Set(first_name);
        }
        if let Some(last_name) = data.last_name {
            active.last_name = Set(last_name);
        }
        if let Some(claim_status) = data.claim_status {
            active.claim_status = Set(claim_status);
        }
        if let Some(supplemented) = data.supplemented {
            active.supplemented = Set(supplemented);
        }
        if let Some(first_check_status) = data.first_check_status {
            active.first_check_status = Set(first_check_status.as_str().to_string());
        }

        set_if_some!(email);
        set_if_some!(phone);
        set_if_some!(alternate_phone);
        set_if_some!(property_address);
        set_if_some!(city);
        set_if_some!(state);
        set_if_some!(zip_code);
        set_if_some!(property_type);
        set_if_some!(insurance_company);
        set_if_some!(policy_number);
        set_if_some!(claim_number);
        set_if_some!(deductible);
        set_if_some!(coverage_amount);
        set_if_some!(date_of_loss);
        set_if_some!(claim_submitted_date);
        set_if_some!(scheduled_visit);
        set_if_some!(adjustment_date);
        set_if_some!(last_contact_date);
        set_if_some!(next_contact_date);
        set_if_some!(sales_person);
        set_if_some!(assigned_adjuster);
        set_if_some!(damage_type);
        set_if_some!(damage_description);
        set_if_some!(estimated_loss);
        set_if_some!(insurance_estimate);
        set_if_some!(first_check_amount);
        set_if_some!(actual_payout);
        set_if_some!(notes);
        set_if_some!(internal_notes);
        set_if_some!(construction_status);

        active.updated_at = Set(Utc::now());

        Ok(active.update(&self.db).await?)
    }

    pub async fn delete(&self, org_id: i32, id: &str) -> Result<()> {
        let existing = self.get(org_id, id).await?;
        client::Entity::delete_by_id(existing.id)
            .exec(&self.db)
            .await?;
        tracing::info!(org_id, client_id = %id, "client deleted");
        Ok(())
    }
}
