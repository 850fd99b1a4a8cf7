//! Dashboard KPI queries over clients.

use chrono::{Duration, Utc};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use serde::Serialize;
use std::collections::BTreeMap;

use super::{DEFAULT_CLAIM_STATUS, READY_FOR_CONSTRUCTION_STATUS};
use crate::entities::client;
use crate::error::Result;

/// KPI bucket: a count plus the matching clients.
#[derive(Debug, Serialize)]
pub struct ClientBucket {
    pub count: usize,
    pub clients: Vec<client::Model>,
}

impl ClientBucket {
    fn new(clients: Vec<client::Model>) -> Self {
        Self {
            count: clients.len(),
            clients,
        }
    }
}

/// Per-status grouping for the status breakdown card.
#[derive(Debug, Serialize)]
pub struct StatusCount {
    pub status: String,
    pub count: usize,
    pub clients: Vec<ClientSummary>,
}

#[derive(Debug, Serialize)]
pub struct ClientSummary {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Clone)]
pub struct DashboardStore {
    db: DatabaseConnection,
}

impl DashboardStore {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn total_clients(&self, org_id: i32) -> Result<ClientBucket> {
        let clients = client::Entity::find()
            .filter(client::Column::OrganizationId.eq(org_id))
            .all(&self.db)
            .await?;
        Ok(ClientBucket::new(clients))
    }

    /// Clients whose last contact is older than `days_threshold` days.
    pub async fn late_contact(&self, org_id: i32, days_threshold: i64) -> Result<ClientBucket> {
        let threshold = Utc::now() - Duration::days(days_threshold);
        let clients = client::Entity::find()
            .filter(client::Column::OrganizationId.eq(org_id))
            .filter(client::Column::LastContactDate.lt(threshold))
            .all(&self.db)
            .await?;
        Ok(ClientBucket::new(clients))
    }

    pub async fn not_supplemented(&self, org_id: i32) -> Result<ClientBucket> {
        let clients = client::Entity::find()
            .filter(client::Column::OrganizationId.eq(org_id))
            .filter(client::Column::Supplemented.eq(false))
            .all(&self.db)
            .await?;
        Ok(ClientBucket::new(clients))
    }

    pub async fn pending_submission(&self, org_id: i32) -> Result<ClientBucket> {
        let clients = client::Entity::find()
            .filter(client::Column::OrganizationId.eq(org_id))
            .filter(client::Column::ClaimStatus.eq(DEFAULT_CLAIM_STATUS))
            .all(&self.db)
            .await?;
        Ok(ClientBucket::new(clients))
    }

    pub async fn ready_for_construction(&self, org_id: i32) -> Result<ClientBucket> {
        let clients = client::Entity::find()
            .filter(client::Column::OrganizationId.eq(org_id))
            .filter(client::Column::ClaimStatus.eq(READY_FOR_CONSTRUCTION_STATUS))
            .all(&self.db)
            .await?;
        Ok(ClientBucket::new(clients))
    }

    /// Clients with a contact scheduled within the next `days_ahead` days.
    pub async fn upcoming_contacts(&self, org_id: i32, days_ahead: i64) -> Result<ClientBucket> {
        let now = Utc::now();
        let clients = client::Entity::find()
            .filter(client::Column::OrganizationId.eq(org_id))
            .filter(client::Column::NextContactDate.gte(now))
            .filter(client::Column::NextContactDate.lte(now + Duration::days(days_ahead)))
            .all(&self.db)
            .await?;
        Ok(ClientBucket::new(clients))
    }

    /// Counts grouped by claim status, built-in and custom alike.
    pub async fn by_claim_status(&self, org_id: i32) -> Result<Vec<StatusCount>> {
        let clients = client::Entity::find()
            .filter(client::Column::OrganizationId.eq(org_id))
            .all(&self.db)
            .await?;

        let mut groups: BTreeMap<String, Vec<ClientSummary>> = BTreeMap::new();
        for client in clients {
            groups
                .entry(client.claim_status.clone())
                .or_default()
                .push(ClientSummary {
                    id: client.id,
                    first_name: client.first_name,
                    last_name: client.last_name,
                    email: client.email,
                    phone: client.phone,
                });
        }

        Ok(groups
            .into_iter()
            .map(|(status, clients)| StatusCount {
                status,
                count: clients.len(),
                clients,
            })
            .collect())
    }
}
