//! Event persistence, including wholesale attendee replacement.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use serde::Deserialize;
use validator::Validate;

use super::types::{EventStatus, EventType};
use crate::entities::{event, event_attendee};
use crate::error::{AppError, Result};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewEvent {
    pub client_id: Option<String>,
    #[serde(default)]
    pub event_type: EventType,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: Option<String>,
    pub event_date: DateTime<Utc>,
    /// "HH:MM"
    pub event_time: Option<String>,
    pub end_time: Option<String>,
    pub address: Option<String>,
    pub adjuster_name: Option<String>,
    pub adjuster_phone: Option<String>,
    #[validate(email)]
    pub adjuster_email: Option<String>,
    pub insurance_company: Option<String>,
    pub claim_number: Option<String>,
    #[serde(default)]
    pub status: EventStatus,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateEvent {
    pub client_id: Option<String>,
    pub event_type: Option<EventType>,
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub event_date: Option<DateTime<Utc>>,
    pub event_time: Option<String>,
    pub end_time: Option<String>,
    pub address: Option<String>,
    pub adjuster_name: Option<String>,
    pub adjuster_phone: Option<String>,
    #[validate(email)]
    pub adjuster_email: Option<String>,
    pub insurance_company: Option<String>,
    pub claim_number: Option<String>,
    pub status: Option<EventStatus>,
    pub notes: Option<String>,
}

#[derive(Clone)]
pub struct EventStore {
    db: DatabaseConnection,
}

impl EventStore {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self, org_id: i32) -> Result<Vec<event::Model>> {
        Ok(event::Entity::find()
            .filter(event::Column::OrganizationId.eq(org_id))
            .order_by_asc(event::Column::EventDate)
            .all(&self.db)
            .await?)
    }

    pub async fn get(&self, org_id: i32, id: i32) -> Result<event::Model> {
        event::Entity::find_by_id(id)
            .filter(event::Column::OrganizationId.eq(org_id))
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("Event not found"))
    }

    pub async fn list_by_client(&self, org_id: i32, client_id: &str) -> Result<Vec<event::Model>> {
        Ok(event::Entity::find()
            .filter(event::Column::OrganizationId.eq(org_id))
            .filter(event::Column::ClientId.eq(client_id))
            .order_by_asc(event::Column::EventDate)
            .all(&self.db)
            .await?)
    }

    pub async fn create(&self, org_id: i32, data: NewEvent) -> Result<event::Model> {
        let now = Utc::now();
        Ok(event::ActiveModel {
            organization_id: Set(org_id),
            client_id: Set(data.client_id),
            event_type: Set(data.event_type.as_str().to_string()),
            title: Set(data.title),
            description: Set(data.description),
            event_date: Set(data.event_date),
            event_time: Set(data.event_time),
            end_time: Set(data.end_time),
            address: Set(data.address),
            adjuster_name: Set(data.adjuster_name),
            adjuster_phone: Set(data.adjuster_phone),
            adjuster_email: Set(data.adjuster_email),
            insurance_company: Set(data.insurance_company),
            claim_number: Set(data.claim_number),
            status: Set(data.status.as_str().to_string()),
            notes: Set(data.notes),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await?)
    }

    pub async fn update(&self, org_id: i32, id: i32, data: UpdateEvent) -> Result<event::Model> {
        let existing = self.get(org_id, id).await?;
        let mut active: event::ActiveModel = existing.into();

        macro_rules! set_if_some {
            ($field:ident) => {
                if let Some(value) = data.$field {
                    active.$field = Set(Some(value));
                }
            };
        }

        if let Some(event_type) = data.event_type {
            active.event_type = Set(event_type.as_str().to_string());
        }
        if let Some(title) = data.title {
            active.title = Set(title);
        }
        if let Some(event_date) = data.event_date {
            active.event_date = Set(event_date);
        }
        if let Some(status) = data.status {
            active.status = Set(status.as_str().to_string());
        }

        set_if_some!(client_id);
        set_if_some!(description);
        set_if_some!(event_time);
        set_if_some!(end_time);
        set_if_some!(address);
        set_if_some!(adjuster_name);
        set_if_some!(adjuster_phone);
        set_if_some!(adjuster_email);
        set_if_some!(insurance_company);
        set_if_some!(claim_number);
        set_if_some!(notes);

        active.updated_at = Set(Utc::now());

        Ok(active.update(&self.db).await?)
    }

    pub async fn delete(&self, org_id: i32, id: i32) -> Result<()> {
        let existing = self.get(org_id, id).await?;

        let txn = self.db.begin().await?;
        event_attendee::Entity::delete_many()
            .filter(event_attendee::Column::EventId.eq(id))
            .exec(&txn)
            .await?;
        event::Entity::delete_by_id(existing.id).exec(&txn).await?;
        txn.commit().await?;

        Ok(())
    }

    // === Attendees ===

    pub async fn list_attendees(
        &self,
        org_id: i32,
        event_id: i32,
    ) -> Result<Vec<event_attendee::Model>> {
        Ok(event_attendee::Entity::find()
            .filter(event_attendee::Column::OrganizationId.eq(org_id))
            .filter(event_attendee::Column::EventId.eq(event_id))
            .all(&self.db)
            .await?)
    }

    /// Replace the attendee list for an event.
    pub async fn replace_attendees(
        &self,
        org_id: i32,
        event_id: i32,
        member_ids: &[i32],
    ) -> Result<Vec<event_attendee::Model>> {
        // Event must exist and belong to the organization.
        self.get(org_id, event_id).await?;

        let txn = self.db.begin().await?;

        event_attendee::Entity::delete_many()
            .filter(event_attendee::Column::EventId.eq(event_id))
            .exec(&txn)
            .await?;

        let mut seen = Vec::new();
        for &member_id in member_ids {
            if seen.contains(&member_id) {
                continue;
            }
            seen.push(member_id);
            event_attendee::ActiveModel {
                organization_id: Set(org_id),
                event_id: Set(event_id),
                member_id: Set(member_id),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;

        self.list_attendees(org_id, event_id).await
    }
}
