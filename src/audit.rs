//! Append-only audit trail.
//!
//! Mutating handlers record a row here; the trail is queryable per entity.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::Deserialize;

use crate::app::AppContext;
use crate::entities::audit_log;
use crate::error::Result;
use crate::http::RouteModule;

/// Entity kinds covered by the audit trail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuditEntityType {
    Client,
    ActivityLog,
    ConstructionProject,
    Document,
    Member,
}

impl AuditEntityType {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Client => "CLIENT",
            Self::ActivityLog => "ACTIVITY_LOG",
            Self::ConstructionProject => "CONSTRUCTION_PROJECT",
            Self::Document => "DOCUMENT",
            Self::Member => "MEMBER",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuditAction {
    Create,
    Update,
    Delete,
}

impl AuditAction {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
        }
    }
}

/// Record an audit entry. Failures are logged, never propagated: the audit
/// trail must not fail the mutation it describes.
pub async fn record(
    db: &DatabaseConnection,
    organization_id: i32,
    entity_type: AuditEntityType,
    entity_id: impl Into<String>,
    action: AuditAction,
    performed_by: Option<i32>,
) {
    let entry = audit_log::ActiveModel {
        organization_id: Set(organization_id),
        entity_type: Set(entity_type.as_str().to_string()),
        entity_id: Set(entity_id.into()),
        action: Set(action.as_str().to_string()),
        performed_by: Set(performed_by),
        performed_at: Set(Utc::now()),
        ..Default::default()
    };

    if let Err(e) = entry.insert(db).await {
        tracing::warn!(error = %e, "failed to record audit entry");
    }
}

#[derive(Debug, Deserialize)]
pub struct AuditQuery {
    pub entity_type: String,
    pub entity_id: String,
}

async fn list_by_entity(
    State(ctx): State<AppContext>,
    Path(org_id): Path<i32>,
    Query(query): Query<AuditQuery>,
) -> Result<Json<Vec<audit_log::Model>>> {
    let entries = audit_log::Entity::find()
        .filter(audit_log::Column::OrganizationId.eq(org_id))
        .filter(audit_log::Column::EntityType.eq(&query.entity_type))
        .filter(audit_log::Column::EntityId.eq(&query.entity_id))
        .order_by_desc(audit_log::Column::PerformedAt)
        .all(ctx.db())
        .await?;
    Ok(Json(entries))
}

pub struct AuditModule;

impl RouteModule for AuditModule {
    fn routes(&self) -> Router<AppContext> {
        Router::new().route("/audit-logs", get(list_by_entity))
    }

    fn prefix(&self) -> Option<&str> {
        Some("/api/orgs/:org_id")
    }
}
