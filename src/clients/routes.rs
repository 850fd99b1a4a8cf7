//! HTTP surface for clients, custom claim statuses, and the dashboard.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{delete, get},
};
use serde::{Deserialize, Serialize};

use super::dashboard::{ClientBucket, DashboardStore, StatusCount};
use super::statuses::{NewCustomStatus, StatusStore};
use super::store::{ClientStore, NewClient, UpdateClient};
use crate::app::AppContext;
use crate::audit::{self, AuditAction, AuditEntityType};
use crate::entities::{client, custom_claim_status};
use crate::error::Result;
use crate::http::{ApiResponse, CreatedResponse, NoContentResponse, RouteModule};
use crate::validation::ValidatedJson;

async fn list_clients(
    State(ctx): State<AppContext>,
    Path(org_id): Path<i32>,
) -> Result<Json<Vec<client::Model>>> {
    let clients = ClientStore::new(ctx.db().clone()).list(org_id).await?;
    Ok(Json(clients))
}

async fn get_client(
    State(ctx): State<AppContext>,
    Path((org_id, id)): Path<(i32, String)>,
) -> Result<Json<client::Model>> {
    let client = ClientStore::new(ctx.db().clone()).get(org_id, &id).await?;
    Ok(Json(client))
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    q: String,
}

async fn search_clients(
    State(ctx): State<AppContext>,
    Path(org_id): Path<i32>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<client::Model>>> {
    let clients = ClientStore::new(ctx.db().clone())
        .search(org_id, &query.q)
        .await?;
    Ok(Json(clients))
}

async fn create_client(
    State(ctx): State<AppContext>,
    Path(org_id): Path<i32>,
    ValidatedJson(req): ValidatedJson<NewClient>,
) -> Result<CreatedResponse<client::Model>> {
    let created = ClientStore::new(ctx.db().clone()).create(org_id, req).await?;

    audit::record(
        ctx.db(),
        org_id,
        AuditEntityType::Client,
        created.id.clone(),
        AuditAction::Create,
        None,
    )
    .await;

    let location = format!("/api/orgs/{}/clients/{}", org_id, created.id);
    Ok(ApiResponse::created(created, location))
}

async fn update_client(
    State(ctx): State<AppContext>,
    Path((org_id, id)): Path<(i32, String)>,
    ValidatedJson(req): ValidatedJson<UpdateClient>,
) -> Result<Json<client::Model>> {
    let updated = ClientStore::new(ctx.db().clone())
        .update(org_id, &id, req)
        .await?;

    audit::record(
        ctx.db(),
        org_id,
        AuditEntityType::Client,
        id,
        AuditAction::Update,
        None,
    )
    .await;

    Ok(Json(updated))
}

async fn delete_client(
    State(ctx): State<AppContext>,
    Path((org_id, id)): Path<(i32, String)>,
) -> Result<NoContentResponse> {
    ClientStore::new(ctx.db().clone()).delete(org_id, &id).await?;

    audit::record(
        ctx.db(),
        org_id,
        AuditEntityType::Client,
        id,
        AuditAction::Delete,
        None,
    )
    .await;

    Ok(NoContentResponse)
}

// === Custom claim statuses ===

async fn list_statuses(
    State(ctx): State<AppContext>,
    Path(org_id): Path<i32>,
) -> Result<Json<Vec<custom_claim_status::Model>>> {
    let statuses = StatusStore::new(ctx.db().clone()).list(org_id).await?;
    Ok(Json(statuses))
}

async fn create_status(
    State(ctx): State<AppContext>,
    Path(org_id): Path<i32>,
    ValidatedJson(req): ValidatedJson<NewCustomStatus>,
) -> Result<Json<custom_claim_status::Model>> {
    let created = StatusStore::new(ctx.db().clone()).create(org_id, req).await?;
    Ok(Json(created))
}

async fn delete_status(
    State(ctx): State<AppContext>,
    Path((org_id, id)): Path<(i32, i32)>,
) -> Result<NoContentResponse> {
    StatusStore::new(ctx.db().clone()).delete(org_id, id).await?;
    Ok(NoContentResponse)
}

// === Dashboard ===

#[derive(Debug, Deserialize)]
struct DaysQuery {
    days: Option<i64>,
}

#[derive(Debug, Serialize)]
struct DashboardSummary {
    total: ClientBucket,
    late_contact: ClientBucket,
    not_supplemented: ClientBucket,
    pending_submission: ClientBucket,
    ready_for_construction: ClientBucket,
    upcoming_contacts: ClientBucket,
}

async fn dashboard_summary(
    State(ctx): State<AppContext>,
    Path(org_id): Path<i32>,
    Query(query): Query<DaysQuery>,
) -> Result<Json<DashboardSummary>> {
    let days = query.days.unwrap_or(7);
    let store = DashboardStore::new(ctx.db().clone());

    Ok(Json(DashboardSummary {
        total: store.total_clients(org_id).await?,
        late_contact: store.late_contact(org_id, days).await?,
        not_supplemented: store.not_supplemented(org_id).await?,
        pending_submission: store.pending_submission(org_id).await?,
        ready_for_construction: store.ready_for_construction(org_id).await?,
        upcoming_contacts: store.upcoming_contacts(org_id, days).await?,
    }))
}

async fn dashboard_by_status(
    State(ctx): State<AppContext>,
    Path(org_id): Path<i32>,
) -> Result<Json<Vec<StatusCount>>> {
    let counts = DashboardStore::new(ctx.db().clone())
        .by_claim_status(org_id)
        .await?;
    Ok(Json(counts))
}

pub struct ClientsModule;

impl RouteModule for ClientsModule {
    fn routes(&self) -> Router<AppContext> {
        Router::new()
            .route("/clients", get(list_clients).post(create_client))
            .route("/clients/search", get(search_clients))
            .route(
                "/clients/:id",
                get(get_client).patch(update_client).delete(delete_client),
            )
            .route("/claim-statuses", get(list_statuses).post(create_status))
            .route("/claim-statuses/:id", delete(delete_status))
            .route("/dashboard", get(dashboard_summary))
            .route("/dashboard/by-status", get(dashboard_by_status))
    }

    fn prefix(&self) -> Option<&str> {
        Some("/api/orgs/:org_id")
    }
}
