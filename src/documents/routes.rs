use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get, post},
};

use super::store::{DocumentStore, NewDocument};
use crate::app::AppContext;
use crate::audit::{self, AuditAction, AuditEntityType};
use crate::entities::document;
use crate::error::Result;
use crate::http::{ApiResponse, CreatedResponse, NoContentResponse, RouteModule};
use crate::validation::ValidatedJson;

async fn list_by_client(
    State(ctx): State<AppContext>,
    Path((org_id, client_id)): Path<(i32, String)>,
) -> Result<Json<Vec<document::Model>>> {
    let documents = DocumentStore::new(ctx.db().clone())
        .list_by_client(org_id, &client_id)
        .await?;
    Ok(Json(documents))
}

async fn list_by_project(
    State(ctx): State<AppContext>,
    Path((org_id, project_id)): Path<(i32, i32)>,
) -> Result<Json<Vec<document::Model>>> {
    let documents = DocumentStore::new(ctx.db().clone())
        .list_by_project(org_id, project_id)
        .await?;
    Ok(Json(documents))
}

async fn create_document(
    State(ctx): State<AppContext>,
    Path(org_id): Path<i32>,
    ValidatedJson(req): ValidatedJson<NewDocument>,
) -> Result<CreatedResponse<document::Model>> {
    let created = DocumentStore::new(ctx.db().clone()).create(org_id, req).await?;

    audit::record(
        ctx.db(),
        org_id,
        AuditEntityType::Document,
        created.id.to_string(),
        AuditAction::Create,
        created.uploaded_by,
    )
    .await;

    let location = format!("/api/orgs/{}/documents/{}", org_id, created.id);
    Ok(ApiResponse::created(created, location))
}

async fn delete_document(
    State(ctx): State<AppContext>,
    Path((org_id, id)): Path<(i32, i32)>,
) -> Result<NoContentResponse> {
    DocumentStore::new(ctx.db().clone()).delete(org_id, id).await?;

    audit::record(
        ctx.db(),
        org_id,
        AuditEntityType::Document,
        id.to_string(),
        AuditAction::Delete,
        None,
    )
    .await;

    Ok(NoContentResponse)
}

pub struct DocumentsModule;

impl RouteModule for DocumentsModule {
    fn routes(&self) -> Router<AppContext> {
        Router::new()
            .route("/documents", post(create_document))
            .route("/documents/:id", delete(delete_document))
            .route("/documents/by-client/:client_id", get(list_by_client))
            .route("/documents/by-project/:project_id", get(list_by_project))
    }

    fn prefix(&self) -> Option<&str> {
        Some("/api/orgs/:org_id")
    }
}
