//! HTTP surface for construction projects, scope generation, and material
//! orders.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::scope::generate_material_order;
use super::store::{ConstructionStore, NewProject, UpdateProject};
use super::types::{EstimateExtraction, MaterialItem, RoofMeasurements};
use crate::app::AppContext;
use crate::audit::{self, AuditAction, AuditEntityType};
use crate::entities::{construction_project, material_order};
use crate::error::{AppError, Result};
use crate::http::{ApiResponse, CreatedResponse, RouteModule};
use crate::validation::ValidatedJson;

async fn list_projects(
    State(ctx): State<AppContext>,
    Path(org_id): Path<i32>,
) -> Result<Json<Vec<construction_project::Model>>> {
    let projects = ConstructionStore::new(ctx.db().clone()).list(org_id).await?;
    Ok(Json(projects))
}

async fn get_project(
    State(ctx): State<AppContext>,
    Path((org_id, id)): Path<(i32, i32)>,
) -> Result<Json<construction_project::Model>> {
    let project = ConstructionStore::new(ctx.db().clone()).get(org_id, id).await?;
    Ok(Json(project))
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    q: String,
}

async fn search_projects(
    State(ctx): State<AppContext>,
    Path(org_id): Path<i32>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<construction_project::Model>>> {
    let projects = ConstructionStore::new(ctx.db().clone())
        .search(org_id, &query.q)
        .await?;
    Ok(Json(projects))
}

async fn get_project_by_client(
    State(ctx): State<AppContext>,
    Path((org_id, client_id)): Path<(i32, String)>,
) -> Result<Json<construction_project::Model>> {
    ConstructionStore::new(ctx.db().clone())
        .find_by_client(org_id, &client_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("No construction project for this client"))
}

async fn create_project(
    State(ctx): State<AppContext>,
    Path(org_id): Path<i32>,
    ValidatedJson(req): ValidatedJson<NewProject>,
) -> Result<CreatedResponse<construction_project::Model>> {
    let created = ConstructionStore::new(ctx.db().clone())
        .create(org_id, req)
        .await?;

    audit::record(
        ctx.db(),
        org_id,
        AuditEntityType::ConstructionProject,
        created.id.to_string(),
        AuditAction::Create,
        None,
    )
    .await;

    let location = format!("/api/orgs/{}/construction/projects/{}", org_id, created.id);
    Ok(ApiResponse::created(created, location))
}

async fn update_project(
    State(ctx): State<AppContext>,
    Path((org_id, id)): Path<(i32, i32)>,
    ValidatedJson(req): ValidatedJson<UpdateProject>,
) -> Result<Json<construction_project::Model>> {
    let updated = ConstructionStore::new(ctx.db().clone())
        .update(org_id, id, req)
        .await?;

    audit::record(
        ctx.db(),
        org_id,
        AuditEntityType::ConstructionProject,
        id.to_string(),
        AuditAction::Update,
        None,
    )
    .await;

    Ok(Json(updated))
}

// === Scope generation ===

/// Result of a scope generation: the measurements used, the scope items
/// carried over from the extraction, and the generated line list.
#[derive(Debug, Serialize)]
struct GeneratedScope {
    scope_items: Vec<String>,
    roof: RoofMeasurements,
    items: Vec<MaterialItem>,
}

/// Generate the material-order seed for a project.
///
/// An extraction payload (from the external estimate-extraction step) takes
/// precedence; without one, the project's stored roof fields are used.
async fn generate_scope(
    State(ctx): State<AppContext>,
    Path((org_id, id)): Path<(i32, i32)>,
    extraction: Option<Json<EstimateExtraction>>,
) -> Result<Json<GeneratedScope>> {
    let project = ConstructionStore::new(ctx.db().clone()).get(org_id, id).await?;

    let (scope_items, roof) = match extraction {
        Some(Json(extraction)) => (extraction.scope_items, extraction.roof),
        None => (
            Vec::new(),
            RoofMeasurements {
                material: project.roof_type.clone(),
                color: project.roof_color.clone(),
                squares: project.roof_squares.map(f64::from),
                ..Default::default()
            },
        ),
    };

    let items = generate_material_order(&roof);

    Ok(Json(GeneratedScope {
        scope_items,
        roof,
        items,
    }))
}

// === Material orders ===

#[derive(Debug, Deserialize, Validate)]
struct SaveMaterialOrderRequest {
    items: Vec<MaterialItem>,
}

async fn save_material_order(
    State(ctx): State<AppContext>,
    Path((org_id, id)): Path<(i32, i32)>,
    ValidatedJson(req): ValidatedJson<SaveMaterialOrderRequest>,
) -> Result<Json<material_order::Model>> {
    let saved = ConstructionStore::new(ctx.db().clone())
        .save_material_order(org_id, id, req.items)
        .await?;
    Ok(Json(saved))
}

async fn get_material_order(
    State(ctx): State<AppContext>,
    Path((org_id, id)): Path<(i32, i32)>,
) -> Result<Json<material_order::Model>> {
    ConstructionStore::new(ctx.db().clone())
        .find_material_order(org_id, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("No material order saved for this project"))
}

pub struct ConstructionModule;

impl RouteModule for ConstructionModule {
    fn routes(&self) -> Router<AppContext> {
        Router::new()
            .route(
                "/construction/projects",
                get(list_projects).post(create_project),
            )
            .route("/construction/projects/search", get(search_projects))
            .route(
                "/construction/projects/:id",
                get(get_project).patch(update_project),
            )
            .route(
                "/construction/projects/by-client/:client_id",
                get(get_project_by_client),
            )
            .route(
                "/construction/projects/:id/scope/generate",
                post(generate_scope),
            )
            .route(
                "/construction/projects/:id/material-order",
                get(get_material_order).put(save_material_order),
            )
    }

    fn prefix(&self) -> Option<&str> {
        Some("/api/orgs/:org_id")
    }
}
