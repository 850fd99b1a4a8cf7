use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use super::store::{NewRole, NewRule, UpdateRole, UpdateRule, WorkflowStore};
use crate::app::AppContext;
use crate::entities::{automation_rule, workflow_role, workflow_role_member};
use crate::error::Result;
use crate::http::{NoContentResponse, RouteModule};
use crate::validation::ValidatedJson;

async fn list_roles(
    State(ctx): State<AppContext>,
    Path(org_id): Path<i32>,
) -> Result<Json<Vec<workflow_role::Model>>> {
    let roles = WorkflowStore::new(ctx.db().clone()).list_roles(org_id).await?;
    Ok(Json(roles))
}

async fn create_role(
    State(ctx): State<AppContext>,
    Path(org_id): Path<i32>,
    ValidatedJson(req): ValidatedJson<NewRole>,
) -> Result<Json<workflow_role::Model>> {
    let role = WorkflowStore::new(ctx.db().clone())
        .create_role(org_id, req)
        .await?;
    Ok(Json(role))
}

async fn update_role(
    State(ctx): State<AppContext>,
    Path((org_id, role_id)): Path<(i32, i32)>,
    ValidatedJson(req): ValidatedJson<UpdateRole>,
) -> Result<Json<workflow_role::Model>> {
    let role = WorkflowStore::new(ctx.db().clone())
        .update_role(org_id, role_id, req)
        .await?;
    Ok(Json(role))
}

async fn delete_role(
    State(ctx): State<AppContext>,
    Path((org_id, role_id)): Path<(i32, i32)>,
) -> Result<NoContentResponse> {
    WorkflowStore::new(ctx.db().clone())
        .delete_role(org_id, role_id)
        .await?;
    Ok(NoContentResponse)
}

async fn list_role_members(
    State(ctx): State<AppContext>,
    Path((org_id, role_id)): Path<(i32, i32)>,
) -> Result<Json<Vec<workflow_role_member::Model>>> {
    let members = WorkflowStore::new(ctx.db().clone())
        .list_role_members(org_id, role_id)
        .await?;
    Ok(Json(members))
}

async fn list_all_role_members(
    State(ctx): State<AppContext>,
    Path(org_id): Path<i32>,
) -> Result<Json<Vec<workflow_role_member::Model>>> {
    let members = WorkflowStore::new(ctx.db().clone())
        .list_all_role_members(org_id)
        .await?;
    Ok(Json(members))
}

async fn list_rules(
    State(ctx): State<AppContext>,
    Path(org_id): Path<i32>,
) -> Result<Json<Vec<automation_rule::Model>>> {
    let rules = WorkflowStore::new(ctx.db().clone()).list_rules(org_id).await?;
    Ok(Json(rules))
}

async fn create_rule(
    State(ctx): State<AppContext>,
    Path(org_id): Path<i32>,
    ValidatedJson(req): ValidatedJson<NewRule>,
) -> Result<Json<automation_rule::Model>> {
    let rule = WorkflowStore::new(ctx.db().clone())
        .create_rule(org_id, req)
        .await?;
    Ok(Json(rule))
}

async fn update_rule(
    State(ctx): State<AppContext>,
    Path((org_id, rule_id)): Path<(i32, i32)>,
    ValidatedJson(req): ValidatedJson<UpdateRule>,
) -> Result<Json<automation_rule::Model>> {
    let rule = WorkflowStore::new(ctx.db().clone())
        .update_rule(org_id, rule_id, req)
        .await?;
    Ok(Json(rule))
}

async fn delete_rule(
    State(ctx): State<AppContext>,
    Path((org_id, rule_id)): Path<(i32, i32)>,
) -> Result<NoContentResponse> {
    WorkflowStore::new(ctx.db().clone())
        .delete_rule(org_id, rule_id)
        .await?;
    Ok(NoContentResponse)
}

pub struct WorkflowModule;

impl RouteModule for WorkflowModule {
    fn routes(&self) -> Router<AppContext> {
        Router::new()
            .route("/workflow/roles", get(list_roles).post(create_role))
            .route(
                "/workflow/roles/:role_id",
                axum::routing::patch(update_role).delete(delete_role),
            )
            .route("/workflow/roles/:role_id/members", get(list_role_members))
            .route("/workflow/role-members", get(list_all_role_members))
            .route("/workflow/rules", get(list_rules).post(create_rule))
            .route(
                "/workflow/rules/:rule_id",
                axum::routing::patch(update_rule).delete(delete_rule),
            )
    }

    fn prefix(&self) -> Option<&str> {
        Some("/api/orgs/:org_id")
    }
}
