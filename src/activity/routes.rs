use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use serde::{Deserialize, Serialize};

use super::store::{ActivityStore, NewActivityLog};
use crate::app::AppContext;
use crate::entities::{activity_log, task};
use crate::error::Result;
use crate::http::RouteModule;
use crate::validation::ValidatedJson;
use crate::workflow::WorkflowStore;

async fn list_by_client(
    State(ctx): State<AppContext>,
    Path((org_id, client_id)): Path<(i32, String)>,
) -> Result<Json<Vec<activity_log::Model>>> {
    let logs = ActivityStore::new(ctx.db().clone())
        .list_by_client(org_id, &client_id)
        .await?;
    Ok(Json(logs))
}

#[derive(Debug, Deserialize)]
struct RecentQuery {
    limit: Option<u64>,
}

async fn list_recent(
    State(ctx): State<AppContext>,
    Path(org_id): Path<i32>,
    Query(query): Query<RecentQuery>,
) -> Result<Json<Vec<activity_log::Model>>> {
    let logs = ActivityStore::new(ctx.db().clone())
        .list_recent(org_id, query.limit.unwrap_or(50))
        .await?;
    Ok(Json(logs))
}

/// The recorded log plus any tasks automation rules created for it.
#[derive(Debug, Serialize)]
struct ActivityLogged {
    log: activity_log::Model,
    automated_tasks: Vec<task::Model>,
}

async fn create_log(
    State(ctx): State<AppContext>,
    Path(org_id): Path<i32>,
    ValidatedJson(req): ValidatedJson<NewActivityLog>,
) -> Result<Json<ActivityLogged>> {
    let log = ActivityStore::new(ctx.db().clone()).create(org_id, req).await?;

    let automated_tasks = WorkflowStore::new(ctx.db().clone())
        .apply_to_log(&log)
        .await?;

    Ok(Json(ActivityLogged {
        log,
        automated_tasks,
    }))
}

pub struct ActivityModule;

impl RouteModule for ActivityModule {
    fn routes(&self) -> Router<AppContext> {
        Router::new()
            .route("/activity-logs", get(list_recent).post(create_log))
            .route("/activity-logs/by-client/:client_id", get(list_by_client))
    }

    fn prefix(&self) -> Option<&str> {
        Some("/api/orgs/:org_id")
    }
}
