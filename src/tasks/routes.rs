use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};

use super::store::{NewTask, TaskStore, UpdateTask};
use crate::app::AppContext;
use crate::entities::task;
use crate::error::Result;
use crate::http::{
    ApiResponse, CreatedResponse, NoContentResponse, PaginatedData, PaginationQuery, RouteModule,
};
use crate::validation::ValidatedJson;

async fn list_tasks(
    State(ctx): State<AppContext>,
    Path(org_id): Path<i32>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<ApiResponse<PaginatedData<Vec<task::Model>>>> {
    let (tasks, total) = TaskStore::new(ctx.db().clone())
        .list_page(org_id, pagination.offset(), pagination.limit())
        .await?;
    Ok(ApiResponse::paginated(
        tasks,
        total,
        pagination.page,
        pagination.per_page,
    ))
}

async fn get_task(
    State(ctx): State<AppContext>,
    Path((org_id, id)): Path<(i32, i32)>,
) -> Result<Json<task::Model>> {
    let task = TaskStore::new(ctx.db().clone()).get(org_id, id).await?;
    Ok(Json(task))
}

async fn list_by_assignee(
    State(ctx): State<AppContext>,
    Path((org_id, member_id)): Path<(i32, i32)>,
) -> Result<Json<Vec<task::Model>>> {
    let tasks = TaskStore::new(ctx.db().clone())
        .list_by_assignee(org_id, member_id)
        .await?;
    Ok(Json(tasks))
}

async fn list_by_client(
    State(ctx): State<AppContext>,
    Path((org_id, client_id)): Path<(i32, String)>,
) -> Result<Json<Vec<task::Model>>> {
    let tasks = TaskStore::new(ctx.db().clone())
        .list_by_client(org_id, &client_id)
        .await?;
    Ok(Json(tasks))
}

async fn create_task(
    State(ctx): State<AppContext>,
    Path(org_id): Path<i32>,
    ValidatedJson(req): ValidatedJson<NewTask>,
) -> Result<CreatedResponse<task::Model>> {
    let created = TaskStore::new(ctx.db().clone()).create(org_id, req).await?;
    let location = format!("/api/orgs/{}/tasks/{}", org_id, created.id);
    Ok(ApiResponse::created(created, location))
}

async fn update_task(
    State(ctx): State<AppContext>,
    Path((org_id, id)): Path<(i32, i32)>,
    ValidatedJson(req): ValidatedJson<UpdateTask>,
) -> Result<Json<task::Model>> {
    let updated = TaskStore::new(ctx.db().clone())
        .update(org_id, id, req)
        .await?;
    Ok(Json(updated))
}

async fn delete_task(
    State(ctx): State<AppContext>,
    Path((org_id, id)): Path<(i32, i32)>,
) -> Result<NoContentResponse> {
    TaskStore::new(ctx.db().clone()).delete(org_id, id).await?;
    Ok(NoContentResponse)
}

pub struct TasksModule;

impl RouteModule for TasksModule {
    fn routes(&self) -> Router<AppContext> {
        Router::new()
            .route("/tasks", get(list_tasks).post(create_task))
            .route(
                "/tasks/:id",
                get(get_task).patch(update_task).delete(delete_task),
            )
            .route("/tasks/by-assignee/:member_id", get(list_by_assignee))
            .route("/tasks/by-client/:client_id", get(list_by_client))
    }

    fn prefix(&self) -> Option<&str> {
        Some("/api/orgs/:org_id")
    }
}
