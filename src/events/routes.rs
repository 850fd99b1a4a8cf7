use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use serde::Deserialize;

use super::store::{EventStore, NewEvent, UpdateEvent};
use crate::app::AppContext;
use crate::entities::{event, event_attendee};
use crate::error::Result;
use crate::http::{ApiResponse, CreatedResponse, NoContentResponse, RouteModule};
use crate::validation::ValidatedJson;

async fn list_events(
    State(ctx): State<AppContext>,
    Path(org_id): Path<i32>,
) -> Result<Json<Vec<event::Model>>> {
    let events = EventStore::new(ctx.db().clone()).list(org_id).await?;
    Ok(Json(events))
}

async fn get_event(
    State(ctx): State<AppContext>,
    Path((org_id, id)): Path<(i32, i32)>,
) -> Result<Json<event::Model>> {
    let event = EventStore::new(ctx.db().clone()).get(org_id, id).await?;
    Ok(Json(event))
}

async fn list_by_client(
    State(ctx): State<AppContext>,
    Path((org_id, client_id)): Path<(i32, String)>,
) -> Result<Json<Vec<event::Model>>> {
    let events = EventStore::new(ctx.db().clone())
        .list_by_client(org_id, &client_id)
        .await?;
    Ok(Json(events))
}

async fn create_event(
    State(ctx): State<AppContext>,
    Path(org_id): Path<i32>,
    ValidatedJson(req): ValidatedJson<NewEvent>,
) -> Result<CreatedResponse<event::Model>> {
    let created = EventStore::new(ctx.db().clone()).create(org_id, req).await?;
    let location = format!("/api/orgs/{}/events/{}", org_id, created.id);
    Ok(ApiResponse::created(created, location))
}

async fn update_event(
    State(ctx): State<AppContext>,
    Path((org_id, id)): Path<(i32, i32)>,
    ValidatedJson(req): ValidatedJson<UpdateEvent>,
) -> Result<Json<event::Model>> {
    let updated = EventStore::new(ctx.db().clone())
        .update(org_id, id, req)
        .await?;
    Ok(Json(updated))
}

async fn delete_event(
    State(ctx): State<AppContext>,
    Path((org_id, id)): Path<(i32, i32)>,
) -> Result<NoContentResponse> {
    EventStore::new(ctx.db().clone()).delete(org_id, id).await?;
    Ok(NoContentResponse)
}

async fn list_attendees(
    State(ctx): State<AppContext>,
    Path((org_id, id)): Path<(i32, i32)>,
) -> Result<Json<Vec<event_attendee::Model>>> {
    let attendees = EventStore::new(ctx.db().clone())
        .list_attendees(org_id, id)
        .await?;
    Ok(Json(attendees))
}

#[derive(Debug, Deserialize)]
struct ReplaceAttendeesRequest {
    member_ids: Vec<i32>,
}

async fn replace_attendees(
    State(ctx): State<AppContext>,
    Path((org_id, id)): Path<(i32, i32)>,
    Json(req): Json<ReplaceAttendeesRequest>,
) -> Result<Json<Vec<event_attendee::Model>>> {
    let attendees = EventStore::new(ctx.db().clone())
        .replace_attendees(org_id, id, &req.member_ids)
        .await?;
    Ok(Json(attendees))
}

pub struct EventsModule;

impl RouteModule for EventsModule {
    fn routes(&self) -> Router<AppContext> {
        Router::new()
            .route("/events", get(list_events).post(create_event))
            .route(
                "/events/:id",
                get(get_event).patch(update_event).delete(delete_event),
            )
            .route("/events/by-client/:client_id", get(list_by_client))
            .route(
                "/events/:id/attendees",
                get(list_attendees).put(replace_attendees),
            )
    }

    fn prefix(&self) -> Option<&str> {
        Some("/api/orgs/:org_id")
    }
}
