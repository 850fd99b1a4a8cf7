//! HTTP surface for organizations, members, and invites.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, patch, post},
};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::invites::{InviteManager, IssuedInvite, invite_status};
use super::plans::{self, PlanTier, SubscriptionState};
use super::seats::{PlanSeats, SeatChecker};
use super::store::{NewMember, NewOrganization, OrgStore};
use super::types::MemberRole;
use crate::app::AppContext;
use crate::audit::{self, AuditAction, AuditEntityType};
use crate::entities::{invite, member, organization};
use crate::error::{AppError, Result};
use crate::http::{ApiResponse, CreatedResponse, NoContentResponse, RouteModule};
use crate::validation::ValidatedJson;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateOrganizationRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub business_type: Option<String>,
    #[serde(default)]
    pub plan_tier: PlanTier,
    /// Trial length in days; omitted means no trial.
    #[validate(range(min = 0, max = 90))]
    pub trial_days: Option<i64>,
    #[validate(length(min = 1, max = 100))]
    pub owner_name: String,
    #[validate(email)]
    pub owner_email: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateOrganizationResponse {
    pub organization: organization::Model,
    pub owner: member::Model,
}

async fn create_organization(
    State(ctx): State<AppContext>,
    ValidatedJson(req): ValidatedJson<CreateOrganizationRequest>,
) -> Result<CreatedResponse<CreateOrganizationResponse>> {
    let store = OrgStore::new(ctx.db().clone());
    let (organization, owner) = store
        .create(NewOrganization {
            name: req.name,
            business_type: req.business_type,
            plan_tier: req.plan_tier.as_str().to_string(),
            trial_ends_at: req.trial_days.map(|days| Utc::now() + Duration::days(days)),
            owner_name: req.owner_name,
            owner_email: req.owner_email,
        })
        .await?;

    let location = format!("/api/orgs/{}", organization.id);
    Ok(ApiResponse::created(
        CreateOrganizationResponse {
            organization,
            owner,
        },
        location,
    ))
}

async fn get_organization(
    State(ctx): State<AppContext>,
    Path(org_id): Path<i32>,
) -> Result<Json<organization::Model>> {
    let org = OrgStore::new(ctx.db().clone()).get(org_id).await?;
    Ok(Json(org))
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateOrganizationRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub business_type: Option<String>,
    pub plan_tier: Option<PlanTier>,
    #[validate(range(min = 0))]
    pub extra_seats: Option<i32>,
}

async fn update_organization(
    State(ctx): State<AppContext>,
    Path(org_id): Path<i32>,
    ValidatedJson(req): ValidatedJson<UpdateOrganizationRequest>,
) -> Result<Json<organization::Model>> {
    let org = OrgStore::new(ctx.db().clone())
        .update(
            org_id,
            req.name,
            req.business_type,
            req.plan_tier.map(|t| t.as_str().to_string()),
            req.extra_seats,
        )
        .await?;
    Ok(Json(org))
}

async fn get_seats(
    State(ctx): State<AppContext>,
    Path(org_id): Path<i32>,
) -> Result<Json<SubscriptionState>> {
    let org = OrgStore::new(ctx.db().clone()).get(org_id).await?;
    let used = PlanSeats::new(ctx.db().clone()).used_seats(org_id).await?;
    Ok(Json(plans::subscription_state(&org, used)))
}

// === Members ===

async fn list_members(
    State(ctx): State<AppContext>,
    Path(org_id): Path<i32>,
) -> Result<Json<Vec<member::Model>>> {
    let members = OrgStore::new(ctx.db().clone()).list_members(org_id).await?;
    Ok(Json(members))
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateMemberRequest {
    #[validate(length(min = 1, max = 100))]
    pub display_name: String,
    #[validate(email)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: MemberRole,
}

async fn create_member(
    State(ctx): State<AppContext>,
    Path(org_id): Path<i32>,
    ValidatedJson(req): ValidatedJson<CreateMemberRequest>,
) -> Result<CreatedResponse<member::Model>> {
    let store = OrgStore::new(ctx.db().clone());
    // Organization must exist before the seat check reports a limit for it.
    store.get(org_id).await?;

    let seats = PlanSeats::new(ctx.db().clone());
    let used = seats.used_seats(org_id).await?;
    if !seats.has_seat_available(org_id, used).await? {
        return Err(AppError::conflict(
            "Organization has reached its seat limit",
        ));
    }

    let created = store
        .create_member(
            org_id,
            NewMember {
                display_name: req.display_name,
                email: req.email,
                role: req.role,
            },
        )
        .await?;

    audit::record(
        ctx.db(),
        org_id,
        AuditEntityType::Member,
        created.id.to_string(),
        AuditAction::Create,
        None,
    )
    .await;

    let location = format!("/api/orgs/{}/members/{}", org_id, created.id);
    Ok(ApiResponse::created(created, location))
}

#[derive(Debug, Deserialize)]
pub struct UpdateMemberRequest {
    pub role: MemberRole,
}

async fn update_member(
    State(ctx): State<AppContext>,
    Path((org_id, member_id)): Path<(i32, i32)>,
    Json(req): Json<UpdateMemberRequest>,
) -> Result<Json<member::Model>> {
    let updated = OrgStore::new(ctx.db().clone())
        .update_member_role(org_id, member_id, req.role)
        .await?;

    audit::record(
        ctx.db(),
        org_id,
        AuditEntityType::Member,
        member_id.to_string(),
        AuditAction::Update,
        None,
    )
    .await;

    Ok(Json(updated))
}

async fn delete_member(
    State(ctx): State<AppContext>,
    Path((org_id, member_id)): Path<(i32, i32)>,
) -> Result<NoContentResponse> {
    OrgStore::new(ctx.db().clone())
        .delete_member(org_id, member_id)
        .await?;

    audit::record(
        ctx.db(),
        org_id,
        AuditEntityType::Member,
        member_id.to_string(),
        AuditAction::Delete,
        None,
    )
    .await;

    Ok(NoContentResponse)
}

// === Invites ===

#[derive(Debug, Deserialize, Validate)]
pub struct CreateInviteRequest {
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub role: MemberRole,
    pub invited_by: Option<i32>,
}

async fn create_invite(
    State(ctx): State<AppContext>,
    Path(org_id): Path<i32>,
    ValidatedJson(req): ValidatedJson<CreateInviteRequest>,
) -> Result<Json<IssuedInvite>> {
    let issued = InviteManager::new(ctx.db().clone())
        .issue(org_id, req.email, req.role, req.invited_by)
        .await?;
    Ok(Json(issued))
}

/// Invite row plus its derived lifecycle status.
#[derive(Debug, Serialize)]
pub struct InviteView {
    #[serde(flatten)]
    pub invite: invite::Model,
    pub status: &'static str,
}

async fn list_invites(
    State(ctx): State<AppContext>,
    Path(org_id): Path<i32>,
) -> Result<Json<Vec<InviteView>>> {
    let invites = InviteManager::new(ctx.db().clone()).list(org_id).await?;
    let views = invites
        .into_iter()
        .map(|invite| InviteView {
            status: invite_status(&invite),
            invite,
        })
        .collect();
    Ok(Json(views))
}

async fn revoke_invite(
    State(ctx): State<AppContext>,
    Path((org_id, invite_id)): Path<(i32, i32)>,
) -> Result<Json<invite::Model>> {
    let revoked = InviteManager::new(ctx.db().clone())
        .revoke(org_id, invite_id)
        .await?;
    Ok(Json(revoked))
}

#[derive(Debug, Deserialize, Validate)]
pub struct AcceptInviteRequest {
    #[validate(length(min = 1))]
    pub token: String,
    pub display_name: Option<String>,
}

/// Not org-scoped: the token itself carries tenancy.
async fn accept_invite(
    State(ctx): State<AppContext>,
    ValidatedJson(req): ValidatedJson<AcceptInviteRequest>,
) -> Result<ApiResponse<member::Model>> {
    let member = InviteManager::new(ctx.db().clone())
        .accept(&req.token, req.display_name)
        .await?;
    Ok(ApiResponse::success_with_message(
        member,
        "Invitation accepted",
    ))
}

pub struct OrganizationsModule;

impl RouteModule for OrganizationsModule {
    fn routes(&self) -> Router<AppContext> {
        Router::new()
            .route("/orgs", post(create_organization))
            .route(
                "/orgs/:org_id",
                get(get_organization).patch(update_organization),
            )
            .route("/orgs/:org_id/seats", get(get_seats))
            .route(
                "/orgs/:org_id/members",
                get(list_members).post(create_member),
            )
            .route(
                "/orgs/:org_id/members/:member_id",
                patch(update_member).delete(delete_member),
            )
            .route(
                "/orgs/:org_id/invites",
                get(list_invites).post(create_invite),
            )
            .route("/orgs/:org_id/invites/:invite_id/revoke", post(revoke_invite))
            .route("/invites/accept", post(accept_invite))
    }

    fn prefix(&self) -> Option<&str> {
        Some("/api")
    }
}
