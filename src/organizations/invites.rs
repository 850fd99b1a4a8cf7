//! Organization invitations.
//!
//! Invites carry a one-time token returned to the caller at creation; only
//! its SHA-256 hash is persisted. Accepting a pending, unexpired invite
//! creates the member (seat-checked) and stamps `accepted_at`.

use chrono::{Duration, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use serde::Serialize;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use super::seats::{PlanSeats, SeatChecker};
use super::types::MemberRole;
use crate::entities::{invite, member};
use crate::error::{AppError, Result};

/// Default invitation lifetime.
const INVITE_TTL_DAYS: i64 = 7;

/// A freshly issued invitation, including the cleartext token.
/// The token is shown exactly once.
#[derive(Debug, Serialize)]
pub struct IssuedInvite {
    #[serde(flatten)]
    pub invite: invite::Model,
    pub token: String,
}

/// Lifecycle status derived from the invite's timestamps.
#[must_use]
pub fn invite_status(invite: &invite::Model) -> &'static str {
    if invite.revoked_at.is_some() {
        "revoked"
    } else if invite.accepted_at.is_some() {
        "accepted"
    } else if invite.expires_at < Utc::now() {
        "expired"
    } else {
        "pending"
    }
}

fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

fn generate_token() -> String {
    format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
}

/// Invitation manager.
#[derive(Clone)]
pub struct InviteManager {
    db: DatabaseConnection,
    seats: PlanSeats,
}

impl InviteManager {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        let seats = PlanSeats::new(db.clone());
        Self { db, seats }
    }

    /// Issue a new invitation for an email address.
    ///
    /// Refuses when a pending invite for the same email already exists in
    /// the organization.
    pub async fn issue(
        &self,
        org_id: i32,
        email: String,
        role: MemberRole,
        invited_by: Option<i32>,
    ) -> Result<IssuedInvite> {
        let email = email.trim().to_lowercase();
        if email.is_empty() {
            return Err(AppError::bad_request("Invite email must not be empty"));
        }

        let existing = invite::Entity::find()
            .filter(invite::Column::OrganizationId.eq(org_id))
            .filter(invite::Column::Email.eq(&email))
            .filter(invite::Column::AcceptedAt.is_null())
            .filter(invite::Column::RevokedAt.is_null())
            .filter(invite::Column::ExpiresAt.gt(Utc::now()))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Err(AppError::conflict(format!(
                "A pending invite for {} already exists",
                email
            )));
        }

        let token = generate_token();
        let now = Utc::now();

        let model = invite::ActiveModel {
            organization_id: Set(org_id),
            email: Set(email),
            role: Set(role.as_str().to_string()),
            token_hash: Set(hash_token(&token)),
            invited_by: Set(invited_by),
            expires_at: Set(now + Duration::days(INVITE_TTL_DAYS)),
            accepted_at: Set(None),
            revoked_at: Set(None),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        tracing::info!(org_id, invite_id = model.id, "invitation issued");

        Ok(IssuedInvite {
            invite: model,
            token,
        })
    }

    pub async fn list(&self, org_id: i32) -> Result<Vec<invite::Model>> {
        Ok(invite::Entity::find()
            .filter(invite::Column::OrganizationId.eq(org_id))
            .order_by_desc(invite::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    /// Revoke a pending invitation.
    pub async fn revoke(&self, org_id: i32, invite_id: i32) -> Result<invite::Model> {
        let existing = invite::Entity::find_by_id(invite_id)
            .filter(invite::Column::OrganizationId.eq(org_id))
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("Invite not found"))?;

        if invite_status(&existing) != "pending" {
            return Err(AppError::conflict(format!(
                "Invite is {}, only pending invites can be revoked",
                invite_status(&existing)
            )));
        }

        let mut active: invite::ActiveModel = existing.into();
        active.revoked_at = Set(Some(Utc::now()));
        Ok(active.update(&self.db).await?)
    }

    /// Accept an invitation by its cleartext token, creating the member.
    ///
    /// Single-shot: a second accept of the same token is a conflict.
    pub async fn accept(
        &self,
        token: &str,
        display_name: Option<String>,
    ) -> Result<member::Model> {
        let existing = invite::Entity::find()
            .filter(invite::Column::TokenHash.eq(hash_token(token)))
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("Invite not found"))?;

        match invite_status(&existing) {
            "pending" => {}
            other => {
                return Err(AppError::conflict(format!(
                    "Invite is {} and can no longer be accepted",
                    other
                )));
            }
        }

        let used = self.seats.used_seats(existing.organization_id).await?;
        if !self
            .seats
            .has_seat_available(existing.organization_id, used)
            .await?
        {
            return Err(AppError::conflict(
                "Organization has no seats available for this invite",
            ));
        }

        let role: MemberRole = existing.role.parse().unwrap_or_default();
        let display_name = display_name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| {
                existing
                    .email
                    .split('@')
                    .next()
                    .unwrap_or(existing.email.as_str())
                    .to_string()
            });

        let now = Utc::now();
        let org_id = existing.organization_id;
        let email = existing.email.clone();

        let txn = self.db.begin().await?;

        let new_member = member::ActiveModel {
            organization_id: Set(org_id),
            display_name: Set(display_name),
            email: Set(Some(email)),
            role: Set(role.as_str().to_string()),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let mut active: invite::ActiveModel = existing.into();
        active.accepted_at = Set(Some(now));
        active.update(&txn).await?;

        txn.commit().await?;

        tracing::info!(org_id, member_id = new_member.id, "invitation accepted");

        Ok(new_member)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_token_is_stable_hex() {
        let a = hash_token("abc");
        let b = hash_token("abc");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(hash_token("abcd"), a);
    }

    #[test]
    fn test_generate_token_is_unique_and_opaque() {
        let t1 = generate_token();
        let t2 = generate_token();
        assert_ne!(t1, t2);
        assert_eq!(t1.len(), 64);
    }

    #[test]
    fn test_invite_status_derivation() {
        let now = Utc::now();
        let base = invite::Model {
            id: 1,
            organization_id: 1,
            email: "a@b.c".to_string(),
            role: "AGENT".to_string(),
            token_hash: "x".to_string(),
            invited_by: None,
            expires_at: now + Duration::days(1),
            accepted_at: None,
            revoked_at: None,
            created_at: now,
        };
        assert_eq!(invite_status(&base), "pending");

        let expired = invite::Model {
            expires_at: now - Duration::days(1),
            ..base.clone()
        };
        assert_eq!(invite_status(&expired), "expired");

        let accepted = invite::Model {
            accepted_at: Some(now),
            ..base.clone()
        };
        assert_eq!(invite_status(&accepted), "accepted");

        // Revoked wins even when also expired
        let revoked = invite::Model {
            revoked_at: Some(now),
            expires_at: now - Duration::days(1),
            ..base
        };
        assert_eq!(invite_status(&revoked), "revoked");
    }
}
