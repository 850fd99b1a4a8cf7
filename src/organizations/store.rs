//! Organization and membership persistence.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use super::types::MemberRole;
use crate::entities::{member, organization};
use crate::error::{AppError, Result};

/// Derive a URL-safe slug from an organization name.
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_dash = true;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[derive(Debug, Clone)]
pub struct NewOrganization {
    pub name: String,
    pub business_type: Option<String>,
    pub plan_tier: String,
    pub trial_ends_at: Option<chrono::DateTime<Utc>>,
    pub owner_name: String,
    pub owner_email: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewMember {
    pub display_name: String,
    pub email: Option<String>,
    pub role: MemberRole,
}

/// SeaORM-backed organization store.
#[derive(Clone)]
pub struct OrgStore {
    db: DatabaseConnection,
}

impl OrgStore {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create an organization and its admin owner member atomically.
    pub async fn create(
        &self,
        new_org: NewOrganization,
    ) -> Result<(organization::Model, member::Model)> {
        let slug = slugify(&new_org.name);
        if slug.is_empty() {
            return Err(AppError::bad_request(
                "Organization name must contain at least one alphanumeric character",
            ));
        }

        let taken = organization::Entity::find()
            .filter(organization::Column::Slug.eq(&slug))
            .one(&self.db)
            .await?
            .is_some();
        if taken {
            return Err(AppError::conflict(format!(
                "Organization slug '{}' is already taken",
                slug
            )));
        }

        tracing::debug!(slug = %slug, "creating organization");

        let now = Utc::now();
        let txn = self.db.begin().await?;

        let org = organization::ActiveModel {
            name: Set(new_org.name),
            slug: Set(slug),
            business_type: Set(new_org.business_type),
            plan_tier: Set(new_org.plan_tier),
            extra_seats: Set(0),
            trial_ends_at: Set(new_org.trial_ends_at),
            subscription_status: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let owner = member::ActiveModel {
            organization_id: Set(org.id),
            display_name: Set(new_org.owner_name),
            email: Set(new_org.owner_email),
            role: Set(MemberRole::Admin.as_str().to_string()),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        tracing::info!(
            org_id = org.id,
            owner_id = owner.id,
            "organization and owner created atomically"
        );

        Ok((org, owner))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<organization::Model>> {
        Ok(organization::Entity::find_by_id(id).one(&self.db).await?)
    }

    pub async fn get(&self, id: i32) -> Result<organization::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Organization not found"))
    }

    pub async fn update(
        &self,
        id: i32,
        name: Option<String>,
        business_type: Option<String>,
        plan_tier: Option<String>,
        extra_seats: Option<i32>,
    ) -> Result<organization::Model> {
        let org = self.get(id).await?;

        let mut active: organization::ActiveModel = org.into();
        if let Some(name) = name {
            active.name = Set(name);
        }
        if let Some(business_type) = business_type {
            active.business_type = Set(Some(business_type));
        }
        if let Some(plan_tier) = plan_tier {
            active.plan_tier = Set(plan_tier);
        }
        if let Some(extra_seats) = extra_seats {
            active.extra_seats = Set(extra_seats);
        }
        active.updated_at = Set(Utc::now());

        Ok(active.update(&self.db).await?)
    }

    // === Members ===

    pub async fn list_members(&self, org_id: i32) -> Result<Vec<member::Model>> {
        Ok(member::Entity::find()
            .filter(member::Column::OrganizationId.eq(org_id))
            .order_by_asc(member::Column::Id)
            .all(&self.db)
            .await?)
    }

    pub async fn get_member(&self, org_id: i32, member_id: i32) -> Result<member::Model> {
        member::Entity::find_by_id(member_id)
            .filter(member::Column::OrganizationId.eq(org_id))
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("Member not found"))
    }

    pub async fn member_count(&self, org_id: i32) -> Result<u32> {
        let count = member::Entity::find()
            .filter(member::Column::OrganizationId.eq(org_id))
            .count(&self.db)
            .await?;
        Ok(u32::try_from(count).unwrap_or(u32::MAX))
    }

    pub async fn create_member(&self, org_id: i32, new_member: NewMember) -> Result<member::Model> {
        tracing::debug!(org_id, name = %new_member.display_name, "adding member");

        Ok(member::ActiveModel {
            organization_id: Set(org_id),
            display_name: Set(new_member.display_name),
            email: Set(new_member.email),
            role: Set(new_member.role.as_str().to_string()),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?)
    }

    /// Change a member's role. Refuses to demote the last admin.
    pub async fn update_member_role(
        &self,
        org_id: i32,
        member_id: i32,
        role: MemberRole,
    ) -> Result<member::Model> {
        let existing = self.get_member(org_id, member_id).await?;

        if existing.role == MemberRole::Admin.as_str()
            && role != MemberRole::Admin
            && self.admin_count(org_id).await? <= 1
        {
            return Err(AppError::conflict(
                "Cannot demote the organization's last admin",
            ));
        }

        let mut active: member::ActiveModel = existing.into();
        active.role = Set(role.as_str().to_string());
        Ok(active.update(&self.db).await?)
    }

    /// Remove a member. Refuses to remove the last admin.
    pub async fn delete_member(&self, org_id: i32, member_id: i32) -> Result<()> {
        let existing = self.get_member(org_id, member_id).await?;

        if existing.role == MemberRole::Admin.as_str() && self.admin_count(org_id).await? <= 1 {
            return Err(AppError::conflict(
                "Cannot remove the organization's last admin",
            ));
        }

        member::Entity::delete_by_id(member_id).exec(&self.db).await?;
        tracing::info!(org_id, member_id, "member removed");
        Ok(())
    }

    async fn admin_count(&self, org_id: i32) -> Result<u64> {
        Ok(member::Entity::find()
            .filter(member::Column::OrganizationId.eq(org_id))
            .filter(member::Column::Role.eq(MemberRole::Admin.as_str()))
            .count(&self.db)
            .await?)
    }
}
