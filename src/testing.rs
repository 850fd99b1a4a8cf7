//! Test database utilities and fixtures.
//!
//! SQLite in-memory, schema created from the entity definitions. Fast and
//! dependency-free; integration tests in `tests/` build on this.

use sea_orm::{Database, DatabaseConnection};

use crate::database;
use crate::entities::{member, organization};
use crate::error::Result;
use crate::organizations::{MemberRole, NewMember, NewOrganization, OrgStore};

/// Manages a test database connection.
pub struct TestDb {
    pub connection: DatabaseConnection,
}

impl TestDb {
    /// Create a fresh in-memory SQLite database with all tables.
    pub async fn new() -> Result<Self> {
        let connection = Database::connect("sqlite::memory:").await.map_err(|e| {
            crate::error::AppError::internal(format!("Failed to create test database: {}", e))
        })?;

        database::bootstrap_schema(&connection).await?;

        Ok(Self { connection })
    }
}

/// Create an organization (starter plan) with its admin owner.
pub async fn seed_org(db: &DatabaseConnection) -> Result<(organization::Model, member::Model)> {
    seed_org_named(db, "Test Adjusters").await
}

/// Create an organization with a specific name.
pub async fn seed_org_named(
    db: &DatabaseConnection,
    name: &str,
) -> Result<(organization::Model, member::Model)> {
    OrgStore::new(db.clone())
        .create(NewOrganization {
            name: name.to_string(),
            business_type: Some("Public adjusting".to_string()),
            plan_tier: "starter".to_string(),
            trial_ends_at: None,
            owner_name: "Owner".to_string(),
            owner_email: Some("owner@example.com".to_string()),
        })
        .await
}

/// Add an agent member to an organization.
pub async fn seed_member(
    db: &DatabaseConnection,
    org_id: i32,
    name: &str,
) -> Result<member::Model> {
    OrgStore::new(db.clone())
        .create_member(
            org_id,
            NewMember {
                display_name: name.to_string(),
                email: None,
                role: MemberRole::Agent,
            },
        )
        .await
}
