//! Seat availability checking.
//!
//! Decouples membership management from plan details: member creation and
//! invite acceptance ask a [`SeatChecker`] instead of reading plan fields
//! directly.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};

use super::plans;
use crate::entities::{member, organization};
use crate::error::{AppError, Result};

#[async_trait]
pub trait SeatChecker: Send + Sync {
    /// Check if the organization has room for another member.
    async fn has_seat_available(&self, org_id: i32, current_count: u32) -> Result<bool>;

    /// Get the current seat limit for an organization.
    ///
    /// Returns `None` if there is no limit.
    async fn get_seat_limit(&self, org_id: i32) -> Result<Option<u32>>;
}

/// No-op implementation for tests and tooling.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnlimitedSeats;

#[async_trait]
impl SeatChecker for UnlimitedSeats {
    async fn has_seat_available(&self, _org_id: i32, _current_count: u32) -> Result<bool> {
        Ok(true)
    }

    async fn get_seat_limit(&self, _org_id: i32) -> Result<Option<u32>> {
        Ok(None)
    }
}

/// Seat checker backed by the organization's plan tier and extra seats.
#[derive(Clone)]
pub struct PlanSeats {
    db: DatabaseConnection,
}

impl PlanSeats {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Current member count for the organization.
    pub async fn used_seats(&self, org_id: i32) -> Result<u32> {
        let count = member::Entity::find()
            .filter(member::Column::OrganizationId.eq(org_id))
            .count(&self.db)
            .await?;
        Ok(u32::try_from(count).unwrap_or(u32::MAX))
    }
}

#[async_trait]
impl SeatChecker for PlanSeats {
    async fn has_seat_available(&self, org_id: i32, current_count: u32) -> Result<bool> {
        match self.get_seat_limit(org_id).await? {
            Some(limit) => Ok(current_count < limit),
            None => Ok(true),
        }
    }

    async fn get_seat_limit(&self, org_id: i32) -> Result<Option<u32>> {
        let org = organization::Entity::find_by_id(org_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("Organization not found"))?;
        Ok(Some(plans::allowed_seats(&org)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unlimited_seats() {
        let checker = UnlimitedSeats;

        assert!(checker.has_seat_available(1, 0).await.unwrap());
        assert!(checker.has_seat_available(1, 10_000).await.unwrap());
        assert_eq!(checker.get_seat_limit(1).await.unwrap(), None);
    }
}
