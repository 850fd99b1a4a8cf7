//! Plan tiers and seat math.
//!
//! Payment-provider integration lives outside this service; organizations
//! carry the resulting plan tier, extra seats, trial end, and subscription
//! status, and everything here is derived from those fields.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::entities::organization;

/// Subscription plan tier. Each tier includes a fixed number of seats;
/// `extra_seats` on the organization adds to that.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    #[default]
    Starter,
    Professional,
    Enterprise,
}

impl PlanTier {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Starter => "starter",
            Self::Professional => "professional",
            Self::Enterprise => "enterprise",
        }
    }

    /// Seats included in the tier's base price.
    #[must_use]
    pub fn included_seats(&self) -> u32 {
        match self {
            Self::Starter => 3,
            Self::Professional => 5,
            Self::Enterprise => 10,
        }
    }
}

impl FromStr for PlanTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "starter" => Ok(Self::Starter),
            "professional" => Ok(Self::Professional),
            "enterprise" => Ok(Self::Enterprise),
            other => Err(format!(
                "invalid plan tier: '{}' (expected: starter, professional, or enterprise)",
                other
            )),
        }
    }
}

impl fmt::Display for PlanTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived subscription/seat state for an organization, as reported by the
/// seats endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionState {
    pub plan_tier: PlanTier,
    pub included_seats: u32,
    pub extra_seats: u32,
    pub allowed_seats: u32,
    pub used_seats: u32,
    pub trial_active: bool,
    pub trial_days_left: Option<i64>,
    pub access_blocked: bool,
}

/// Total seats the organization may fill.
#[must_use]
pub fn allowed_seats(org: &organization::Model) -> u32 {
    let tier = org.plan_tier.parse().unwrap_or(PlanTier::Starter);
    let extra = u32::try_from(org.extra_seats).unwrap_or(0);
    tier.included_seats() + extra
}

#[must_use]
pub fn is_trial_active(org: &organization::Model) -> bool {
    org.trial_ends_at.is_some_and(|ends| Utc::now() <= ends)
}

/// Whole days left in the trial, rounded up. `None` when no trial was set.
#[must_use]
pub fn trial_days_left(org: &organization::Model) -> Option<i64> {
    let ends = org.trial_ends_at?;
    let seconds = (ends - Utc::now()).num_seconds();
    Some((seconds + 86_399).div_euclid(86_400))
}

#[must_use]
pub fn is_subscription_active(org: &organization::Model) -> bool {
    matches!(
        org.subscription_status.as_deref(),
        Some("active") | Some("trialing")
    )
}

/// Access is blocked when neither a live subscription nor a live trial
/// covers the organization. Reported, not enforced: the outward billing
/// surface is not this service's concern.
#[must_use]
pub fn is_access_blocked(org: &organization::Model) -> bool {
    !is_subscription_active(org) && !is_trial_active(org)
}

/// Build the full subscription/seat report for an organization.
#[must_use]
pub fn subscription_state(org: &organization::Model, used_seats: u32) -> SubscriptionState {
    let tier = org.plan_tier.parse().unwrap_or(PlanTier::Starter);
    SubscriptionState {
        plan_tier: tier,
        included_seats: tier.included_seats(),
        extra_seats: u32::try_from(org.extra_seats).unwrap_or(0),
        allowed_seats: allowed_seats(org),
        used_seats,
        trial_active: is_trial_active(org),
        trial_days_left: trial_days_left(org),
        access_blocked: is_access_blocked(org),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn org_with(
        plan_tier: &str,
        extra_seats: i32,
        trial_ends_at: Option<chrono::DateTime<Utc>>,
        subscription_status: Option<&str>,
    ) -> organization::Model {
        organization::Model {
            id: 1,
            name: "Acme Adjusters".to_string(),
            slug: "acme-adjusters".to_string(),
            business_type: None,
            plan_tier: plan_tier.to_string(),
            extra_seats,
            trial_ends_at,
            subscription_status: subscription_status.map(String::from),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_included_seats_per_tier() {
        assert_eq!(PlanTier::Starter.included_seats(), 3);
        assert_eq!(PlanTier::Professional.included_seats(), 5);
        assert_eq!(PlanTier::Enterprise.included_seats(), 10);
    }

    #[test]
    fn test_allowed_seats_adds_extra() {
        let org = org_with("professional", 2, None, None);
        assert_eq!(allowed_seats(&org), 7);
    }

    #[test]
    fn test_unknown_tier_falls_back_to_starter() {
        let org = org_with("legacy", 0, None, None);
        assert_eq!(allowed_seats(&org), 3);
    }

    #[test]
    fn test_trial_state() {
        let live = org_with("starter", 0, Some(Utc::now() + Duration::days(3)), None);
        assert!(is_trial_active(&live));
        assert_eq!(trial_days_left(&live), Some(3));
        assert!(!is_access_blocked(&live));

        let expired = org_with("starter", 0, Some(Utc::now() - Duration::days(1)), None);
        assert!(!is_trial_active(&expired));
        assert!(is_access_blocked(&expired));
    }

    #[test]
    fn test_active_subscription_unblocks_access() {
        let org = org_with("starter", 0, None, Some("active"));
        assert!(!is_access_blocked(&org));

        let lapsed = org_with("starter", 0, None, Some("past_due"));
        assert!(is_access_blocked(&lapsed));
    }
}
