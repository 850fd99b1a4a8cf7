//! Organization member roles.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role of a member within an organization.
///
/// Admins manage everything; co-admins manage records but not members;
/// agents work their own clients.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberRole {
    Admin,
    CoAdmin,
    #[default]
    Agent,
}

impl MemberRole {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::CoAdmin => "CO_ADMIN",
            Self::Agent => "AGENT",
        }
    }

    /// Check if this role can manage organization members and settings.
    #[must_use]
    pub fn can_manage_members(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Check if this role can delete records (clients, events, tasks).
    #[must_use]
    pub fn can_delete_records(&self) -> bool {
        matches!(self, Self::Admin | Self::CoAdmin)
    }
}

/// Error returned when parsing a role string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRoleError {
    invalid_value: String,
}

impl fmt::Display for ParseRoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid role: '{}' (expected: ADMIN, CO_ADMIN, or AGENT)",
            self.invalid_value
        )
    }
}

impl std::error::Error for ParseRoleError {}

impl FromStr for MemberRole {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ADMIN" => Ok(Self::Admin),
            "CO_ADMIN" => Ok(Self::CoAdmin),
            "AGENT" => Ok(Self::Agent),
            _ => Err(ParseRoleError {
                invalid_value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_permissions() {
        assert!(MemberRole::Admin.can_manage_members());
        assert!(MemberRole::Admin.can_delete_records());

        assert!(!MemberRole::CoAdmin.can_manage_members());
        assert!(MemberRole::CoAdmin.can_delete_records());

        assert!(!MemberRole::Agent.can_manage_members());
        assert!(!MemberRole::Agent.can_delete_records());
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("ADMIN".parse::<MemberRole>().unwrap(), MemberRole::Admin);
        assert_eq!("co_admin".parse::<MemberRole>().unwrap(), MemberRole::CoAdmin);
        assert!("superuser".parse::<MemberRole>().is_err());
    }

    #[test]
    fn test_role_serialization() {
        let json = serde_json::to_string(&MemberRole::CoAdmin).unwrap();
        assert_eq!(json, "\"CO_ADMIN\"");
        let parsed: MemberRole = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, MemberRole::CoAdmin);
    }
}
