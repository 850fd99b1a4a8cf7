//! Clients: case records, generated ids, custom claim statuses, and
//! dashboard KPI queries.

pub mod dashboard;
pub mod id;
mod routes;
pub mod statuses;
mod store;

pub use routes::ClientsModule;
pub use store::{ClientStore, NewClient, UpdateClient};

/// Claim status a new client starts in.
pub const DEFAULT_CLAIM_STATUS: &str = "NOT_SUBMITTED";

/// Claim status that marks a client ready for the construction pipeline.
pub const READY_FOR_CONSTRUCTION_STATUS: &str = "READY_FOR_CONSTRUCTION";

/// Built-in claim statuses. Organizations extend this set with custom
/// statuses; `claim_status` accepts any of either.
pub const BUILTIN_CLAIM_STATUSES: &[&str] = &[
    "NOT_SUBMITTED",
    "SUBMITTED",
    "ADJUSTMENT_SCHEDULED",
    "IN_NEGOTIATION",
    "APPROVED",
    "READY_FOR_CONSTRUCTION",
    "PAID",
    "CLOSED",
];

/// First-check collection state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FirstCheckStatus {
    Obtained,
    #[default]
    Pending,
}

impl FirstCheckStatus {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Obtained => "OBTAINED",
            Self::Pending => "PENDING",
        }
    }
}
