use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    Meeting,
    Adjustment,
    Estimate,
    Inspection,
    Appointment,
    Deadline,
    #[default]
    Other,
}

impl EventType {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Meeting => "MEETING",
            Self::Adjustment => "ADJUSTMENT",
            Self::Estimate => "ESTIMATE",
            Self::Inspection => "INSPECTION",
            Self::Appointment => "APPOINTMENT",
            Self::Deadline => "DEADLINE",
            Self::Other => "OTHER",
        }
    }
}

impl FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "MEETING" => Ok(Self::Meeting),
            "ADJUSTMENT" => Ok(Self::Adjustment),
            "ESTIMATE" => Ok(Self::Estimate),
            "INSPECTION" => Ok(Self::Inspection),
            "APPOINTMENT" => Ok(Self::Appointment),
            "DEADLINE" => Ok(Self::Deadline),
            "OTHER" => Ok(Self::Other),
            other => Err(format!("invalid event type: '{}'", other)),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
    Rescheduled,
}

impl EventStatus {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "SCHEDULED",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
            Self::Rescheduled => "RESCHEDULED",
        }
    }
}

impl FromStr for EventStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "SCHEDULED" => Ok(Self::Scheduled),
            "COMPLETED" => Ok(Self::Completed),
            "CANCELLED" => Ok(Self::Cancelled),
            "RESCHEDULED" => Ok(Self::Rescheduled),
            other => Err(format!("invalid event status: '{}'", other)),
        }
    }
}
