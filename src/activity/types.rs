use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of activity recorded against a client.
///
/// The first six are ordinary interactions; the rest are claim workflow
/// milestones, which is what automation rules typically trigger on. The
/// matcher itself treats all types uniformly (exact equality).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityType {
    Call,
    Email,
    Visit,
    Note,
    Document,
    StatusChange,

    AdjustmentCompleted,
    ScopeRequested,
    ScopeReceived,
    ScopeSent,
    ResponseFavorable,
    ResponseNegative,
    AppraisalStarted,
    AppraisalLetterSent,
    ReleaseLetterRequired,
    ItelRequested,
    ReinspectionRequested,
}

impl ActivityType {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Call => "CALL",
            Self::Email => "EMAIL",
            Self::Visit => "VISIT",
            Self::Note => "NOTE",
            Self::Document => "DOCUMENT",
            Self::StatusChange => "STATUS_CHANGE",
            Self::AdjustmentCompleted => "ADJUSTMENT_COMPLETED",
            Self::ScopeRequested => "SCOPE_REQUESTED",
            Self::ScopeReceived => "SCOPE_RECEIVED",
            Self::ScopeSent => "SCOPE_SENT",
            Self::ResponseFavorable => "RESPONSE_FAVORABLE",
            Self::ResponseNegative => "RESPONSE_NEGATIVE",
            Self::AppraisalStarted => "APPRAISAL_STARTED",
            Self::AppraisalLetterSent => "APPRAISAL_LETTER_SENT",
            Self::ReleaseLetterRequired => "RELEASE_LETTER_REQUIRED",
            Self::ItelRequested => "ITEL_REQUESTED",
            Self::ReinspectionRequested => "REINSPECTION_REQUESTED",
        }
    }
}

impl FromStr for ActivityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "CALL" => Ok(Self::Call),
            "EMAIL" => Ok(Self::Email),
            "VISIT" => Ok(Self::Visit),
            "NOTE" => Ok(Self::Note),
            "DOCUMENT" => Ok(Self::Document),
            "STATUS_CHANGE" => Ok(Self::StatusChange),
            "ADJUSTMENT_COMPLETED" => Ok(Self::AdjustmentCompleted),
            "SCOPE_REQUESTED" => Ok(Self::ScopeRequested),
            "SCOPE_RECEIVED" => Ok(Self::ScopeReceived),
            "SCOPE_SENT" => Ok(Self::ScopeSent),
            "RESPONSE_FAVORABLE" => Ok(Self::ResponseFavorable),
            "RESPONSE_NEGATIVE" => Ok(Self::ResponseNegative),
            "APPRAISAL_STARTED" => Ok(Self::AppraisalStarted),
            "APPRAISAL_LETTER_SENT" => Ok(Self::AppraisalLetterSent),
            "RELEASE_LETTER_REQUIRED" => Ok(Self::ReleaseLetterRequired),
            "ITEL_REQUESTED" => Ok(Self::ItelRequested),
            "REINSPECTION_REQUESTED" => Ok(Self::ReinspectionRequested),
            other => Err(format!("invalid activity type: '{}'", other)),
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        for t in [
            ActivityType::Call,
            ActivityType::ScopeReceived,
            ActivityType::ReleaseLetterRequired,
            ActivityType::ReinspectionRequested,
        ] {
            assert_eq!(t.as_str().parse::<ActivityType>().unwrap(), t);
        }
    }

    #[test]
    fn test_serde_names_match_db_strings() {
        let json = serde_json::to_string(&ActivityType::AppraisalLetterSent).unwrap();
        assert_eq!(json, "\"APPRAISAL_LETTER_SENT\"");
    }

    #[test]
    fn test_unknown_rejected() {
        assert!("FAX".parse::<ActivityType>().is_err());
    }
}
