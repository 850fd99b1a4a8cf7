use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentType {
    Policy,
    Contract,
    Photo,
    Estimate,
    Invoice,
    Permit,
    #[default]
    Other,
}

impl DocumentType {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Policy => "POLICY",
            Self::Contract => "CONTRACT",
            Self::Photo => "PHOTO",
            Self::Estimate => "ESTIMATE",
            Self::Invoice => "INVOICE",
            Self::Permit => "PERMIT",
            Self::Other => "OTHER",
        }
    }
}

impl FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "POLICY" => Ok(Self::Policy),
            "CONTRACT" => Ok(Self::Contract),
            "PHOTO" => Ok(Self::Photo),
            "ESTIMATE" => Ok(Self::Estimate),
            "INVOICE" => Ok(Self::Invoice),
            "PERMIT" => Ok(Self::Permit),
            "OTHER" => Ok(Self::Other),
            other => Err(format!("invalid document type: '{}'", other)),
        }
    }
}
