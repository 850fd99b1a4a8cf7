//! Construction domain types.
//!
//! [`EstimateExtraction`] mirrors the JSON the external estimate-extraction
//! step produces; this service only consumes that shape, it never performs
//! the extraction itself.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Roof measurements and accessory counts feeding the material-order
/// generator. Every field is optional; absent values contribute nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoofMeasurements {
    pub material: Option<String>,
    pub color: Option<String>,
    pub squares: Option<f64>,
    pub layers: Option<i32>,
    pub pitch: Option<String>,
    pub chimney_count: Option<i32>,
    pub skylight_count: Option<i32>,
    pub starter_feet: Option<f64>,
    pub gutter_apron_feet: Option<f64>,
    pub drip_edge_feet: Option<f64>,
    pub flashing_feet: Option<f64>,
    pub flashing_needed: Option<bool>,
    pub boot_count: Option<i32>,
    pub electric_boot_count: Option<i32>,
    pub kitchen_vent_count: Option<i32>,
    pub vent_type: Option<String>,
    pub vent_count: Option<i32>,
    pub ice_water_squares: Option<f64>,
    pub ice_water_lines: Option<i32>,
    pub needs_plywood: Option<bool>,
    pub plywood_sheets: Option<i32>,
}

/// One line of a material order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialItem {
    pub name: String,
    pub quantity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default = "default_required")]
    pub required: bool,
}

fn default_required() -> bool {
    true
}

impl MaterialItem {
    pub fn new(name: impl Into<String>, quantity: f64, unit: &str) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit: Some(unit.to_string()),
            notes: None,
            required: true,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Output shape of the external AI estimate-extraction step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimateExtraction {
    pub scope_items: Vec<String>,
    pub scope_other: Option<String>,
    pub roof: RoofMeasurements,
    pub materials: Vec<MaterialItem>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PermitStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    NotRequired,
}

impl PermitStatus {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::NotRequired => "NOT_REQUIRED",
        }
    }
}

impl FromStr for PermitStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PENDING" => Ok(Self::Pending),
            "APPROVED" => Ok(Self::Approved),
            "REJECTED" => Ok(Self::Rejected),
            "NOT_REQUIRED" => Ok(Self::NotRequired),
            other => Err(format!("invalid permit status: '{}'", other)),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    #[default]
    Planning,
    InProgress,
    OnHold,
    Completed,
    Cancelled,
}

impl ProjectStatus {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Planning => "PLANNING",
            Self::InProgress => "IN_PROGRESS",
            Self::OnHold => "ON_HOLD",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PLANNING" => Ok(Self::Planning),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "ON_HOLD" => Ok(Self::OnHold),
            "COMPLETED" => Ok(Self::Completed),
            "CANCELLED" => Ok(Self::Cancelled),
            other => Err(format!("invalid project status: '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_deserializes_partial_json() {
        let extraction: EstimateExtraction = serde_json::from_str(
            r#"{
                "scope_items": ["Roof", "Gutters"],
                "roof": {"squares": 24.5, "vent_count": 3}
            }"#,
        )
        .unwrap();
        assert_eq!(extraction.scope_items, vec!["Roof", "Gutters"]);
        assert_eq!(extraction.roof.squares, Some(24.5));
        assert_eq!(extraction.roof.vent_count, Some(3));
        assert!(extraction.roof.ice_water_lines.is_none());
        assert!(extraction.materials.is_empty());
    }

    #[test]
    fn test_material_item_required_defaults_true() {
        let item: MaterialItem =
            serde_json::from_str(r#"{"name": "Shingles", "quantity": 20}"#).unwrap();
        assert!(item.required);
    }
}
