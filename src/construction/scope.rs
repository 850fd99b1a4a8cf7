//! Material-order generation.
//!
//! Derives a deterministic bill of materials from roof measurements. The
//! result seeds a user-adjustable material order; nothing here errors on
//! missing input, lines are simply omitted when their quantity is zero or
//! absent.

use super::types::{MaterialItem, RoofMeasurements};

/// Squares one roll of underlayment covers.
const PAPER_SQUARES_PER_ROLL: f64 = 10.0;
/// Squares one roll of ice & water membrane covers.
const ICE_WATER_SQUARES_PER_ROLL: f64 = 2.0;
/// Squares one box of coil nails covers.
const NAIL_SQUARES_PER_BOX: f64 = 18.0;
/// Squares one box of cap staples covers.
const STAPLE_SQUARES_PER_BOX: f64 = 10.0;
/// One course of ice & water along an eave covers roughly two squares.
const SQUARES_PER_ICE_WATER_LINE: f64 = 2.0;

fn ceil_ratio(amount: f64, per_unit: f64) -> f64 {
    (amount / per_unit).ceil()
}

/// Ice & water coverage in squares: an explicit measurement wins; otherwise
/// it is estimated from the number of eave lines, capped at the roof size.
#[must_use]
pub fn ice_water_squares(roof: &RoofMeasurements) -> f64 {
    if let Some(explicit) = roof.ice_water_squares {
        return explicit.max(0.0);
    }
    let squares = roof.squares.unwrap_or(0.0).max(0.0);
    let lines = f64::from(roof.ice_water_lines.unwrap_or(0).max(0));
    squares.min(lines * SQUARES_PER_ICE_WATER_LINE)
}

/// Generate the bill of materials for a roof.
///
/// Line order is fixed: shingles first (when there is any roof), then
/// coverage-derived lines, then accessories carrying their literal counts,
/// then the constant caulking line. Calling this twice with the same input
/// yields the same list.
#[must_use]
pub fn generate_material_order(roof: &RoofMeasurements) -> Vec<MaterialItem> {
    let mut items = Vec::new();

    let squares = roof.squares.unwrap_or(0.0).max(0.0);
    let iw_squares = ice_water_squares(roof);

    if squares > 0.0 {
        let notes = match (roof.material.as_deref(), roof.color.as_deref()) {
            (Some(material), Some(color)) => Some(format!("{}, {}", material, color)),
            (Some(material), None) => Some(material.to_string()),
            (None, Some(color)) => Some(color.to_string()),
            (None, None) => None,
        };
        let mut shingles = MaterialItem::new("Shingles", squares, "squares");
        shingles.notes = notes;
        items.push(shingles);
    }

    let paper_squares = (squares - iw_squares).max(0.0);
    if paper_squares > 0.0 {
        items.push(MaterialItem::new(
            "Synthetic underlayment",
            ceil_ratio(paper_squares, PAPER_SQUARES_PER_ROLL),
            "rolls",
        ));
    }

    if iw_squares > 0.0 {
        let rolls = ceil_ratio(iw_squares, ICE_WATER_SQUARES_PER_ROLL).max(1.0);
        items.push(MaterialItem::new("Ice & water shield", rolls, "rolls"));
    }

    if squares > 0.0 {
        items.push(MaterialItem::new(
            "Coil nails",
            ceil_ratio(squares, NAIL_SQUARES_PER_BOX).max(1.0),
            "boxes",
        ));
        items.push(MaterialItem::new(
            "Cap staples",
            ceil_ratio(squares, STAPLE_SQUARES_PER_BOX).max(1.0),
            "boxes",
        ));
    }

    if roof.needs_plywood.unwrap_or(false) {
        if let Some(sheets) = roof.plywood_sheets.filter(|&s| s > 0) {
            items.push(MaterialItem::new("Plywood", f64::from(sheets), "sheets"));
        }
        if squares > 0.0 {
            items.push(MaterialItem::new(
                "Plywood nails",
                ceil_ratio(squares, NAIL_SQUARES_PER_BOX).max(1.0),
                "boxes",
            ));
        }
    }

    let count_line = |items: &mut Vec<MaterialItem>, name: &str, count: Option<i32>, unit: &str| {
        if let Some(count) = count.filter(|&c| c > 0) {
            items.push(MaterialItem::new(name, f64::from(count), unit));
        }
    };
    let footage_line = |items: &mut Vec<MaterialItem>, name: &str, feet: Option<f64>| {
        if let Some(feet) = feet.filter(|&f| f > 0.0) {
            items.push(MaterialItem::new(name, feet, "feet"));
        }
    };

    count_line(&mut items, "Pipe boots", roof.boot_count, "pieces");
    count_line(
        &mut items,
        "Electric boots",
        roof.electric_boot_count,
        "pieces",
    );
    count_line(
        &mut items,
        "Kitchen exhaust vents",
        roof.kitchen_vent_count,
        "pieces",
    );
    if let Some(count) = roof.vent_count.filter(|&c| c > 0) {
        let mut vents = MaterialItem::new("Roof vents", f64::from(count), "pieces");
        vents.notes = roof.vent_type.clone();
        items.push(vents);
    }
    count_line(&mut items, "Chimney coil", roof.chimney_count, "pieces");
    footage_line(&mut items, "Gutter apron", roof.gutter_apron_feet);
    footage_line(&mut items, "Drip edge", roof.drip_edge_feet);
    footage_line(&mut items, "Starter strip", roof.starter_feet);
    if roof.flashing_needed.unwrap_or(false) {
        footage_line(&mut items, "Step flashing", roof.flashing_feet);
    }

    items.push(MaterialItem::new("Caulking", 2.0, "tubes"));

    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roof(squares: Option<f64>) -> RoofMeasurements {
        RoofMeasurements {
            squares,
            ..Default::default()
        }
    }

    fn find<'a>(items: &'a [MaterialItem], name: &str) -> &'a MaterialItem {
        items
            .iter()
            .find(|i| i.name == name)
            .unwrap_or_else(|| panic!("missing line item: {}", name))
    }

    #[test]
    fn test_reference_roof_quantities() {
        // 20 squares, two eave lines of ice & water, nothing else.
        let input = RoofMeasurements {
            squares: Some(20.0),
            ice_water_lines: Some(2),
            ..Default::default()
        };
        let items = generate_material_order(&input);

        // iw = min(20, 2 * 2) = 4; paper = 16
        assert_eq!(find(&items, "Shingles").quantity, 20.0);
        assert_eq!(find(&items, "Synthetic underlayment").quantity, 2.0); // ceil(16/10)
        assert_eq!(find(&items, "Ice & water shield").quantity, 2.0); // ceil(4/2)
        assert_eq!(find(&items, "Coil nails").quantity, 2.0); // ceil(20/18)
        assert_eq!(find(&items, "Cap staples").quantity, 2.0); // ceil(20/10)
        assert_eq!(find(&items, "Caulking").quantity, 2.0);
    }

    #[test]
    fn test_empty_roof_yields_only_caulking() {
        let items = generate_material_order(&roof(Some(0.0)));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Caulking");
        assert_eq!(items[0].quantity, 2.0);
        assert_eq!(items[0].unit.as_deref(), Some("tubes"));

        let items = generate_material_order(&RoofMeasurements::default());
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Caulking");
    }

    #[test]
    fn test_idempotent_for_identical_inputs() {
        let input = RoofMeasurements {
            squares: Some(27.5),
            ice_water_lines: Some(3),
            boot_count: Some(4),
            drip_edge_feet: Some(120.0),
            flashing_needed: Some(true),
            flashing_feet: Some(40.0),
            ..Default::default()
        };
        assert_eq!(
            generate_material_order(&input),
            generate_material_order(&input)
        );
    }

    #[test]
    fn test_explicit_ice_water_squares_override_lines() {
        let input = RoofMeasurements {
            squares: Some(20.0),
            ice_water_squares: Some(10.0),
            ice_water_lines: Some(1), // would estimate 2 squares; must be ignored
            ..Default::default()
        };
        let items = generate_material_order(&input);

        assert_eq!(find(&items, "Ice & water shield").quantity, 5.0); // ceil(10/2)
        assert_eq!(find(&items, "Synthetic underlayment").quantity, 1.0); // ceil(10/10)
    }

    #[test]
    fn test_shingles_line_is_first_and_carries_notes() {
        let input = RoofMeasurements {
            squares: Some(18.0),
            material: Some("Architectural".to_string()),
            color: Some("Weathered Wood".to_string()),
            ..Default::default()
        };
        let items = generate_material_order(&input);

        assert_eq!(items[0].name, "Shingles");
        assert_eq!(
            items[0].notes.as_deref(),
            Some("Architectural, Weathered Wood")
        );
    }

    #[test]
    fn test_caulking_is_always_last() {
        let input = RoofMeasurements {
            squares: Some(20.0),
            boot_count: Some(2),
            ..Default::default()
        };
        let items = generate_material_order(&input);
        assert_eq!(items.last().unwrap().name, "Caulking");
    }

    #[test]
    fn test_ice_water_estimate_capped_at_roof_size() {
        let input = RoofMeasurements {
            squares: Some(3.0),
            ice_water_lines: Some(5), // 10 squares uncapped
            ..Default::default()
        };
        assert_eq!(ice_water_squares(&input), 3.0);

        // Fully covered roof leaves no underlayment line.
        let items = generate_material_order(&input);
        assert!(!items.iter().any(|i| i.name == "Synthetic underlayment"));
        assert_eq!(find(&items, "Ice & water shield").quantity, 2.0); // ceil(3/2)
    }

    #[test]
    fn test_small_coverage_still_gets_one_roll_and_box() {
        let input = RoofMeasurements {
            squares: Some(1.0),
            ice_water_squares: Some(0.5),
            ..Default::default()
        };
        let items = generate_material_order(&input);

        assert_eq!(find(&items, "Ice & water shield").quantity, 1.0); // max(1, ceil(0.5/2))
        assert_eq!(find(&items, "Coil nails").quantity, 1.0);
        assert_eq!(find(&items, "Cap staples").quantity, 1.0);
    }

    #[test]
    fn test_accessories_carry_literal_quantities() {
        let input = RoofMeasurements {
            squares: Some(20.0),
            boot_count: Some(3),
            electric_boot_count: Some(1),
            kitchen_vent_count: Some(2),
            vent_type: Some("Ridge".to_string()),
            vent_count: Some(6),
            chimney_count: Some(1),
            gutter_apron_feet: Some(80.0),
            drip_edge_feet: Some(140.0),
            starter_feet: Some(160.0),
            flashing_needed: Some(true),
            flashing_feet: Some(35.0),
            ..Default::default()
        };
        let items = generate_material_order(&input);

        assert_eq!(find(&items, "Pipe boots").quantity, 3.0);
        assert_eq!(find(&items, "Electric boots").quantity, 1.0);
        assert_eq!(find(&items, "Kitchen exhaust vents").quantity, 2.0);
        assert_eq!(find(&items, "Roof vents").quantity, 6.0);
        assert_eq!(find(&items, "Roof vents").notes.as_deref(), Some("Ridge"));
        assert_eq!(find(&items, "Chimney coil").quantity, 1.0);
        assert_eq!(find(&items, "Gutter apron").quantity, 80.0);
        assert_eq!(find(&items, "Drip edge").quantity, 140.0);
        assert_eq!(find(&items, "Starter strip").quantity, 160.0);
        assert_eq!(find(&items, "Step flashing").quantity, 35.0);
    }

    #[test]
    fn test_flashing_omitted_without_flag() {
        let input = RoofMeasurements {
            squares: Some(20.0),
            flashing_feet: Some(35.0),
            flashing_needed: Some(false),
            ..Default::default()
        };
        let items = generate_material_order(&input);
        assert!(!items.iter().any(|i| i.name == "Step flashing"));
    }

    #[test]
    fn test_plywood_gated_on_flag() {
        let with_plywood = RoofMeasurements {
            squares: Some(20.0),
            needs_plywood: Some(true),
            plywood_sheets: Some(12),
            ..Default::default()
        };
        let items = generate_material_order(&with_plywood);
        assert_eq!(find(&items, "Plywood").quantity, 12.0);
        assert_eq!(find(&items, "Plywood nails").quantity, 2.0); // nail-box formula

        let without_flag = RoofMeasurements {
            squares: Some(20.0),
            plywood_sheets: Some(12),
            needs_plywood: Some(false),
            ..Default::default()
        };
        let items = generate_material_order(&without_flag);
        assert!(!items.iter().any(|i| i.name.starts_with("Plywood")));
    }

    #[test]
    fn test_all_generated_items_are_required() {
        let input = RoofMeasurements {
            squares: Some(20.0),
            ice_water_lines: Some(2),
            boot_count: Some(3),
            ..Default::default()
        };
        assert!(generate_material_order(&input).iter().all(|i| i.required));
    }
}
