//! # Supply Calculation
//!
//! Consumable quantities derived from the opening geometry: edging tape
//! around the slab perimeter (both faces) and glue volume scaled by
//! area and thickness. Both are divided by the material efficiency and
//! rounded half-up to two decimal places.
//!
//! This is a pure function: no state, no side effects, same output for
//! the same input.
//!
//! ## Example
//!
//! ```rust
//! use quote_core::opening::DoorThickness;
//! use quote_core::supplies::compute_supplies;
//!
//! let supplies = compute_supplies(2000, 800, 0.85, DoorThickness::T35);
//! assert_eq!(supplies.tape_m, 13.18);
//! assert_eq!(supplies.glue_l, 0.38);
//! ```

use serde::{Deserialize, Serialize};

use crate::opening::DoorThickness;

/// Display labels for the two supplies, in output order.
pub const TAPE_LABEL: &str = "Edging Tape (m)";
pub const GLUE_LABEL: &str = "Glue (L)";

/// Reference glue coverage: litres per square metre at 35mm thickness.
/// Thicker slabs take proportionally more.
const GLUE_L_PER_M2_AT_35MM: f64 = 0.2;

/// Reference thickness the glue coverage is calibrated against (mm).
const REFERENCE_THICKNESS_MM: f64 = 35.0;

/// Computed supply quantities for one door.
///
/// ## JSON Example
///
/// ```json
/// { "tape_m": 13.18, "glue_l": 0.38 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SupplyResult {
    /// Edging tape required, in metres
    pub tape_m: f64,

    /// Glue required, in litres
    pub glue_l: f64,
}

impl SupplyResult {
    /// (label, quantity) pairs in output order: tape, then glue.
    pub fn line_items(&self) -> [(&'static str, f64); 2] {
        [(TAPE_LABEL, self.tape_m), (GLUE_LABEL, self.glue_l)]
    }
}

/// Compute supply quantities for a door of the given used dimensions.
///
/// Preconditions (enforced upstream by `OpeningSpec::validate`, not
/// re-checked here): `height_mm > 0`, `width_mm > 0`, efficiency in
/// (0, 1].
///
/// Formulas:
/// - area_m2 = (h × w) / 1,000,000
/// - perimeter_m = 2(h + w) / 1,000
/// - tape_m = perimeter_m × 2 / efficiency (tape runs both faces)
/// - glue_l = area_m2 × 0.2 × (thickness / 35) / efficiency
///
/// Both results are rounded half-up to two decimal places.
pub fn compute_supplies(
    height_mm: u32,
    width_mm: u32,
    efficiency: f64,
    thickness: DoorThickness,
) -> SupplyResult {
    let h = f64::from(height_mm);
    let w = f64::from(width_mm);

    let area_m2 = (h * w) / 1_000_000.0;
    let perimeter_m = (2.0 * (h + w)) / 1_000.0;

    let tape_m = perimeter_m * 2.0 / efficiency;
    let glue_l =
        area_m2 * GLUE_L_PER_M2_AT_35MM * (f64::from(thickness.mm()) / REFERENCE_THICKNESS_MM)
            / efficiency;

    SupplyResult {
        tape_m: round2(tape_m),
        glue_l: round2(glue_l),
    }
}

/// Round half-up (away from zero) to two decimal places.
///
/// The rounding mode is part of the contract; `f64::round` rounds
/// halves away from zero, which for our non-negative quantities is
/// half-up.
fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_example() {
        // 2000 x 800 @ 35mm, 85% yield:
        // area = 1.6 m2, perimeter = 5.6 m
        // tape = 5.6 * 2 / 0.85 = 13.1764... -> 13.18
        // glue = 1.6 * 0.2 * 1.0 / 0.85 = 0.3764... -> 0.38
        let supplies = compute_supplies(2000, 800, 0.85, DoorThickness::T35);
        assert_eq!(supplies.tape_m, 13.18);
        assert_eq!(supplies.glue_l, 0.38);
    }

    #[test]
    fn test_full_efficiency_no_waste() {
        let supplies = compute_supplies(2000, 800, 1.0, DoorThickness::T35);
        assert_eq!(supplies.tape_m, 11.2);
        assert_eq!(supplies.glue_l, 0.32);
    }

    #[test]
    fn test_thickness_scales_glue_only() {
        let base = compute_supplies(2000, 800, 1.0, DoorThickness::T35);
        let thick = compute_supplies(2000, 800, 1.0, DoorThickness::T50);

        assert_eq!(base.tape_m, thick.tape_m);
        // 0.32 * 50/35 = 0.4571... -> 0.46
        assert_eq!(thick.glue_l, 0.46);
    }

    #[test]
    fn test_monotonic_in_dimensions() {
        let base = compute_supplies(2000, 800, 0.85, DoorThickness::T35);
        let taller = compute_supplies(2400, 800, 0.85, DoorThickness::T35);
        let wider = compute_supplies(2000, 1000, 0.85, DoorThickness::T35);

        assert!(taller.tape_m >= base.tape_m);
        assert!(taller.glue_l >= base.glue_l);
        assert!(wider.tape_m >= base.tape_m);
        assert!(wider.glue_l >= base.glue_l);
    }

    #[test]
    fn test_monotonic_in_efficiency() {
        // Lower efficiency means more waste, never less material.
        let efficient = compute_supplies(2000, 800, 1.0, DoorThickness::T35);
        let wasteful = compute_supplies(2000, 800, 0.5, DoorThickness::T35);

        assert!(wasteful.tape_m >= efficient.tape_m);
        assert!(wasteful.glue_l >= efficient.glue_l);
    }

    #[test]
    fn test_outputs_finite_and_two_decimal() {
        for (h, w, eff) in [
            (1500u32, 600u32, 0.5f64),
            (3000, 1500, 1.0),
            (2345, 876, 0.73),
        ] {
            let s = compute_supplies(h, w, eff, DoorThickness::T45);
            assert!(s.tape_m.is_finite() && s.tape_m >= 0.0);
            assert!(s.glue_l.is_finite() && s.glue_l >= 0.0);
            // Rounded to exactly two decimals.
            assert_eq!(s.tape_m, round2(s.tape_m));
            assert_eq!(s.glue_l, round2(s.glue_l));
        }
    }

    #[test]
    fn test_idempotent() {
        let a = compute_supplies(2100, 900, 0.85, DoorThickness::T40);
        let b = compute_supplies(2100, 900, 0.85, DoorThickness::T40);
        assert_eq!(a, b);
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round2(0.375), 0.38);
        assert_eq!(round2(13.176), 13.18);
        assert_eq!(round2(13.174), 13.17);
    }

    #[test]
    fn test_line_items_order_and_labels() {
        let s = compute_supplies(2000, 800, 0.85, DoorThickness::T35);
        let items = s.line_items();
        assert_eq!(items[0], ("Edging Tape (m)", 13.18));
        assert_eq!(items[1], ("Glue (L)", 0.38));
    }
}
