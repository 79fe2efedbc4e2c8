//! # Opening Specification
//!
//! The measured door opening. A frame is never square, so height is
//! read at three horizontal positions and width at three vertical
//! positions; the door must fit the shortest/narrowest reading, so the
//! *used* dimensions are the minimum of each triple.

use serde::{Deserialize, Serialize};

use crate::errors::{QuoteError, QuoteResult};

/// Measurement bounds enforced on opening input (mm).
pub const HEIGHT_RANGE_MM: (u32, u32) = (1500, 3000);
pub const WIDTH_RANGE_MM: (u32, u32) = (600, 1500);

/// Efficiency bounds: the slider runs 0.5..=1.0, never zero.
pub const EFFICIENCY_RANGE: (f64, f64) = (0.5, 1.0);

/// Door slab thickness, one of the manufactured set.
///
/// Serializes as the bare millimeter value so persisted jobs read
/// naturally (`"thickness": 35`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum DoorThickness {
    T30,
    T35,
    T40,
    T45,
    T50,
}

impl DoorThickness {
    /// All thicknesses for UI selection
    pub const ALL: [DoorThickness; 5] = [
        DoorThickness::T30,
        DoorThickness::T35,
        DoorThickness::T40,
        DoorThickness::T45,
        DoorThickness::T50,
    ];

    /// Thickness in millimeters
    pub fn mm(&self) -> u32 {
        match self {
            DoorThickness::T30 => 30,
            DoorThickness::T35 => 35,
            DoorThickness::T40 => 40,
            DoorThickness::T45 => 45,
            DoorThickness::T50 => 50,
        }
    }
}

impl Default for DoorThickness {
    fn default() -> Self {
        DoorThickness::T35
    }
}

impl TryFrom<u32> for DoorThickness {
    type Error = QuoteError;

    fn try_from(mm: u32) -> QuoteResult<Self> {
        match mm {
            30 => Ok(DoorThickness::T30),
            35 => Ok(DoorThickness::T35),
            40 => Ok(DoorThickness::T40),
            45 => Ok(DoorThickness::T45),
            50 => Ok(DoorThickness::T50),
            _ => Err(QuoteError::invalid_input(
                "thickness",
                mm.to_string(),
                "Thickness must be one of 30, 35, 40, 45, 50 mm",
            )),
        }
    }
}

impl From<DoorThickness> for u32 {
    fn from(t: DoorThickness) -> u32 {
        t.mm()
    }
}

impl std::fmt::Display for DoorThickness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}mm", self.mm())
    }
}

/// Six-point opening measurement plus thickness and material efficiency.
///
/// ## JSON Example
///
/// ```json
/// {
///   "left_mm": 2100,
///   "centre_mm": 2100,
///   "right_mm": 2100,
///   "bottom_mm": 900,
///   "middle_mm": 900,
///   "top_mm": 900,
///   "thickness": 35,
///   "efficiency": 0.85
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpeningSpec {
    /// Height measured at the left jamb (mm)
    pub left_mm: u32,
    /// Height measured at the centre (mm)
    pub centre_mm: u32,
    /// Height measured at the right jamb (mm)
    pub right_mm: u32,

    /// Width measured at the bottom (mm)
    pub bottom_mm: u32,
    /// Width measured at the middle (mm)
    pub middle_mm: u32,
    /// Width measured at the top (mm)
    pub top_mm: u32,

    /// Door slab thickness
    pub thickness: DoorThickness,

    /// Material efficiency ratio in (0, 1]; supply quantities are
    /// divided by this to account for waste
    pub efficiency: f64,
}

impl OpeningSpec {
    /// Height used for calculation: the shortest of the three readings.
    pub fn used_height_mm(&self) -> u32 {
        self.left_mm.min(self.centre_mm).min(self.right_mm)
    }

    /// Width used for calculation: the narrowest of the three readings.
    pub fn used_width_mm(&self) -> u32 {
        self.bottom_mm.min(self.middle_mm).min(self.top_mm)
    }

    /// Validate measurements against the form bounds.
    pub fn validate(&self) -> QuoteResult<()> {
        let (h_min, h_max) = HEIGHT_RANGE_MM;
        for (field, value) in [
            ("left_mm", self.left_mm),
            ("centre_mm", self.centre_mm),
            ("right_mm", self.right_mm),
        ] {
            if value < h_min || value > h_max {
                return Err(QuoteError::invalid_input(
                    field,
                    value.to_string(),
                    format!("Height must be {}-{} mm", h_min, h_max),
                ));
            }
        }

        let (w_min, w_max) = WIDTH_RANGE_MM;
        for (field, value) in [
            ("bottom_mm", self.bottom_mm),
            ("middle_mm", self.middle_mm),
            ("top_mm", self.top_mm),
        ] {
            if value < w_min || value > w_max {
                return Err(QuoteError::invalid_input(
                    field,
                    value.to_string(),
                    format!("Width must be {}-{} mm", w_min, w_max),
                ));
            }
        }

        if !self.efficiency.is_finite() || self.efficiency <= 0.0 || self.efficiency > 1.0 {
            return Err(QuoteError::invalid_input(
                "efficiency",
                self.efficiency.to_string(),
                "Efficiency must be in (0, 1]",
            ));
        }

        Ok(())
    }
}

impl Default for OpeningSpec {
    fn default() -> Self {
        // Form defaults: 2100 x 900 standard opening, 35mm slab, 85% yield
        OpeningSpec {
            left_mm: 2100,
            centre_mm: 2100,
            right_mm: 2100,
            bottom_mm: 900,
            middle_mm: 900,
            top_mm: 900,
            thickness: DoorThickness::default(),
            efficiency: 0.85,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_used_dimensions_take_minimum() {
        let opening = OpeningSpec {
            left_mm: 2100,
            centre_mm: 2000,
            right_mm: 2200,
            bottom_mm: 900,
            middle_mm: 950,
            top_mm: 800,
            ..OpeningSpec::default()
        };
        assert_eq!(opening.used_height_mm(), 2000);
        assert_eq!(opening.used_width_mm(), 800);
    }

    #[test]
    fn test_default_opening_is_valid() {
        assert!(OpeningSpec::default().validate().is_ok());
    }

    #[test]
    fn test_out_of_range_height_rejected() {
        let opening = OpeningSpec {
            centre_mm: 1200,
            ..OpeningSpec::default()
        };
        let err = opening.validate().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_bad_efficiency_rejected() {
        let mut opening = OpeningSpec::default();
        opening.efficiency = 0.0;
        assert!(opening.validate().is_err());

        opening.efficiency = 1.2;
        assert!(opening.validate().is_err());

        opening.efficiency = f64::NAN;
        assert!(opening.validate().is_err());

        opening.efficiency = 1.0;
        assert!(opening.validate().is_ok());
    }

    #[test]
    fn test_thickness_serializes_as_number() {
        let json = serde_json::to_string(&DoorThickness::T40).unwrap();
        assert_eq!(json, "40");

        let roundtrip: DoorThickness = serde_json::from_str("45").unwrap();
        assert_eq!(roundtrip, DoorThickness::T45);

        assert!(serde_json::from_str::<DoorThickness>("37").is_err());
    }

    #[test]
    fn test_opening_roundtrip() {
        let opening = OpeningSpec::default();
        let json = serde_json::to_string_pretty(&opening).unwrap();
        let roundtrip: OpeningSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(opening, roundtrip);
    }
}
