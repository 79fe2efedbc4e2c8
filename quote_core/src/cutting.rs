//! # Cutting List
//!
//! Itemized panel/rail components needed to build one door, plus the
//! preset lists for the common door construction styles. Presets are
//! canonical starting points: `preset_list()` hands out a fresh copy
//! every time, so editing a list never mutates the preset.

use serde::{Deserialize, Serialize};

use crate::errors::{QuoteError, QuoteResult};

/// Component dimension and quantity bounds enforced on edit (from the form).
pub const LENGTH_RANGE_MM: (u32, u32) = (100, 3000);
pub const COMPONENT_WIDTH_RANGE_MM: (u32, u32) = (50, 1500);
pub const QUANTITY_RANGE: (u32, u32) = (1, 10);

/// Sheet material a component is cut from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PanelMaterial {
    #[serde(rename = "HDF")]
    Hdf,
    #[serde(rename = "MDF")]
    Mdf,
    Plywood,
}

impl PanelMaterial {
    /// All materials for UI selection
    pub const ALL: [PanelMaterial; 3] = [PanelMaterial::Hdf, PanelMaterial::Mdf, PanelMaterial::Plywood];

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            PanelMaterial::Hdf => "HDF",
            PanelMaterial::Mdf => "MDF",
            PanelMaterial::Plywood => "Plywood",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> QuoteResult<Self> {
        match s.trim().to_uppercase().as_str() {
            "HDF" => Ok(PanelMaterial::Hdf),
            "MDF" => Ok(PanelMaterial::Mdf),
            "PLYWOOD" | "PLY" => Ok(PanelMaterial::Plywood),
            _ => Err(QuoteError::invalid_input(
                "material",
                s,
                "Expected one of: HDF, MDF, Plywood",
            )),
        }
    }
}

impl std::fmt::Display for PanelMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One row of the cutting list.
///
/// ## JSON Example
///
/// ```json
/// { "name": "Top Rail", "material": "HDF", "length_mm": 900, "width_mm": 100, "quantity": 2 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CuttingListEntry {
    /// Component name (free text)
    pub name: String,

    /// Sheet material
    pub material: PanelMaterial,

    /// Cut length (mm)
    pub length_mm: u32,

    /// Cut width (mm)
    pub width_mm: u32,

    /// Number of pieces
    pub quantity: u32,
}

impl CuttingListEntry {
    pub fn new(
        name: impl Into<String>,
        material: PanelMaterial,
        length_mm: u32,
        width_mm: u32,
        quantity: u32,
    ) -> Self {
        CuttingListEntry {
            name: name.into(),
            material,
            length_mm,
            width_mm,
            quantity,
        }
    }

    /// Validate dimensions and quantity against the form bounds.
    pub fn validate(&self) -> QuoteResult<()> {
        let (l_min, l_max) = LENGTH_RANGE_MM;
        if self.length_mm < l_min || self.length_mm > l_max {
            return Err(QuoteError::invalid_input(
                "length_mm",
                self.length_mm.to_string(),
                format!("Length must be {}-{} mm", l_min, l_max),
            ));
        }
        let (w_min, w_max) = COMPONENT_WIDTH_RANGE_MM;
        if self.width_mm < w_min || self.width_mm > w_max {
            return Err(QuoteError::invalid_input(
                "width_mm",
                self.width_mm.to_string(),
                format!("Width must be {}-{} mm", w_min, w_max),
            ));
        }
        let (q_min, q_max) = QUANTITY_RANGE;
        if self.quantity < q_min || self.quantity > q_max {
            return Err(QuoteError::invalid_input(
                "quantity",
                self.quantity.to_string(),
                format!("Quantity must be {}-{}", q_min, q_max),
            ));
        }
        Ok(())
    }
}

/// Door construction style, each with a canonical starting cutting list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DoorStyle {
    Simple,
    #[serde(rename = "Double Panel")]
    DoublePanel,
    Flush,
    Louver,
    Custom,
}

impl DoorStyle {
    /// All styles for UI selection
    pub const ALL: [DoorStyle; 5] = [
        DoorStyle::Simple,
        DoorStyle::DoublePanel,
        DoorStyle::Flush,
        DoorStyle::Louver,
        DoorStyle::Custom,
    ];

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            DoorStyle::Simple => "Simple",
            DoorStyle::DoublePanel => "Double Panel",
            DoorStyle::Flush => "Flush",
            DoorStyle::Louver => "Louver",
            DoorStyle::Custom => "Custom",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> QuoteResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "simple" => Ok(DoorStyle::Simple),
            "double panel" | "double" => Ok(DoorStyle::DoublePanel),
            "flush" => Ok(DoorStyle::Flush),
            "louver" | "louvre" => Ok(DoorStyle::Louver),
            "custom" => Ok(DoorStyle::Custom),
            _ => Err(QuoteError::invalid_input(
                "preset",
                s,
                "Expected one of: Simple, Double Panel, Flush, Louver, Custom",
            )),
        }
    }

    /// Canonical starting cutting list for this style.
    ///
    /// Returns a fresh, independently owned list on every call so
    /// caller edits can never leak back into the preset.
    pub fn preset_list(&self) -> Vec<CuttingListEntry> {
        use PanelMaterial::{Hdf, Mdf, Plywood};
        match self {
            DoorStyle::Simple => vec![
                CuttingListEntry::new("Top Rail", Hdf, 900, 100, 2),
                CuttingListEntry::new("Bottom Rail", Hdf, 900, 100, 2),
                CuttingListEntry::new("Left Stile", Hdf, 2100, 100, 2),
                CuttingListEntry::new("Right Stile", Hdf, 2100, 100, 2),
                CuttingListEntry::new("Center Panel", Hdf, 1800, 800, 1),
            ],
            DoorStyle::DoublePanel => vec![
                CuttingListEntry::new("Top Rail", Hdf, 900, 100, 2),
                CuttingListEntry::new("Bottom Rail", Hdf, 900, 100, 2),
                CuttingListEntry::new("Left Stile", Hdf, 2100, 100, 2),
                CuttingListEntry::new("Right Stile", Hdf, 2100, 100, 2),
                CuttingListEntry::new("Top Panel", Hdf, 800, 400, 1),
                CuttingListEntry::new("Bottom Panel", Hdf, 800, 400, 1),
            ],
            DoorStyle::Flush => vec![
                CuttingListEntry::new("Face Sheet", Mdf, 2100, 900, 2),
                CuttingListEntry::new("Internal Frame", Plywood, 2100, 40, 4),
            ],
            DoorStyle::Louver => vec![
                CuttingListEntry::new("Left Stile", Hdf, 2100, 100, 2),
                CuttingListEntry::new("Right Stile", Hdf, 2100, 100, 2),
                CuttingListEntry::new("Louvers", Hdf, 600, 50, 12),
            ],
            DoorStyle::Custom => Vec::new(),
        }
    }
}

impl std::fmt::Display for DoorStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_row_counts() {
        assert_eq!(DoorStyle::Simple.preset_list().len(), 5);
        assert_eq!(DoorStyle::DoublePanel.preset_list().len(), 6);
        assert_eq!(DoorStyle::Flush.preset_list().len(), 2);
        assert_eq!(DoorStyle::Louver.preset_list().len(), 3);
        assert!(DoorStyle::Custom.preset_list().is_empty());
    }

    #[test]
    fn test_presets_not_mutated_by_edits() {
        // Simple -> edit -> Custom -> Simple again must yield the original.
        let original = DoorStyle::Simple.preset_list();

        let mut edited = DoorStyle::Simple.preset_list();
        edited[0].name = "Hacked Rail".to_string();
        edited.push(CuttingListEntry::new("Extra", PanelMaterial::Mdf, 500, 100, 1));

        let _custom = DoorStyle::Custom.preset_list();
        let again = DoorStyle::Simple.preset_list();
        assert_eq!(again, original);
        assert_eq!(again[0].name, "Top Rail");
    }

    #[test]
    fn test_panel_presets_within_form_bounds() {
        // The form bounds apply to user-edited rows. The panel presets
        // sit inside them; Flush (40mm frame) and Louver (12 louvers)
        // ship rows outside the edit bounds and are only re-validated
        // once touched.
        for style in [DoorStyle::Simple, DoorStyle::DoublePanel] {
            for entry in style.preset_list() {
                assert!(entry.validate().is_ok(), "{} / {}", style, entry.name);
            }
        }
    }

    #[test]
    fn test_entry_validation_bounds() {
        let mut entry = CuttingListEntry::new("Panel", PanelMaterial::Hdf, 1000, 100, 1);
        assert!(entry.validate().is_ok());

        entry.length_mm = 50;
        assert!(entry.validate().is_err());
        entry.length_mm = 1000;

        entry.quantity = 0;
        assert!(entry.validate().is_err());
        entry.quantity = 11;
        assert!(entry.validate().is_err());
    }

    #[test]
    fn test_material_serialization() {
        assert_eq!(serde_json::to_string(&PanelMaterial::Hdf).unwrap(), "\"HDF\"");
        assert_eq!(
            serde_json::to_string(&PanelMaterial::Plywood).unwrap(),
            "\"Plywood\""
        );
        let m: PanelMaterial = serde_json::from_str("\"MDF\"").unwrap();
        assert_eq!(m, PanelMaterial::Mdf);
    }

    #[test]
    fn test_style_serialization() {
        assert_eq!(
            serde_json::to_string(&DoorStyle::DoublePanel).unwrap(),
            "\"Double Panel\""
        );
        let s: DoorStyle = serde_json::from_str("\"Louver\"").unwrap();
        assert_eq!(s, DoorStyle::Louver);
    }

    #[test]
    fn test_entry_roundtrip() {
        let entry = CuttingListEntry::new("Top Rail", PanelMaterial::Hdf, 900, 100, 2);
        let json = serde_json::to_string(&entry).unwrap();
        let roundtrip: CuttingListEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(entry, roundtrip);
    }
}
