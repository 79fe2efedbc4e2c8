//! # Hardware Selection
//!
//! Discrete fitting hardware for one door. The item set is fixed;
//! quantities come either from the standard defaults or from a custom
//! selection bounded per item. Item declaration order is the display
//! order everywhere (quote table, PDF, log).

use serde::{Deserialize, Serialize};

use crate::errors::{QuoteError, QuoteResult};

/// Fixed set of hardware items, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HardwareItem {
    Hinges,
    Lockset,
    Handle,
    Screws,
    #[serde(rename = "foam")]
    FoamBrush,
}

impl HardwareItem {
    /// All items in declaration order
    pub const ALL: [HardwareItem; 5] = [
        HardwareItem::Hinges,
        HardwareItem::Lockset,
        HardwareItem::Handle,
        HardwareItem::Screws,
        HardwareItem::FoamBrush,
    ];

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            HardwareItem::Hinges => "Hinges",
            HardwareItem::Lockset => "Lockset",
            HardwareItem::Handle => "Handle",
            HardwareItem::Screws => "Screws",
            HardwareItem::FoamBrush => "Foam/Brush",
        }
    }

    /// Standard quantity for this item
    pub fn default_quantity(&self) -> u32 {
        match self {
            HardwareItem::Hinges => 3,
            HardwareItem::Lockset => 1,
            HardwareItem::Handle => 1,
            HardwareItem::Screws => 20,
            HardwareItem::FoamBrush => 1,
        }
    }

    /// Allowed (min, max) quantity for custom selections
    pub fn quantity_range(&self) -> (u32, u32) {
        match self {
            HardwareItem::Hinges => (1, 10),
            HardwareItem::Lockset => (0, 5),
            HardwareItem::Handle => (0, 5),
            HardwareItem::Screws => (0, 200),
            HardwareItem::FoamBrush => (0, 10),
        }
    }
}

impl std::fmt::Display for HardwareItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Sourcing mode shown in the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HardwareMode {
    Standard,
    Custom,
}

/// Quantities for the fixed hardware item set.
///
/// ## JSON Example
///
/// ```json
/// { "hinges": 3, "lockset": 1, "handle": 1, "screws": 20, "foam": 1 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HardwareSelection {
    pub hinges: u32,
    pub lockset: u32,
    pub handle: u32,
    pub screws: u32,
    #[serde(rename = "foam")]
    pub foam_brush: u32,
}

impl HardwareSelection {
    /// Standard hardware pack (the fixed defaults).
    pub fn standard() -> Self {
        HardwareSelection {
            hinges: HardwareItem::Hinges.default_quantity(),
            lockset: HardwareItem::Lockset.default_quantity(),
            handle: HardwareItem::Handle.default_quantity(),
            screws: HardwareItem::Screws.default_quantity(),
            foam_brush: HardwareItem::FoamBrush.default_quantity(),
        }
    }

    /// Custom selection, validated against the per-item bounds.
    pub fn custom(
        hinges: u32,
        lockset: u32,
        handle: u32,
        screws: u32,
        foam_brush: u32,
    ) -> QuoteResult<Self> {
        let selection = HardwareSelection {
            hinges,
            lockset,
            handle,
            screws,
            foam_brush,
        };
        selection.validate()?;
        Ok(selection)
    }

    /// Quantity for one item.
    pub fn quantity(&self, item: HardwareItem) -> u32 {
        match item {
            HardwareItem::Hinges => self.hinges,
            HardwareItem::Lockset => self.lockset,
            HardwareItem::Handle => self.handle,
            HardwareItem::Screws => self.screws,
            HardwareItem::FoamBrush => self.foam_brush,
        }
    }

    /// (item, quantity) pairs in declaration order.
    pub fn items(&self) -> impl Iterator<Item = (HardwareItem, u32)> + '_ {
        HardwareItem::ALL.into_iter().map(|item| (item, self.quantity(item)))
    }

    /// Validate every quantity against its item bounds.
    pub fn validate(&self) -> QuoteResult<()> {
        for (item, qty) in self.items() {
            let (min, max) = item.quantity_range();
            if qty < min || qty > max {
                return Err(QuoteError::invalid_input(
                    item.display_name(),
                    qty.to_string(),
                    format!("Quantity must be {}-{}", min, max),
                ));
            }
        }
        Ok(())
    }
}

impl Default for HardwareSelection {
    fn default() -> Self {
        HardwareSelection::standard()
    }
}
