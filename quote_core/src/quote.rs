//! # Quote Assembly
//!
//! Merges the business profile snapshot, opening spec, cutting list,
//! hardware selection and computed supplies into one immutable `Quote`
//! record, and wraps a quote as a timestamp-keyed `Job` for
//! persistence.
//!
//! ```text
//! Quote
//! ├── profile: BusinessProfile (snapshot)
//! ├── opening: OpeningSpec (+ used dimensions, resolved at assembly)
//! ├── preset: DoorStyle
//! ├── cutting_list: Vec<CuttingListEntry>
//! ├── supplies / hardware: source records
//! └── line_items: merged presentation table (supplies first)
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cutting::{CuttingListEntry, DoorStyle};
use crate::hardware::HardwareSelection;
use crate::opening::OpeningSpec;
use crate::profile::BusinessProfile;
use crate::supplies::SupplyResult;

/// Current schema version for persisted job files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// One row of the merged supplies + hardware table.
///
/// Quantity is an f64 so fractional supply amounts (13.18 m of tape)
/// and integral hardware counts share one table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub quantity: f64,
}

/// Terminal aggregate of one quote-generation session.
///
/// Created once per "generate" action, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Business profile snapshot at assembly time
    pub profile: BusinessProfile,

    /// Opening as measured
    pub opening: OpeningSpec,

    /// Height used for calculation (min of the three readings, mm)
    pub used_height_mm: u32,

    /// Width used for calculation (min of the three readings, mm)
    pub used_width_mm: u32,

    /// Door style the cutting list started from
    pub preset: DoorStyle,

    /// Cutting list as edited
    pub cutting_list: Vec<CuttingListEntry>,

    /// Computed supply quantities
    pub supplies: SupplyResult,

    /// Hardware quantities
    pub hardware: HardwareSelection,

    /// Merged presentation table: supplies first, then hardware, each
    /// in declaration order. The two name domains are disjoint by
    /// construction, so the merge never collides.
    pub line_items: Vec<LineItem>,
}

/// Assemble a quote from its parts.
///
/// A single atomic in-memory transformation: given
/// precondition-satisfying inputs it cannot fail, and it performs no
/// I/O. Persistence and rendering happen downstream on the returned
/// value.
pub fn assemble(
    profile: BusinessProfile,
    opening: OpeningSpec,
    preset: DoorStyle,
    cutting_list: Vec<CuttingListEntry>,
    hardware: HardwareSelection,
    supplies: SupplyResult,
) -> Quote {
    let mut line_items: Vec<LineItem> = supplies
        .line_items()
        .into_iter()
        .map(|(name, quantity)| LineItem {
            name: name.to_string(),
            quantity,
        })
        .collect();

    line_items.extend(hardware.items().map(|(item, qty)| LineItem {
        name: item.display_name().to_string(),
        quantity: f64::from(qty),
    }));

    let used_height_mm = opening.used_height_mm();
    let used_width_mm = opening.used_width_mm();

    Quote {
        profile,
        opening,
        used_height_mm,
        used_width_mm,
        preset,
        cutting_list,
        supplies,
        hardware,
        line_items,
    }
}

/// One persisted quote-generation session.
///
/// Keyed in the job store by `job_id()`, a second-resolution timestamp
/// string. Two jobs assembled within the same second collide and the
/// later write wins; at one operator per deployment that is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// Schema version (for forward-compatibility checks on load)
    pub version: String,

    /// When the quote was assembled
    pub created: DateTime<Utc>,

    /// The assembled quote
    pub quote: Quote,
}

impl Job {
    /// Wrap a quote as a job, stamping it with the current time.
    pub fn new(quote: Quote) -> Self {
        Job {
            version: SCHEMA_VERSION.to_string(),
            created: Utc::now(),
            quote,
        }
    }

    /// Job identifier: the creation timestamp at second resolution,
    /// `YYYY-MM-DD HH:MM:SS`.
    pub fn job_id(&self) -> String {
        self.created.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opening::DoorThickness;
    use crate::profile::CompanyType;
    use crate::supplies::compute_supplies;
    use chrono::TimeZone;

    fn test_profile() -> BusinessProfile {
        BusinessProfile {
            name: "Fractal Doors Ltd".to_string(),
            company_type: CompanyType::DoorFabricator,
            address: "12 Mill Lane".to_string(),
            phone: "+44 1234 567890".to_string(),
            email: "quotes@fractaldoors.example".to_string(),
            website: None,
            social: None,
        }
    }

    fn test_quote() -> Quote {
        let opening = OpeningSpec {
            left_mm: 2100,
            centre_mm: 2000,
            right_mm: 2200,
            bottom_mm: 900,
            middle_mm: 950,
            top_mm: 800,
            thickness: DoorThickness::T35,
            efficiency: 0.85,
        };
        let supplies = compute_supplies(
            opening.used_height_mm(),
            opening.used_width_mm(),
            opening.efficiency,
            opening.thickness,
        );
        assemble(
            test_profile(),
            opening,
            DoorStyle::Simple,
            DoorStyle::Simple.preset_list(),
            HardwareSelection::standard(),
            supplies,
        )
    }

    #[test]
    fn test_used_dimensions_resolved_at_assembly() {
        let quote = test_quote();
        assert_eq!(quote.used_height_mm, 2000);
        assert_eq!(quote.used_width_mm, 800);
    }

    #[test]
    fn test_merge_supplies_first_then_hardware() {
        let quote = test_quote();
        // 2 supplies + 5 hardware items, no collisions.
        assert_eq!(quote.line_items.len(), 7);

        let names: Vec<&str> = quote.line_items.iter().map(|li| li.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "Edging Tape (m)",
                "Glue (L)",
                "Hinges",
                "Lockset",
                "Handle",
                "Screws",
                "Foam/Brush",
            ]
        );

        // Name domains are disjoint.
        let mut unique = names.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), names.len());
    }

    #[test]
    fn test_merge_carries_quantities() {
        let quote = test_quote();
        assert_eq!(quote.line_items[0].quantity, 13.18);
        assert_eq!(quote.line_items[1].quantity, 0.38);
        assert_eq!(quote.line_items[2].quantity, 3.0);
        assert_eq!(quote.line_items[5].quantity, 20.0);
    }

    #[test]
    fn test_job_id_format() {
        let mut job = Job::new(test_quote());
        job.created = Utc.with_ymd_and_hms(2024, 3, 7, 14, 5, 9).unwrap();
        assert_eq!(job.job_id(), "2024-03-07 14:05:09");
    }

    #[test]
    fn test_job_version_stamped() {
        let job = Job::new(test_quote());
        assert_eq!(job.version, SCHEMA_VERSION);
    }

    #[test]
    fn test_quote_serialization_roundtrip() {
        let quote = test_quote();
        let json = serde_json::to_string_pretty(&quote).unwrap();
        let roundtrip: Quote = serde_json::from_str(&json).unwrap();
        assert_eq!(quote, roundtrip);
    }

    #[test]
    fn test_job_serialization_roundtrip() {
        let job = Job::new(test_quote());
        let json = serde_json::to_string_pretty(&job).unwrap();
        let roundtrip: Job = serde_json::from_str(&json).unwrap();
        assert_eq!(job, roundtrip);
    }
}
