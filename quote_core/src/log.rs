//! # Usage Log
//!
//! One record appended per quote generation. Earlier versions of the
//! system filled both `device_id` and `version` with the business name;
//! here `device_id` identifies the machine and `version` records the
//! crate version that wrote the entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cutting::{CuttingListEntry, DoorStyle};
use crate::opening::DoorThickness;
use crate::quote::{LineItem, Quote};

/// Crate version recorded in each log entry.
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// One usage-log record.
///
/// ## JSON Example
///
/// ```json
/// {
///   "timestamp": "2024-03-07T14:05:09Z",
///   "ip": "203.0.113.7",
///   "device_id": "workshop-pc",
///   "version": "0.1.0",
///   "preset": "Simple",
///   "height_mm": 2000,
///   "width_mm": 800,
///   "thickness": 35,
///   "components": [],
///   "supplies": []
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageLogEntry {
    /// When the quote was generated
    pub timestamp: DateTime<Utc>,

    /// Caller's public IP, or "unknown" if the lookup failed
    pub ip: String,

    /// Machine hostname, or "unknown" if unavailable
    pub device_id: String,

    /// Crate version that wrote this entry
    pub version: String,

    /// Door style the cutting list started from
    pub preset: DoorStyle,

    /// Used opening height (mm)
    pub height_mm: u32,

    /// Used opening width (mm)
    pub width_mm: u32,

    /// Door thickness
    pub thickness: DoorThickness,

    /// Cutting list as quoted
    pub components: Vec<CuttingListEntry>,

    /// Merged supplies + hardware table as quoted
    pub supplies: Vec<LineItem>,
}

impl UsageLogEntry {
    /// Build a log record for an assembled quote.
    ///
    /// `timestamp` is the job's creation time so the log entry and the
    /// job record key line up.
    pub fn for_quote(quote: &Quote, timestamp: DateTime<Utc>, ip: String) -> Self {
        UsageLogEntry {
            timestamp,
            ip,
            device_id: hostname().unwrap_or_else(|| "unknown".to_string()),
            version: APP_VERSION.to_string(),
            preset: quote.preset,
            height_mm: quote.used_height_mm,
            width_mm: quote.used_width_mm,
            thickness: quote.opening.thickness,
            components: quote.cutting_list.clone(),
            supplies: quote.line_items.clone(),
        }
    }
}

/// Get the hostname of the current machine
fn hostname() -> Option<String> {
    #[cfg(windows)]
    {
        std::env::var("COMPUTERNAME").ok()
    }
    #[cfg(not(windows))]
    {
        std::env::var("HOSTNAME")
            .ok()
            .or_else(|| std::env::var("HOST").ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardware::HardwareSelection;
    use crate::opening::OpeningSpec;
    use crate::profile::{BusinessProfile, CompanyType};
    use crate::quote::assemble;
    use crate::supplies::compute_supplies;

    fn test_quote() -> Quote {
        let opening = OpeningSpec::default();
        let supplies = compute_supplies(
            opening.used_height_mm(),
            opening.used_width_mm(),
            opening.efficiency,
            opening.thickness,
        );
        assemble(
            BusinessProfile {
                name: "Test Doors".to_string(),
                company_type: CompanyType::DiyIndividual,
                address: String::new(),
                phone: "555-0100".to_string(),
                email: "test@doors.example".to_string(),
                website: None,
                social: None,
            },
            opening,
            DoorStyle::Simple,
            DoorStyle::Simple.preset_list(),
            HardwareSelection::standard(),
            supplies,
        )
    }

    #[test]
    fn test_entry_mirrors_quote() {
        let quote = test_quote();
        let entry = UsageLogEntry::for_quote(&quote, Utc::now(), "203.0.113.7".to_string());

        assert_eq!(entry.ip, "203.0.113.7");
        assert_eq!(entry.preset, DoorStyle::Simple);
        assert_eq!(entry.height_mm, 2100);
        assert_eq!(entry.width_mm, 900);
        assert_eq!(entry.components.len(), 5);
        assert_eq!(entry.supplies.len(), 7);
    }

    #[test]
    fn test_version_is_crate_version_not_business_name() {
        let quote = test_quote();
        let entry = UsageLogEntry::for_quote(&quote, Utc::now(), "unknown".to_string());

        assert_eq!(entry.version, env!("CARGO_PKG_VERSION"));
        assert_ne!(entry.version, quote.profile.name);
        assert_ne!(entry.device_id, quote.profile.name);
    }

    #[test]
    fn test_entry_roundtrip() {
        let quote = test_quote();
        let entry = UsageLogEntry::for_quote(&quote, Utc::now(), "unknown".to_string());
        let json = serde_json::to_string_pretty(&entry).unwrap();
        let roundtrip: UsageLogEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(entry, roundtrip);
    }
}
