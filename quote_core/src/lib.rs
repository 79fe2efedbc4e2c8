//! # quote_core - Door Manufacturing Quote Engine
//!
//! `quote_core` computes door-manufacturing quotes: it takes a measured
//! opening, a cutting list and a hardware selection, derives consumable
//! supply quantities, and assembles everything into one structured
//! quote record suitable for rendering and persistence.
//!
//! ## Design Philosophy
//!
//! - **Stateless core**: supply calculation and quote assembly are pure
//!   functions; all state lives in the flat-file store
//! - **JSON-First**: all types implement Serialize/Deserialize
//! - **Rich Errors**: structured error types, not just strings
//! - **Fallible edges isolated**: the IP lookup degrades to a sentinel,
//!   the store propagates I/O failures; neither can corrupt an
//!   assembled quote
//!
//! ## Quick Start
//!
//! ```rust
//! use quote_core::cutting::DoorStyle;
//! use quote_core::hardware::HardwareSelection;
//! use quote_core::opening::OpeningSpec;
//! use quote_core::supplies::compute_supplies;
//!
//! let opening = OpeningSpec::default();
//! let supplies = compute_supplies(
//!     opening.used_height_mm(),
//!     opening.used_width_mm(),
//!     opening.efficiency,
//!     opening.thickness,
//! );
//! assert!(supplies.tape_m > 0.0);
//!
//! let cutting_list = DoorStyle::Simple.preset_list();
//! let hardware = HardwareSelection::standard();
//! ```
//!
//! ## Modules
//!
//! - [`profile`] - Business profile and company types
//! - [`opening`] - Opening measurements, thickness, efficiency
//! - [`cutting`] - Cutting-list entries and door-style presets
//! - [`hardware`] - Hardware items and selections
//! - [`supplies`] - Supply quantity calculation
//! - [`quote`] - Quote assembly and the persisted Job record
//! - [`store`] - Atomic flat-file JSON persistence
//! - [`log`] - Usage log records
//! - [`lookup`] - Public IP lookup (failure-tolerant)
//! - [`pdf`] - Quote PDF rendering via Typst
//! - [`errors`] - Structured error types

pub mod cutting;
pub mod errors;
pub mod hardware;
pub mod log;
pub mod lookup;
pub mod opening;
pub mod pdf;
pub mod profile;
pub mod quote;
pub mod store;
pub mod supplies;

// Re-export commonly used types at crate root for convenience
pub use cutting::{CuttingListEntry, DoorStyle, PanelMaterial};
pub use errors::{QuoteError, QuoteResult};
pub use hardware::{HardwareItem, HardwareMode, HardwareSelection};
pub use opening::{DoorThickness, OpeningSpec};
pub use profile::{BusinessProfile, CompanyType};
pub use quote::{assemble, Job, LineItem, Quote, SCHEMA_VERSION};
pub use store::DataDir;
pub use supplies::{compute_supplies, SupplyResult};
