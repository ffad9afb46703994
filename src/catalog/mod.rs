//! Demo device catalog
//!
//! A complete set of tables for bring-up and host integration testing:
//! every parameter data type, paged extended metadata, one read-only and
//! one writable file, and a handful of commands.
//!
//! # Tables
//!
//! - `params` - 33 parameters with odd, discontinuous ids
//! - `extended` - two enumeration pages (pid 17) and two bit-field pages (pid 19)
//! - `files` - `log_file.csv` and `ota.bin`
//! - `commands` - remote CLI, log mask, factory reset and two placeholders

pub mod commands;
pub mod extended;
pub mod files;
pub mod params;

pub use commands::COMMANDS;
pub use extended::EXTENDED;
pub use files::FILES;
pub use params::{DRIFT_PARAMETER, PARAMETERS};

use crate::core::config::{RegistryConfig, DEFAULT_DRIFT_PERIOD_TICKS};
use reach_core::StaticCatalog;

/// The demo catalog
pub const DEMO_CATALOG: StaticCatalog = StaticCatalog::new(PARAMETERS, EXTENDED, FILES, COMMANDS);

/// Registry settings matching the demo catalog
pub fn demo_config() -> RegistryConfig {
    RegistryConfig::default().with_drift(DRIFT_PARAMETER, DEFAULT_DRIFT_PERIOD_TICKS)
}
