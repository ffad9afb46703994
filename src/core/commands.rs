//! Device command handlers
//!
//! Commands act on device-wide state rather than on parameters. Handlers
//! never fail the request once the command id is known: problems are
//! logged and the command still reports success.

use super::logging::LogMask;
use super::parameters::{InitSummary, Persistence, ValueStore};
use crate::platform::traits::NvmInterface;
use crate::{log_error, log_info, log_warn};
use reach_core::catalog::Catalog;

/// Longest serial number preserved across a factory reset
pub const SERIAL_NUMBER_LEN: usize = 16;

/// Device-wide state changed by commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeviceSettings {
    pub log_mask: LogMask,
    pub remote_cli_enabled: bool,
}

impl DeviceSettings {
    pub fn set_remote_cli(&mut self, enabled: bool) {
        self.remote_cli_enabled = enabled;
        log_info!("Remote CLI {}", if enabled { "enabled" } else { "disabled" });
    }

    /// Replace the log mask; bits outside the known categories are dropped
    pub fn set_log_mask(&mut self, bits: u32) {
        self.log_mask = LogMask::from_bits_truncate(bits);
        log_info!("Log mask set to 0x{:x}", self.log_mask.bits());
    }
}

/// Erase all persisted state and rebuild the value store from defaults
///
/// The serial number stored under `serial_key` survives the erase. Storage
/// failures along the way are logged; the reset always runs to the end.
pub fn factory_reset<C: Catalog, S: NvmInterface>(
    catalog: &C,
    persistence: &mut Persistence<S>,
    store: &mut ValueStore,
    serial_key: u32,
) -> InitSummary {
    let mut serial = [0u8; SERIAL_NUMBER_LEN];
    let serial_len = match persistence.read_raw(serial_key, &mut serial) {
        Ok(Some(len)) => Some(len),
        Ok(None) => {
            log_warn!("No serial number stored under 0x{:x}", serial_key);
            None
        }
        Err(e) => {
            log_error!("Serial number read failed: {}", e.as_str());
            None
        }
    };

    if let Err(e) = persistence.erase_all() {
        log_error!("NVM erase failed: {}", e.as_str());
    }

    let summary = match persistence.initialize(catalog, store) {
        Ok(summary) => summary,
        Err(e) => {
            log_error!("Parameter reinitialization failed: {}", e.as_str());
            InitSummary::default()
        }
    };

    if let Some(len) = serial_len {
        if let Err(e) = persistence.write_raw(serial_key, &serial[..len]) {
            log_error!("Serial number restore failed: {}", e.as_str());
        }
    }

    log_info!("Factory reset complete");
    summary
}
