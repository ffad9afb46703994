//! Registry configuration
//!
//! Compile-time capacities live next to the types they bound (see
//! `reach_core::catalog` and `reach_core::record`). The values here can
//! vary per device and are passed to `Registry::with_config`.

/// Largest file chunk a single read or write request may carry (bytes)
///
/// Must stay below 256 so the length fits the one-byte wire field.
pub const DEFAULT_MAX_FILE_PAYLOAD: usize = 128;

/// NVM key holding the device serial number, outside the parameter id range
pub const DEFAULT_SERIAL_NUMBER_KEY: u32 = 0x10000;

/// Ticks between simulated sensor drift steps
pub const DEFAULT_DRIFT_PERIOD_TICKS: u32 = 1000;

/// Per-device registry settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Largest file chunk accepted by file read/write
    pub max_file_payload: usize,
    /// NVM key preserved across factory reset
    pub serial_number_key: u32,
    /// Parameter advanced by the drift generator, if any
    pub drift_parameter: Option<u32>,
    pub drift_period_ticks: u32,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            max_file_payload: DEFAULT_MAX_FILE_PAYLOAD,
            serial_number_key: DEFAULT_SERIAL_NUMBER_KEY,
            drift_parameter: None,
            drift_period_ticks: DEFAULT_DRIFT_PERIOD_TICKS,
        }
    }
}

impl RegistryConfig {
    /// Enable the drift generator on `pid`
    pub fn with_drift(mut self, pid: u32, period_ticks: u32) -> Self {
        self.drift_parameter = Some(pid);
        self.drift_period_ticks = period_ticks;
        self
    }

    pub fn with_max_file_payload(mut self, bytes: usize) -> Self {
        self.max_file_payload = bytes;
        self
    }
}
