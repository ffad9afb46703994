//! Simulated sensor drift
//!
//! Demo devices have no real sensors, so one int32 parameter is advanced by
//! one step per period to give hosts something to watch. Polling is cheap;
//! nothing happens until the period has elapsed since the last step.

use super::store::ValueStore;
use reach_core::traits::TickSource;
use reach_core::value::{ParamValue, ParameterValue};
use reach_core::RegistryError;

/// Periodic incrementer for an int32 parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriftGenerator {
    pid: u32,
    period_ticks: u32,
    last_changed: u32,
}

impl DriftGenerator {
    pub fn new(pid: u32, period_ticks: u32) -> Self {
        Self {
            pid,
            period_ticks,
            last_changed: 0,
        }
    }

    /// Parameter this generator drives
    pub fn parameter_id(&self) -> u32 {
        self.pid
    }

    /// Advance the parameter if a full period has elapsed
    ///
    /// Returns the new value when a step was taken. The write bypasses
    /// host access checks since the device itself owns the value.
    pub fn poll<T: TickSource>(
        &mut self,
        ticks: &T,
        store: &mut ValueStore,
    ) -> Result<Option<ParameterValue>, RegistryError> {
        let now = ticks.now_ticks();
        if ticks.ticks_since(self.last_changed) < self.period_ticks {
            return Ok(None);
        }

        let next = match store.read(self.pid)?.value {
            ParamValue::Int32(v) => v.wrapping_add(1),
            _ => return Err(RegistryError::TypeMismatch),
        };
        let updated = store.write(self.pid, ParamValue::Int32(next), now)?.clone();
        self.last_changed = now;
        Ok(Some(updated))
    }
}
