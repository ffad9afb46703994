//! Parameter value store
//!
//! Holds one tagged value and timestamp per parameter descriptor, in table
//! order. The variant of each stored value always equals its descriptor's
//! data type; writes with any other variant are rejected, never coerced.

use reach_core::catalog::{Catalog, MAX_PARAMS};
use reach_core::value::{ParamValue, ParameterValue};
use reach_core::{CatalogError, RegistryError};

/// Current parameter values
#[derive(Debug, Clone, Default)]
pub struct ValueStore {
    values: heapless::Vec<ParameterValue, MAX_PARAMS>,
}

impl ValueStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            values: heapless::Vec::new(),
        }
    }

    /// Reset every entry to its descriptor's initial value with timestamp 0
    pub fn populate<C: Catalog>(&mut self, catalog: &C) -> Result<(), CatalogError> {
        let params = catalog.parameters();
        self.values.clear();
        for desc in params {
            let entry = ParameterValue::new(desc.id, 0, desc.initial_value());
            self.values
                .push(entry)
                .map_err(|_| CatalogError::TooManyParameters(params.len()))?;
        }
        Ok(())
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Entry by table position
    pub fn get_by_index(&self, index: usize) -> Option<&ParameterValue> {
        self.values.get(index)
    }

    /// Owned copy of parameter `pid`
    pub fn read(&self, pid: u32) -> Result<ParameterValue, RegistryError> {
        self.values
            .iter()
            .find(|v| v.parameter_id == pid)
            .cloned()
            .ok_or(RegistryError::NotFound)
    }

    /// Replace the value of `pid`, stamping it with `timestamp`
    ///
    /// Strings and byte arrays are already bounded by `ParamValue`, so the
    /// stored size is `min(incoming, capacity)`.
    pub fn write(
        &mut self,
        pid: u32,
        value: ParamValue,
        timestamp: u32,
    ) -> Result<&ParameterValue, RegistryError> {
        let entry = self
            .values
            .iter_mut()
            .find(|v| v.parameter_id == pid)
            .ok_or(RegistryError::NotFound)?;

        if entry.value.data_type() != value.data_type() {
            return Err(RegistryError::TypeMismatch);
        }

        entry.value = value;
        entry.timestamp = timestamp;
        Ok(entry)
    }

    /// Overlay a value restored from storage, keeping its stored timestamp
    pub fn restore(&mut self, restored: ParameterValue) -> Result<(), RegistryError> {
        let timestamp = restored.timestamp;
        self.write(restored.parameter_id, restored.value, timestamp)
            .map(|_| ())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParameterValue> {
        self.values.iter()
    }
}
