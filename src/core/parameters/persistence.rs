//! Parameter persistence
//!
//! Populates the value store at boot and writes non-volatile parameters
//! through to NVM on every change. Each non-volatile parameter owns one
//! fixed-layout record keyed by its id (see `reach_core::record`).
//!
//! # Boot sequence
//!
//! 1. Every entry gets its descriptor default (or the type's zero).
//! 2. Each non-volatile entry is overlaid from its record.
//! 3. A missing, unreadable or mismatched record is replaced with the
//!    default. This is first-run initialization, not a failure.

use super::store::ValueStore;
use crate::platform::traits::NvmInterface;
use crate::{log_debug, log_error, log_info, log_warn};
use reach_core::catalog::{Catalog, ParamDescriptor, StorageClass};
use reach_core::record::{self, RECORD_SIZE};
use reach_core::value::ParameterValue;
use reach_core::{CatalogError, RegistryError};

/// Persistence statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PersistenceStats {
    /// Successful record writes
    pub writes: u32,
    /// Record writes the NVM rejected
    pub write_failures: u32,
    /// Successful compactions
    pub compactions: u32,
    /// Compactions the NVM rejected
    pub compaction_failures: u32,
}

/// Outcome of boot-time initialization
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InitSummary {
    /// Non-volatile entries overlaid from NVM
    pub restored: usize,
    /// Non-volatile entries whose default was written back
    pub initialized: usize,
    /// Non-volatile entries whose default could not be written back
    pub failed: usize,
}

/// Write-through persistence manager
pub struct Persistence<S: NvmInterface> {
    nvm: S,
    stats: PersistenceStats,
}

impl<S: NvmInterface> Persistence<S> {
    pub fn new(nvm: S) -> Self {
        Self {
            nvm,
            stats: PersistenceStats::default(),
        }
    }

    /// Populate `store` from defaults and NVM
    ///
    /// Per-parameter storage problems are recovered locally and counted in
    /// the summary. Only a catalog too large for the store is an error.
    pub fn initialize<C: Catalog>(
        &mut self,
        catalog: &C,
        store: &mut ValueStore,
    ) -> Result<InitSummary, CatalogError> {
        store.populate(catalog)?;

        let mut summary = InitSummary::default();
        for desc in catalog.parameters() {
            match desc.storage_class {
                StorageClass::NonVolatile => {}
                StorageClass::Ram | StorageClass::RamExtended => continue,
                StorageClass::NonVolatileExtended | StorageClass::Invalid => {
                    log_error!(
                        "Parameter {} has unsupported storage class {}, keeping it in RAM",
                        desc.id,
                        desc.storage_class as u8
                    );
                    continue;
                }
            }

            match self.load(desc) {
                Some(restored) => match store.restore(restored) {
                    Ok(()) => summary.restored += 1,
                    Err(e) => {
                        log_error!("Restore of parameter {} failed: {}", desc.id, e.as_str());
                        summary.failed += 1;
                    }
                },
                None => {
                    let default = store
                        .read(desc.id)
                        .unwrap_or_else(|_| ParameterValue::new(desc.id, 0, desc.initial_value()));
                    match self.persist(&default) {
                        Ok(()) => summary.initialized += 1,
                        Err(_) => summary.failed += 1,
                    }
                }
            }
        }

        log_info!(
            "Parameters initialized: {} restored, {} defaulted, {} failed",
            summary.restored,
            summary.initialized,
            summary.failed
        );
        Ok(summary)
    }

    /// Read and validate the record for `desc`
    ///
    /// Returns `None` when the default must be written back.
    fn load(&mut self, desc: &ParamDescriptor) -> Option<ParameterValue> {
        let mut buf = [0u8; RECORD_SIZE];
        let len = match self.nvm.get(desc.id, &mut buf) {
            Ok(Some(len)) => len,
            Ok(None) => {
                log_debug!("No record for parameter {}, writing default", desc.id);
                return None;
            }
            Err(_) => {
                log_warn!("NVM read of parameter {} failed, writing default", desc.id);
                return None;
            }
        };

        match record::decode_for(&buf[..len], desc.id, desc.data_type) {
            Ok(value) => Some(value),
            Err(e) => {
                log_warn!(
                    "Record of parameter {} rejected ({}), writing default",
                    desc.id,
                    e.as_str()
                );
                None
            }
        }
    }

    /// Write `value` through to NVM if `desc` is non-volatile
    pub fn write_through(
        &mut self,
        desc: &ParamDescriptor,
        value: &ParameterValue,
    ) -> Result<(), RegistryError> {
        if desc.storage_class.is_persistent() {
            self.persist(value)
        } else {
            Ok(())
        }
    }

    /// Store the record for `value`, compacting afterwards if the NVM asks
    ///
    /// A failed compaction is logged and does not fail the write.
    pub fn persist(&mut self, value: &ParameterValue) -> Result<(), RegistryError> {
        let buf = record::encode(value);
        if let Err(e) = self.nvm.put(value.parameter_id, &buf) {
            self.stats.write_failures += 1;
            log_error!("NVM write of parameter {} failed", value.parameter_id);
            return Err(e.into());
        }
        self.stats.writes += 1;

        if self.nvm.needs_compaction() {
            match self.nvm.compact() {
                Ok(()) => {
                    self.stats.compactions += 1;
                    log_debug!("NVM compacted");
                }
                Err(_) => {
                    self.stats.compaction_failures += 1;
                    log_warn!("NVM compaction failed");
                }
            }
        }
        Ok(())
    }

    /// Read a raw object outside the parameter records
    pub fn read_raw(&mut self, key: u32, buf: &mut [u8]) -> Result<Option<usize>, RegistryError> {
        Ok(self.nvm.get(key, buf)?)
    }

    /// Write a raw object outside the parameter records
    pub fn write_raw(&mut self, key: u32, data: &[u8]) -> Result<(), RegistryError> {
        self.nvm.put(key, data).map_err(|e| {
            self.stats.write_failures += 1;
            RegistryError::from(e)
        })
    }

    /// Remove every persisted object
    pub fn erase_all(&mut self) -> Result<(), RegistryError> {
        Ok(self.nvm.erase_all()?)
    }

    pub fn stats(&self) -> PersistenceStats {
        self.stats
    }

    pub fn nvm(&self) -> &S {
        &self.nvm
    }

    pub fn nvm_mut(&mut self) -> &mut S {
        &mut self.nvm
    }

    /// Release the NVM backend
    pub fn into_inner(self) -> S {
        self.nvm
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::MockNvm;
    use reach_core::catalog::{ParamDataType, StaticCatalog};
    use reach_core::value::ParamValue;

    const PARAMS: &[ParamDescriptor] = &[
        ParamDescriptor::new(1, ParamDataType::Uint32, "uint32_value").default_value(1970.0),
        ParamDescriptor::new(15, ParamDataType::String, "string_value")
            .storage(StorageClass::NonVolatile),
        ParamDescriptor::new(5, ParamDataType::Float32, "float32_value")
            .default_value(66.666)
            .storage(StorageClass::NonVolatile),
        ParamDescriptor::new(27, ParamDataType::Uint64, "extended_nv")
            .storage(StorageClass::NonVolatileExtended),
    ];

    const CATALOG: StaticCatalog = StaticCatalog::new(PARAMS, &[], &[], &[]);

    fn boot(nvm: MockNvm) -> (Persistence<MockNvm>, ValueStore, InitSummary) {
        let mut persistence = Persistence::new(nvm);
        let mut store = ValueStore::new();
        let summary = persistence.initialize(&CATALOG, &mut store).unwrap();
        (persistence, store, summary)
    }

    #[test]
    fn test_first_boot_writes_defaults() {
        let (persistence, store, summary) = boot(MockNvm::new());
        assert_eq!(
            summary,
            InitSummary {
                restored: 0,
                initialized: 2,
                failed: 0
            }
        );
        // Only the two non-volatile parameters have records
        assert_eq!(persistence.nvm().len(), 2);
        assert!(persistence.nvm().contains(15));
        assert!(persistence.nvm().contains(5));
        assert!(!persistence.nvm().contains(1));
        assert!(!persistence.nvm().contains(27));
        assert_eq!(store.read(15).unwrap().value, ParamValue::zero(ParamDataType::String));
    }

    #[test]
    fn test_second_boot_restores_records() {
        let (mut persistence, mut store, _) = boot(MockNvm::new());
        let value = store
            .write(15, ParamValue::string_truncated("Flea bag"), 99)
            .unwrap()
            .clone();
        persistence.persist(&value).unwrap();

        let (persistence, store, summary) = boot(persistence.into_inner());
        assert_eq!(summary.restored, 2);
        assert_eq!(summary.initialized, 0);
        let read = store.read(15).unwrap();
        assert_eq!(read.value, ParamValue::string_truncated("Flea bag"));
        assert_eq!(read.timestamp, 99);
        assert_eq!(persistence.stats().writes, 0);
    }

    #[test]
    fn test_corrupted_record_replaced_with_default() {
        let (persistence, _, _) = boot(MockNvm::new());
        let mut nvm = persistence.into_inner();
        nvm.inject_corruption(5, 12);

        let (persistence, store, summary) = boot(nvm);
        assert_eq!(summary.restored, 1);
        assert_eq!(summary.initialized, 1);
        assert_eq!(store.read(5).unwrap().value, ParamValue::Float32(66.666));
        let stored = persistence.nvm().object(5).unwrap();
        assert!(record::decode(stored).is_ok());
    }

    #[test]
    fn test_record_of_wrong_type_replaced() {
        let mut nvm = MockNvm::new();
        let wrong = record::encode(&ParameterValue::new(5, 3, ParamValue::Uint32(7)));
        nvm.insert_raw(5, &wrong);

        let (_, store, summary) = boot(nvm);
        assert_eq!(summary.initialized, 2);
        assert_eq!(store.read(5).unwrap().value, ParamValue::Float32(66.666));
    }

    #[test]
    fn test_oversize_object_replaced() {
        let mut nvm = MockNvm::new();
        nvm.insert_raw(15, &[0u8; RECORD_SIZE + 8]);

        let (persistence, _, summary) = boot(nvm);
        assert_eq!(summary.initialized, 2);
        assert_eq!(persistence.nvm().object(15).map(<[u8]>::len), Some(RECORD_SIZE));
    }

    #[test]
    fn test_read_failure_at_boot_is_not_fatal() {
        let mut nvm = MockNvm::new();
        nvm.fail_gets(true);
        let (_, store, summary) = boot(nvm);
        assert_eq!(summary.initialized, 2);
        assert_eq!(store.read(1).unwrap().value, ParamValue::Uint32(1970));
    }

    #[test]
    fn test_write_failure_at_boot_is_counted() {
        let mut nvm = MockNvm::new();
        nvm.fail_puts(true);
        let (persistence, store, summary) = boot(nvm);
        assert_eq!(summary.failed, 2);
        assert_eq!(persistence.stats().write_failures, 2);
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn test_write_through_only_for_nonvolatile() {
        let (mut persistence, _, _) = boot(MockNvm::new());
        let puts = persistence.nvm().put_count();

        let ram = ParameterValue::new(1, 0, ParamValue::Uint32(3));
        persistence.write_through(&PARAMS[0], &ram).unwrap();
        assert_eq!(persistence.nvm().put_count(), puts);

        let ext = ParameterValue::new(27, 0, ParamValue::Uint64(3));
        persistence.write_through(&PARAMS[3], &ext).unwrap();
        assert_eq!(persistence.nvm().put_count(), puts);

        let nv = ParameterValue::new(5, 0, ParamValue::Float32(1.5));
        persistence.write_through(&PARAMS[2], &nv).unwrap();
        assert_eq!(persistence.nvm().put_count(), puts + 1);
    }

    #[test]
    fn test_persist_failure_surfaces() {
        let (mut persistence, _, _) = boot(MockNvm::new());
        persistence.nvm_mut().fail_puts(true);
        let value = ParameterValue::new(5, 0, ParamValue::Float32(1.5));
        assert_eq!(persistence.persist(&value), Err(RegistryError::WriteFailed));
        assert_eq!(persistence.stats().write_failures, 1);
    }

    #[test]
    fn test_compaction_after_write() {
        let (mut persistence, _, _) = boot(MockNvm::new().with_compaction_threshold(3));
        let value = ParameterValue::new(5, 0, ParamValue::Float32(1.5));
        persistence.persist(&value).unwrap();
        assert_eq!(persistence.nvm().compact_count(), 1);
        assert_eq!(persistence.stats().compactions, 1);
    }

    #[test]
    fn test_compaction_failure_does_not_fail_write() {
        let mut nvm = MockNvm::new().with_compaction_threshold(1);
        nvm.fail_compactions(true);
        let (mut persistence, _, _) = boot(nvm);

        let value = ParameterValue::new(5, 0, ParamValue::Float32(1.5));
        assert_eq!(persistence.persist(&value), Ok(()));
        assert!(persistence.stats().compaction_failures >= 1);
        assert_eq!(persistence.stats().compactions, 0);
    }
}
