//! Host-facing capability registry
//!
//! Ties the catalog, value store, persistence, file service and device
//! settings together behind the operations a message dispatcher calls.
//! Every call runs to completion; there is no background work.
//!
//! # Discovery
//!
//! Hosts enumerate parameters, files and commands through one cursor per
//! class: `discover_reset(class, id)` then repeated `discover_next(class)`
//! until `Exhausted`. Extended metadata has its own cursor that can be
//! restricted to a single parameter.
//!
//! # Usage
//!
//! ```ignore
//! use reach_device::catalog::DEMO_CATALOG;
//! use reach_device::core::registry::{Registry, ResourceClass};
//! use reach_device::platform::mock::{MockFileIo, MockNvm};
//!
//! let mut registry = Registry::new(DEMO_CATALOG, MockNvm::new(), MockFileIo::new())?;
//! registry.discover_reset(ResourceClass::Parameters, 1)?;
//! while let Ok(desc) = registry.discover_next(ResourceClass::Parameters) {
//!     // send desc to the host
//! }
//! ```

use super::commands::{self, DeviceSettings};
use super::config::RegistryConfig;
use super::files::FileService;
use super::parameters::{DriftGenerator, InitSummary, Persistence, PersistenceStats, ValueStore};
use crate::platform::traits::{FileIo, NvmInterface};
use crate::{log_debug, log_error, log_info, log_warn};
use reach_core::catalog::{
    Catalog, CommandAction, CommandDescriptor, FileDescriptor, ParamDataType, ParamDescriptor,
    ParamExDescriptor,
};
use reach_core::discovery::{DiscoveryCursor, ExCursor};
use reach_core::traits::TickSource;
use reach_core::value::{ParamValue, ParameterValue};
use reach_core::RegistryError;

/// Wire limit on a single file chunk length
const MAX_WIRE_PAYLOAD: usize = 255;

/// Catalog class addressed by a discovery request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceClass {
    Parameters,
    Files,
    Commands,
}

/// Descriptor returned by class-generic discovery
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Descriptor<'a> {
    Parameter(&'a ParamDescriptor),
    File(&'a FileDescriptor),
    Command(&'a CommandDescriptor),
}

impl Descriptor<'_> {
    pub fn id(&self) -> u32 {
        match self {
            Descriptor::Parameter(d) => d.id,
            Descriptor::File(d) => d.id,
            Descriptor::Command(d) => d.id,
        }
    }
}

/// Device capability registry
pub struct Registry<C: Catalog, S: NvmInterface, F: FileIo> {
    catalog: C,
    config: RegistryConfig,
    store: ValueStore,
    persistence: Persistence<S>,
    files: FileService<F>,
    settings: DeviceSettings,
    param_cursor: DiscoveryCursor,
    file_cursor: DiscoveryCursor,
    command_cursor: DiscoveryCursor,
    ex_cursor: ExCursor,
    drift: Option<DriftGenerator>,
    init_summary: InitSummary,
}

impl<C: Catalog, S: NvmInterface, F: FileIo> Registry<C, S, F> {
    /// Create a registry with default settings
    pub fn new(catalog: C, nvm: S, files: F) -> Result<Self, RegistryError> {
        Self::with_config(catalog, nvm, files, RegistryConfig::default())
    }

    /// Validate the catalog and load every parameter value
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` if the catalog is malformed, the payload limit
    /// does not fit the wire, or the drift target is not an int32 parameter.
    /// Storage problems during loading are recovered, not reported.
    pub fn with_config(
        catalog: C,
        nvm: S,
        files: F,
        config: RegistryConfig,
    ) -> Result<Self, RegistryError> {
        if let Err(e) = catalog.validate() {
            log_error!("Catalog rejected: {}", e.as_str());
            return Err(e.into());
        }

        if config.max_file_payload == 0 || config.max_file_payload > MAX_WIRE_PAYLOAD {
            log_error!("File payload limit {} out of range", config.max_file_payload);
            return Err(RegistryError::InvalidConfiguration);
        }

        let drift = match config.drift_parameter {
            Some(pid) => match catalog.parameter(pid) {
                Some(desc) if desc.data_type == ParamDataType::Int32 => {
                    Some(DriftGenerator::new(pid, config.drift_period_ticks))
                }
                _ => {
                    log_error!("Drift target {} is not an int32 parameter", pid);
                    return Err(RegistryError::InvalidConfiguration);
                }
            },
            None => None,
        };

        let mut store = ValueStore::new();
        let mut persistence = Persistence::new(nvm);
        let init_summary = persistence.initialize(&catalog, &mut store)?;

        log_info!(
            "Registry ready: {} parameters, {} files, {} commands",
            catalog.parameters().len(),
            catalog.files().len(),
            catalog.commands().len()
        );

        Ok(Self {
            catalog,
            config,
            store,
            persistence,
            files: FileService::new(files, config.max_file_payload),
            settings: DeviceSettings::default(),
            param_cursor: DiscoveryCursor::new(),
            file_cursor: DiscoveryCursor::new(),
            command_cursor: DiscoveryCursor::new(),
            ex_cursor: ExCursor::new(),
            drift,
            init_summary,
        })
    }

    // ========== Discovery ==========

    /// Number of entries in `class`
    pub fn get_resource_count(&self, class: ResourceClass) -> usize {
        match class {
            ResourceClass::Parameters => self.catalog.parameters().len(),
            ResourceClass::Files => self.catalog.files().len(),
            ResourceClass::Commands => self.catalog.commands().len(),
        }
    }

    /// Position the `class` cursor on `id`
    ///
    /// An unknown id rewinds the cursor to the first entry and reports
    /// `NotFound`.
    pub fn discover_reset(&mut self, class: ResourceClass, id: u32) -> Result<(), RegistryError> {
        let result = match class {
            ResourceClass::Parameters => self.param_cursor.reset(self.catalog.parameters(), id),
            ResourceClass::Files => self.file_cursor.reset(self.catalog.files(), id),
            ResourceClass::Commands => self.command_cursor.reset(self.catalog.commands(), id),
        };
        if result.is_err() {
            log_debug!("Discovery reset to unknown id {}, rewound", id);
        }
        result
    }

    /// Next descriptor of `class`, or `Exhausted`
    pub fn discover_next(&mut self, class: ResourceClass) -> Result<Descriptor<'_>, RegistryError> {
        match class {
            ResourceClass::Parameters => self.next_parameter().map(Descriptor::Parameter),
            ResourceClass::Files => self.next_file().map(Descriptor::File),
            ResourceClass::Commands => self.next_command().map(Descriptor::Command),
        }
    }

    pub fn next_parameter(&mut self) -> Result<&ParamDescriptor, RegistryError> {
        self.param_cursor.next_entry(self.catalog.parameters())
    }

    pub fn next_file(&mut self) -> Result<&FileDescriptor, RegistryError> {
        self.file_cursor.next_entry(self.catalog.files())
    }

    pub fn next_command(&mut self) -> Result<&CommandDescriptor, RegistryError> {
        self.command_cursor.next_entry(self.catalog.commands())
    }

    /// Number of extended pages for `pid`, or all pages when negative
    pub fn get_extended_count(&self, pid: i32) -> usize {
        ExCursor::count(self.catalog.extended(), pid)
    }

    /// Rewind the extended cursor, restricting it to `pid` unless negative
    pub fn extended_reset(&mut self, pid: i32) {
        self.ex_cursor.reset(pid);
    }

    /// Next extended page matching the current filter, or `Exhausted`
    pub fn extended_next(&mut self) -> Result<&ParamExDescriptor, RegistryError> {
        self.ex_cursor.next_entry(self.catalog.extended())
    }

    /// Schema fingerprint of the parameter and extended tables
    pub fn fingerprint(&self) -> u32 {
        self.catalog.fingerprint()
    }

    // ========== Values ==========

    /// Current value of `pid`
    pub fn read_value(&self, pid: u32) -> Result<ParameterValue, RegistryError> {
        self.store.read(pid)
    }

    /// Store a host-supplied value and write it through if non-volatile
    ///
    /// Values outside the descriptor's range are stored and logged. When the
    /// write-through fails the in-memory value has already changed.
    pub fn write_value(
        &mut self,
        pid: u32,
        value: ParamValue,
        timestamp: u32,
    ) -> Result<(), RegistryError> {
        let desc = self.catalog.parameter(pid).ok_or_else(|| {
            log_warn!("Write to unknown parameter {}", pid);
            RegistryError::NotFound
        })?;

        if !desc.access.can_write() {
            log_warn!("Parameter {} is read only", pid);
            return Err(RegistryError::PermissionDenied);
        }
        if value.data_type() != desc.data_type {
            log_warn!(
                "Parameter {} expects type {}, got {}",
                pid,
                desc.data_type as u8,
                value.data_type() as u8
            );
            return Err(RegistryError::TypeMismatch);
        }
        if !desc.in_range(&value) {
            log_warn!("Parameter {} value outside its range, storing anyway", pid);
        }

        let stored = self.store.write(pid, value, timestamp)?.clone();
        self.persistence.write_through(desc, &stored)
    }

    /// Advance the drift parameter if its period has elapsed
    pub fn poll_drift<T: TickSource>(
        &mut self,
        ticks: &T,
    ) -> Result<Option<ParameterValue>, RegistryError> {
        let Some(drift) = self.drift.as_mut() else {
            return Ok(None);
        };
        let stepped = drift.poll(ticks, &mut self.store)?;
        if let Some(value) = &stepped {
            if let Some(desc) = self.catalog.parameter(value.parameter_id) {
                self.persistence.write_through(desc, value)?;
            }
        }
        Ok(stepped)
    }

    // ========== Commands ==========

    /// Run command `cid`
    ///
    /// Once the command is found the request succeeds; handler problems
    /// are logged.
    pub fn execute_command(&mut self, cid: u32) -> Result<(), RegistryError> {
        let (name, action) = match self.catalog.command(cid) {
            Some(command) => (command.name, command.action),
            None => {
                log_warn!("Unknown command {}", cid);
                return Err(RegistryError::NotFound);
            }
        };
        log_info!("Execute command {}, '{}'", cid, name);

        match action {
            CommandAction::EnableRemoteCli => self.settings.set_remote_cli(true),
            CommandAction::DisableRemoteCli => self.settings.set_remote_cli(false),
            CommandAction::SetLogMask(bits) => self.settings.set_log_mask(bits),
            CommandAction::FactoryReset => {
                self.init_summary = commands::factory_reset(
                    &self.catalog,
                    &mut self.persistence,
                    &mut self.store,
                    self.config.serial_number_key,
                );
            }
            CommandAction::NotImplemented => log_warn!("Command {} not implemented", cid),
        }
        Ok(())
    }

    // ========== Files ==========

    pub fn file_describe(&self, fid: u32) -> Result<&FileDescriptor, RegistryError> {
        self.catalog.file(fid).ok_or(RegistryError::NotFound)
    }

    /// Read `buf.len()` bytes of file `fid` from `offset`
    pub fn file_read(
        &mut self,
        fid: u32,
        offset: u32,
        buf: &mut [u8],
    ) -> Result<usize, RegistryError> {
        let file = self.catalog.file(fid).ok_or(RegistryError::NotFound)?;
        self.files.read(file, offset, buf)
    }

    pub fn file_write(&mut self, fid: u32, offset: u32, data: &[u8]) -> Result<(), RegistryError> {
        let file = self.catalog.file(fid).ok_or(RegistryError::NotFound)?;
        self.files.write(file, offset, data)
    }

    pub fn file_erase(&mut self, fid: u32) -> Result<(), RegistryError> {
        let file = self.catalog.file(fid).ok_or(RegistryError::NotFound)?;
        self.files.erase(file)
    }

    // ========== State ==========

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn settings(&self) -> &DeviceSettings {
        &self.settings
    }

    /// Outcome of the most recent initialization or factory reset
    pub fn init_summary(&self) -> InitSummary {
        self.init_summary
    }

    pub fn persistence_stats(&self) -> PersistenceStats {
        self.persistence.stats()
    }

    pub fn nvm(&self) -> &S {
        self.persistence.nvm()
    }

    pub fn nvm_mut(&mut self) -> &mut S {
        self.persistence.nvm_mut()
    }

    pub fn file_io(&self) -> &F {
        self.files.io()
    }

    /// Release the storage backends, e.g. to simulate a restart
    pub fn into_parts(self) -> (S, F) {
        (self.persistence.into_inner(), self.files.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{demo_config, DEMO_CATALOG, DRIFT_PARAMETER};
    use crate::core::config::DEFAULT_SERIAL_NUMBER_KEY;
    use crate::core::logging::LogMask;
    use crate::platform::mock::{MockFileIo, MockNvm};
    use reach_core::catalog::{AccessLevel, ExLabel, StaticCatalog, StorageClass};
    use reach_core::traits::MockTicks;
    use reach_core::value::{PARAM_BYTES_LEN, PARAM_STRING_LEN};

    type DemoRegistry = Registry<StaticCatalog, MockNvm, MockFileIo>;

    fn demo() -> DemoRegistry {
        Registry::new(DEMO_CATALOG, MockNvm::new(), MockFileIo::new()).unwrap()
    }

    fn restart(registry: DemoRegistry) -> DemoRegistry {
        let catalog = *registry.catalog();
        let (nvm, files) = registry.into_parts();
        Registry::new(catalog, nvm, files).unwrap()
    }

    fn text(s: &str) -> ParamValue {
        ParamValue::string_truncated(s)
    }

    const EXAMPLE_PARAMS: &[ParamDescriptor] = &[
        ParamDescriptor::new(1, ParamDataType::Uint32, "uint32_value").default_value(1970.0),
        ParamDescriptor::new(15, ParamDataType::String, "string_value")
            .storage(StorageClass::NonVolatile),
    ];

    const EXAMPLE: StaticCatalog = StaticCatalog::new(EXAMPLE_PARAMS, &[], &[], &[]);

    // ========== Example scenario ==========

    #[test]
    fn test_example_scenario() {
        let mut registry = Registry::new(EXAMPLE, MockNvm::new(), MockFileIo::new()).unwrap();

        assert_eq!(registry.read_value(1).unwrap().value, ParamValue::Uint32(1970));
        assert_eq!(registry.read_value(15).unwrap().value, text(""));
        // The empty default of the string was written back once
        assert_eq!(registry.nvm().put_count(), 1);
        assert!(registry.nvm().contains(15));
        assert!(!registry.nvm().contains(1));

        registry.write_value(15, text("Flea bag"), 1234).unwrap();
        let read = registry.read_value(15).unwrap();
        assert_eq!(read.value, text("Flea bag"));
        assert_eq!(read.timestamp, 1234);

        let registry = restart(registry);
        let read = registry.read_value(15).unwrap();
        assert_eq!(read.value, text("Flea bag"));
        assert_eq!(read.timestamp, 1234);
        assert_eq!(registry.read_value(1).unwrap().value, ParamValue::Uint32(1970));
    }

    // ========== Initialization ==========

    #[test]
    fn test_every_value_matches_descriptor_type() {
        let registry = demo();
        for desc in DEMO_CATALOG.parameters() {
            assert_eq!(registry.read_value(desc.id).unwrap().data_type(), desc.data_type);
        }
    }

    #[test]
    fn test_nonvolatile_parameters_have_records_after_init() {
        let registry = demo();
        for desc in DEMO_CATALOG.parameters() {
            assert_eq!(
                registry.nvm().contains(desc.id),
                desc.storage_class == StorageClass::NonVolatile,
                "parameter {}",
                desc.id
            );
        }
        assert_eq!(registry.init_summary().initialized, 8);
    }

    #[test]
    fn test_restart_restores_instead_of_rewriting() {
        let registry = restart(demo());
        assert_eq!(registry.init_summary().restored, 8);
        assert_eq!(registry.init_summary().initialized, 0);
        assert_eq!(registry.persistence_stats().writes, 0);
    }

    #[test]
    fn test_invalid_catalog_rejected() {
        const DUP: &[ParamDescriptor] = &[
            ParamDescriptor::new(3, ParamDataType::Int32, "a"),
            ParamDescriptor::new(3, ParamDataType::Int32, "b"),
        ];
        let result = Registry::new(
            StaticCatalog::new(DUP, &[], &[], &[]),
            MockNvm::new(),
            MockFileIo::new(),
        );
        assert!(matches!(result, Err(RegistryError::InvalidConfiguration)));
    }

    #[test]
    fn test_drift_target_must_be_int32() {
        let config = RegistryConfig::default().with_drift(1, 1000);
        let result = Registry::with_config(DEMO_CATALOG, MockNvm::new(), MockFileIo::new(), config);
        assert!(matches!(result, Err(RegistryError::InvalidConfiguration)));

        let config = RegistryConfig::default().with_drift(2, 1000);
        let result = Registry::with_config(DEMO_CATALOG, MockNvm::new(), MockFileIo::new(), config);
        assert!(matches!(result, Err(RegistryError::InvalidConfiguration)));
    }

    #[test]
    fn test_payload_limit_must_fit_wire() {
        for bytes in [0, 256] {
            let config = RegistryConfig::default().with_max_file_payload(bytes);
            let result =
                Registry::with_config(DEMO_CATALOG, MockNvm::new(), MockFileIo::new(), config);
            assert!(matches!(result, Err(RegistryError::InvalidConfiguration)));
        }
    }

    #[test]
    fn test_init_survives_storage_failure() {
        let mut nvm = MockNvm::new();
        nvm.fail_gets(true);
        nvm.fail_puts(true);
        let registry = Registry::new(DEMO_CATALOG, nvm, MockFileIo::new()).unwrap();
        assert_eq!(registry.init_summary().failed, 8);
        assert_eq!(registry.read_value(1).unwrap().value, ParamValue::Uint32(1970));
    }

    // ========== Discovery ==========

    #[test]
    fn test_resource_counts() {
        let registry = demo();
        assert_eq!(registry.get_resource_count(ResourceClass::Parameters), 33);
        assert_eq!(registry.get_resource_count(ResourceClass::Files), 2);
        assert_eq!(registry.get_resource_count(ResourceClass::Commands), 7);
    }

    #[test]
    fn test_reset_then_next_returns_that_id() {
        let mut registry = demo();
        for (class, id) in [
            (ResourceClass::Parameters, 23),
            (ResourceClass::Files, 1),
            (ResourceClass::Commands, 10),
        ] {
            registry.discover_reset(class, id).unwrap();
            assert_eq!(registry.discover_next(class).unwrap().id(), id);
        }
    }

    #[test]
    fn test_full_enumeration_in_declaration_order() {
        let mut registry = demo();
        registry.discover_reset(ResourceClass::Parameters, 1).unwrap();
        for expected in DEMO_CATALOG.parameters() {
            assert_eq!(registry.next_parameter().unwrap().id, expected.id);
        }
        assert_eq!(registry.next_parameter(), Err(RegistryError::Exhausted));
        assert_eq!(registry.next_parameter(), Err(RegistryError::Exhausted));

        registry.discover_reset(ResourceClass::Parameters, 1).unwrap();
        assert_eq!(registry.next_parameter().unwrap().id, 1);
    }

    #[test]
    fn test_enumeration_starts_without_reset() {
        let mut registry = demo();
        assert_eq!(registry.next_file().unwrap().name, "log_file.csv");
        assert_eq!(registry.next_file().unwrap().name, "ota.bin");
        assert_eq!(registry.next_file(), Err(RegistryError::Exhausted));
        assert_eq!(registry.next_command().unwrap().id, 1);
    }

    #[test]
    fn test_repeated_reset_is_idempotent() {
        let mut registry = demo();
        registry.discover_reset(ResourceClass::Commands, 4).unwrap();
        registry.discover_reset(ResourceClass::Commands, 4).unwrap();
        assert_eq!(registry.next_command().unwrap().id, 4);

        registry.discover_reset(ResourceClass::Commands, 4).unwrap();
        assert_eq!(registry.next_command().unwrap().id, 4);
    }

    #[test]
    fn test_reset_to_unknown_id_rewinds() {
        let mut registry = demo();
        registry.discover_reset(ResourceClass::Parameters, 21).unwrap();
        assert_eq!(
            registry.discover_reset(ResourceClass::Parameters, 2),
            Err(RegistryError::NotFound)
        );
        assert_eq!(registry.next_parameter().unwrap().id, 1);
    }

    #[test]
    fn test_cursors_are_independent() {
        let mut registry = demo();
        registry.discover_reset(ResourceClass::Parameters, 65).unwrap();
        registry.discover_reset(ResourceClass::Files, 1).unwrap();
        assert_eq!(registry.next_parameter().unwrap().id, 65);
        assert_eq!(registry.next_file().unwrap().id, 1);
        assert_eq!(registry.next_parameter(), Err(RegistryError::Exhausted));
    }

    #[test]
    fn test_discover_next_wraps_descriptor() {
        let mut registry = demo();
        registry.discover_reset(ResourceClass::Files, 0).unwrap();
        match registry.discover_next(ResourceClass::Files).unwrap() {
            Descriptor::File(file) => assert_eq!(file.access, AccessLevel::READ),
            other => panic!("unexpected {:?}", other),
        }
    }

    // ========== Extended metadata ==========

    #[test]
    fn test_extended_counts() {
        let registry = demo();
        assert_eq!(registry.get_extended_count(-1), 4);
        assert_eq!(registry.get_extended_count(17), 2);
        assert_eq!(registry.get_extended_count(19), 2);
        assert_eq!(registry.get_extended_count(1), 0);
    }

    #[test]
    fn test_extended_filter_returns_only_matching_pages() {
        let mut registry = demo();
        registry.extended_reset(19);
        let first = registry.extended_next().unwrap();
        assert_eq!(first.associated_pid, 19);
        assert_eq!(first.labels[7], ExLabel::new(128, "onetwentyeight"));
        let second = registry.extended_next().unwrap();
        assert_eq!(second.associated_pid, 19);
        assert_eq!(second.labels[0].value, 256);
        assert_eq!(registry.extended_next(), Err(RegistryError::Exhausted));
    }

    #[test]
    fn test_extended_unfiltered_walks_whole_table() {
        let mut registry = demo();
        registry.extended_reset(19);
        registry.extended_next().unwrap();

        registry.extended_reset(-1);
        let mut pids = [0u32; 4];
        for pid in pids.iter_mut() {
            *pid = registry.extended_next().unwrap().associated_pid;
        }
        assert_eq!(pids, [17, 17, 19, 19]);
        assert_eq!(registry.extended_next(), Err(RegistryError::Exhausted));
    }

    #[test]
    fn test_extended_filter_without_pages() {
        let mut registry = demo();
        registry.extended_reset(1);
        assert_eq!(registry.extended_next(), Err(RegistryError::Exhausted));
    }

    // ========== Fingerprint ==========

    #[test]
    fn test_fingerprint_stable() {
        let registry = demo();
        assert_eq!(registry.fingerprint(), registry.fingerprint());
        assert_eq!(restart(registry).fingerprint(), DEMO_CATALOG.fingerprint());
    }

    #[test]
    fn test_fingerprint_changes_with_range() {
        const WIDER: &[ParamDescriptor] = &[
            ParamDescriptor::new(1, ParamDataType::Uint32, "uint32_value")
                .range(0.0, 32768.0)
                .default_value(1970.0),
            EXAMPLE_PARAMS[1],
        ];
        const NARROW: &[ParamDescriptor] = &[
            ParamDescriptor::new(1, ParamDataType::Uint32, "uint32_value")
                .range(0.0, 32767.0)
                .default_value(1970.0),
            EXAMPLE_PARAMS[1],
        ];
        let wide = Registry::new(
            StaticCatalog::new(WIDER, &[], &[], &[]),
            MockNvm::new(),
            MockFileIo::new(),
        )
        .unwrap();
        let narrow = Registry::new(
            StaticCatalog::new(NARROW, &[], &[], &[]),
            MockNvm::new(),
            MockFileIo::new(),
        )
        .unwrap();
        assert_ne!(wide.fingerprint(), narrow.fingerprint());
    }

    // ========== Values ==========

    #[test]
    fn test_round_trip_every_type() {
        let mut registry = demo();
        let values = [
            (1, ParamValue::Uint32(4242)),
            (3, ParamValue::Int32(-17)),
            (5, ParamValue::Float32(12.5)),
            (7, ParamValue::Uint64(1 << 35)),
            (9, ParamValue::Int64(-(1 << 35))),
            (11, ParamValue::Float64(0.125)),
            (13, ParamValue::Bool(false)),
            (15, text("Flea bag")),
            (17, ParamValue::Enumeration(12)),
            (19, ParamValue::BitField(0x0104)),
            (21, ParamValue::bytes_truncated(&[0xDE, 0xAD, 0xBE, 0xEF])),
        ];
        for (ts, (pid, value)) in values.iter().enumerate() {
            registry.write_value(*pid, value.clone(), ts as u32 + 1).unwrap();
            let read = registry.read_value(*pid).unwrap();
            assert_eq!(&read.value, value, "parameter {}", pid);
            assert_eq!(read.timestamp, ts as u32 + 1);
        }
    }

    #[test]
    fn test_long_string_and_bytes_truncated() {
        let mut registry = demo();
        let long = "a string that is much longer than the thirty two byte capacity";
        registry.write_value(15, text(long), 1).unwrap();
        match registry.read_value(15).unwrap().value {
            ParamValue::String(s) => {
                assert_eq!(s.len(), PARAM_STRING_LEN);
                assert_eq!(s.as_str(), &long[..PARAM_STRING_LEN]);
            }
            other => panic!("unexpected {:?}", other),
        }

        registry
            .write_value(21, ParamValue::bytes_truncated(&[7u8; 40]), 2)
            .unwrap();
        match registry.read_value(21).unwrap().value {
            ParamValue::Bytes(b) => assert_eq!(b.len(), PARAM_BYTES_LEN),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_type_mismatch_rejected() {
        let mut registry = demo();
        let before = registry.read_value(5).unwrap();
        let puts = registry.nvm().put_count();

        assert_eq!(
            registry.write_value(5, ParamValue::Float64(1.0), 9),
            Err(RegistryError::TypeMismatch)
        );
        assert_eq!(
            registry.write_value(17, ParamValue::Uint32(3), 9),
            Err(RegistryError::TypeMismatch)
        );
        assert_eq!(registry.read_value(5).unwrap(), before);
        assert_eq!(registry.nvm().put_count(), puts);
    }

    #[test]
    fn test_unknown_parameter() {
        let mut registry = demo();
        assert_eq!(registry.read_value(2), Err(RegistryError::NotFound));
        assert_eq!(
            registry.write_value(2, ParamValue::Uint32(1), 0),
            Err(RegistryError::NotFound)
        );
    }

    #[test]
    fn test_read_only_parameter_rejects_host_write() {
        let mut registry = demo();
        assert_eq!(
            registry.write_value(DRIFT_PARAMETER, ParamValue::Int32(5), 1),
            Err(RegistryError::PermissionDenied)
        );
        assert_eq!(
            registry.read_value(DRIFT_PARAMETER).unwrap().value,
            ParamValue::Int32(0)
        );
    }

    #[test]
    fn test_write_only_parameter_is_still_readable() {
        let mut registry = demo();
        registry.write_value(25, ParamValue::Float32(50.0), 3).unwrap();
        assert_eq!(registry.read_value(25).unwrap().value, ParamValue::Float32(50.0));
    }

    #[test]
    fn test_out_of_range_value_stored() {
        let mut registry = demo();
        registry.write_value(3, ParamValue::Int32(5000), 1).unwrap();
        assert_eq!(registry.read_value(3).unwrap().value, ParamValue::Int32(5000));
    }

    #[test]
    fn test_ram_write_has_no_storage_side_effect() {
        let mut registry = demo();
        let puts = registry.nvm().put_count();
        registry.write_value(1, ParamValue::Uint32(1), 1).unwrap();
        registry.write_value(3, ParamValue::Int32(1), 1).unwrap();
        assert_eq!(registry.nvm().put_count(), puts);

        registry.write_value(5, ParamValue::Float32(1.0), 1).unwrap();
        assert_eq!(registry.nvm().put_count(), puts + 1);
    }

    #[test]
    fn test_nonvolatile_write_survives_restart() {
        let mut registry = demo();
        registry.write_value(7, ParamValue::Uint64(99), 10).unwrap();
        registry.write_value(1, ParamValue::Uint32(99), 10).unwrap();

        let registry = restart(registry);
        assert_eq!(registry.read_value(7).unwrap().value, ParamValue::Uint64(99));
        // RAM values come back at their default
        assert_eq!(registry.read_value(1).unwrap().value, ParamValue::Uint32(1970));
    }

    #[test]
    fn test_storage_write_failure_surfaces() {
        let mut registry = demo();
        registry.nvm_mut().fail_puts(true);
        assert_eq!(
            registry.write_value(5, ParamValue::Float32(1.0), 1),
            Err(RegistryError::WriteFailed)
        );
        assert_eq!(registry.persistence_stats().write_failures, 1);
        // The registry keeps serving requests
        assert!(registry.read_value(5).is_ok());
    }

    #[test]
    fn test_compaction_failure_does_not_fail_write() {
        let mut nvm = MockNvm::new().with_compaction_threshold(1);
        nvm.fail_compactions(true);
        let mut registry = Registry::new(DEMO_CATALOG, nvm, MockFileIo::new()).unwrap();
        assert_eq!(registry.write_value(5, ParamValue::Float32(1.0), 1), Ok(()));
        assert!(registry.persistence_stats().compaction_failures > 0);
    }

    // ========== Drift ==========

    #[test]
    fn test_drift_steps_read_only_sensor() {
        let mut registry =
            Registry::with_config(DEMO_CATALOG, MockNvm::new(), MockFileIo::new(), demo_config())
                .unwrap();
        let ticks = MockTicks::new();

        ticks.set(999);
        assert_eq!(registry.poll_drift(&ticks), Ok(None));

        ticks.set(1000);
        let stepped = registry.poll_drift(&ticks).unwrap().unwrap();
        assert_eq!(stepped.value, ParamValue::Int32(1));
        let read = registry.read_value(DRIFT_PARAMETER).unwrap();
        assert_eq!(read.value, ParamValue::Int32(1));
        assert_eq!(read.timestamp, 1000);
    }

    #[test]
    fn test_drift_disabled_by_default() {
        let mut registry = demo();
        let ticks = MockTicks::with_initial(50_000);
        assert_eq!(registry.poll_drift(&ticks), Ok(None));
    }

    // ========== Commands ==========

    #[test]
    fn test_unknown_command() {
        let mut registry = demo();
        assert_eq!(registry.execute_command(5), Err(RegistryError::NotFound));
    }

    #[test]
    fn test_remote_cli_commands() {
        let mut registry = demo();
        registry.execute_command(1).unwrap();
        assert!(registry.settings().remote_cli_enabled);
        registry.execute_command(2).unwrap();
        assert!(!registry.settings().remote_cli_enabled);
    }

    #[test]
    fn test_log_mask_commands() {
        let mut registry = demo();
        registry.execute_command(4).unwrap();
        assert_eq!(registry.settings().log_mask, LogMask::VERBOSE);
        registry.execute_command(3).unwrap();
        assert_eq!(registry.settings().log_mask, LogMask::empty());
    }

    #[test]
    fn test_unimplemented_commands_succeed() {
        let mut registry = demo();
        let before = *registry.settings();
        assert_eq!(registry.execute_command(47), Ok(()));
        assert_eq!(registry.execute_command(99), Ok(()));
        assert_eq!(*registry.settings(), before);
    }

    #[test]
    fn test_factory_reset_restores_defaults_and_keeps_serial() {
        let mut nvm = MockNvm::new();
        nvm.insert_raw(DEFAULT_SERIAL_NUMBER_KEY, b"RCH-000123");
        let mut registry = Registry::new(DEMO_CATALOG, nvm, MockFileIo::new()).unwrap();
        let default = registry.read_value(5).unwrap().value;

        registry.write_value(5, ParamValue::Float32(1.0), 7).unwrap();
        registry.write_value(15, text("Flea bag"), 7).unwrap();
        registry.execute_command(10).unwrap();

        assert_eq!(registry.read_value(5).unwrap().value, default);
        assert_eq!(registry.read_value(15).unwrap().value, text(""));
        assert_eq!(
            registry.nvm().object(DEFAULT_SERIAL_NUMBER_KEY),
            Some(&b"RCH-000123"[..])
        );
        assert_eq!(registry.init_summary().initialized, 8);

        let registry = restart(registry);
        assert_eq!(registry.read_value(15).unwrap().value, text(""));
    }

    #[test]
    fn test_factory_reset_succeeds_despite_erase_failure() {
        let mut registry = demo();
        registry.nvm_mut().fail_erases(true);
        assert_eq!(registry.execute_command(10), Ok(()));
    }

    // ========== Files ==========

    #[test]
    fn test_file_describe() {
        let registry = demo();
        assert_eq!(registry.file_describe(1).unwrap().size_bytes, 50000);
        assert_eq!(registry.file_describe(7), Err(RegistryError::NotFound));
    }

    #[test]
    fn test_file_transfer() {
        let mut registry = demo();
        registry.file_write(1, 0, b"new image").unwrap();
        let mut buf = [0u8; 32];
        let read = registry.file_read(1, 4, &mut buf).unwrap();
        assert_eq!(&buf[..read], b"image");
        registry.file_erase(1).unwrap();
        assert_eq!(registry.file_read(1, 0, &mut buf), Ok(0));
    }

    #[test]
    fn test_file_permissions_checked_before_io() {
        let mut registry = demo();
        assert_eq!(
            registry.file_write(0, 0, b"x"),
            Err(RegistryError::PermissionDenied)
        );
        assert_eq!(registry.file_erase(0), Err(RegistryError::PermissionDenied));
        assert_eq!(registry.file_io().write_count(), 0);
        assert_eq!(registry.file_io().erase_count(), 0);
    }

    #[test]
    fn test_file_request_over_payload_limit() {
        let mut registry = demo();
        let mut buf = [0u8; 256];
        assert_eq!(
            registry.file_read(0, 0, &mut buf[..129]),
            Err(RegistryError::BufferTooSmall)
        );
        assert_eq!(registry.file_read(0, 0, &mut buf[..128]), Ok(0));
        assert_eq!(
            registry.file_write(1, 0, &buf[..129]),
            Err(RegistryError::BufferTooSmall)
        );
    }

    #[test]
    fn test_unknown_file() {
        let mut registry = demo();
        let mut buf = [0u8; 4];
        assert_eq!(registry.file_read(9, 0, &mut buf), Err(RegistryError::NotFound));
        assert_eq!(registry.file_write(9, 0, b"x"), Err(RegistryError::NotFound));
        assert_eq!(registry.file_erase(9), Err(RegistryError::NotFound));
    }
}
