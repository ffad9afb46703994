//! Resource descriptors
//!
//! Immutable metadata records for parameters, extended metadata pages,
//! files and commands. Descriptors are meant to live in `const` tables.

use crate::value::{ParamValue, PARAM_BYTES_LEN, PARAM_STRING_LEN};
use bitflags::bitflags;

/// Maximum parameter name length (bytes)
pub const PARAM_NAME_LEN: usize = 24;

/// Maximum parameter description length (bytes)
pub const PARAM_DESCRIPTION_LEN: usize = 32;

/// Maximum units label length (bytes)
pub const PARAM_UNITS_LEN: usize = 16;

/// Maximum enumeration/bit-field label length (bytes)
pub const EX_LABEL_LEN: usize = 16;

/// Maximum number of labels in one extended metadata page
pub const MAX_LABELS_PER_PAGE: usize = 8;

/// Maximum file name length (bytes)
pub const FILE_NAME_LEN: usize = 24;

/// Maximum command name length (bytes)
pub const COMMAND_NAME_LEN: usize = 24;

/// Parameter data types
///
/// Discriminants are the wire values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ParamDataType {
    Uint32 = 0,
    Int32 = 1,
    Float32 = 2,
    Uint64 = 3,
    Int64 = 4,
    Float64 = 5,
    Bool = 6,
    String = 7,
    Enumeration = 8,
    BitField = 9,
    ByteArray = 10,
}

impl ParamDataType {
    /// Decode a wire value
    pub fn from_u8(value: u8) -> Option<Self> {
        let data_type = match value {
            0 => ParamDataType::Uint32,
            1 => ParamDataType::Int32,
            2 => ParamDataType::Float32,
            3 => ParamDataType::Uint64,
            4 => ParamDataType::Int64,
            5 => ParamDataType::Float64,
            6 => ParamDataType::Bool,
            7 => ParamDataType::String,
            8 => ParamDataType::Enumeration,
            9 => ParamDataType::BitField,
            10 => ParamDataType::ByteArray,
            _ => return None,
        };
        Some(data_type)
    }

    /// Smallest value the type can hold
    ///
    /// For strings and byte arrays this is a length.
    pub fn natural_min(self) -> f64 {
        match self {
            ParamDataType::Int32 => i32::MIN as f64,
            ParamDataType::Float32 => f32::MIN as f64,
            ParamDataType::Int64 => i64::MIN as f64,
            ParamDataType::Float64 => f64::MIN,
            ParamDataType::Uint32
            | ParamDataType::Uint64
            | ParamDataType::Bool
            | ParamDataType::String
            | ParamDataType::Enumeration
            | ParamDataType::BitField
            | ParamDataType::ByteArray => 0.0,
        }
    }

    /// Largest value the type can hold
    ///
    /// For strings and byte arrays this is the capacity.
    pub fn natural_max(self) -> f64 {
        match self {
            ParamDataType::Uint32 | ParamDataType::Enumeration | ParamDataType::BitField => {
                u32::MAX as f64
            }
            ParamDataType::Int32 => i32::MAX as f64,
            ParamDataType::Float32 => f32::MAX as f64,
            ParamDataType::Uint64 => u64::MAX as f64,
            ParamDataType::Int64 => i64::MAX as f64,
            ParamDataType::Float64 => f64::MAX,
            ParamDataType::Bool => 1.0,
            ParamDataType::String => PARAM_STRING_LEN as f64,
            ParamDataType::ByteArray => PARAM_BYTES_LEN as f64,
        }
    }

    /// True for types that may own extended metadata pages
    pub fn has_labels(self) -> bool {
        matches!(self, ParamDataType::Enumeration | ParamDataType::BitField)
    }
}

bitflags! {
    /// Access rights on a parameter or file
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct AccessLevel: u8 {
        /// Host may read
        const READ = 0b01;
        /// Host may write
        const WRITE = 0b10;
        /// Host may read and write
        const READ_WRITE = Self::READ.bits() | Self::WRITE.bits();
    }
}

impl AccessLevel {
    pub fn can_read(&self) -> bool {
        self.contains(AccessLevel::READ)
    }

    pub fn can_write(&self) -> bool {
        self.contains(AccessLevel::WRITE)
    }
}

/// Where a parameter's value lives
///
/// Discriminants are the wire values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum StorageClass {
    Invalid = 0,
    NonVolatile = 1,
    Ram = 2,
    /// Reserved for systems with more than one NVM region; not supported
    NonVolatileExtended = 3,
    RamExtended = 4,
}

impl StorageClass {
    /// True if writes must be pushed to the storage adapter
    pub fn is_persistent(&self) -> bool {
        matches!(self, StorageClass::NonVolatile)
    }

    /// False for classes treated as configuration errors
    pub fn is_supported(&self) -> bool {
        !matches!(
            self,
            StorageClass::Invalid | StorageClass::NonVolatileExtended
        )
    }
}

/// Parameter descriptor
///
/// Ranges and defaults are carried as `f64`, the representation used on the
/// wire. An absent bound means the type's natural bound in that direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Stable identifier, unique among parameters
    pub id: u32,
    pub data_type: ParamDataType,
    pub name: &'static str,
    pub access: AccessLevel,
    pub description: Option<&'static str>,
    pub units: Option<&'static str>,
    pub range_min: Option<f64>,
    pub range_max: Option<f64>,
    pub default_value: Option<f64>,
    pub storage_class: StorageClass,
}

impl ParamDescriptor {
    /// Create a read/write RAM parameter with no range, default or text
    pub const fn new(id: u32, data_type: ParamDataType, name: &'static str) -> Self {
        Self {
            id,
            data_type,
            name,
            access: AccessLevel::READ_WRITE,
            description: None,
            units: None,
            range_min: None,
            range_max: None,
            default_value: None,
            storage_class: StorageClass::Ram,
        }
    }

    pub const fn access(mut self, access: AccessLevel) -> Self {
        self.access = access;
        self
    }

    pub const fn description(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    pub const fn units(mut self, units: &'static str) -> Self {
        self.units = Some(units);
        self
    }

    pub const fn range(mut self, min: f64, max: f64) -> Self {
        self.range_min = Some(min);
        self.range_max = Some(max);
        self
    }

    pub const fn default_value(mut self, default: f64) -> Self {
        self.default_value = Some(default);
        self
    }

    pub const fn storage(mut self, storage_class: StorageClass) -> Self {
        self.storage_class = storage_class;
        self
    }

    /// Minimum after applying the type's natural bound
    pub fn effective_min(&self) -> f64 {
        self.range_min
            .unwrap_or_else(|| self.data_type.natural_min())
    }

    /// Maximum after applying the type's natural bound
    pub fn effective_max(&self) -> f64 {
        self.range_max
            .unwrap_or_else(|| self.data_type.natural_max())
    }

    /// Check a value against type and effective range
    pub fn in_range(&self, value: &ParamValue) -> bool {
        if value.data_type() != self.data_type {
            return false;
        }
        let v = value.as_f64();
        v >= self.effective_min() && v <= self.effective_max()
    }

    /// Value a parameter holds before anything is written or restored
    ///
    /// Strings and byte arrays have no numeric default and start empty.
    pub fn initial_value(&self) -> ParamValue {
        match self.default_value {
            Some(default) => ParamValue::from_f64(self.data_type, default),
            None => ParamValue::zero(self.data_type),
        }
    }
}

/// One (value, label) pair of an enumeration or bit-field page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExLabel {
    /// Enumeration value, or bit mask for bit-fields
    pub value: u32,
    pub label: &'static str,
}

impl ExLabel {
    pub const fn new(value: u32, label: &'static str) -> Self {
        Self { value, label }
    }
}

/// Extended metadata page
///
/// A parameter with more labels than fit in one page owns several pages;
/// the host concatenates them in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamExDescriptor {
    pub associated_pid: u32,
    /// Must equal the associated parameter's type
    pub data_type: ParamDataType,
    pub labels: &'static [ExLabel],
}

impl ParamExDescriptor {
    pub const fn new(
        associated_pid: u32,
        data_type: ParamDataType,
        labels: &'static [ExLabel],
    ) -> Self {
        Self {
            associated_pid,
            data_type,
            labels,
        }
    }
}

/// File descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileDescriptor {
    pub id: u32,
    pub name: &'static str,
    pub access: AccessLevel,
    /// Maximum size in bytes
    pub size_bytes: u32,
    pub storage_class: StorageClass,
}

/// Side effect run by a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandAction {
    EnableRemoteCli,
    DisableRemoteCli,
    /// Replace the runtime log mask
    SetLogMask(u32),
    /// Erase persisted state and reinitialize defaults
    FactoryReset,
    /// Advertised but without behavior on this device
    NotImplemented,
}

/// Command descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandDescriptor {
    pub id: u32,
    pub name: &'static str,
    pub action: CommandAction,
}
