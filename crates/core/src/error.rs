//! Registry error types
//!
//! Provides the error taxonomy shared by the value store, persistence,
//! discovery and the file/command services.

use core::fmt;

/// Errors from registry operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryError {
    /// Unknown parameter, file or command identifier
    NotFound,
    /// Value variant does not match the descriptor's data type
    TypeMismatch,
    /// Access level does not allow the operation
    PermissionDenied,
    /// Requested size exceeds the negotiated maximum payload
    BufferTooSmall,
    /// Storage read failed
    ReadFailed,
    /// Storage write failed
    WriteFailed,
    /// Catalog or storage class is not supported
    InvalidConfiguration,
    /// End of enumeration (not a failure)
    Exhausted,
}

impl RegistryError {
    /// True for the terminal iteration signal
    pub fn is_exhausted(&self) -> bool {
        matches!(self, RegistryError::Exhausted)
    }

    /// Return variant name as a static string (usable with defmt on embedded)
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistryError::NotFound => "NotFound",
            RegistryError::TypeMismatch => "TypeMismatch",
            RegistryError::PermissionDenied => "PermissionDenied",
            RegistryError::BufferTooSmall => "BufferTooSmall",
            RegistryError::ReadFailed => "ReadFailed",
            RegistryError::WriteFailed => "WriteFailed",
            RegistryError::InvalidConfiguration => "InvalidConfiguration",
            RegistryError::Exhausted => "Exhausted",
        }
    }
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::NotFound => write!(f, "identifier not found"),
            RegistryError::TypeMismatch => write!(f, "value type does not match descriptor"),
            RegistryError::PermissionDenied => write!(f, "permission denied"),
            RegistryError::BufferTooSmall => write!(f, "request exceeds maximum payload"),
            RegistryError::ReadFailed => write!(f, "storage read failed"),
            RegistryError::WriteFailed => write!(f, "storage write failed"),
            RegistryError::InvalidConfiguration => write!(f, "invalid configuration"),
            RegistryError::Exhausted => write!(f, "enumeration exhausted"),
        }
    }
}

/// Structural defects found while validating a catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogError {
    /// More parameters than the value store can hold
    TooManyParameters(usize),
    /// Two parameters share an identifier
    DuplicateParameterId(u32),
    /// Two files share an identifier
    DuplicateFileId(u32),
    /// Two commands share an identifier
    DuplicateCommandId(u32),
    /// A name, description, units or label exceeds its bound
    TextTooLong(u32),
    /// Extended page references a parameter that does not exist
    UnknownParameter(u32),
    /// Extended page type differs from the parameter, or is not enum/bit-field
    ExtendedTypeMismatch(u32),
    /// Extended page holds more labels than fit in one message
    TooManyLabels(u32),
}

impl CatalogError {
    /// Short description without the offending id
    pub fn as_str(&self) -> &'static str {
        match self {
            CatalogError::TooManyParameters(_) => "too many parameters",
            CatalogError::DuplicateParameterId(_) => "duplicate parameter id",
            CatalogError::DuplicateFileId(_) => "duplicate file id",
            CatalogError::DuplicateCommandId(_) => "duplicate command id",
            CatalogError::TextTooLong(_) => "text too long",
            CatalogError::UnknownParameter(_) => "extended metadata for unknown parameter",
            CatalogError::ExtendedTypeMismatch(_) => "extended metadata type mismatch",
            CatalogError::TooManyLabels(_) => "too many labels",
        }
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::TooManyParameters(n) => write!(f, "too many parameters ({})", n),
            CatalogError::DuplicateParameterId(id) => write!(f, "duplicate parameter id {}", id),
            CatalogError::DuplicateFileId(id) => write!(f, "duplicate file id {}", id),
            CatalogError::DuplicateCommandId(id) => write!(f, "duplicate command id {}", id),
            CatalogError::TextTooLong(id) => write!(f, "text too long on id {}", id),
            CatalogError::UnknownParameter(id) => {
                write!(f, "extended metadata for unknown parameter {}", id)
            }
            CatalogError::ExtendedTypeMismatch(id) => {
                write!(f, "extended metadata type mismatch for parameter {}", id)
            }
            CatalogError::TooManyLabels(id) => write!(f, "too many labels for parameter {}", id),
        }
    }
}

impl From<CatalogError> for RegistryError {
    fn from(_: CatalogError) -> Self {
        RegistryError::InvalidConfiguration
    }
}

/// Reasons a persisted record cannot be used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordError {
    /// Record is not exactly `RECORD_SIZE` bytes
    Size,
    /// Checksum does not match contents
    Crc,
    /// Data type tag is not a known type
    UnknownType,
    /// Record belongs to another parameter
    IdMismatch,
    /// Record type differs from the descriptor
    TypeMismatch,
    /// Payload length or encoding is invalid
    Payload,
}

impl RecordError {
    /// Return variant name as a static string (usable with defmt on embedded)
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordError::Size => "Size",
            RecordError::Crc => "Crc",
            RecordError::UnknownType => "UnknownType",
            RecordError::IdMismatch => "IdMismatch",
            RecordError::TypeMismatch => "TypeMismatch",
            RecordError::Payload => "Payload",
        }
    }
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::Size => write!(f, "record size mismatch"),
            RecordError::Crc => write!(f, "record CRC mismatch"),
            RecordError::UnknownType => write!(f, "unknown data type tag"),
            RecordError::IdMismatch => write!(f, "record parameter id mismatch"),
            RecordError::TypeMismatch => write!(f, "record data type mismatch"),
            RecordError::Payload => write!(f, "invalid record payload"),
        }
    }
}

impl From<RecordError> for RegistryError {
    fn from(_: RecordError) -> Self {
        RegistryError::ReadFailed
    }
}
