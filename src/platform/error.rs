//! Platform error types
//!
//! This module defines error types for storage and file backends.

use core::fmt;
use reach_core::RegistryError;

/// Result type for platform operations
pub type Result<T> = core::result::Result<T, PlatformError>;

/// Platform-level errors
///
/// All backend implementations map their driver-specific errors to these variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformError {
    /// NVM operation failed
    Nvm(NvmError),
    /// File backend operation failed
    FileIo(FileIoError),
    /// Invalid configuration provided
    InvalidConfig,
}

/// NVM-specific errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NvmError {
    /// Read operation failed
    ReadFailed,
    /// Write operation failed
    WriteFailed,
    /// Compaction (repack) failed
    CompactionFailed,
    /// Erase operation failed
    EraseFailed,
    /// Stored object is larger than the caller's buffer
    BufferTooSmall,
}

/// File backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileIoError {
    /// Offset or length beyond the file's maximum size
    OutOfRange,
    /// Read operation failed
    ReadFailed,
    /// Write operation failed
    WriteFailed,
    /// Erase operation failed
    EraseFailed,
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformError::Nvm(e) => write!(f, "NVM error: {:?}", e),
            PlatformError::FileIo(e) => write!(f, "File I/O error: {:?}", e),
            PlatformError::InvalidConfig => write!(f, "Invalid configuration"),
        }
    }
}

impl From<NvmError> for PlatformError {
    fn from(err: NvmError) -> Self {
        PlatformError::Nvm(err)
    }
}

impl From<FileIoError> for PlatformError {
    fn from(err: FileIoError) -> Self {
        PlatformError::FileIo(err)
    }
}

impl From<PlatformError> for RegistryError {
    fn from(err: PlatformError) -> Self {
        match err {
            PlatformError::Nvm(NvmError::ReadFailed | NvmError::BufferTooSmall)
            | PlatformError::FileIo(FileIoError::ReadFailed) => RegistryError::ReadFailed,
            PlatformError::Nvm(_) | PlatformError::FileIo(_) => RegistryError::WriteFailed,
            PlatformError::InvalidConfig => RegistryError::InvalidConfiguration,
        }
    }
}
