//! Platform abstraction layer
//!
//! This module provides the storage and file backend contracts the registry
//! consumes. All driver-specific code must be isolated behind these traits.

pub mod error;
pub mod traits;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export commonly used types
pub use error::{FileIoError, NvmError, PlatformError, Result};
pub use traits::{FileIo, NvmInterface};
