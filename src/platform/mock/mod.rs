//! Mock platform implementation for testing
//!
//! This module provides mock implementations of platform traits that can be used
//! for unit testing without requiring actual hardware.
//!
//! # Feature Gate
//!
//! This module is available in two contexts:
//! - During test builds (`#[cfg(test)]`)
//! - When the `mock` feature is enabled
//!
//! # Example
//!
//! ```ignore
//! use reach_device::platform::mock::MockNvm;
//! use reach_device::platform::traits::NvmInterface;
//!
//! let mut nvm = MockNvm::new();
//! nvm.put(15, b"Flea bag").unwrap();
//! let mut buf = [0u8; 16];
//! assert_eq!(nvm.get(15, &mut buf).unwrap(), Some(8));
//! ```

#![cfg(any(test, feature = "mock"))]

mod file;
mod nvm;

pub use file::MockFileIo;
pub use nvm::MockNvm;
