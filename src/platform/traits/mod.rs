//! Platform abstraction traits
//!
//! This module defines the traits that platform implementations must provide.

pub mod file;
pub mod nvm;

// Re-export trait interfaces
pub use file::FileIo;
pub use nvm::NvmInterface;
