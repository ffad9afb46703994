//! NVM interface trait
//!
//! Key/value non-volatile storage in the style of a journaling NVM driver:
//! objects are addressed by a 32-bit key, writes append, and the driver
//! periodically needs compaction to reclaim space.

use crate::platform::Result;

/// Key/value NVM interface
///
/// Platform implementations must provide this interface for persisted
/// parameters. All calls are synchronous.
pub trait NvmInterface {
    /// Read the object stored under `key` into `buf`
    ///
    /// Returns `Ok(None)` when no object exists and `Ok(Some(len))` with the
    /// object's length otherwise.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Nvm(NvmError::BufferTooSmall)` if the object
    /// does not fit in `buf`, or `NvmError::ReadFailed` on driver failure.
    fn get(&mut self, key: u32, buf: &mut [u8]) -> Result<Option<usize>>;

    /// Store `data` under `key`, replacing any previous object
    fn put(&mut self, key: u32, data: &[u8]) -> Result<()>;

    /// True when the driver wants `compact` to be called
    fn needs_compaction(&self) -> bool;

    /// Reclaim space left by superseded objects
    fn compact(&mut self) -> Result<()>;

    /// Remove every object
    fn erase_all(&mut self) -> Result<()>;
}

impl<T: NvmInterface + ?Sized> NvmInterface for &mut T {
    fn get(&mut self, key: u32, buf: &mut [u8]) -> Result<Option<usize>> {
        (**self).get(key, buf)
    }

    fn put(&mut self, key: u32, data: &[u8]) -> Result<()> {
        (**self).put(key, data)
    }

    fn needs_compaction(&self) -> bool {
        (**self).needs_compaction()
    }

    fn compact(&mut self) -> Result<()> {
        (**self).compact()
    }

    fn erase_all(&mut self) -> Result<()> {
        (**self).erase_all()
    }
}
