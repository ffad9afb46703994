//! File backend trait
//!
//! Byte-level access to the files a device advertises. Permission and
//! payload-size checks happen before these calls are made.

use crate::platform::Result;
use reach_core::catalog::FileDescriptor;

/// File backend interface
pub trait FileIo {
    /// Read up to `buf.len()` bytes starting at `offset`
    ///
    /// Returns the number of bytes read, which is zero at end of file.
    fn read(&mut self, file: &FileDescriptor, offset: u32, buf: &mut [u8]) -> Result<usize>;

    /// Write `data` at `offset`
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::FileIo(FileIoError::OutOfRange)` if the write
    /// would extend past the file's maximum size.
    fn write(&mut self, file: &FileDescriptor, offset: u32, data: &[u8]) -> Result<()>;

    /// Discard the file's contents
    fn erase(&mut self, file: &FileDescriptor) -> Result<()>;
}

impl<T: FileIo + ?Sized> FileIo for &mut T {
    fn read(&mut self, file: &FileDescriptor, offset: u32, buf: &mut [u8]) -> Result<usize> {
        (**self).read(file, offset, buf)
    }

    fn write(&mut self, file: &FileDescriptor, offset: u32, data: &[u8]) -> Result<()> {
        (**self).write(file, offset, data)
    }

    fn erase(&mut self, file: &FileDescriptor) -> Result<()> {
        (**self).erase(file)
    }
}
