//! File transfer service
//!
//! Gates host file requests on the descriptor's access level and the
//! negotiated payload size before any byte reaches the backend. A request
//! larger than the payload limit is refused, never truncated.

use crate::platform::traits::FileIo;
use crate::{log_debug, log_warn};
use reach_core::catalog::FileDescriptor;
use reach_core::RegistryError;

/// Access- and size-checked front end for a [`FileIo`] backend
pub struct FileService<F: FileIo> {
    io: F,
    max_payload: usize,
}

impl<F: FileIo> FileService<F> {
    pub fn new(io: F, max_payload: usize) -> Self {
        Self { io, max_payload }
    }

    /// Largest chunk a single read or write may carry
    pub fn max_payload(&self) -> usize {
        self.max_payload
    }

    /// Read `buf.len()` bytes of `file` from `offset`
    ///
    /// Returns the number of bytes read; zero means end of file.
    pub fn read(
        &mut self,
        file: &FileDescriptor,
        offset: u32,
        buf: &mut [u8],
    ) -> Result<usize, RegistryError> {
        if !file.access.can_read() {
            log_warn!("File {} is not readable", file.id);
            return Err(RegistryError::PermissionDenied);
        }
        self.check_size(file, buf.len())?;

        let read = self.io.read(file, offset, buf)?;
        log_debug!("File {} read {} bytes at {}", file.id, read, offset);
        Ok(read)
    }

    /// Write `data` into `file` at `offset`
    pub fn write(
        &mut self,
        file: &FileDescriptor,
        offset: u32,
        data: &[u8],
    ) -> Result<(), RegistryError> {
        if !file.access.can_write() {
            log_warn!("File {} is not writable", file.id);
            return Err(RegistryError::PermissionDenied);
        }
        self.check_size(file, data.len())?;

        self.io.write(file, offset, data)?;
        log_debug!("File {} wrote {} bytes at {}", file.id, data.len(), offset);
        Ok(())
    }

    /// Discard the contents of `file`
    pub fn erase(&mut self, file: &FileDescriptor) -> Result<(), RegistryError> {
        if !file.access.can_write() {
            log_warn!("File {} cannot be erased", file.id);
            return Err(RegistryError::PermissionDenied);
        }
        Ok(self.io.erase(file)?)
    }

    fn check_size(&self, file: &FileDescriptor, len: usize) -> Result<(), RegistryError> {
        if len > self.max_payload {
            log_warn!(
                "File {} request of {} bytes exceeds payload limit {}",
                file.id,
                len,
                self.max_payload
            );
            return Err(RegistryError::BufferTooSmall);
        }
        Ok(())
    }

    pub fn io(&self) -> &F {
        &self.io
    }

    pub fn io_mut(&mut self) -> &mut F {
        &mut self.io
    }

    pub fn into_inner(self) -> F {
        self.io
    }
}
