//! Mock file backend for testing
//!
//! Keeps file contents in memory, bounded by each descriptor's size.

use crate::platform::{error::FileIoError, traits::FileIo, Result};
use reach_core::catalog::FileDescriptor;
use std::collections::BTreeMap;
use std::vec::Vec;

/// Mock file backend
///
/// # Example
///
/// ```ignore
/// use reach_core::catalog::{AccessLevel, FileDescriptor, StorageClass};
/// use reach_device::platform::mock::MockFileIo;
/// use reach_device::platform::traits::FileIo;
///
/// let ota = FileDescriptor {
///     id: 1,
///     name: "ota.bin",
///     access: AccessLevel::READ_WRITE,
///     size_bytes: 50000,
///     storage_class: StorageClass::NonVolatile,
/// };
/// let mut files = MockFileIo::new();
/// files.write(&ota, 0, b"image").unwrap();
/// let mut buf = [0u8; 8];
/// assert_eq!(files.read(&ota, 0, &mut buf).unwrap(), 5);
/// ```
#[derive(Debug, Default)]
pub struct MockFileIo {
    contents: BTreeMap<u32, Vec<u8>>,
    read_count: u32,
    write_count: u32,
    erase_count: u32,
}

impl MockFileIo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preload a file's contents (test setup)
    pub fn with_contents(mut self, fid: u32, data: &[u8]) -> Self {
        self.contents.insert(fid, data.to_vec());
        self
    }

    /// Current contents of a file (for test verification)
    pub fn contents(&self, fid: u32) -> &[u8] {
        self.contents.get(&fid).map_or(&[][..], Vec::as_slice)
    }

    pub fn read_count(&self) -> u32 {
        self.read_count
    }

    pub fn write_count(&self) -> u32 {
        self.write_count
    }

    pub fn erase_count(&self) -> u32 {
        self.erase_count
    }
}

impl FileIo for MockFileIo {
    fn read(&mut self, file: &FileDescriptor, offset: u32, buf: &mut [u8]) -> Result<usize> {
        self.read_count += 1;
        let data = self.contents(file.id);
        let start = (offset as usize).min(data.len());
        let len = buf.len().min(data.len() - start);
        buf[..len].copy_from_slice(&data[start..start + len]);
        Ok(len)
    }

    fn write(&mut self, file: &FileDescriptor, offset: u32, data: &[u8]) -> Result<()> {
        self.write_count += 1;
        let end = offset as usize + data.len();
        if end > file.size_bytes as usize {
            return Err(FileIoError::OutOfRange.into());
        }

        let contents = self.contents.entry(file.id).or_default();
        if contents.len() < end {
            contents.resize(end, 0);
        }
        contents[offset as usize..end].copy_from_slice(data);
        Ok(())
    }

    fn erase(&mut self, file: &FileDescriptor) -> Result<()> {
        self.erase_count += 1;
        self.contents.remove(&file.id);
        Ok(())
    }
}
