//! Mock NVM implementation for testing
//!
//! Provides an in-memory key/value store for unit tests.

use crate::platform::{error::NvmError, traits::NvmInterface, Result};
use std::collections::BTreeMap;
use std::vec::Vec;

/// Mock NVM implementation
///
/// Simulates a journaling key/value NVM in memory. Supports:
/// - Get/put/compact/erase operations
/// - Failure injection per operation
/// - Corruption injection for testing record validation
/// - A compaction threshold counted in puts since the last compaction
/// - Operation counters
///
/// # Example
///
/// ```ignore
/// use reach_device::platform::mock::MockNvm;
/// use reach_device::platform::traits::NvmInterface;
///
/// let mut nvm = MockNvm::new().with_compaction_threshold(2);
/// nvm.put(1, &[1, 2, 3]).unwrap();
/// assert!(!nvm.needs_compaction());
/// nvm.put(1, &[4, 5, 6]).unwrap();
/// assert!(nvm.needs_compaction());
/// nvm.compact().unwrap();
/// assert_eq!(nvm.compact_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MockNvm {
    objects: BTreeMap<u32, Vec<u8>>,
    fail_get: bool,
    fail_put: bool,
    fail_compact: bool,
    fail_erase: bool,
    compaction_threshold: Option<u32>,
    puts_since_compact: u32,
    get_count: u32,
    put_count: u32,
    compact_count: u32,
    erase_count: u32,
}

impl MockNvm {
    /// Create an empty mock NVM that never asks for compaction
    pub fn new() -> Self {
        Self::default()
    }

    /// Request compaction after `puts` writes
    pub fn with_compaction_threshold(mut self, puts: u32) -> Self {
        self.compaction_threshold = Some(puts);
        self
    }

    /// Make every `get` fail with `ReadFailed`
    pub fn fail_gets(&mut self, fail: bool) {
        self.fail_get = fail;
    }

    /// Make every `put` fail with `WriteFailed`
    pub fn fail_puts(&mut self, fail: bool) {
        self.fail_put = fail;
    }

    /// Make every `compact` fail with `CompactionFailed`
    pub fn fail_compactions(&mut self, fail: bool) {
        self.fail_compact = fail;
    }

    /// Make every `erase_all` fail with `EraseFailed`
    pub fn fail_erases(&mut self, fail: bool) {
        self.fail_erase = fail;
    }

    /// Store raw bytes, bypassing counters (test setup)
    pub fn insert_raw(&mut self, key: u32, data: &[u8]) {
        self.objects.insert(key, data.to_vec());
    }

    /// Stored bytes under `key` (for test verification)
    pub fn object(&self, key: u32) -> Option<&[u8]> {
        self.objects.get(&key).map(Vec::as_slice)
    }

    pub fn contains(&self, key: u32) -> bool {
        self.objects.contains_key(&key)
    }

    /// Number of stored objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Flip every bit of the byte at `offset` in the object under `key`
    pub fn inject_corruption(&mut self, key: u32, offset: usize) {
        if let Some(byte) = self
            .objects
            .get_mut(&key)
            .and_then(|data| data.get_mut(offset))
        {
            *byte ^= 0xFF;
        }
    }

    pub fn get_count(&self) -> u32 {
        self.get_count
    }

    pub fn put_count(&self) -> u32 {
        self.put_count
    }

    pub fn compact_count(&self) -> u32 {
        self.compact_count
    }

    pub fn erase_count(&self) -> u32 {
        self.erase_count
    }
}

impl NvmInterface for MockNvm {
    fn get(&mut self, key: u32, buf: &mut [u8]) -> Result<Option<usize>> {
        self.get_count += 1;
        if self.fail_get {
            return Err(NvmError::ReadFailed.into());
        }

        let data = match self.objects.get(&key) {
            Some(data) => data,
            None => return Ok(None),
        };
        if data.len() > buf.len() {
            return Err(NvmError::BufferTooSmall.into());
        }
        buf[..data.len()].copy_from_slice(data);
        Ok(Some(data.len()))
    }

    fn put(&mut self, key: u32, data: &[u8]) -> Result<()> {
        self.put_count += 1;
        if self.fail_put {
            return Err(NvmError::WriteFailed.into());
        }

        self.objects.insert(key, data.to_vec());
        self.puts_since_compact += 1;
        Ok(())
    }

    fn needs_compaction(&self) -> bool {
        self.compaction_threshold
            .is_some_and(|threshold| self.puts_since_compact >= threshold)
    }

    fn compact(&mut self) -> Result<()> {
        self.compact_count += 1;
        if self.fail_compact {
            return Err(NvmError::CompactionFailed.into());
        }

        self.puts_since_compact = 0;
        Ok(())
    }

    fn erase_all(&mut self) -> Result<()> {
        self.erase_count += 1;
        if self.fail_erase {
            return Err(NvmError::EraseFailed.into());
        }

        self.objects.clear();
        self.puts_since_compact = 0;
        Ok(())
    }
}
