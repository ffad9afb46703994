//! Resumable discovery cursors
//!
//! Hosts enumerate each catalog class over many small request/response
//! exchanges. A cursor remembers the position between exchanges. There is
//! one cursor per class; resetting abandons any enumeration in progress.
//!
//! Enumeration order is table order, independent of identifier values.

use crate::catalog::{
    CommandDescriptor, FileDescriptor, ParamDescriptor, ParamExDescriptor,
};
use crate::error::RegistryError;

/// Table entries addressable by identifier
pub trait Identified {
    fn id(&self) -> u32;
}

impl Identified for ParamDescriptor {
    fn id(&self) -> u32 {
        self.id
    }
}

impl Identified for FileDescriptor {
    fn id(&self) -> u32 {
        self.id
    }
}

impl Identified for CommandDescriptor {
    fn id(&self) -> u32 {
        self.id
    }
}

/// Cursor over a parameter, file or command table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiscoveryCursor {
    index: usize,
}

impl DiscoveryCursor {
    pub const fn new() -> Self {
        Self { index: 0 }
    }

    /// Index of the next entry to be returned
    pub fn position(&self) -> usize {
        self.index
    }

    /// Position the cursor on the entry with `id`
    ///
    /// An unknown id rewinds to the start and reports `NotFound`.
    pub fn reset<T: Identified>(&mut self, table: &[T], id: u32) -> Result<(), RegistryError> {
        match table.iter().position(|entry| entry.id() == id) {
            Some(index) => {
                self.index = index;
                Ok(())
            }
            None => {
                self.index = 0;
                Err(RegistryError::NotFound)
            }
        }
    }

    /// Return the entry under the cursor and advance
    ///
    /// Once past the end, every call returns `Exhausted` until the next reset.
    pub fn next_entry<'a, T>(&mut self, table: &'a [T]) -> Result<&'a T, RegistryError> {
        let entry = table.get(self.index).ok_or(RegistryError::Exhausted)?;
        self.index += 1;
        Ok(entry)
    }
}

/// Cursor over extended metadata pages, optionally filtered by parameter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExCursor {
    index: usize,
    filter: Option<u32>,
}

impl ExCursor {
    pub const fn new() -> Self {
        Self {
            index: 0,
            filter: None,
        }
    }

    pub fn position(&self) -> usize {
        self.index
    }

    /// Parameter the cursor is restricted to, if any
    pub fn filter(&self) -> Option<u32> {
        self.filter
    }

    /// Rewind to the first page
    ///
    /// A negative `pid` selects every page; otherwise only pages owned by
    /// `pid` are returned. Always succeeds.
    pub fn reset(&mut self, pid: i32) {
        self.index = 0;
        self.filter = u32::try_from(pid).ok();
    }

    /// Return the next matching page and advance past it
    ///
    /// The scan runs forward from the current position and never wraps.
    /// When nothing matches, the position is left unchanged.
    pub fn next_entry<'a>(
        &mut self,
        table: &'a [ParamExDescriptor],
    ) -> Result<&'a ParamExDescriptor, RegistryError> {
        let start = self.index.min(table.len());
        let offset = table[start..]
            .iter()
            .position(|page| self.matches(page))
            .ok_or(RegistryError::Exhausted)?;
        let index = start + offset;
        self.index = index + 1;
        Ok(&table[index])
    }

    fn matches(&self, page: &ParamExDescriptor) -> bool {
        self.filter.map_or(true, |pid| page.associated_pid == pid)
    }

    /// Number of pages for `pid`, or all pages when `pid` is negative
    pub fn count(table: &[ParamExDescriptor], pid: i32) -> usize {
        match u32::try_from(pid) {
            Ok(pid) => table.iter().filter(|p| p.associated_pid == pid).count(),
            Err(_) => table.len(),
        }
    }
}
