//! reach_core - Pure no_std logic for the Reach capability registry
//!
//! This crate contains the platform-agnostic catalog, value and discovery
//! types that can be tested on host without any feature flags.
//!
//! # Design Principles
//!
//! - **Zero cfg**: No `#[cfg(feature = ...)]` directives allowed
//! - **Pure no_std**: No std library dependencies
//! - **Trait abstractions**: Catalogs and tick sources injected via traits
//!
//! # Modules
//!
//! - [`catalog`]: Descriptor types, the `Catalog` trait, validation and fingerprint
//! - [`value`]: Tagged parameter values
//! - [`record`]: Fixed-layout NVM record codec
//! - [`discovery`]: Resumable discovery cursors
//! - [`error`]: Registry, catalog and record error types
//! - [`traits`]: Platform-agnostic trait abstractions (TickSource)

#![no_std]

pub mod catalog;
pub mod discovery;
pub mod error;
pub mod record;
pub mod traits;
pub mod value;

pub use catalog::{Catalog, StaticCatalog};
pub use discovery::{DiscoveryCursor, ExCursor};
pub use error::{CatalogError, RecordError, RegistryError};
pub use value::{ParamValue, ParameterValue};
