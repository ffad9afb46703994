//! Parameter management system
//!
//! This module provides the parameter value store, write-through
//! persistence to NVM and the simulated sensor drift used by demo devices.

pub mod drift;
pub mod persistence;
pub mod store;

// Re-export commonly used types
pub use drift::DriftGenerator;
pub use persistence::{InitSummary, Persistence, PersistenceStats};
pub use store::ValueStore;
