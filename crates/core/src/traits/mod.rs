//! Platform-agnostic trait abstractions.
//!
//! # Design
//!
//! - Trait definitions are pure and have no feature gates
//! - Mock implementations are always available for host testing
//! - Platform implementations live in the device crate

pub mod ticks;

pub use ticks::{MockTicks, TickSource};
