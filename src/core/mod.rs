//! Core registry functionality
//!
//! This module contains the host-facing registry and the services behind it:
//! parameter values and persistence, file transfer, device commands,
//! configuration and logging.

pub mod commands;
pub mod config;
pub mod files;
pub mod logging;
pub mod parameters;
pub mod registry;

pub use registry::{Descriptor, Registry, ResourceClass};
