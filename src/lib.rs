#![cfg_attr(not(test), no_std)]

//! reach_device - On-device Reach capability registry
//!
//! This library exposes a device's parameters, files and commands to a host
//! over a narrow link: resumable discovery, typed value access, write-through
//! NVM persistence and a schema fingerprint for host-side cache invalidation.

#[cfg(all(feature = "mock", not(test)))]
extern crate std;

// Platform abstraction layer (storage and file backends)
pub mod platform;

// Registry, value store, persistence, files and commands
pub mod core;

// Demo device tables
pub mod catalog;
