//! Logging abstraction
//!
//! Provides unified logging macros that work across different targets:
//! - Embedded (`defmt` feature): Uses defmt
//! - Host tests: Uses println!
//! - Host non-test: No-op
//!
//! Arguments must be primitives or `&str` so the same call compiles for
//! both defmt and core::fmt. Error enums expose `as_str()` for this.
//!
//! The device also keeps a runtime log mask (see [`LogMask`]) that the
//! host can change through commands. Output of these macros is not
//! filtered by it; the mask is forwarded to whichever log sink the
//! platform installs.

use bitflags::bitflags;

bitflags! {
    /// Runtime log categories
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct LogMask: u32 {
        const PARAMS = 0x040;
        const FILES = 0x080;
        const COMMANDS = 0x100;
        const REACH = 0x200;
        const WIRE = 0x400;
        /// Every registry category ("lm 7C0")
        const VERBOSE = Self::PARAMS.bits()
            | Self::FILES.bits()
            | Self::COMMANDS.bits()
            | Self::REACH.bits()
            | Self::WIRE.bits();
    }
}

impl Default for LogMask {
    fn default() -> Self {
        LogMask::empty()
    }
}

/// Log informational message
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        #[cfg(all(feature = "defmt", not(test)))]
        ::defmt::info!($($arg)*);

        #[cfg(test)]
        println!("[INFO] {}", format!($($arg)*));

        #[cfg(all(not(feature = "defmt"), not(test)))]
        let _ = format_args!($($arg)*);
    }};
}

/// Log warning message
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        #[cfg(all(feature = "defmt", not(test)))]
        ::defmt::warn!($($arg)*);

        #[cfg(test)]
        println!("[WARN] {}", format!($($arg)*));

        #[cfg(all(not(feature = "defmt"), not(test)))]
        let _ = format_args!($($arg)*);
    }};
}

/// Log error message
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {{
        #[cfg(all(feature = "defmt", not(test)))]
        ::defmt::error!($($arg)*);

        #[cfg(test)]
        eprintln!("[ERROR] {}", format!($($arg)*));

        #[cfg(all(not(feature = "defmt"), not(test)))]
        let _ = format_args!($($arg)*);
    }};
}

/// Log debug message
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        #[cfg(all(feature = "defmt", not(test)))]
        ::defmt::debug!($($arg)*);

        #[cfg(test)]
        println!("[DEBUG] {}", format!($($arg)*));

        #[cfg(all(not(feature = "defmt"), not(test)))]
        let _ = format_args!($($arg)*);
    }};
}

/// Log trace message
#[macro_export]
macro_rules! log_trace {
    ($($arg:tt)*) => {{
        #[cfg(all(feature = "defmt", not(test)))]
        ::defmt::trace!($($arg)*);

        #[cfg(test)]
        println!("[TRACE] {}", format!($($arg)*));

        #[cfg(all(not(feature = "defmt"), not(test)))]
        let _ = format_args!($($arg)*);
    }};
}
