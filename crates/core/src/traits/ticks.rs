//! Tick source abstraction
//!
//! The registry only needs a free-running `u32` tick counter to rate limit
//! periodic work. Platforms supply the real counter; `MockTicks` lets tests
//! drive time by hand.

use core::cell::Cell;

/// Free-running tick counter
///
/// The counter wraps at `u32::MAX`; `ticks_since` accounts for that.
///
/// # Example
///
/// ```
/// use reach_core::traits::{MockTicks, TickSource};
///
/// let ticks = MockTicks::new();
/// let last = ticks.now_ticks();
/// ticks.advance(1000);
/// assert_eq!(ticks.ticks_since(last), 1000);
/// ```
pub trait TickSource {
    /// Current tick count
    fn now_ticks(&self) -> u32;

    /// Ticks elapsed since `reference`, modulo 2^32
    fn ticks_since(&self, reference: u32) -> u32 {
        self.now_ticks().wrapping_sub(reference)
    }
}

impl<T: TickSource + ?Sized> TickSource for &T {
    fn now_ticks(&self) -> u32 {
        (**self).now_ticks()
    }
}

// ============================================================================
// Mock Implementation (always available for testing)
// ============================================================================

/// Tick source with manually controlled time
#[derive(Clone, Default)]
pub struct MockTicks {
    current: Cell<u32>,
}

impl MockTicks {
    pub fn new() -> Self {
        Self {
            current: Cell::new(0),
        }
    }

    pub fn with_initial(ticks: u32) -> Self {
        Self {
            current: Cell::new(ticks),
        }
    }

    pub fn set(&self, ticks: u32) {
        self.current.set(ticks);
    }

    pub fn advance(&self, ticks: u32) {
        self.current.set(self.current.get().wrapping_add(ticks));
    }
}

impl TickSource for MockTicks {
    fn now_ticks(&self) -> u32 {
        self.current.get()
    }
}
