//! Millisecond time sources for the tap cooldown.
//!
//! The controller never reads the system clock directly; it asks the
//! [`SpawnClock`] resource. Tests swap in a [`ManualClock`] to step time
//! deterministically.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use bevy::prelude::*;

/// Source of the current time in milliseconds.
#[cfg_attr(test, mockall::automock)]
pub trait TimeSource: Send + Sync {
    /// Current time in milliseconds.
    fn now_ms(&self) -> u64;
}

/// Wall clock reporting milliseconds since the Unix epoch.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now_ms(&self) -> u64 {
        // A clock set before 1970 reads as the epoch.
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| {
                u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
            })
    }
}

/// Shared, manually advanced clock.
///
/// Clones observe the same time, so a test can keep one handle while the
/// app owns another.
///
/// # Examples
///
/// ```
/// use tap_spawn::clock::{ManualClock, TimeSource};
///
/// let clock = ManualClock::starting_at(1_000);
/// let handle = clock.clone();
/// clock.advance(250);
/// assert_eq!(handle.now_ms(), 1_250);
/// ```
#[derive(Debug, Default, Clone)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    /// Creates a clock reading `start_ms`.
    #[must_use]
    pub fn starting_at(start_ms: u64) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(start_ms)),
        }
    }

    /// Moves the clock forward by `delta_ms`.
    pub fn advance(&self, delta_ms: u64) {
        self.now.fetch_add(delta_ms, Ordering::SeqCst);
    }

    /// Sets the clock to an absolute reading.
    pub fn set(&self, now_ms: u64) {
        self.now.store(now_ms, Ordering::SeqCst);
    }
}

impl TimeSource for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Resource through which the controller reads time.
#[derive(Resource)]
pub struct SpawnClock(Box<dyn TimeSource>);

impl SpawnClock {
    /// Wraps any time source.
    pub fn new(source: impl TimeSource + 'static) -> Self {
        Self(Box::new(source))
    }

    /// Current time in milliseconds.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.0.now_ms()
    }
}

impl Default for SpawnClock {
    fn default() -> Self {
        Self::new(SystemClock)
    }
}

impl std::fmt::Debug for SpawnClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpawnClock").finish_non_exhaustive()
    }
}
