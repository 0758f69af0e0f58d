//! Clock abstraction for deterministic timestamps.
//!
//! The note renderer and storage-key scheme both depend on wall-clock time.
//! Injecting the clock lets tests pin "today" instead of racing midnight.

use std::{
    fmt,
    sync::{Arc, RwLock},
};

use chrono::{DateTime, Utc};

/// Source of the current UTC time.
///
/// Production code uses [`SystemClock`]; tests inject a [`FixedClock`].
pub trait Clock: Send + Sync + fmt::Debug {
    /// Returns the current UTC wall-clock time.
    fn now_utc(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Creates a new system clock.
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Test clock pinned to an explicit instant.
///
/// The instant can be moved with [`FixedClock::set`]; clones share state.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Arc<RwLock<DateTime<Utc>>>,
}

impl FixedClock {
    /// Creates a clock pinned to `at`.
    pub fn new(at: DateTime<Utc>) -> Self {
        Self { now: Arc::new(RwLock::new(at)) }
    }

    /// Moves the clock to `at`.
    pub fn set(&self, at: DateTime<Utc>) {
        *self.now.write().unwrap_or_else(|poisoned| poisoned.into_inner()) = at;
    }
}

impl Clock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        *self.now.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
