//! Wall-clock port.

use std::fmt;

use chrono::{DateTime, Utc};

/// Source of the current time.
///
/// Injected wherever time matters (contribution timestamps, eviction
/// cutoffs, cache age) so tests can drive time explicitly.
pub trait Clock: Send + Sync + fmt::Debug {
    fn now(&self) -> DateTime<Utc>;
}

/// The system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
