//! Monotonic time sources for driving recognizer timers.

use web_time::Instant;

/// Source of the uptime used to stamp motion events and fire timers.
pub trait Clock {
    /// Milliseconds since an arbitrary, fixed origin.
    fn uptime_millis(&self) -> u64;
}

/// Wall-clock backed [`Clock`], measuring from its creation.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn uptime_millis(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}
