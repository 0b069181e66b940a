//! Time source used by the connection driver.
//!
//! The registry and interval controller never read the clock themselves —
//! every operation that needs "now" takes it as a parameter (see
//! `tracker::registry::Registry`) so they stay deterministic and easy to
//! test without mocking. This trait exists only for the one real caller
//! that does need wall-clock time: the accept loop, once per request.
//!
//! Grounded on `packages/clock`'s `Time` trait / `Working`/`Stopped` split,
//! scaled down to a trait object since this repo has a single binary
//! instead of a dozen crates sharing one clock type.

use std::time::{SystemTime, UNIX_EPOCH};

pub trait Clock {
    fn now(&self) -> u64;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system clock is before the Unix epoch")
            .as_secs()
    }
}

#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub struct StoppedClock(pub u64);

#[cfg(test)]
impl Clock for StoppedClock {
    fn now(&self) -> u64 {
        self.0
    }
}
