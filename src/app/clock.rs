//! Fixed-rate tick accounting.
//!
//! A [`FixedRateClock`] accumulates elapsed time and reports how many whole
//! ticks of its period have come due. Leftover time carries into the next
//! call, so a run of uneven frame times still yields the nominal rate.

use anyhow::Result;

/// Slack absorbed when comparing accumulated time against the period, so
/// that `n` advances of exactly one period always yield `n` ticks.
const EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq)]
pub struct FixedRateClock {
    dt: f64,
    accumulated: f64,
}

impl FixedRateClock {
    pub fn new(hz: f64) -> Result<Self> {
        anyhow::ensure!(
            hz.is_finite() && hz > 0.0,
            "Tick rate must be positive and finite, got {hz}"
        );
        Ok(Self {
            dt: 1.0 / hz,
            accumulated: 0.0,
        })
    }

    /// Length of one tick in seconds.
    #[must_use]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Adds `elapsed` seconds and returns the number of ticks now due.
    /// Non-finite or negative input is ignored.
    pub fn advance(&mut self, elapsed: f64) -> u64 {
        if elapsed.is_finite() && elapsed > 0.0 {
            self.accumulated += elapsed;
        }
        let due = ((self.accumulated + EPSILON) / self.dt).floor();
        if due < 1.0 {
            return 0;
        }
        self.accumulated = (self.accumulated - due * self.dt).max(0.0);
        due as u64
    }

    /// Seconds left before the next tick comes due.
    #[must_use]
    pub fn until_next(&self) -> f64 {
        (self.dt - self.accumulated).max(0.0)
    }
}
