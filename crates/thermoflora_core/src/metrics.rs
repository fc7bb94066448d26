//! Run metrics for the simulation.
//!
//! Provides structured logging and counters for monitoring a run's
//! population dynamics and step timings.

use crate::simulation::SlowTickReport;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Metrics collector for a single simulation run.
pub struct Metrics {
    slow_ticks: AtomicU64,
    fast_ticks: AtomicU64,
    births: AtomicU64,
    deaths: AtomicU64,
    body_count: AtomicU64,
    slow_tick_nanos: AtomicU64,
    log_interval: u64,
    pub counters: Mutex<HashMap<String, AtomicU64>>,
    start_time: Instant,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new(1000)
    }
}

impl Metrics {
    /// Creates a collector that logs a summary every `log_interval` slow ticks.
    #[must_use]
    pub fn new(log_interval: u64) -> Self {
        Self {
            slow_ticks: AtomicU64::new(0),
            fast_ticks: AtomicU64::new(0),
            births: AtomicU64::new(0),
            deaths: AtomicU64::new(0),
            body_count: AtomicU64::new(0),
            slow_tick_nanos: AtomicU64::new(0),
            log_interval: log_interval.max(1),
            counters: Mutex::new(HashMap::new()),
            start_time: Instant::now(),
        }
    }

    pub fn record_fast_tick(&self) {
        self.fast_ticks.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a completed physics tick with its duration.
    pub fn record_slow_tick(&self, duration: Duration, report: &SlowTickReport, bodies: usize) {
        let tick = self.slow_ticks.fetch_add(1, Ordering::Relaxed) + 1;
        self.births
            .fetch_add(report.lifecycle.spawned.len() as u64, Ordering::Relaxed);
        self.deaths
            .fetch_add(report.lifecycle.died.len() as u64, Ordering::Relaxed);
        self.body_count.store(bodies as u64, Ordering::Relaxed);
        self.slow_tick_nanos
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);

        if tick % self.log_interval == 0 {
            tracing::info!(
                tick,
                bodies,
                births = self.births(),
                deaths = self.deaths(),
                lift = report.lift,
                duration_us = duration.as_micros() as u64,
                "Simulation tick"
            );
        }
    }

    /// Increments a named counter.
    pub fn increment_counter(&self, name: &str) {
        let counters = self.counters.lock();
        let mut counters = counters.unwrap_or_else(|e| e.into_inner());
        counters
            .entry(name.to_string())
            .or_insert_with(|| AtomicU64::new(0))
            .fetch_add(1, Ordering::Relaxed);
    }

    #[must_use]
    pub fn counter(&self, name: &str) -> u64 {
        let counters = self.counters.lock();
        let counters = counters.unwrap_or_else(|e| e.into_inner());
        counters
            .get(name)
            .map_or(0, |c| c.load(Ordering::Relaxed))
    }

    #[must_use]
    pub fn slow_ticks(&self) -> u64 {
        self.slow_ticks.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn fast_ticks(&self) -> u64 {
        self.fast_ticks.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn births(&self) -> u64 {
        self.births.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn deaths(&self) -> u64 {
        self.deaths.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn body_count(&self) -> u64 {
        self.body_count.load(Ordering::Relaxed)
    }

    /// Mean wall time spent inside a physics tick.
    #[must_use]
    pub fn mean_slow_tick(&self) -> Duration {
        let ticks = self.slow_ticks();
        if ticks == 0 {
            return Duration::ZERO;
        }
        Duration::from_nanos(self.slow_tick_nanos.load(Ordering::Relaxed) / ticks)
    }

    /// Gets elapsed time since metrics creation.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Initialize tracing subscriber for logging. `RUST_LOG` overrides the
/// default `info` level.
pub fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .finish(),
    )
    .ok();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::LifecycleOutcome;
    use uuid::Uuid;

    #[test]
    fn test_metrics_new() {
        let metrics = Metrics::new(10);
        assert_eq!(metrics.slow_ticks(), 0);
        assert_eq!(metrics.mean_slow_tick(), Duration::ZERO);
    }

    #[test]
    fn test_record_slow_tick_accumulates_population_changes() {
        let metrics = Metrics::new(10);
        let report = SlowTickReport {
            tick: 1,
            lifecycle: LifecycleOutcome {
                spawned: vec![Uuid::from_u128(1), Uuid::from_u128(2)],
                died: vec![Uuid::from_u128(3)],
            },
            lift: 0.0,
        };
        metrics.record_slow_tick(Duration::from_millis(2), &report, 12);
        metrics.record_slow_tick(Duration::from_millis(4), &report, 13);
        assert_eq!(metrics.slow_ticks(), 2);
        assert_eq!(metrics.births(), 4);
        assert_eq!(metrics.deaths(), 2);
        assert_eq!(metrics.body_count(), 13);
        assert_eq!(metrics.mean_slow_tick(), Duration::from_millis(3));
    }

    #[test]
    fn test_increment_counter() {
        let metrics = Metrics::default();
        metrics.increment_counter("extinction");
        metrics.increment_counter("extinction");
        assert_eq!(metrics.counter("extinction"), 2);
        assert_eq!(metrics.counter("missing"), 0);
    }
}
