use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

use super::clock::FixedRateClock;
use super::render::StripRenderer;
use thermoflora_core::config::AppConfig;
use thermoflora_core::{Metrics, SimulationState, SlowTickReport};

/// End-of-run figures printed by the binary.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RunSummary {
    pub fingerprint: String,
    pub slow_ticks: u64,
    pub fast_ticks: u64,
    pub plants: usize,
    pub population_by_species: Vec<usize>,
    pub births: u64,
    pub deaths: u64,
    pub extinctions: u64,
    pub air_mean: f64,
    pub agent_x: f64,
    pub agent_y: f64,
    pub elapsed_secs: f64,
}

/// Host-side owner of a simulation run: the engine state, its clocks, run
/// metrics and optional terminal output.
pub struct App {
    pub sim: SimulationState,
    pub config: AppConfig,
    pub metrics: Metrics,
    pub strip: Option<StripRenderer>,
    fast_clock: FixedRateClock,
    slow_clock: FixedRateClock,
    fingerprint: String,
}

impl App {
    /// Reads `path` if it exists, otherwise falls back to defaults.
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!(path = %path.display(), "No config file, using defaults");
            return Ok(AppConfig::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        AppConfig::from_toml(&content).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn new(config: AppConfig) -> Result<Self> {
        config.validate()?;
        let sim = SimulationState::from_config(&config)?;
        let fingerprint = config.fingerprint();
        tracing::info!(
            fingerprint = %fingerprint,
            width = config.world.width,
            heat_model = ?config.thermal.heat_model,
            seed = ?config.world.seed,
            "Run configured"
        );
        Ok(Self {
            sim,
            metrics: Metrics::new(config.schedule.metrics_interval),
            strip: None,
            fast_clock: FixedRateClock::new(config.schedule.fast_hz)?,
            slow_clock: FixedRateClock::new(config.schedule.slow_hz)?,
            fingerprint,
            config,
        })
    }

    #[must_use]
    pub fn with_strip(mut self, strip: StripRenderer) -> Self {
        self.strip = Some(strip);
        self
    }

    pub fn step_fast(&mut self, dt: f64) -> Result<()> {
        self.sim.tick_fast(dt)?;
        self.metrics.record_fast_tick();
        Ok(())
    }

    pub fn step_slow(&mut self, dt: f64) -> Result<SlowTickReport> {
        let plants_before = self.sim.plant_count();
        let started = Instant::now();
        let report = self.sim.tick_slow(dt)?;
        self.metrics
            .record_slow_tick(started.elapsed(), &report, self.sim.registry().len());

        if plants_before > 0 && self.sim.plant_count() == 0 {
            self.metrics.increment_counter("extinction");
        }

        if let Some(strip) = &self.strip {
            let mut out = std::io::stdout().lock();
            strip.draw(&mut out, &self.sim)?;
            out.flush()?;
        }
        Ok(report)
    }

    /// Feeds `elapsed` seconds of virtual time through both clocks, at most
    /// one motion period at a time, so the cadences interleave in time
    /// order. Within a period, a due fast tick runs before a due slow tick.
    pub fn advance(&mut self, elapsed: f64) -> Result<Vec<SlowTickReport>> {
        let mut reports = Vec::new();
        if !(elapsed.is_finite() && elapsed > 0.0) {
            return Ok(reports);
        }
        let period = self.fast_clock.dt();
        let mut remaining = elapsed;
        while remaining > 0.0 {
            let chunk = remaining.min(period);
            remaining -= chunk;
            for _ in 0..self.fast_clock.advance(chunk) {
                self.step_fast(period)?;
            }
            for _ in 0..self.slow_clock.advance(chunk) {
                reports.push(self.step_slow(self.slow_clock.dt())?);
            }
        }
        Ok(reports)
    }

    #[must_use]
    pub fn summary(&self) -> RunSummary {
        let agent = self.sim.agent();
        RunSummary {
            fingerprint: self.fingerprint.clone(),
            slow_ticks: self.sim.slow_ticks(),
            fast_ticks: self.sim.fast_ticks(),
            plants: self.sim.plant_count(),
            population_by_species: self.sim.population_by_species(),
            births: self.metrics.births(),
            deaths: self.metrics.deaths(),
            extinctions: self.metrics.counter("extinction"),
            air_mean: self.sim.air().global_mean(),
            agent_x: agent.x,
            agent_y: agent.y,
            elapsed_secs: self.metrics.elapsed().as_secs_f64(),
        }
    }
}
