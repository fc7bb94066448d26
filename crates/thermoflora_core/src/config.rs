//! Configuration management for simulation parameters.
//!
//! This module provides strongly-typed configuration structures that map to
//! the `config.toml` file. Every tunable constant of the heat model, the
//! ecosystem rules and the host cadences lives here.
//!
//! ## Configuration Hierarchy
//!
//! 1. Default values (hardcoded in `Default` impls)
//! 2. `config.toml` file (overrides defaults, missing keys fall back)
//! 3. Command line overrides applied by the binary (`--seed`, `--model`)
//!
//! ## Example `config.toml`
//!
//! ```toml
//! [world]
//! width = 320
//! seed = 42
//!
//! [thermal]
//! heat_model = "thermal_body"
//! solar_constant = 0.06
//!
//! [air]
//! diffusion_offset = 4
//! air_conduction = 0.5
//!
//! [[ecosystem.species]]
//! name = "red_flower"
//! seed_min_temp = 0.4
//! seed_max_temp = 0.5
//! min_temp = 0.2
//! max_temp = 0.8
//! width = 24.0
//! height = 24.0
//! initial_temp = 0.45
//! coefficients = { albedo = 0.3, emissivity = 0.1, conduction = 0.01, thermal_mass = 1.0 }
//! ```

use crate::body::{validate_coefficients, validate_species};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use thermoflora_data::{SpeciesTemplate, ThermalCoefficients};

/// Which rule set heats the air each physics tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeatModel {
    /// Bodies absorb sunlight, radiate and conduct heat into the air.
    #[default]
    ThermalBody,
    /// Binary shade/sun model: sunlit cells warm, shaded cells cool, both
    /// clamped to `[0, 1]`.
    Shade,
}

/// World-level simulation configuration.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct WorldConfig {
    /// Number of air cells; equals the visible horizontal extent.
    pub width: u16,
    pub initial_air_temp: f64,
    pub seed: Option<u64>,
    /// Horizontal positions of plants of the first species present at start.
    pub initial_plants: Vec<f64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 640,
            initial_air_temp: 0.0,
            seed: None,
            initial_plants: vec![50.0],
        }
    }
}

/// Ground segments laid edge to edge across the world at start.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct GroundConfig {
    /// Zero disables ground entirely.
    pub segments: usize,
    pub height: f64,
    pub initial_temp: f64,
    pub coefficients: ThermalCoefficients,
}

impl Default for GroundConfig {
    fn default() -> Self {
        Self {
            segments: 8,
            height: 1.0,
            initial_temp: 0.0,
            coefficients: ThermalCoefficients {
                albedo: 0.3,
                emissivity: 0.1,
                conduction: 0.02,
                thermal_mass: 1.0,
            },
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ThermalConfig {
    pub heat_model: HeatModel,
    /// Solar energy delivered to each sunlit cell per unit time.
    pub solar_constant: f64,
    /// Divisor applied to heat conducted into a single air cell.
    pub air_thermal_mass: f64,
}

impl Default for ThermalConfig {
    fn default() -> Self {
        Self {
            heat_model: HeatModel::ThermalBody,
            solar_constant: 0.06,
            air_thermal_mass: 1.0,
        }
    }
}

/// Air smoothing parameters.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct AirConfig {
    /// Radius of the smoothing window `[i - offset, i + offset)`.
    pub diffusion_offset: usize,
    /// Fraction per unit time by which a cell moves toward its local mean.
    pub air_conduction: f64,
}

impl Default for AirConfig {
    fn default() -> Self {
        Self {
            diffusion_offset: 4,
            air_conduction: 0.5,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ShadeConfig {
    pub warm_rate: f64,
    pub cool_rate: f64,
}

impl Default for ShadeConfig {
    fn default() -> Self {
        Self {
            warm_rate: 0.2,
            cool_rate: 0.3,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct EcosystemConfig {
    /// A seeding draw must exceed this value to spawn.
    pub seed_threshold: f64,
    /// Seeding stops once this many plants are alive. `None` is unbounded.
    pub max_plants: Option<usize>,
    pub species: Vec<SpeciesTemplate>,
}

impl Default for EcosystemConfig {
    fn default() -> Self {
        Self {
            seed_threshold: 0.99,
            max_plants: None,
            species: vec![SpeciesTemplate::default()],
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct AgentConfig {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub initial_temp: f64,
    pub coefficients: ThermalCoefficients,
    /// Scales the local-minus-global air temperature into vertical velocity.
    pub air_flow_multiplier: f64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 40.0,
            width: 24.0,
            height: 24.0,
            initial_temp: 0.0,
            coefficients: ThermalCoefficients {
                albedo: 0.5,
                emissivity: 0.1,
                conduction: 0.0,
                thermal_mass: 1.0,
            },
            air_flow_multiplier: 50.0,
        }
    }
}

/// Host cadences. The engine itself never reads a clock.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ScheduleConfig {
    pub fast_hz: f64,
    pub slow_hz: f64,
    /// Slow ticks between periodic metrics log lines.
    pub metrics_interval: u64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            fast_hz: 60.0,
            slow_hz: 20.0,
            metrics_interval: 200,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub world: WorldConfig,
    pub ground: GroundConfig,
    pub thermal: ThermalConfig,
    pub air: AirConfig,
    pub shade: ShadeConfig,
    pub ecosystem: EcosystemConfig,
    pub agent: AgentConfig,
    pub schedule: ScheduleConfig,
}

fn ensure_coefficients(label: &str, c: &ThermalCoefficients) -> anyhow::Result<()> {
    validate_coefficients(c).with_context(|| format!("{label} coefficients"))
}

impl AppConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns `Ok(())` if all parameters are valid, or `Err` with a description
    /// of the first validation failure.
    pub fn validate(&self) -> anyhow::Result<()> {
        // World
        anyhow::ensure!(self.world.width > 0, "World width must be positive");
        anyhow::ensure!(
            self.world.initial_air_temp.is_finite(),
            "Initial air temperature must be finite"
        );

        // Ground
        anyhow::ensure!(
            self.ground.segments <= self.world.width as usize,
            "Ground segments cannot outnumber air cells"
        );
        anyhow::ensure!(self.ground.height > 0.0, "Ground height must be positive");
        ensure_coefficients("Ground", &self.ground.coefficients)?;

        // Thermal
        anyhow::ensure!(
            self.thermal.solar_constant.is_finite() && self.thermal.solar_constant >= 0.0,
            "Solar constant must be finite and non-negative"
        );
        anyhow::ensure!(
            self.thermal.air_thermal_mass.is_finite() && self.thermal.air_thermal_mass > 0.0,
            "Air thermal mass must be finite and positive"
        );

        // Air
        anyhow::ensure!(
            self.air.diffusion_offset > 0,
            "Diffusion offset must be positive"
        );
        anyhow::ensure!(
            self.air.air_conduction.is_finite() && self.air.air_conduction >= 0.0,
            "Air conduction must be finite and non-negative"
        );

        // Shade
        anyhow::ensure!(
            self.shade.warm_rate >= 0.0 && self.shade.cool_rate >= 0.0,
            "Shade warm/cool rates must be non-negative"
        );

        // Ecosystem
        anyhow::ensure!(
            (0.0..1.0).contains(&self.ecosystem.seed_threshold),
            "Seed threshold must be in [0.0, 1.0)"
        );
        anyhow::ensure!(
            self.ecosystem.species.len() <= u16::MAX as usize,
            "Too many species"
        );
        for s in &self.ecosystem.species {
            validate_species(s).with_context(|| format!("Species {}", s.name))?;
        }
        anyhow::ensure!(
            self.world.initial_plants.is_empty() || !self.ecosystem.species.is_empty(),
            "Initial plants require at least one species"
        );

        // Agent
        anyhow::ensure!(
            self.agent.width > 0.0 && self.agent.height > 0.0,
            "Agent dimensions must be positive"
        );
        ensure_coefficients("Agent", &self.agent.coefficients)?;
        anyhow::ensure!(
            self.agent.air_flow_multiplier.is_finite(),
            "Air flow multiplier must be finite"
        );

        // Schedule
        anyhow::ensure!(self.schedule.fast_hz > 0.0, "Fast rate must be positive");
        anyhow::ensure!(self.schedule.slow_hz > 0.0, "Slow rate must be positive");
        anyhow::ensure!(
            self.schedule.slow_hz <= self.schedule.fast_hz,
            "Slow rate cannot exceed fast rate"
        );
        anyhow::ensure!(
            self.schedule.metrics_interval > 0,
            "Metrics interval must be positive"
        );

        Ok(())
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration back to TOML.
    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Hash of every parameter that changes simulation outcomes.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.world).as_bytes());
        hasher.update(format!("{:?}", self.ground).as_bytes());
        hasher.update(format!("{:?}", self.thermal).as_bytes());
        hasher.update(format!("{:?}", self.air).as_bytes());
        hasher.update(format!("{:?}", self.shade).as_bytes());
        hasher.update(format!("{:?}", self.ecosystem).as_bytes());
        hasher.update(format!("{:?}", self.agent).as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Fixed timestep of the motion cadence.
    #[must_use]
    pub fn fast_dt(&self) -> f64 {
        1.0 / self.schedule.fast_hz
    }

    /// Fixed timestep of the physics cadence.
    #[must_use]
    pub fn slow_dt(&self) -> f64 {
        1.0 / self.schedule.slow_hz
    }
}
