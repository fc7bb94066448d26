//! # Thermoflora Core
//!
//! Discrete-time heat exchange between a one-dimensional row of air cells and
//! a set of bodies, plus the plant lifecycle and agent lift rules driven by
//! that air.
//!
//! This crate contains the deterministic simulation logic, including:
//! - The air medium and its smoothing rule
//! - Body heat exchange (solar absorption, radiative loss, conduction)
//! - The binary shade/sun heat model
//! - Plant death and seeding
//! - Updraft/downdraft feedback for the agent
//!
//! The engine performs no I/O and reads no clock: a host supplies `dt` per
//! tick and, optionally, the source of random draws.
//!
//! ## Example
//!
//! ```
//! use thermoflora_core::config::AppConfig;
//! use thermoflora_core::SimulationState;
//!
//! let mut config = AppConfig::default();
//! config.world.seed = Some(42);
//!
//! let mut sim = SimulationState::from_config(&config).unwrap();
//! for _ in 0..3 {
//!     sim.tick_fast(config.fast_dt()).unwrap();
//! }
//! let report = sim.tick_slow(config.slow_dt()).unwrap();
//! assert_eq!(report.tick, 1);
//! ```

/// The one-dimensional air medium
pub mod air;
/// Body validation, spans and constructors
pub mod body;
/// Configuration management for simulation parameters
pub mod config;
/// Engine error types
pub mod error;
/// Agent lift from local versus global air temperature
pub mod feedback;
/// Plant death and seeding
pub mod lifecycle;
/// Run metrics and structured logging
pub mod metrics;
/// Agent position integration
pub mod motion;
/// Temperature to color mapping for renderers
pub mod palette;
/// Injectable random draws
pub mod random;
/// Live body set
pub mod registry;
/// Binary shade/sun heat model
pub mod shade;
/// Simulation state and tick entry points
pub mod simulation;
/// Body heat exchange and air diffusion
pub mod thermal;

pub use body::BodyLogic;
pub use error::{Result, SimError};
pub use metrics::{init_logging, Metrics};
pub use simulation::{SimulationState, SlowTickReport, WorldSnapshot};
pub use thermoflora_data::{
    AgentVelocity, Body, BodyKind, SpeciesId, SpeciesTemplate, ThermalCoefficients,
};
