//! The simulation state and its two cadences.
//!
//! All mutable state lives in [`SimulationState`]. The host drives it with
//! [`tick_fast`](SimulationState::tick_fast) at the motion rate and
//! [`tick_slow`](SimulationState::tick_slow) at the physics rate; within a
//! slow tick the heat model runs to completion before the lifecycle samples
//! temperatures, and the lifecycle completes before the agent lift is read.

use crate::air::AirMedium;
use crate::body::{create_body, create_plant, random_id, validate_species, BodyLogic};
use crate::config::{AppConfig, HeatModel};
use crate::error::{ensure_timestep, Result, SimError};
use crate::feedback;
use crate::lifecycle::{self, LifecycleOutcome, LifecycleParams};
use crate::motion;
use crate::random::UnitSource;
use crate::registry::BodyRegistry;
use crate::shade::{self, ShadeParams};
use crate::thermal::{self, ThermalParams};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use thermoflora_data::{AgentVelocity, Body, BodyKind, SpeciesId, SpeciesTemplate};

const ID_STREAM_SALT: u64 = 0x5EED;

/// What one physics tick changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlowTickReport {
    pub tick: u64,
    pub lifecycle: LifecycleOutcome,
    pub lift: f64,
}

/// Owned, read-only copy of everything a renderer needs for one frame.
#[derive(Debug, Clone, Serialize)]
pub struct WorldSnapshot {
    pub slow_tick: u64,
    pub heat_model: HeatModel,
    pub air: Vec<f64>,
    pub bodies: Vec<Body>,
    pub agent_velocity: AgentVelocity,
}

pub struct SimulationState {
    air: AirMedium,
    registry: BodyRegistry,
    species: Vec<SpeciesTemplate>,
    velocity: AgentVelocity,
    heat_model: HeatModel,
    thermal: ThermalParams,
    shade: ShadeParams,
    lifecycle: LifecycleParams,
    air_flow_multiplier: f64,
    draws: Box<dyn UnitSource + Send>,
    ids: ChaCha8Rng,
    agent_in_row: bool,
    slow_ticks: u64,
    fast_ticks: u64,
}

impl std::fmt::Debug for SimulationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulationState")
            .field("width", &self.air.width())
            .field("bodies", &self.registry.len())
            .field("heat_model", &self.heat_model)
            .field("slow_ticks", &self.slow_ticks)
            .field("fast_ticks", &self.fast_ticks)
            .finish_non_exhaustive()
    }
}

impl SimulationState {
    /// Builds a simulation over `width` air cells from an explicit species
    /// table and body set. Tunables and the RNG seed come from `config`,
    /// which is validated first.
    pub fn initialize(
        width: usize,
        species: Vec<SpeciesTemplate>,
        initial_bodies: Vec<Body>,
        config: &AppConfig,
    ) -> Result<Self> {
        validate_config(config)?;
        if species.len() > u16::MAX as usize {
            return Err(SimError::species("species table exceeds u16 ids"));
        }
        for template in &species {
            validate_species(template)?;
        }
        for body in &initial_bodies {
            if let Some(sid) = body.kind.species() {
                if sid.index() >= species.len() {
                    return Err(SimError::species(format!(
                        "body {} references unknown species {}",
                        body.id, sid.0
                    )));
                }
            }
        }

        let air = AirMedium::new(width, config.world.initial_air_temp)?;
        let registry = BodyRegistry::with_bodies(initial_bodies)?;
        let (draws, ids) = seeded_streams(config.world.seed);

        tracing::info!(
            width,
            bodies = registry.len(),
            species = species.len(),
            heat_model = ?config.thermal.heat_model,
            "Simulation initialized"
        );

        Ok(Self {
            air,
            registry,
            species,
            velocity: AgentVelocity::default(),
            heat_model: config.thermal.heat_model,
            thermal: ThermalParams::from_config(config),
            shade: ShadeParams::from_config(config),
            lifecycle: LifecycleParams::from_config(config),
            air_flow_multiplier: config.agent.air_flow_multiplier,
            draws: Box::new(draws),
            ids,
            agent_in_row: true,
            slow_ticks: 0,
            fast_ticks: 0,
        })
    }

    /// Builds the configured world: ground segments laid edge to edge, the
    /// initial plants of the first species, then the agent.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        validate_config(config)?;
        let width = config.world.width as usize;
        let (_, mut ids) = seeded_streams(config.world.seed.map(|s| s ^ 0xB0D1E5));
        let mut bodies = Vec::new();

        let g = &config.ground;
        if g.segments > 0 {
            let seg_w = width as f64 / g.segments as f64;
            for i in 0..g.segments {
                bodies.push(create_body(
                    random_id(&mut ids),
                    BodyKind::Ground,
                    i as f64 * seg_w,
                    0.0,
                    seg_w,
                    g.height,
                    g.initial_temp,
                    g.coefficients,
                )?);
            }
        }

        if let Some(template) = config.ecosystem.species.first() {
            for &x in &config.world.initial_plants {
                bodies.push(create_plant(random_id(&mut ids), SpeciesId(0), template, x));
            }
        }

        let a = &config.agent;
        bodies.push(create_body(
            random_id(&mut ids),
            BodyKind::Agent,
            a.x,
            a.y,
            a.width,
            a.height,
            a.initial_temp,
            a.coefficients,
        )?);

        Self::initialize(width, config.ecosystem.species.clone(), bodies, config)
    }

    /// Replaces the source of seeding draws.
    #[must_use]
    pub fn with_random_source(mut self, source: Box<dyn UnitSource + Send>) -> Self {
        self.draws = source;
        self
    }

    /// Motion cadence: moves the agent by its current velocity.
    pub fn tick_fast(&mut self, dt: f64) -> Result<()> {
        ensure_timestep(dt)?;
        motion::integrate(self.registry.agent_mut(), &self.velocity, dt);
        self.fast_ticks += 1;
        Ok(())
    }

    /// Physics cadence: heat model, then lifecycle, then agent lift.
    pub fn tick_slow(&mut self, dt: f64) -> Result<SlowTickReport> {
        ensure_timestep(dt)?;
        let plants_before = self.registry.plant_count();

        match self.heat_model {
            HeatModel::ThermalBody => {
                thermal::step(&mut self.air, &mut self.registry, &self.thermal, dt)?
            }
            HeatModel::Shade => shade::step(&mut self.air, &self.registry, &self.shade, dt)?,
        }

        let outcome = lifecycle::update(
            &self.air,
            &mut self.registry,
            &self.species,
            &self.lifecycle,
            dt,
            self.draws.as_mut(),
            &mut self.ids,
        )?;

        if plants_before > 0 && self.registry.plant_count() == 0 {
            tracing::warn!(tick = self.slow_ticks + 1, "All plants died");
        }

        let agent = self.registry.agent();
        let in_row = !agent.span_cells(self.air.width()).is_empty();
        if in_row != self.agent_in_row {
            if in_row {
                tracing::info!(x = agent.x, "Agent re-entered the air row");
            } else {
                tracing::warn!(x = agent.x, "Agent left the air row, lift held at zero");
            }
            self.agent_in_row = in_row;
        }

        let lift = feedback::compute_lift(&self.air, agent, self.air_flow_multiplier);
        self.velocity.vy_lift = lift;
        self.slow_ticks += 1;

        tracing::debug!(
            tick = self.slow_ticks,
            bodies = self.registry.len(),
            air_mean = self.air.global_mean(),
            lift,
            "Slow tick"
        );

        Ok(SlowTickReport {
            tick: self.slow_ticks,
            lifecycle: outcome,
            lift,
        })
    }

    /// Adds user-driven velocity to the agent.
    pub fn nudge_agent(&mut self, dvx: f64, dvy: f64) {
        motion::nudge(&mut self.velocity, dvx, dvy);
    }

    pub fn air_temperature(&self, index: usize) -> Result<f64> {
        self.air.get(index)
    }

    #[must_use]
    pub fn air(&self) -> &AirMedium {
        &self.air
    }

    pub fn bodies(&self) -> impl Iterator<Item = &Body> {
        self.registry.iter()
    }

    #[must_use]
    pub fn registry(&self) -> &BodyRegistry {
        &self.registry
    }

    #[must_use]
    pub fn agent(&self) -> &Body {
        self.registry.agent()
    }

    #[must_use]
    pub fn agent_velocity(&self) -> AgentVelocity {
        self.velocity
    }

    #[must_use]
    pub fn species(&self) -> &[SpeciesTemplate] {
        &self.species
    }

    #[must_use]
    pub fn heat_model(&self) -> HeatModel {
        self.heat_model
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.air.width()
    }

    #[must_use]
    pub fn slow_ticks(&self) -> u64 {
        self.slow_ticks
    }

    #[must_use]
    pub fn fast_ticks(&self) -> u64 {
        self.fast_ticks
    }

    #[must_use]
    pub fn plant_count(&self) -> usize {
        self.registry.plant_count()
    }

    /// Count of live plants per species, indexed by `SpeciesId`.
    #[must_use]
    pub fn population_by_species(&self) -> Vec<usize> {
        let mut counts = vec![0; self.species.len()];
        for sid in self.registry.iter().filter_map(|b| b.kind.species()) {
            counts[sid.index()] += 1;
        }
        counts
    }

    #[must_use]
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            slow_tick: self.slow_ticks,
            heat_model: self.heat_model,
            air: self.air.cells().to_vec(),
            bodies: self.registry.as_slice().to_vec(),
            agent_velocity: self.velocity,
        }
    }
}

fn validate_config(config: &AppConfig) -> Result<()> {
    config
        .validate()
        .map_err(|e| SimError::InvalidConfig(format!("{e:#}")))
}

fn seeded_streams(seed: Option<u64>) -> (ChaCha8Rng, ChaCha8Rng) {
    match seed {
        Some(s) => (
            ChaCha8Rng::seed_from_u64(s),
            ChaCha8Rng::seed_from_u64(s.wrapping_add(ID_STREAM_SALT)),
        ),
        None => (ChaCha8Rng::from_entropy(), ChaCha8Rng::from_entropy()),
    }
}
