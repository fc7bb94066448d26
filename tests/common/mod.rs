pub mod macros;

use thermoflora_lib::model::body::{Body, BodyKind, ThermalCoefficients};
use thermoflora_lib::model::config::{AppConfig, HeatModel};
use thermoflora_lib::model::random::ConstantSource;
use thermoflora_lib::model::species::{SpeciesId, SpeciesTemplate};
use thermoflora_lib::model::SimulationState;
use uuid::Uuid;

/// Coefficients of a body that neither absorbs, radiates nor conducts.
#[allow(dead_code)]
pub fn inert() -> ThermalCoefficients {
    ThermalCoefficients {
        albedo: 1.0,
        emissivity: 0.0,
        conduction: 0.0,
        thermal_mass: 1.0,
    }
}

#[allow(dead_code)]
pub fn body(id: u128, kind: BodyKind, x: f64, w: f64) -> Body {
    Body {
        id: Uuid::from_u128(id),
        kind,
        x,
        y: 0.0,
        w,
        h: 1.0,
        temp: 0.0,
        coefficients: inert(),
    }
}

/// Builds a [`SimulationState`] from explicit bodies. Unless changed, the
/// world is quiescent: no sunlight, no air smoothing, no species and an
/// inert agent parked at the left edge.
#[allow(dead_code)]
pub struct SimulationBuilder {
    config: AppConfig,
    width: usize,
    species: Vec<SpeciesTemplate>,
    bodies: Vec<Body>,
    agent: Body,
    draw: Option<f64>,
    next_id: u128,
}

#[allow(dead_code)]
impl SimulationBuilder {
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.world.seed = Some(0);
        config.world.initial_plants.clear();
        config.ground.segments = 0;
        config.thermal.solar_constant = 0.0;
        config.air.air_conduction = 0.0;
        Self {
            config,
            width: 10,
            species: Vec::new(),
            bodies: Vec::new(),
            agent: Body {
                y: 40.0,
                ..body(u128::MAX, BodyKind::Agent, 0.0, 1.0)
            },
            draw: None,
            next_id: 1,
        }
    }

    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    pub fn air_temp(mut self, temp: f64) -> Self {
        self.config.world.initial_air_temp = temp;
        self
    }

    pub fn heat_model(mut self, model: HeatModel) -> Self {
        self.config.thermal.heat_model = model;
        self
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        modifier(&mut self.config);
        self
    }

    pub fn with_species(mut self, template: SpeciesTemplate) -> Self {
        self.species.push(template);
        self
    }

    pub fn with_body(mut self, body: Body) -> Self {
        self.bodies.push(body);
        self
    }

    /// Adds a plant of species `sid` and returns its id alongside the builder.
    pub fn with_plant(mut self, sid: u16, x: f64, w: f64) -> (Self, Uuid) {
        let id = self.next_id;
        self.next_id += 1;
        self.bodies
            .push(body(id, BodyKind::Plant(SpeciesId(sid)), x, w));
        (self, Uuid::from_u128(id))
    }

    pub fn with_ground(mut self, x: f64, w: f64) -> (Self, Uuid) {
        let id = self.next_id;
        self.next_id += 1;
        self.bodies.push(body(id, BodyKind::Ground, x, w));
        (self, Uuid::from_u128(id))
    }

    pub fn agent<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut Body),
    {
        modifier(&mut self.agent);
        self
    }

    /// Replaces the random source with one that always returns `value`.
    pub fn constant_draw(mut self, value: f64) -> Self {
        self.draw = Some(value);
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn build(self) -> SimulationState {
        let mut bodies = self.bodies;
        bodies.push(self.agent);
        let sim = SimulationState::initialize(self.width, self.species, bodies, &self.config)
            .expect("Failed to create simulation in test builder");
        match self.draw {
            Some(v) => sim.with_random_source(Box::new(ConstantSource(v))),
            None => sim,
        }
    }
}
