use super::species::SpeciesId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which external rule owns a body's position and whether it can die.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BodyKind {
    /// Stationary ground segment. Exchanges heat but never dies.
    #[default]
    Ground,
    /// Stationary plant of a species; subject to its survival band.
    Plant(SpeciesId),
    /// The single mobile body steered by the user and by air lift.
    Agent,
}

impl BodyKind {
    #[must_use]
    pub fn species(&self) -> Option<SpeciesId> {
        match self {
            BodyKind::Plant(id) => Some(*id),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_agent(&self) -> bool {
        matches!(self, BodyKind::Agent)
    }
}

/// Heat exchange coefficients of a body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThermalCoefficients {
    /// Fraction of solar energy reflected rather than absorbed, in `[0, 1]`.
    pub albedo: f64,
    /// Fraction of own heat radiated away per unit time, in `[0, 1]`.
    pub emissivity: f64,
    /// Coupling strength to the air cells under the body, `>= 0`.
    pub conduction: f64,
    /// Resistance to temperature change, `> 0`.
    pub thermal_mass: f64,
}

impl Default for ThermalCoefficients {
    fn default() -> Self {
        Self {
            albedo: 0.3,
            emissivity: 0.1,
            conduction: 0.01,
            thermal_mass: 1.0,
        }
    }
}

/// A physical object occupying the half-open span `[x, x + w)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub id: Uuid,
    pub kind: BodyKind,
    pub x: f64,
    /// Vertical offset of the bottom edge above the ground.
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub temp: f64,
    pub coefficients: ThermalCoefficients,
}

impl Body {
    /// Height of the top surface, used to decide which body faces the sun.
    #[must_use]
    pub fn top(&self) -> f64 {
        self.y + self.h
    }

    /// `w * thermal_mass`: the divisor applied to every energy flux.
    #[must_use]
    pub fn heat_capacity(&self) -> f64 {
        self.w * self.coefficients.thermal_mass
    }
}

/// Velocity state of the agent. `vx` and `vy_user` accumulate user input;
/// `vy_lift` is overwritten by air feedback every physics tick.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AgentVelocity {
    pub vx: f64,
    pub vy_user: f64,
    pub vy_lift: f64,
}

impl AgentVelocity {
    #[must_use]
    pub fn vertical(&self) -> f64 {
        self.vy_user + self.vy_lift
    }
}
