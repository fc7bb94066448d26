pub use thermoflora_core::{BodyLogic, Result, SimError, SimulationState, SlowTickReport, WorldSnapshot};
pub mod air {
    pub use thermoflora_core::air::*;
}
pub mod body {
    pub use thermoflora_core::body::*;
    pub use thermoflora_data::{AgentVelocity, Body, BodyKind, ThermalCoefficients};
}
pub mod config {
    pub use thermoflora_core::config::*;
}
pub mod feedback {
    pub use thermoflora_core::feedback::*;
}
pub mod lifecycle {
    pub use thermoflora_core::lifecycle::*;
}
pub mod metrics {
    pub use thermoflora_core::metrics::*;
}
pub mod motion {
    pub use thermoflora_core::motion::*;
}
pub mod palette {
    pub use thermoflora_core::palette::*;
}
pub mod random {
    pub use thermoflora_core::random::*;
}
pub mod registry {
    pub use thermoflora_core::registry::*;
}
pub mod shade {
    pub use thermoflora_core::shade::*;
}
pub mod species {
    pub use thermoflora_data::{SpeciesId, SpeciesTemplate};
}
pub mod thermal {
    pub use thermoflora_core::thermal::*;
}
