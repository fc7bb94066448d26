use super::body::ThermalCoefficients;
use serde::{Deserialize, Serialize};

/// Index of a species in the simulation's species table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpeciesId(pub u16);

impl SpeciesId {
    #[must_use]
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Seeding and survival thresholds plus the defaults used to instantiate a
/// new plant of this species.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesTemplate {
    pub name: String,
    /// New instances may appear where the air is strictly inside
    /// `(seed_min_temp, seed_max_temp)`.
    pub seed_min_temp: f64,
    pub seed_max_temp: f64,
    /// Live instances die once the mean air under them leaves
    /// `[min_temp, max_temp]`.
    pub min_temp: f64,
    pub max_temp: f64,
    pub width: f64,
    pub height: f64,
    pub initial_temp: f64,
    pub coefficients: ThermalCoefficients,
}

impl SpeciesTemplate {
    #[must_use]
    pub fn can_seed_at(&self, temp: f64) -> bool {
        temp > self.seed_min_temp && temp < self.seed_max_temp
    }

    #[must_use]
    pub fn survives_at(&self, temp: f64) -> bool {
        !(temp > self.max_temp || temp < self.min_temp)
    }
}

impl Default for SpeciesTemplate {
    fn default() -> Self {
        Self {
            name: "red_flower".to_string(),
            seed_min_temp: 0.4,
            seed_max_temp: 0.5,
            min_temp: 0.2,
            max_temp: 0.8,
            width: 24.0,
            height: 24.0,
            initial_temp: 0.45,
            coefficients: ThermalCoefficients::default(),
        }
    }
}
