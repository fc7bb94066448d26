//! Binary shade/sun heat model.
//!
//! Each air cell is either covered by some body (shaded) or open to the sun.
//! Sunlit cells warm toward 1.0 and shaded cells cool toward 0.0 at fixed
//! rates. Body temperatures are left alone.

use crate::air::AirMedium;
use crate::body::BodyLogic;
use crate::config::AppConfig;
use crate::error::{ensure_timestep, Result};
use crate::registry::BodyRegistry;
use thermoflora_data::Body;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadeParams {
    pub warm_rate: f64,
    pub cool_rate: f64,
}

impl ShadeParams {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            warm_rate: config.shade.warm_rate,
            cool_rate: config.shade.cool_rate,
        }
    }
}

#[must_use]
pub fn shade_map(bodies: &[Body], width: usize) -> Vec<bool> {
    let mut shaded = vec![false; width];
    for body in bodies {
        shaded[body.span_cells(width)].fill(true);
    }
    shaded
}

pub fn step(
    air: &mut AirMedium,
    registry: &BodyRegistry,
    params: &ShadeParams,
    dt: f64,
) -> Result<()> {
    ensure_timestep(dt)?;
    let shaded = shade_map(registry.as_slice(), air.width());
    air.warm_and_cool(&shaded, dt, params.warm_rate, params.cool_rate);
    tracing::trace!(
        shaded_cells = shaded.iter().filter(|s| **s).count(),
        "Shade step"
    );
    Ok(())
}
