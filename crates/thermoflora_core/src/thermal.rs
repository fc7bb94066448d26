//! Body heat exchange: sunlight on the topmost surfaces, linearized
//! radiative loss, squared-temperature conduction into the air and air
//! smoothing.
//!
//! Temperatures are never clamped in this model.

use crate::air::AirMedium;
use crate::body::BodyLogic;
use crate::config::AppConfig;
use crate::error::{ensure_timestep, Result};
use crate::registry::BodyRegistry;
use thermoflora_data::Body;

/// Tunables of one thermal step, lifted out of [`AppConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermalParams {
    pub solar_constant: f64,
    pub air_thermal_mass: f64,
    pub diffusion_offset: usize,
    pub air_conduction: f64,
}

impl ThermalParams {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            solar_constant: config.thermal.solar_constant,
            air_thermal_mass: config.thermal.air_thermal_mass,
            diffusion_offset: config.air.diffusion_offset,
            air_conduction: config.air.air_conduction,
        }
    }
}

/// For every air cell, the registry index of the covering body with the
/// highest top surface. Ties go to the body inserted first.
#[must_use]
pub fn top_surfaces(bodies: &[Body], width: usize) -> Vec<Option<usize>> {
    let mut top: Vec<Option<usize>> = vec![None; width];
    for (idx, body) in bodies.iter().enumerate() {
        let body_top = body.top();
        for slot in &mut top[body.span_cells(width)] {
            let higher = match *slot {
                Some(current) => body_top > bodies[current].top(),
                None => true,
            };
            if higher {
                *slot = Some(idx);
            }
        }
    }
    top
}

/// Runs one thermal step in fixed order: occlusion, solar absorption,
/// radiative loss, conduction, diffusion.
pub fn step(
    air: &mut AirMedium,
    registry: &mut BodyRegistry,
    params: &ThermalParams,
    dt: f64,
) -> Result<()> {
    ensure_timestep(dt)?;
    let width = air.width();
    let bodies = registry.as_mut_slice();
    let top = top_surfaces(bodies, width);

    // Solar absorption, once per cell a body is exposed on.
    for &idx in top.iter().flatten() {
        let body = &mut bodies[idx];
        body.temp +=
            dt * params.solar_constant * (1.0 - body.coefficients.albedo) / body.heat_capacity();
    }

    // Radiative loss, linear in the body's own temperature.
    for &idx in top.iter().flatten() {
        let body = &mut bodies[idx];
        body.temp -= dt * body.temp * body.coefficients.emissivity / body.heat_capacity();
    }

    // Conduction. The squared difference favors flow out of the hotter side.
    let cells = air.cells_mut();
    for body in bodies.iter_mut() {
        let span = body.span_cells(width);
        let capacity = body.heat_capacity();
        for cell in &mut cells[span] {
            let delta = (body.temp * body.temp - *cell * *cell) * body.coefficients.conduction * dt;
            *cell += delta / params.air_thermal_mass;
            body.temp -= delta / capacity;
        }
    }

    air.diffuse(dt, params.diffusion_offset, params.air_conduction);

    tracing::trace!(
        exposed_cells = top.iter().flatten().count(),
        air_total = air.total(),
        "Thermal step"
    );
    Ok(())
}
