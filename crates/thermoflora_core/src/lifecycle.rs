//! Plant lifecycle: death outside the survival band and stochastic seeding
//! inside the seeding band.

use crate::air::AirMedium;
use crate::body::{create_plant, random_id, BodyLogic};
use crate::config::AppConfig;
use crate::error::Result;
use crate::random::UnitSource;
use crate::registry::BodyRegistry;
use rand::Rng;
use std::collections::HashSet;
use thermoflora_data::{Body, SpeciesId, SpeciesTemplate};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LifecycleParams {
    pub seed_threshold: f64,
    pub max_plants: Option<usize>,
}

impl LifecycleParams {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            seed_threshold: config.ecosystem.seed_threshold,
            max_plants: config.ecosystem.max_plants,
        }
    }
}

/// Bodies created and removed by one lifecycle pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LifecycleOutcome {
    pub spawned: Vec<Uuid>,
    pub died: Vec<Uuid>,
}

/// Mean air temperature under a body, or `None` when its span lies
/// entirely outside the medium.
#[must_use]
pub fn sampled_temperature(body: &Body, air: &AirMedium) -> Option<f64> {
    air.mean_over(body.span_cells(air.width())).ok()
}

/// Ids of plants whose sampled temperature left their survival band.
/// Ground, the agent and bodies with no in-range cells are never marked.
#[must_use]
pub fn mark_dead(
    registry: &BodyRegistry,
    air: &AirMedium,
    species: &[SpeciesTemplate],
) -> HashSet<Uuid> {
    registry
        .iter()
        .filter_map(|body| {
            let template = species.get(body.kind.species()?.index())?;
            let avg = sampled_temperature(body, air)?;
            (!template.survives_at(avg)).then_some(body.id)
        })
        .collect()
}

/// One Bernoulli trial per (cell, species) pair inside the species' seeding
/// band. Returns the new plants without inserting them.
pub fn seed<U, R>(
    air: &AirMedium,
    species: &[SpeciesTemplate],
    params: &LifecycleParams,
    live_plants: usize,
    draws: &mut U,
    ids: &mut R,
) -> Vec<Body>
where
    U: UnitSource + ?Sized,
    R: Rng,
{
    let mut seeded = Vec::new();
    let room = params
        .max_plants
        .map_or(usize::MAX, |cap| cap.saturating_sub(live_plants));

    for (i, &temp) in air.cells().iter().enumerate() {
        for (sid, template) in species.iter().enumerate() {
            if seeded.len() >= room {
                return seeded;
            }
            if template.can_seed_at(temp) && draws.next_unit() > params.seed_threshold {
                seeded.push(create_plant(
                    random_id(ids),
                    SpeciesId(sid as u16),
                    template,
                    i as f64,
                ));
            }
        }
    }
    seeded
}

/// Births plus deaths in one pass at or above which the pass is logged at
/// `info`.
const BURST: usize = 10;

/// Death pass, then seeding pass. `_dt` is accepted for symmetry with the
/// other slow-cadence steps; both rules sample instantaneous state.
///
/// Every seeded plant is validated before the registry changes, so an
/// error leaves the registry untouched.
pub fn update<U, R>(
    air: &AirMedium,
    registry: &mut BodyRegistry,
    species: &[SpeciesTemplate],
    params: &LifecycleParams,
    _dt: f64,
    draws: &mut U,
    ids: &mut R,
) -> Result<LifecycleOutcome>
where
    U: UnitSource + ?Sized,
    R: Rng,
{
    let dead = mark_dead(registry, air, species);
    let survivors = registry.plant_count() - dead.len();

    let seeded = seed(air, species, params, survivors, draws, ids);
    for plant in &seeded {
        plant.validate()?;
    }

    registry.remove_all(&dead);
    let mut spawned = Vec::with_capacity(seeded.len());
    for plant in seeded {
        spawned.push(registry.insert(plant)?);
    }

    if dead.len() + spawned.len() >= BURST {
        tracing::info!(
            died = dead.len(),
            spawned = spawned.len(),
            plants = registry.plant_count(),
            "Population burst"
        );
    } else if !dead.is_empty() || !spawned.is_empty() {
        tracing::debug!(
            died = dead.len(),
            spawned = spawned.len(),
            plants = registry.plant_count(),
            "Lifecycle pass"
        );
    }

    let mut died: Vec<Uuid> = dead.into_iter().collect();
    died.sort();
    Ok(LifecycleOutcome { spawned, died })
}
