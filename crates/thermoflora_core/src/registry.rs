//! Live set of bodies, kept in stable insertion order.
//!
//! Insertion order is the tie-break for occlusion, so removal preserves the
//! relative order of the survivors.

use crate::body::BodyLogic;
use crate::error::{Result, SimError};
use serde::Serialize;
use std::collections::HashSet;
use thermoflora_data::Body;
use uuid::Uuid;

#[derive(Serialize, Clone, Debug)]
pub struct BodyRegistry {
    bodies: Vec<Body>,
    #[serde(skip)]
    agent_slot: usize,
}

impl BodyRegistry {
    /// Builds a registry holding exactly one agent plus any number of
    /// stationary bodies.
    pub fn with_bodies(bodies: Vec<Body>) -> Result<Self> {
        let agents = bodies.iter().filter(|b| b.kind.is_agent()).count();
        let Some(agent_slot) = bodies.iter().position(|b| b.kind.is_agent()) else {
            return Err(SimError::AgentCount(0));
        };
        if agents != 1 {
            return Err(SimError::AgentCount(agents));
        }
        for body in &bodies {
            body.validate()?;
        }
        Ok(Self { bodies, agent_slot })
    }

    /// Appends a stationary body. A second agent is rejected.
    pub fn insert(&mut self, body: Body) -> Result<Uuid> {
        body.validate()?;
        if body.kind.is_agent() {
            return Err(SimError::AgentCount(2));
        }
        let id = body.id;
        self.bodies.push(body);
        Ok(id)
    }

    /// Removes every non-agent body whose id is in `ids`, in one pass.
    pub fn remove_all(&mut self, ids: &HashSet<Uuid>) -> usize {
        let before = self.bodies.len();
        let slot = self.agent_slot;
        let mut idx = 0;
        let mut removed_before_agent = 0;
        self.bodies.retain(|b| {
            let keep = b.kind.is_agent() || !ids.contains(&b.id);
            if !keep && idx < slot {
                removed_before_agent += 1;
            }
            idx += 1;
            keep
        });
        self.agent_slot -= removed_before_agent;
        before - self.bodies.len()
    }

    pub fn remove(&mut self, id: Uuid) -> Option<Body> {
        let idx = self
            .bodies
            .iter()
            .position(|b| b.id == id && !b.kind.is_agent())?;
        if idx < self.agent_slot {
            self.agent_slot -= 1;
        }
        Some(self.bodies.remove(idx))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Body] {
        &self.bodies
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: Uuid) -> bool {
        self.get(id).is_some()
    }

    #[must_use]
    pub fn plant_count(&self) -> usize {
        self.bodies
            .iter()
            .filter(|b| b.kind.species().is_some())
            .count()
    }

    #[must_use]
    pub fn agent(&self) -> &Body {
        &self.bodies[self.agent_slot]
    }

    pub(crate) fn agent_mut(&mut self) -> &mut Body {
        &mut self.bodies[self.agent_slot]
    }

    #[must_use]
    pub fn agent_slot(&self) -> usize {
        self.agent_slot
    }
}
