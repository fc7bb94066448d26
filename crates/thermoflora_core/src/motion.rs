//! Fast-cadence position integration for the agent.

use thermoflora_data::{AgentVelocity, Body};

/// Explicit Euler step of the agent position.
pub fn integrate(agent: &mut Body, velocity: &AgentVelocity, dt: f64) {
    agent.x += velocity.vx * dt;
    agent.y += velocity.vertical() * dt;
}

/// User input is additive on the horizontal and user-vertical components.
pub fn nudge(velocity: &mut AgentVelocity, dvx: f64, dvy: f64) {
    velocity.vx += dvx;
    velocity.vy_user += dvy;
}
