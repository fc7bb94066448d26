//! Core data structures for the Thermoflora simulation.

pub mod body;
pub mod species;
