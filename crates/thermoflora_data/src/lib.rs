//! Plain data shared by the Thermoflora engine and its hosts.

pub mod data;

pub use data::body::*;
pub use data::species::*;
