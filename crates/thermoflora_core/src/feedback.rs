//! Updraft/downdraft feedback for the agent.

use crate::air::AirMedium;
use crate::body::BodyLogic;
use thermoflora_data::Body;

/// `(mean air under the agent - global mean air) * air_flow_multiplier`.
/// An agent with no cells inside the medium gets no lift.
#[must_use]
pub fn compute_lift(air: &AirMedium, agent: &Body, air_flow_multiplier: f64) -> f64 {
    let global = air.global_mean();
    let local = air.mean_over_or(agent.span_cells(air.width()), global);
    (local - global) * air_flow_multiplier
}

#[cfg(test)]
mod tests {
    use super::*;
    use thermoflora_data::{BodyKind, ThermalCoefficients};
    use uuid::Uuid;

    fn agent(x: f64, w: f64) -> Body {
        Body {
            id: Uuid::nil(),
            kind: BodyKind::Agent,
            x,
            y: 40.0,
            w,
            h: 1.0,
            temp: 0.0,
            coefficients: ThermalCoefficients::default(),
        }
    }

    #[test]
    fn test_warm_air_lifts() {
        let air = AirMedium::from_cells(vec![5.0, 5.0, 1.0, 1.0]).unwrap();
        assert_eq!(compute_lift(&air, &agent(0.0, 2.0), 10.0), 20.0);
        assert_eq!(compute_lift(&air, &agent(2.0, 2.0), 10.0), -20.0);
    }

    #[test]
    fn test_agent_outside_medium_has_no_lift() {
        let air = AirMedium::from_cells(vec![5.0, 1.0]).unwrap();
        assert_eq!(compute_lift(&air, &agent(7.0, 2.0), 10.0), 0.0);
        assert_eq!(compute_lift(&air, &agent(-4.0, 2.0), 10.0), 0.0);
    }
}
