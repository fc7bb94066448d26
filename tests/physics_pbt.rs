use proptest::prelude::*;
use thermoflora_lib::model::air::AirMedium;
use thermoflora_lib::model::body::{Body, BodyKind, ThermalCoefficients};
use thermoflora_lib::model::feedback::compute_lift;
use thermoflora_lib::model::shade::shade_map;
use thermoflora_lib::model::BodyLogic;
use uuid::Uuid;

const WIDTH: usize = 200;
const MAX_OFFSET: usize = 8;

prop_compose! {
    fn arb_interior_spikes()(
        base in -10.0f64..10.0,
        spikes in prop::collection::vec(
            (2 * MAX_OFFSET..WIDTH - 2 * MAX_OFFSET, -10.0f64..10.0),
            1..5
        )
    ) -> Vec<f64> {
        let mut cells = vec![base; WIDTH];
        for (i, amp) in spikes {
            cells[i] += amp;
        }
        cells
    }
}

prop_compose! {
    fn arb_body()(
        x in -50.0f64..250.0,
        w in 0.1f64..80.0,
        y in 0.0f64..50.0,
        h in 0.1f64..30.0
    ) -> Body {
        Body {
            id: Uuid::nil(),
            kind: BodyKind::Ground,
            x,
            y,
            w,
            h,
            temp: 0.0,
            coefficients: ThermalCoefficients::default(),
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn test_diffusion_conserves_interior_total(
        cells in arb_interior_spikes(),
        offset in 1usize..=MAX_OFFSET,
        dt in 0.001f64..0.5,
        conduction in 0.0f64..2.0
    ) {
        let mut air = AirMedium::from_cells(cells).unwrap();
        let before = air.total();
        air.diffuse(dt, offset, conduction);
        prop_assert!((air.total() - before).abs() < 1e-8,
            "Total drifted from {} to {}", before, air.total());
    }

    #[test]
    fn test_diffusion_stays_within_bounds(
        cells in prop::collection::vec(-5.0f64..5.0, 1..64),
        offset in 1usize..10,
        rate in 0.0f64..=1.0
    ) {
        let lo = cells.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = cells.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mut air = AirMedium::from_cells(cells).unwrap();
        air.diffuse(1.0, offset, rate);
        for &t in air.cells() {
            prop_assert!(t >= lo - 1e-12 && t <= hi + 1e-12, "{} outside [{}, {}]", t, lo, hi);
        }
    }

    #[test]
    fn test_shade_step_stays_in_unit_interval(
        cells in prop::collection::vec(0.0f64..=1.0, 1..64),
        shaded in prop::collection::vec(any::<bool>(), 64),
        dt in 0.0f64..2.0
    ) {
        let width = cells.len();
        let mut air = AirMedium::from_cells(cells).unwrap();
        air.warm_and_cool(&shaded[..width], dt, 0.2, 0.3);
        prop_assert!(air.cells().iter().all(|t| (0.0..=1.0).contains(t)));
    }

    #[test]
    fn test_span_always_within_row(body in arb_body(), width in 1usize..WIDTH) {
        let span = body.span_cells(width);
        prop_assert!(span.start <= span.end);
        prop_assert!(span.end <= width);
        let shaded = shade_map(std::slice::from_ref(&body), width);
        prop_assert_eq!(shaded.iter().filter(|s| **s).count(), span.len());
    }

    #[test]
    fn test_uniform_air_gives_no_lift(
        temp in -10.0f64..10.0,
        width in 1usize..100,
        body in arb_body(),
        multiplier in 0.0f64..100.0
    ) {
        let air = AirMedium::new(width, temp).unwrap();
        let lift = compute_lift(&air, &body, multiplier);
        prop_assert!(lift.abs() < 1e-9, "Lift {} over uniform air", lift);
    }
}
