/// Asserts that two floats agree within `eps`.
#[macro_export]
macro_rules! assert_close {
    ($left:expr, $right:expr, $eps:expr) => {
        let (l, r): (f64, f64) = ($left, $right);
        assert!(
            (l - r).abs() <= $eps,
            "{} and {} differ by more than {}",
            l,
            r,
            $eps
        );
    };
    ($left:expr, $right:expr) => {
        $crate::assert_close!($left, $right, 1e-12)
    };
}

/// Asserts that a body with the given ID is still in the simulation.
#[macro_export]
macro_rules! assert_body_alive {
    ($sim:expr, $id:expr) => {
        assert!(
            $sim.bodies().any(|b| b.id == $id),
            "Body {} should be alive but was not found",
            $id
        );
    };
}

/// Asserts that a body with the given ID has been removed.
#[macro_export]
macro_rules! assert_body_dead {
    ($sim:expr, $id:expr) => {
        assert!(
            !$sim.bodies().any(|b| b.id == $id),
            "Body {} should be dead but was found alive",
            $id
        );
    };
}

/// Asserts the live plant count.
#[macro_export]
macro_rules! assert_plants {
    ($sim:expr, $count:expr) => {
        assert_eq!($sim.plant_count(), $count, "Plant count mismatch");
    };
}
