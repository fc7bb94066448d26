//! Injectable source of uniform draws for the seeding rule.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

/// Produces uniform values in `[0, 1)`.
pub trait UnitSource {
    fn next_unit(&mut self) -> f64;
}

impl UnitSource for ChaCha8Rng {
    fn next_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Always returns the same value. Makes seeding outcomes exact under test
/// and lets a host switch seeding on or off wholesale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantSource(pub f64);

impl UnitSource for ConstantSource {
    fn next_unit(&mut self) -> f64 {
        self.0
    }
}

/// Replays a fixed sequence of draws, cycling when exhausted.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceSource {
    values: Vec<f64>,
    cursor: usize,
}

impl SequenceSource {
    #[must_use]
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, cursor: 0 }
    }

    #[must_use]
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl UnitSource for SequenceSource {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }
}
