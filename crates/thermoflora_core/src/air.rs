//! One-dimensional air medium: a fixed row of cell temperatures.

use crate::error::{Result, SimError};
use serde::{Deserialize, Serialize};
use std::ops::Range;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AirMedium {
    cells: Vec<f64>,
    #[serde(skip)]
    back_buffer: Vec<f64>,
}

impl AirMedium {
    pub fn new(width: usize, initial_temp: f64) -> Result<Self> {
        if width == 0 {
            return Err(SimError::dimension("air medium width must be > 0"));
        }
        if !initial_temp.is_finite() {
            return Err(SimError::dimension("initial air temperature must be finite"));
        }
        Ok(Self {
            cells: vec![initial_temp; width],
            back_buffer: vec![initial_temp; width],
        })
    }

    pub fn from_cells(cells: Vec<f64>) -> Result<Self> {
        if cells.is_empty() {
            return Err(SimError::dimension("air medium width must be > 0"));
        }
        let back_buffer = cells.clone();
        Ok(Self { cells, back_buffer })
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn cells(&self) -> &[f64] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [f64] {
        &mut self.cells
    }

    pub fn get(&self, index: usize) -> Result<f64> {
        self.cells
            .get(index)
            .copied()
            .ok_or(SimError::OutOfRangeIndex {
                index,
                width: self.width(),
            })
    }

    pub fn set(&mut self, index: usize, temp: f64) -> Result<()> {
        let width = self.width();
        let cell = self
            .cells
            .get_mut(index)
            .ok_or(SimError::OutOfRangeIndex { index, width })?;
        *cell = temp;
        Ok(())
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        self.cells.iter().sum()
    }

    /// Mean over `range` clamped to `[0, width)`.
    pub fn mean_over(&self, range: Range<usize>) -> Result<f64> {
        let lower = range.start.min(self.width());
        let upper = range.end.min(self.width());
        if upper <= lower {
            return Err(SimError::DegenerateSample { lower, upper });
        }
        let sum: f64 = self.cells[lower..upper].iter().sum();
        Ok(sum / (upper - lower) as f64)
    }

    /// Like [`mean_over`](Self::mean_over), but an empty range yields `default`.
    #[must_use]
    pub fn mean_over_or(&self, range: Range<usize>, default: f64) -> f64 {
        self.mean_over(range).unwrap_or(default)
    }

    #[must_use]
    pub fn global_mean(&self) -> f64 {
        self.total() / self.width() as f64
    }

    /// Moves every cell toward the mean of `[i - offset, i + offset)` by
    /// `dt * air_conduction`. Means are read from a snapshot taken before the
    /// pass, so no cell sees an update made earlier in the same pass.
    pub fn diffuse(&mut self, dt: f64, offset: usize, air_conduction: f64) {
        let width = self.width();
        if self.back_buffer.len() != width {
            self.back_buffer = vec![0.0; width];
        }
        self.back_buffer.copy_from_slice(&self.cells);
        let snapshot = &self.back_buffer;
        let rate = dt * air_conduction;

        // Prefix sums keep each window mean O(1).
        let mut prefix = Vec::with_capacity(width + 1);
        prefix.push(0.0);
        let mut acc = 0.0;
        for t in snapshot {
            acc += t;
            prefix.push(acc);
        }

        for (i, cell) in self.cells.iter_mut().enumerate() {
            let lower = i.saturating_sub(offset);
            let upper = (i + offset).min(width);
            if upper <= lower {
                continue;
            }
            let mean = (prefix[upper] - prefix[lower]) / (upper - lower) as f64;
            *cell += (mean - snapshot[i]) * rate;
        }
    }

    /// Shade model: sunlit cells warm toward 1, shaded cells cool toward 0.
    pub fn warm_and_cool(&mut self, shaded: &[bool], dt: f64, warm_rate: f64, cool_rate: f64) {
        for (cell, &is_shaded) in self.cells.iter_mut().zip(shaded) {
            *cell = if is_shaded {
                (*cell - cool_rate * dt).max(0.0)
            } else {
                (*cell + warm_rate * dt).min(1.0)
            };
        }
    }
}
