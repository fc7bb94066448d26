//! One-line colored view of the air row for terminals.
//!
//! The air is binned down to a fixed number of columns, each painted with the
//! palette color of its mean temperature. Plants show as `*` and the agent
//! as `^` over whichever column holds their left edge.

use anyhow::Result;
use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use std::io::Write;
use thermoflora_core::palette::{air_color, Rgb};
use thermoflora_core::{BodyKind, SimulationState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripCell {
    pub color: Rgb,
    pub glyph: char,
}

#[derive(Debug, Clone)]
pub struct StripRenderer {
    columns: usize,
}

impl StripRenderer {
    pub fn new(columns: usize) -> Result<Self> {
        anyhow::ensure!(columns > 0, "Strip must have at least one column");
        Ok(Self { columns })
    }

    /// Bins the current air row and body positions into display cells.
    #[must_use]
    pub fn cells(&self, sim: &SimulationState) -> Vec<StripCell> {
        let air = sim.air();
        let width = air.width();
        let columns = self.columns.min(width);
        let model = sim.heat_model();

        let mut cells: Vec<StripCell> = (0..columns)
            .map(|c| {
                let lo = c * width / columns;
                let hi = ((c + 1) * width / columns).max(lo + 1);
                StripCell {
                    color: air_color(model, air.mean_over_or(lo..hi, 0.0)),
                    glyph: ' ',
                }
            })
            .collect();

        for body in sim.bodies() {
            let glyph = match body.kind {
                BodyKind::Ground => continue,
                BodyKind::Plant(_) => '*',
                BodyKind::Agent => '^',
            };
            if body.x < 0.0 || body.x >= width as f64 {
                continue;
            }
            let column = (body.x as usize) * columns / width;
            // The agent always wins its column.
            if cells[column].glyph != '^' {
                cells[column].glyph = glyph;
            }
        }
        cells
    }

    /// Writes one strip line followed by a status suffix.
    pub fn draw<W: Write>(&self, out: &mut W, sim: &SimulationState) -> Result<()> {
        for cell in self.cells(sim) {
            let [r, g, b] = cell.color;
            queue!(
                out,
                SetBackgroundColor(Color::Rgb { r, g, b }),
                SetForegroundColor(Color::White),
                Print(cell.glyph)
            )?;
        }
        queue!(
            out,
            ResetColor,
            Print(format!(
                " t={} plants={} air={:.3}\n",
                sim.slow_ticks(),
                sim.plant_count(),
                sim.air().global_mean()
            ))
        )?;
        out.flush()?;
        Ok(())
    }
}
