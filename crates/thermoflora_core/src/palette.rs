//! Temperature to color mapping for renderers.
//!
//! Channels are computed in `[0, 1]` and scaled to bytes by truncation;
//! out-of-range values saturate.

use crate::config::HeatModel;

/// `[r, g, b]` bytes.
pub type Rgb = [u8; 3];

#[inline]
fn channel(c: f64) -> u8 {
    (c * 255.0) as u8
}

/// Unbounded temperatures: `red = 1 - 1/(t+1)`, `blue = 1/(t+1)`.
#[must_use]
pub fn thermal_body_color(temp: f64) -> Rgb {
    let cold = 1.0 / (temp + 1.0);
    [channel(1.0 - cold), 0, channel(cold)]
}

/// Temperatures in `[0, 1]`: `red = t`, `blue = 1 - t`.
#[must_use]
pub fn shade_color(temp: f64) -> Rgb {
    [channel(temp), 0, channel(1.0 - temp)]
}

#[must_use]
pub fn air_color(model: HeatModel, temp: f64) -> Rgb {
    match model {
        HeatModel::ThermalBody => thermal_body_color(temp),
        HeatModel::Shade => shade_color(temp),
    }
}
