use crate::error::{Result, SimError};
use rand::Rng;
use std::ops::Range;
use thermoflora_data::{Body, BodyKind, SpeciesId, SpeciesTemplate, ThermalCoefficients};
use uuid::Uuid;

pub trait BodyLogic {
    /// Air cells covered by the body, clamped to `[0, width)`. Cell bounds
    /// are the truncated ends of `[x, x + w)`; the range may be empty.
    fn span_cells(&self, width: usize) -> Range<usize>;
    fn validate(&self) -> Result<()>;
}

impl BodyLogic for Body {
    fn span_cells(&self, width: usize) -> Range<usize> {
        let lower = (self.x.trunc() as i64).clamp(0, width as i64) as usize;
        let upper = ((self.x + self.w).trunc() as i64).clamp(0, width as i64) as usize;
        lower..upper.max(lower)
    }

    fn validate(&self) -> Result<()> {
        if !(self.w.is_finite() && self.w > 0.0) {
            return Err(SimError::dimension(format!("body width {} must be > 0", self.w)));
        }
        if !(self.h.is_finite() && self.h > 0.0) {
            return Err(SimError::dimension(format!("body height {} must be > 0", self.h)));
        }
        if !(self.x.is_finite() && self.y.is_finite() && self.temp.is_finite()) {
            return Err(SimError::dimension("body position and temperature must be finite"));
        }
        validate_coefficients(&self.coefficients)
    }
}

pub fn validate_coefficients(c: &ThermalCoefficients) -> Result<()> {
    if !(0.0..=1.0).contains(&c.albedo) {
        return Err(SimError::coefficient(format!("albedo {} outside [0, 1]", c.albedo)));
    }
    if !(0.0..=1.0).contains(&c.emissivity) {
        return Err(SimError::coefficient(format!(
            "emissivity {} outside [0, 1]",
            c.emissivity
        )));
    }
    if !(c.conduction.is_finite() && c.conduction >= 0.0) {
        return Err(SimError::coefficient(format!(
            "conduction {} must be >= 0",
            c.conduction
        )));
    }
    if !(c.thermal_mass.is_finite() && c.thermal_mass > 0.0) {
        return Err(SimError::coefficient(format!(
            "thermal mass {} must be > 0",
            c.thermal_mass
        )));
    }
    Ok(())
}

pub fn validate_species(template: &SpeciesTemplate) -> Result<()> {
    if !(template.seed_min_temp < template.seed_max_temp) {
        return Err(SimError::species(format!(
            "{}: seeding band ({}, {}) is empty",
            template.name, template.seed_min_temp, template.seed_max_temp
        )));
    }
    if !(template.min_temp < template.max_temp) {
        return Err(SimError::species(format!(
            "{}: survival band [{}, {}] is empty",
            template.name, template.min_temp, template.max_temp
        )));
    }
    if !(template.width.is_finite() && template.width > 0.0)
        || !(template.height.is_finite() && template.height > 0.0)
    {
        return Err(SimError::dimension(format!(
            "{}: template dimensions must be finite and > 0",
            template.name
        )));
    }
    if !template.initial_temp.is_finite() {
        return Err(SimError::dimension(format!(
            "{}: initial temperature {} must be finite",
            template.name, template.initial_temp
        )));
    }
    validate_coefficients(&template.coefficients)
}

/// Builds a validated body. Rejects `w <= 0` and `h <= 0` up front so that
/// no flux computation can divide by zero.
#[allow(clippy::too_many_arguments)]
pub fn create_body(
    id: Uuid,
    kind: BodyKind,
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    temp: f64,
    coefficients: ThermalCoefficients,
) -> Result<Body> {
    let body = Body {
        id,
        kind,
        x,
        y,
        w,
        h,
        temp,
        coefficients,
    };
    body.validate()?;
    Ok(body)
}

pub fn random_id<R: Rng>(rng: &mut R) -> Uuid {
    Uuid::from_u128(rng.gen::<u128>())
}

/// Instantiates a plant of `species` standing on the ground at `x`.
pub fn create_plant(id: Uuid, species: SpeciesId, template: &SpeciesTemplate, x: f64) -> Body {
    Body {
        id,
        kind: BodyKind::Plant(species),
        x,
        y: 0.0,
        w: template.width,
        h: template.height,
        temp: template.initial_temp,
        coefficients: template.coefficients,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(x: f64, w: f64) -> Body {
        Body {
            id: Uuid::nil(),
            kind: BodyKind::Ground,
            x,
            y: 0.0,
            w,
            h: 1.0,
            temp: 0.0,
            coefficients: ThermalCoefficients::default(),
        }
    }

    #[test]
    fn test_span_truncates_bounds() {
        assert_eq!(body(2.7, 3.0).span_cells(10), 2..5);
        assert_eq!(body(0.5, 1.0).span_cells(10), 0..1);
    }

    #[test]
    fn test_span_clamps_to_medium() {
        assert_eq!(body(-3.0, 5.0).span_cells(10), 0..2);
        assert_eq!(body(8.0, 5.0).span_cells(10), 8..10);
        assert!(body(12.0, 5.0).span_cells(10).is_empty());
        assert!(body(-9.0, 2.0).span_cells(10).is_empty());
    }

    #[test]
    fn test_create_body_rejects_zero_width() {
        let err = create_body(
            Uuid::nil(),
            BodyKind::Ground,
            0.0,
            0.0,
            0.0,
            1.0,
            0.0,
            ThermalCoefficients::default(),
        )
        .unwrap_err();
        assert!(matches!(err, SimError::InvalidDimension(_)));
    }

    #[test]
    fn test_create_body_rejects_negative_height() {
        let err = create_body(
            Uuid::nil(),
            BodyKind::Ground,
            0.0,
            0.0,
            1.0,
            -1.0,
            0.0,
            ThermalCoefficients::default(),
        )
        .unwrap_err();
        assert!(matches!(err, SimError::InvalidDimension(_)));
    }

    #[test]
    fn test_coefficient_ranges() {
        let mut c = ThermalCoefficients::default();
        c.emissivity = 1.2;
        assert!(matches!(
            validate_coefficients(&c),
            Err(SimError::InvalidCoefficient(_))
        ));
        c.emissivity = 0.5;
        c.thermal_mass = 0.0;
        assert!(validate_coefficients(&c).is_err());
    }

    #[test]
    fn test_species_band_validation() {
        let mut t = SpeciesTemplate::default();
        assert!(validate_species(&t).is_ok());
        t.min_temp = 0.9;
        assert!(matches!(validate_species(&t), Err(SimError::InvalidSpecies(_))));
    }

    #[test]
    fn test_species_template_must_be_finite() {
        let t = SpeciesTemplate {
            initial_temp: f64::NAN,
            ..SpeciesTemplate::default()
        };
        assert!(matches!(validate_species(&t), Err(SimError::InvalidDimension(_))));

        let t = SpeciesTemplate {
            width: f64::INFINITY,
            ..SpeciesTemplate::default()
        };
        assert!(validate_species(&t).is_err());
    }
}
