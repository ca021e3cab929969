use serde::{Deserialize, Serialize};

use crate::{Result, WaveMatchError};

/// Stroke colour used when no override is supplied. Solid red keeps the
/// overlay visible against most backgrounds.
pub const DEFAULT_STROKE_COLOR: &str = "rgba(255, 0, 0, 1)";

/// Complete set of wave shape and styling values used for a single frame.
///
/// Instances are immutable from the renderer's point of view: updates
/// replace the whole record, there is no per-field mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveParameters {
    /// Horizontal phase advance rate per unit time.
    pub speed: f32,
    /// Vertical excursion in pixels before the edge taper is applied.
    pub amplitude: f32,
    /// Spatial frequency divisor. Must be non-zero.
    pub wavelength: f32,
    /// Horizontal sampling step in pixels. Must be non-zero.
    pub segment_length: f32,
    pub line_width: f32,
    pub stroke_color: String,
    /// Scalar applied to elapsed time before the phase computation.
    pub time_modifier: f32,
}

impl Default for WaveParameters {
    fn default() -> Self {
        Self {
            speed: 10.0,
            amplitude: 50.0,
            wavelength: 50.0,
            segment_length: 10.0,
            line_width: 2.0,
            stroke_color: DEFAULT_STROKE_COLOR.to_string(),
            time_modifier: 1.0,
        }
    }
}

impl WaveParameters {
    /// Checks the geometry fields the draw loop depends on. A zero
    /// `wavelength` divides by zero on every sample and a non-positive
    /// `segment_length` never terminates the sampling loop, so both are
    /// rejected here rather than silently producing degenerate output.
    pub fn validate(&self) -> Result<()> {
        check_finite("speed", self.speed)?;
        check_finite("amplitude", self.amplitude)?;
        check_finite("wavelength", self.wavelength)?;
        check_finite("segment_length", self.segment_length)?;
        check_finite("line_width", self.line_width)?;
        check_finite("time_modifier", self.time_modifier)?;

        if self.wavelength == 0.0 {
            return Err(WaveMatchError::invalid(
                "wavelength",
                "must be non-zero (used as a divisor per sample)",
            ));
        }
        if self.segment_length <= 0.0 {
            return Err(WaveMatchError::invalid(
                "segment_length",
                "must be positive (used as a loop stride)",
            ));
        }
        Ok(())
    }
}

fn check_finite(name: &'static str, value: f32) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(WaveMatchError::invalid(name, format!("{value} is not finite")))
    }
}

/// Partial parameter record supplied by callers.
///
/// Overrides are always applied over the *default* set, never over the
/// previous parameters: an absent field resets to its default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WaveOverrides {
    pub speed: Option<f32>,
    pub amplitude: Option<f32>,
    pub wavelength: Option<f32>,
    pub segment_length: Option<f32>,
    pub line_width: Option<f32>,
    pub stroke_color: Option<String>,
    pub time_modifier: Option<f32>,
}

impl WaveOverrides {
    /// Parses an override record from a JSON object such as
    /// `{"amplitude": 20, "speed": 2.5}`.
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Overlays this record on the fixed defaults, field by field.
    pub fn apply_over_defaults(&self) -> WaveParameters {
        let defaults = WaveParameters::default();
        WaveParameters {
            speed: self.speed.unwrap_or(defaults.speed),
            amplitude: self.amplitude.unwrap_or(defaults.amplitude),
            wavelength: self.wavelength.unwrap_or(defaults.wavelength),
            segment_length: self.segment_length.unwrap_or(defaults.segment_length),
            line_width: self.line_width.unwrap_or(defaults.line_width),
            stroke_color: self
                .stroke_color
                .clone()
                .unwrap_or(defaults.stroke_color),
            time_modifier: self.time_modifier.unwrap_or(defaults.time_modifier),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_overrides_produce_defaults() {
        let params = WaveOverrides::default().apply_over_defaults();
        assert_eq!(params, WaveParameters::default());
        assert_eq!(params.speed, 10.0);
        assert_eq!(params.amplitude, 50.0);
        assert_eq!(params.wavelength, 50.0);
        assert_eq!(params.segment_length, 10.0);
        assert_eq!(params.line_width, 2.0);
        assert_eq!(params.time_modifier, 1.0);
    }

    #[test]
    fn partial_override_keeps_other_fields_at_defaults() {
        let overrides = WaveOverrides {
            amplitude: Some(20.0),
            ..Default::default()
        };
        let params = overrides.apply_over_defaults();

        assert_eq!(params.amplitude, 20.0);
        assert_eq!(params.speed, 10.0);
        assert_eq!(params.wavelength, 50.0);
        assert_eq!(params.segment_length, 10.0);
        assert_eq!(params.stroke_color, DEFAULT_STROKE_COLOR);
    }

    #[test]
    fn parses_overrides_from_json() {
        let overrides = WaveOverrides::from_json(r#"{"speed": 2.5, "line_width": 4}"#).unwrap();
        assert_eq!(overrides.speed, Some(2.5));
        assert_eq!(overrides.line_width, Some(4.0));
        assert_eq!(overrides.amplitude, None);
    }

    #[test]
    fn rejects_unknown_json_fields() {
        assert!(WaveOverrides::from_json(r#"{"speeed": 1}"#).is_err());
    }

    #[test]
    fn validation_rejects_zero_geometry() {
        let mut params = WaveParameters::default();
        params.wavelength = 0.0;
        let err = params.validate().unwrap_err();
        assert!(format!("{err}").contains("wavelength"));

        let mut params = WaveParameters::default();
        params.segment_length = 0.0;
        assert!(params.validate().is_err());

        params.segment_length = -1.0;
        assert!(params.validate().is_err());
    }

    #[test]
    fn validation_rejects_non_finite_fields() {
        let mut params = WaveParameters::default();
        params.amplitude = f32::NAN;
        assert!(params.validate().is_err());

        let mut params = WaveParameters::default();
        params.speed = f32::INFINITY;
        assert!(params.validate().is_err());
    }
}
