use serde::{Deserialize, Serialize};

use crate::error::MotionError;
use crate::style::{AngleUnit, StyleValue};

/// Behavior for inputs outside the configured input range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Extrapolation {
    /// Clamp the output to the boundary segment's output interval
    #[default]
    Clamp,
    /// Continue the boundary segment linearly
    Extend,
    /// Return the input unchanged
    Identity,
}

/// Piecewise-linear mapping from an ordered input range to an output range.
///
/// Validated at construction: breakpoints are strictly increasing, both
/// ranges have the same length, and at least two breakpoints exist. Sampling
/// is a pure function of the input.
#[derive(Debug, Clone)]
pub struct InterpolationSpec {
    input_range: Vec<f32>,
    output_range: Vec<f32>,
    unit: Option<AngleUnit>,
    extrapolation: Extrapolation,
}

impl InterpolationSpec {
    /// Build a numeric spec
    pub fn new(
        input_range: Vec<f32>,
        output_range: Vec<f32>,
        extrapolation: Extrapolation,
    ) -> Result<Self, MotionError> {
        Self::build(input_range, output_range, None, extrapolation)
    }

    /// Build an angle-valued spec from suffixed strings such as `"90deg"` or
    /// `"1.5rad"`. All outputs must carry the same unit.
    pub fn with_angles(
        input_range: Vec<f32>,
        output_range: &[&str],
        extrapolation: Extrapolation,
    ) -> Result<Self, MotionError> {
        let mut values = Vec::with_capacity(output_range.len());
        let mut unit = None;
        for raw in output_range {
            let (value, parsed_unit) = parse_angle(raw)?;
            match unit {
                None => unit = Some(parsed_unit),
                Some(expected) if expected != parsed_unit => {
                    return Err(MotionError::Configuration(format!(
                        "mixed angle units in output range: expected {}, got {}",
                        expected.suffix(),
                        parsed_unit.suffix()
                    )));
                }
                Some(_) => {}
            }
            values.push(value);
        }
        Self::build(input_range, values, unit, extrapolation)
    }

    fn build(
        input_range: Vec<f32>,
        output_range: Vec<f32>,
        unit: Option<AngleUnit>,
        extrapolation: Extrapolation,
    ) -> Result<Self, MotionError> {
        if input_range.len() < 2 {
            return Err(MotionError::Configuration(format!(
                "input range needs at least 2 breakpoints, got {}",
                input_range.len()
            )));
        }
        if input_range.len() != output_range.len() {
            return Err(MotionError::Configuration(format!(
                "input range has {} breakpoints but output range has {}",
                input_range.len(),
                output_range.len()
            )));
        }
        if input_range.windows(2).any(|w| w[0] >= w[1]) {
            return Err(MotionError::Configuration(
                "input range must be strictly increasing".to_string(),
            ));
        }

        Ok(Self {
            input_range,
            output_range,
            unit,
            extrapolation,
        })
    }

    pub fn extrapolation(&self) -> Extrapolation {
        self.extrapolation
    }

    /// Unit attached to angle-valued specs
    pub fn unit(&self) -> Option<AngleUnit> {
        self.unit
    }

    /// Evaluate the mapping at `input`.
    ///
    /// Inputs below the range use the first segment, inputs above it the
    /// last; the extrapolation policy then decides what happens with the
    /// out-of-range result.
    pub fn sample(&self, input: f32) -> f32 {
        let last = self.input_range.len() - 1;

        let i = if input <= self.input_range[0] {
            0
        } else if input >= self.input_range[last] {
            last - 1
        } else {
            self.input_range
                .windows(2)
                .position(|w| input <= w[1])
                .unwrap_or(last - 1)
        };

        let (in_a, in_b) = (self.input_range[i], self.input_range[i + 1]);
        let (out_a, out_b) = (self.output_range[i], self.output_range[i + 1]);

        let span = in_b - in_a;
        let progress = if span == 0.0 {
            // Degenerate zero-width segment: defined as progress 0
            0.0
        } else {
            (input - in_a) / span
        };

        // Hit the breakpoints exactly rather than through the lerp
        let raw = if progress == 0.0 {
            out_a
        } else if progress == 1.0 {
            out_b
        } else {
            out_a + progress * (out_b - out_a)
        };

        if input < self.input_range[0] || input > self.input_range[last] {
            match self.extrapolation {
                Extrapolation::Clamp => raw.clamp(out_a.min(out_b), out_a.max(out_b)),
                Extrapolation::Extend => raw,
                Extrapolation::Identity => input,
            }
        } else {
            raw
        }
    }

    /// Evaluate and attach the configured unit
    pub fn sample_value(&self, input: f32) -> StyleValue {
        let value = self.sample(input);
        match self.unit {
            Some(unit) => StyleValue::Angle(value, unit),
            None => StyleValue::Number(value),
        }
    }
}

/// Parse an angle string of the form `"<number>deg"` or `"<number>rad"`
fn parse_angle(raw: &str) -> Result<(f32, AngleUnit), MotionError> {
    let trimmed = raw.trim();
    let (number, unit) = if let Some(prefix) = trimmed.strip_suffix("deg") {
        (prefix, AngleUnit::Degrees)
    } else if let Some(prefix) = trimmed.strip_suffix("rad") {
        (prefix, AngleUnit::Radians)
    } else {
        return Err(MotionError::Configuration(format!(
            "angle value {trimmed:?} must end in \"deg\" or \"rad\""
        )));
    };

    number
        .trim()
        .parse::<f32>()
        .map(|value| (value, unit))
        .map_err(|_| {
            MotionError::Configuration(format!("angle value {trimmed:?} has no numeric magnitude"))
        })
}
