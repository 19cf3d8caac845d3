//! Runtime parameter discovery.
//!
//! [`ParameterInfo`] lets a CLI, preset system, or plugin host enumerate an
//! effect's parameters without knowing its concrete type. Each parameter is
//! described by a [`ParamDescriptor`] carrying display metadata, the valid
//! range, and the normalization curve used to map knob positions to plain
//! values.
//!
//! Parameters are addressed by a zero-based index that must stay stable for
//! the lifetime of the effect, plus a numeric [`ParamId`] that must stay
//! stable forever (it is what automation and presets record).

use libm::{logf, powf};

/// Stable numeric parameter identifier.
///
/// Once assigned, the id for a given parameter must never change; presets
/// and host automation persist it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamId(pub u32);

/// Unit of a parameter's plain value, for display formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamUnit {
    /// Dimensionless linear factor.
    #[default]
    Ratio,
    /// Frequency in Hertz.
    Hertz,
    /// Level in decibels.
    Decibels,
}

impl ParamUnit {
    /// Short label suitable for value display (`"Hz"`, `"dB"`, `""`).
    pub fn label(self) -> &'static str {
        match self {
            ParamUnit::Ratio => "",
            ParamUnit::Hertz => "Hz",
            ParamUnit::Decibels => "dB",
        }
    }
}

/// Curve mapping between normalized `[0, 1]` and plain parameter values.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ParamScale {
    /// Equal resolution across the range.
    #[default]
    Linear,
    /// More resolution at low values; requires `min > 0`.
    Logarithmic,
    /// Power curve: `plain = min + (max - min) * t^exp`. Exponents above 1
    /// concentrate resolution at the low end (a skew factor of `1/exp`).
    Power(f32),
}

/// Metadata describing a single parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full display name, e.g. `"Bias"`.
    pub name: &'static str,
    /// Short name for narrow displays, 8 characters or fewer.
    pub short_name: &'static str,
    /// Unit for display formatting.
    pub unit: ParamUnit,
    /// Minimum plain value.
    pub min: f32,
    /// Maximum plain value.
    pub max: f32,
    /// Default plain value.
    pub default: f32,
    /// Recommended encoder step.
    pub step: f32,
    /// Stable numeric id.
    pub id: ParamId,
    /// Stable human-readable id, e.g. `"vcs3_bias"`.
    pub string_id: &'static str,
    /// Normalization curve.
    pub scale: ParamScale,
}

impl ParamDescriptor {
    /// Frequency parameter in Hertz.
    pub fn frequency_hz(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::Hertz,
            min,
            max,
            default,
            step: 1.0,
            id: ParamId(0),
            string_id: "",
            scale: ParamScale::Logarithmic,
        }
    }

    /// Dimensionless linear-factor parameter.
    pub fn ratio(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::Ratio,
            min,
            max,
            default,
            step: 0.01,
            id: ParamId(0),
            string_id: "",
            scale: ParamScale::Linear,
        }
    }

    /// Assign the stable numeric and string ids.
    pub fn with_id(mut self, id: ParamId, string_id: &'static str) -> Self {
        self.id = id;
        self.string_id = string_id;
        self
    }

    /// Override the normalization curve.
    pub fn with_scale(mut self, scale: ParamScale) -> Self {
        self.scale = scale;
        self
    }

    /// Clamp a plain value into this parameter's range.
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }

    /// Map a plain value to normalized `[0, 1]`.
    pub fn normalize(&self, plain: f32) -> f32 {
        let plain = self.clamp(plain);
        match self.scale {
            ParamScale::Linear => (plain - self.min) / (self.max - self.min),
            ParamScale::Logarithmic => logf(plain / self.min) / logf(self.max / self.min),
            ParamScale::Power(exp) => powf((plain - self.min) / (self.max - self.min), 1.0 / exp),
        }
    }

    /// Map a normalized `[0, 1]` value to a plain value.
    pub fn denormalize(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        let plain = match self.scale {
            ParamScale::Linear => self.min + t * (self.max - self.min),
            ParamScale::Logarithmic => self.min * powf(self.max / self.min, t),
            ParamScale::Power(exp) => self.min + (self.max - self.min) * powf(t, exp),
        };
        self.clamp(plain)
    }
}

/// Trait for effects that expose introspectable parameters.
///
/// Indices run from `0` to [`param_count`](Self::param_count)`- 1` and are
/// stable for the effect's lifetime. Out-of-range indices are handled
/// gracefully (`None` / `0.0` / ignored).
pub trait ParameterInfo {
    /// Number of parameters exposed.
    fn param_count(&self) -> usize;

    /// Descriptor for the parameter at `index`.
    fn param_info(&self, index: usize) -> Option<ParamDescriptor>;

    /// Current plain value of the parameter at `index`.
    fn get_param(&self, index: usize) -> f32;

    /// Set the plain value of the parameter at `index`.
    ///
    /// Implementations clamp to the descriptor's range.
    fn set_param(&mut self, index: usize, value: f32);

    /// Find a parameter index by name or short name, case-insensitive.
    fn find_param_by_name(&self, name: &str) -> Option<usize> {
        (0..self.param_count()).find(|&i| {
            self.param_info(i).is_some_and(|d| {
                d.name.eq_ignore_ascii_case(name) || d.short_name.eq_ignore_ascii_case(name)
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_normalization_round_trips() {
        let d = ParamDescriptor::ratio("Gain", "Gain", 0.0, 10.0, 1.0);
        assert_eq!(d.normalize(5.0), 0.5);
        assert_eq!(d.denormalize(0.5), 5.0);
    }

    #[test]
    fn power_scale_matches_skew() {
        // Power(4.0) reproduces a 0.25 skew: half knob travel lands at
        // min + (max - min) / 16.
        let d = ParamDescriptor::frequency_hz("Bias", "Bias", 30.0, 20000.0, 10000.0)
            .with_scale(ParamScale::Power(4.0));
        let mid = d.denormalize(0.5);
        let expected = 30.0 + (20000.0 - 30.0) * 0.0625;
        assert!((mid - expected).abs() < 0.5, "got {mid}");
    }

    #[test]
    fn out_of_range_values_clamp() {
        let d = ParamDescriptor::ratio("Gain", "Gain", 0.0, 10.0, 1.0);
        assert_eq!(d.clamp(-3.0), 0.0);
        assert_eq!(d.clamp(42.0), 10.0);
        assert_eq!(d.normalize(42.0), 1.0);
    }
}
