//! Mapping between normalized control positions (0.0-1.0) and parameter values.

use serde::{Deserialize, Serialize};

/// Response curve of a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Curve {
    /// `min + p * (max - min)`
    #[default]
    Linear,
    /// `min * (max / min)^p`; equal ratios per unit of travel. Requires `min > 0`.
    Exponential,
}

/// A bounded parameter range with a response curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParamRange {
    pub min: f32,
    pub max: f32,
    pub curve: Curve,
}

impl ParamRange {
    pub const fn linear(min: f32, max: f32) -> Self {
        Self { min, max, curve: Curve::Linear }
    }

    pub const fn exponential(min: f32, max: f32) -> Self {
        Self { min, max, curve: Curve::Exponential }
    }

    /// Whether the range can be mapped in both directions.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite()
            && self.max.is_finite()
            && self.min < self.max
            && (self.curve != Curve::Exponential || self.min > 0.0)
    }

    /// Value at a normalized position. `percent` is clamped to [0, 1].
    pub fn value_at(&self, percent: f32) -> f32 {
        let p = percent.clamp(0.0, 1.0);
        match self.curve {
            Curve::Linear => self.min + p * (self.max - self.min),
            Curve::Exponential => self.min * (self.max / self.min).powf(p),
        }
    }

    /// Normalized position of a value, clamped to [0, 1].
    pub fn percent_of(&self, value: f32) -> f32 {
        let value = value.clamp(self.min, self.max);
        let p = match self.curve {
            Curve::Linear => (value - self.min) / (self.max - self.min),
            Curve::Exponential => (value / self.min).ln() / (self.max / self.min).ln(),
        };
        p.clamp(0.0, 1.0)
    }

    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }
}
