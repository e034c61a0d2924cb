//! The 0–10 intensity scale and the four ways it maps onto native effect parameters.

use crate::foundation::math::{clamp_finite, lerp};

pub const MIN_LEVEL: f64 = 0.0;
pub const MAX_LEVEL: f64 = 10.0;
pub const DEFAULT_LEVEL: f64 = 5.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IntensityPattern {
    /// `level / 10` drives a `[0, 1]` parameter.
    LinearScalar,
    /// `level` maps affinely into `[lo, hi]`.
    LinearRange,
    /// `(level - 5) / 5` drives a `[-1, 1]` parameter whose sign reverses the effect.
    SignedBipolar,
    /// `level` fans out into several parameters with independent scaling.
    Composite,
}

/// Clamps a requested level into `[0, 10]`; NaN is treated as 0.
pub fn clamp_level(level: f64) -> f64 {
    clamp_finite(level, MIN_LEVEL, MAX_LEVEL)
}

pub fn linear_scalar(level: f64) -> f64 {
    clamp_level(level) / MAX_LEVEL
}

pub fn linear_range(level: f64, lo: f64, hi: f64) -> f64 {
    lerp(lo, hi, linear_scalar(level))
}

pub fn signed_bipolar(level: f64) -> f64 {
    (clamp_level(level) - DEFAULT_LEVEL) / DEFAULT_LEVEL
}

#[cfg(test)]
#[path = "../../tests/unit/effects/intensity.rs"]
mod tests;
