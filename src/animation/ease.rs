use std::str::FromStr;

use crate::foundation::error::SlideFxError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Ease {
    Linear,
    InQuad,
    OutQuad,
    #[default]
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
    OutSine,
    InOutSine,
}

impl Ease {
    pub const ALL: [Ease; 9] = [
        Ease::Linear,
        Ease::InQuad,
        Ease::OutQuad,
        Ease::InOutQuad,
        Ease::InCubic,
        Ease::OutCubic,
        Ease::InOutCubic,
        Ease::OutSine,
        Ease::InOutSine,
    ];

    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            // Endpoints are pinned so that completed tweens land exactly on their target.
            Self::OutSine => pin_endpoints(t, |t| (t * std::f64::consts::FRAC_PI_2).sin()),
            Self::InOutSine => pin_endpoints(t, |t| {
                -((std::f64::consts::PI * t).cos() - 1.0) / 2.0
            }),
        }
    }
}

fn pin_endpoints(t: f64, f: impl Fn(f64) -> f64) -> f64 {
    if t <= 0.0 {
        0.0
    } else if t >= 1.0 {
        1.0
    } else {
        f(t)
    }
}

impl FromStr for Ease {
    type Err = SlideFxError;

    /// Accepts kebab/snake/camel spellings plus the `power2.out` style used by tween libraries.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();
        let ease = match key.as_str() {
            "linear" | "none" => Self::Linear,
            "inquad" | "power1.in" | "quad.in" => Self::InQuad,
            "outquad" | "power1.out" | "quad.out" => Self::OutQuad,
            "inoutquad" | "power1.inout" | "quad.inout" => Self::InOutQuad,
            "incubic" | "power2.in" | "cubic.in" => Self::InCubic,
            "outcubic" | "power2.out" | "cubic.out" => Self::OutCubic,
            "inoutcubic" | "power2.inout" | "cubic.inout" => Self::InOutCubic,
            "outsine" | "sine.out" => Self::OutSine,
            "inoutsine" | "sine.inout" => Self::InOutSine,
            _ => {
                return Err(SlideFxError::validation(format!("unknown ease '{s}'")));
            }
        };
        Ok(ease)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
