use std::time::Duration;

use crate::foundation::error::{SlideFxError, SlideFxResult};

pub use kurbo::{Point, Size, Vec2};

/// Opaque RGB color, 8 bits per channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn from_hex(v: u32) -> Self {
        Self {
            r: ((v >> 16) & 0xff) as u8,
            g: ((v >> 8) & 0xff) as u8,
            b: (v & 0xff) as u8,
        }
    }

    pub fn to_hex(self) -> u32 {
        (u32::from(self.r) << 16) | (u32::from(self.g) << 8) | u32::from(self.b)
    }

    /// Parses `#rrggbb`, `rrggbb`, `0xrrggbb` and the short `#rgb` form.
    pub fn parse(s: &str) -> SlideFxResult<Self> {
        let t = s.trim();
        let digits = t
            .strip_prefix('#')
            .or_else(|| t.strip_prefix("0x"))
            .or_else(|| t.strip_prefix("0X"))
            .unwrap_or(t);

        let expanded;
        let digits = if digits.len() == 3 {
            expanded = digits
                .chars()
                .flat_map(|c| [c, c])
                .collect::<String>();
            expanded.as_str()
        } else {
            digits
        };

        if digits.len() != 6 {
            return Err(SlideFxError::validation(format!(
                "color '{s}' must have 3 or 6 hex digits"
            )));
        }
        let v = u32::from_str_radix(digits, 16)
            .map_err(|_| SlideFxError::validation(format!("color '{s}' is not valid hex")))?;
        Ok(Self::from_hex(v))
    }
}

impl serde::Serialize for Rgb8 {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("#{:06x}", self.to_hex()))
    }
}

impl<'de> serde::Deserialize<'de> for Rgb8 {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgb8::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Validates a viewport observed from the host.
pub fn validate_viewport(size: Size) -> SlideFxResult<Size> {
    if !size.width.is_finite() || !size.height.is_finite() {
        return Err(SlideFxError::validation("viewport size must be finite"));
    }
    if size.width <= 0.0 || size.height <= 0.0 {
        return Err(SlideFxError::validation("viewport width/height must be > 0"));
    }
    Ok(size)
}

/// Maps a point in viewport space to `[-1, 1]` on both axes around the centre.
pub fn normalized_from_center(p: Point, viewport: Size) -> Vec2 {
    if viewport.width <= 0.0 || viewport.height <= 0.0 {
        return Vec2::ZERO;
    }
    let x = (p.x / viewport.width) * 2.0 - 1.0;
    let y = (p.y / viewport.height) * 2.0 - 1.0;
    Vec2::new(x.clamp(-1.0, 1.0), y.clamp(-1.0, 1.0))
}

pub fn secs(d: Duration) -> f64 {
    d.as_secs_f64()
}

pub fn duration_from_secs(v: f64) -> Duration {
    if v.is_finite() && v > 0.0 {
        Duration::from_secs_f64(v)
    } else {
        Duration::ZERO
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
