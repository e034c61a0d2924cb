use crate::foundation::{
    core::{Point, Rgb8, Vec2},
    error::{SlideFxError, SlideFxResult},
};

/// Typed, defaulting reader over a descriptor's kind-specific parameter object.
///
/// Omitted keys fall back to the caller's documented default; present keys with the wrong
/// shape are validation errors.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ParamBag<'a> {
    kind: &'static str,
    obj: Option<&'a serde_json::Map<String, serde_json::Value>>,
}

impl<'a> ParamBag<'a> {
    pub(crate) fn new(kind: &'static str, params: &'a serde_json::Value) -> SlideFxResult<Self> {
        let obj = if params.is_null() {
            None
        } else {
            Some(params.as_object().ok_or_else(|| {
                SlideFxError::validation(format!("{kind} params must be an object"))
            })?)
        };
        Ok(Self { kind, obj })
    }

    pub(crate) fn raw(&self, key: &str) -> Option<&'a serde_json::Value> {
        self.obj.and_then(|o| o.get(key)).filter(|v| !v.is_null())
    }

    pub(crate) fn has(&self, key: &str) -> bool {
        self.raw(key).is_some()
    }

    fn err(&self, key: &str, what: &str) -> SlideFxError {
        SlideFxError::validation(format!("{}.{key} {what}", self.kind))
    }

    pub(crate) fn f64_or(&self, key: &str, default: f64) -> SlideFxResult<f64> {
        let Some(v) = self.raw(key) else {
            return Ok(default);
        };
        let n = v.as_f64().ok_or_else(|| self.err(key, "must be a number"))?;
        if !n.is_finite() {
            return Err(self.err(key, "must be finite"));
        }
        Ok(n)
    }

    /// Like [`Self::f64_or`] but rejects values outside `[lo, hi]`.
    pub(crate) fn f64_in(&self, key: &str, default: f64, lo: f64, hi: f64) -> SlideFxResult<f64> {
        let n = self.f64_or(key, default)?;
        if n < lo || n > hi {
            return Err(self.err(key, &format!("must be within [{lo}, {hi}]")));
        }
        Ok(n)
    }

    pub(crate) fn u32_or(&self, key: &str, default: u32) -> SlideFxResult<u32> {
        let Some(v) = self.raw(key) else {
            return Ok(default);
        };
        let n = v
            .as_u64()
            .ok_or_else(|| self.err(key, "must be a non-negative integer"))?;
        u32::try_from(n).map_err(|_| self.err(key, "is out of range"))
    }

    pub(crate) fn bool_or(&self, key: &str, default: bool) -> SlideFxResult<bool> {
        match self.raw(key) {
            None => Ok(default),
            Some(v) => v.as_bool().ok_or_else(|| self.err(key, "must be a boolean")),
        }
    }

    pub(crate) fn str_opt(&self, key: &str) -> SlideFxResult<Option<&'a str>> {
        match self.raw(key) {
            None => Ok(None),
            Some(v) => v
                .as_str()
                .map(Some)
                .ok_or_else(|| self.err(key, "must be a string")),
        }
    }

    pub(crate) fn required_str(&self, key: &str) -> SlideFxResult<&'a str> {
        self.str_opt(key)?
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| self.err(key, "is required"))
    }

    /// `[x, y]` or `{ "x": .., "y": .. }`.
    pub(crate) fn vec2_or(&self, key: &str, default: Vec2) -> SlideFxResult<Vec2> {
        let Some(v) = self.raw(key) else {
            return Ok(default);
        };
        let (x, y) = if let Some(a) = v.as_array() {
            if a.len() != 2 {
                return Err(self.err(key, "must be [x, y]"));
            }
            (a[0].as_f64(), a[1].as_f64())
        } else if let Some(o) = v.as_object() {
            (
                o.get("x").and_then(|x| x.as_f64()),
                o.get("y").and_then(|y| y.as_f64()),
            )
        } else {
            return Err(self.err(key, "must be [x, y]"));
        };
        match (x, y) {
            (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Ok(Vec2::new(x, y)),
            _ => Err(self.err(key, "must hold two finite numbers")),
        }
    }

    pub(crate) fn point_or(&self, key: &str, default: Point) -> SlideFxResult<Point> {
        self.vec2_or(key, default.to_vec2()).map(|v| v.to_point())
    }

    /// `"#rrggbb"`, a `0xRRGGBB` integer, or `[r, g, b]`.
    pub(crate) fn color_or(&self, key: &str, default: Rgb8) -> SlideFxResult<Rgb8> {
        let Some(v) = self.raw(key) else {
            return Ok(default);
        };
        parse_color(v).ok_or_else(|| self.err(key, "must be a color"))
    }
}

pub(crate) fn parse_color(v: &serde_json::Value) -> Option<Rgb8> {
    if let Some(s) = v.as_str() {
        return Rgb8::parse(s).ok();
    }
    if let Some(n) = v.as_u64() {
        return u32::try_from(n)
            .ok()
            .filter(|n| *n <= 0xff_ffff)
            .map(Rgb8::from_hex);
    }
    let a = v.as_array()?;
    if a.len() != 3 {
        return None;
    }
    let mut c = [0u8; 3];
    for (i, ch) in a.iter().enumerate() {
        c[i] = u8::try_from(ch.as_u64()?).ok()?;
    }
    Some(Rgb8::new(c[0], c[1], c[2]))
}

#[cfg(test)]
#[path = "../../tests/unit/effects/params.rs"]
mod tests;
