//! Native effect state, one struct per catalog kind.
//!
//! A native value is what a renderer would bind as uniforms. The factory builds one from the
//! descriptor params (the baseline). Intensity changes overwrite only the intensity-driven
//! fields, derived from the level alone, so repeated updates never accumulate.

pub mod blur;
pub mod color;
pub mod distortion;
pub mod lighting;
pub mod stylize;

use crate::{
    assets::cache::{ResourceCache, TextureHandle},
    effects::{
        catalog::{EffectFamily, EffectKind},
        params::ParamBag,
    },
    foundation::error::{SlideFxError, SlideFxResult},
};

pub use blur::{Bloom, Blur, KawaseBlur, MotionBlur, RadialBlur, TiltShift, ZoomBlur};
pub use color::{
    Adjustment, ColorAdjust, ColorGradient, ColorMap, ColorMatrix, ColorOverlay, ColorReplace,
    GradientStop, HslAdjustment, MatrixOp, MatrixPreset, Vintage,
};
pub use distortion::{BulgePinch, Displacement, Reflection, Shockwave, Twist};
pub use lighting::{Godray, LightMap};
pub use stylize::{
    Ascii, Bevel, CrossHatch, Crt, Dot, DropShadow, Emboss, Glitch, Glow, Noise, NoiseSeed, OldFilm,
    Outline, Pixelate, RgbSplit,
};

/// Intensity-driven behaviour shared by every native effect.
pub trait NativeControl {
    /// Rewrites the intensity-driven fields for `level` (already clamped to `[0, 10]`).
    fn apply_intensity(&mut self, level: f64);

    /// The primary observable parameter, used for diagnostics and ordering checks.
    fn magnitude(&self) -> f64;

    /// Per-frame evolution for time-varying kinds.
    fn advance(&mut self, _dt: f64) {}

    fn texture(&self) -> Option<&TextureHandle> {
        None
    }

    /// Drops any texture reference held by this value.
    fn release_texture(&mut self) {}
}

#[derive(Clone, Debug, PartialEq)]
pub enum NativeEffect {
    Blur(Blur),
    MotionBlur(MotionBlur),
    ZoomBlur(ZoomBlur),
    RadialBlur(RadialBlur),
    KawaseBlur(KawaseBlur),
    TiltShift(TiltShift),
    Bloom(Bloom),
    ColorAdjust(ColorAdjust),
    ColorOverlay(ColorOverlay),
    ColorReplace(ColorReplace),
    ColorGradient(ColorGradient),
    ColorMatrix(ColorMatrix),
    HslAdjustment(HslAdjustment),
    Adjustment(Adjustment),
    Vintage(Vintage),
    BulgePinch(BulgePinch),
    Twist(Twist),
    Shockwave(Shockwave),
    Reflection(Reflection),
    Displacement(Displacement),
    Pixelate(Pixelate),
    Dot(Dot),
    Ascii(Ascii),
    CrossHatch(CrossHatch),
    Emboss(Emboss),
    Outline(Outline),
    Glow(Glow),
    DropShadow(DropShadow),
    Bevel(Bevel),
    Glitch(Glitch),
    RgbSplit(RgbSplit),
    Noise(Noise),
    OldFilm(OldFilm),
    Crt(Crt),
    Godray(Godray),
    LightMap(LightMap),
    ColorMap(ColorMap),
}

macro_rules! dispatch {
    ($value:expr, $fx:ident => $body:expr) => {
        match $value {
            NativeEffect::Blur($fx) => $body,
            NativeEffect::MotionBlur($fx) => $body,
            NativeEffect::ZoomBlur($fx) => $body,
            NativeEffect::RadialBlur($fx) => $body,
            NativeEffect::KawaseBlur($fx) => $body,
            NativeEffect::TiltShift($fx) => $body,
            NativeEffect::Bloom($fx) => $body,
            NativeEffect::ColorAdjust($fx) => $body,
            NativeEffect::ColorOverlay($fx) => $body,
            NativeEffect::ColorReplace($fx) => $body,
            NativeEffect::ColorGradient($fx) => $body,
            NativeEffect::ColorMatrix($fx) => $body,
            NativeEffect::HslAdjustment($fx) => $body,
            NativeEffect::Adjustment($fx) => $body,
            NativeEffect::Vintage($fx) => $body,
            NativeEffect::BulgePinch($fx) => $body,
            NativeEffect::Twist($fx) => $body,
            NativeEffect::Shockwave($fx) => $body,
            NativeEffect::Reflection($fx) => $body,
            NativeEffect::Displacement($fx) => $body,
            NativeEffect::Pixelate($fx) => $body,
            NativeEffect::Dot($fx) => $body,
            NativeEffect::Ascii($fx) => $body,
            NativeEffect::CrossHatch($fx) => $body,
            NativeEffect::Emboss($fx) => $body,
            NativeEffect::Outline($fx) => $body,
            NativeEffect::Glow($fx) => $body,
            NativeEffect::DropShadow($fx) => $body,
            NativeEffect::Bevel($fx) => $body,
            NativeEffect::Glitch($fx) => $body,
            NativeEffect::RgbSplit($fx) => $body,
            NativeEffect::Noise($fx) => $body,
            NativeEffect::OldFilm($fx) => $body,
            NativeEffect::Crt($fx) => $body,
            NativeEffect::Godray($fx) => $body,
            NativeEffect::LightMap($fx) => $body,
            NativeEffect::ColorMap($fx) => $body,
        }
    };
}

impl NativeControl for NativeEffect {
    fn apply_intensity(&mut self, level: f64) {
        dispatch!(self, fx => fx.apply_intensity(level))
    }

    fn magnitude(&self) -> f64 {
        dispatch!(self, fx => fx.magnitude())
    }

    fn advance(&mut self, dt: f64) {
        dispatch!(self, fx => fx.advance(dt))
    }

    fn texture(&self) -> Option<&TextureHandle> {
        dispatch!(self, fx => fx.texture())
    }

    fn release_texture(&mut self) {
        dispatch!(self, fx => fx.release_texture())
    }
}

pub(crate) fn unsupported(kind: EffectKind) -> SlideFxError {
    SlideFxError::UnsupportedKind(kind.name().to_string())
}

/// Builds the baseline native value for `kind` from its parameter bag.
///
/// Texture-backed kinds register their path with `resources`; the handle starts out as a
/// placeholder and is swapped in place once the bytes load.
pub(crate) fn build(
    kind: EffectKind,
    bag: &ParamBag<'_>,
    resources: &mut ResourceCache,
) -> SlideFxResult<NativeEffect> {
    match kind.family() {
        EffectFamily::Blur => blur::build(kind, bag),
        EffectFamily::Color | EffectFamily::Mapping => color::build(kind, bag, resources),
        EffectFamily::Distortion => distortion::build(kind, bag, resources),
        EffectFamily::Stylize => stylize::build(kind, bag),
        EffectFamily::Lighting => lighting::build(kind, bag, resources),
    }
}
