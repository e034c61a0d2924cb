use crate::{
    effects::intensity::IntensityPattern,
    foundation::error::{SlideFxError, SlideFxResult},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EffectFamily {
    Blur,
    Color,
    Distortion,
    Stylize,
    Lighting,
    Mapping,
}

/// Closed catalog of effect kinds understood by the factory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EffectKind {
    // blur
    Blur,
    MotionBlur,
    ZoomBlur,
    RadialBlur,
    KawaseBlur,
    TiltShift,
    Bloom,
    // color
    Alpha,
    Brightness,
    Contrast,
    Saturation,
    Hue,
    Grayscale,
    Sepia,
    Negative,
    ColorOverlay,
    ColorReplace,
    ColorGradient,
    ColorMatrix,
    HslAdjustment,
    Adjustment,
    Vintage,
    // distortion
    BulgePinch,
    Twist,
    Shockwave,
    Reflection,
    Displacement,
    // stylize: glitch, scanline, halftone
    Pixelate,
    Dot,
    Ascii,
    CrossHatch,
    Emboss,
    Outline,
    Glow,
    DropShadow,
    Bevel,
    Glitch,
    RgbSplit,
    Noise,
    OldFilm,
    Crt,
    // lighting
    Godray,
    LightMap,
    // mapping
    ColorMap,
}

impl EffectKind {
    pub const ALL: [EffectKind; 44] = [
        Self::Blur,
        Self::MotionBlur,
        Self::ZoomBlur,
        Self::RadialBlur,
        Self::KawaseBlur,
        Self::TiltShift,
        Self::Bloom,
        Self::Alpha,
        Self::Brightness,
        Self::Contrast,
        Self::Saturation,
        Self::Hue,
        Self::Grayscale,
        Self::Sepia,
        Self::Negative,
        Self::ColorOverlay,
        Self::ColorReplace,
        Self::ColorGradient,
        Self::ColorMatrix,
        Self::HslAdjustment,
        Self::Adjustment,
        Self::Vintage,
        Self::BulgePinch,
        Self::Twist,
        Self::Shockwave,
        Self::Reflection,
        Self::Displacement,
        Self::Pixelate,
        Self::Dot,
        Self::Ascii,
        Self::CrossHatch,
        Self::Emboss,
        Self::Outline,
        Self::Glow,
        Self::DropShadow,
        Self::Bevel,
        Self::Glitch,
        Self::RgbSplit,
        Self::Noise,
        Self::OldFilm,
        Self::Crt,
        Self::Godray,
        Self::LightMap,
        Self::ColorMap,
    ];

    /// Resolves a descriptor tag. Matching ignores case, `-`, `_` and spaces, and accepts a
    /// few common aliases (`pinch`, `bulge`, `simple-lightmap`, `advanced-bloom`, ...).
    pub fn parse(tag: &str) -> SlideFxResult<Self> {
        let key: String = tag
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();
        if key.is_empty() {
            return Err(SlideFxError::validation("effect kind must be non-empty"));
        }

        let kind = match key.as_str() {
            "blur" | "gaussianblur" => Self::Blur,
            "motionblur" => Self::MotionBlur,
            "zoomblur" => Self::ZoomBlur,
            "radialblur" => Self::RadialBlur,
            "kawaseblur" => Self::KawaseBlur,
            "tiltshift" => Self::TiltShift,
            "bloom" | "advancedbloom" => Self::Bloom,
            "alpha" | "opacity" => Self::Alpha,
            "brightness" => Self::Brightness,
            "contrast" => Self::Contrast,
            "saturation" | "saturate" => Self::Saturation,
            "hue" | "huerotate" => Self::Hue,
            "grayscale" | "greyscale" => Self::Grayscale,
            "sepia" => Self::Sepia,
            "negative" | "invert" => Self::Negative,
            "coloroverlay" => Self::ColorOverlay,
            "colorreplace" => Self::ColorReplace,
            "colorgradient" => Self::ColorGradient,
            "colormatrix" | "colorpreset" => Self::ColorMatrix,
            "hsladjustment" | "hsl" => Self::HslAdjustment,
            "adjustment" => Self::Adjustment,
            "vintage" => Self::Vintage,
            "bulgepinch" | "bulge" | "pinch" => Self::BulgePinch,
            "twist" => Self::Twist,
            "shockwave" => Self::Shockwave,
            "reflection" => Self::Reflection,
            "displacement" | "displacementmap" => Self::Displacement,
            "pixelate" => Self::Pixelate,
            "dot" | "halftone" => Self::Dot,
            "ascii" => Self::Ascii,
            "crosshatch" => Self::CrossHatch,
            "emboss" => Self::Emboss,
            "outline" => Self::Outline,
            "glow" => Self::Glow,
            "dropshadow" | "shadow" => Self::DropShadow,
            "bevel" => Self::Bevel,
            "glitch" => Self::Glitch,
            "rgbsplit" | "chromaticaberration" => Self::RgbSplit,
            "noise" | "grain" => Self::Noise,
            "oldfilm" => Self::OldFilm,
            "crt" | "scanlines" => Self::Crt,
            "godray" | "godrays" => Self::Godray,
            "lightmap" | "simplelightmap" => Self::LightMap,
            "colormap" => Self::ColorMap,
            _ => return Err(SlideFxError::UnsupportedKind(tag.trim().to_string())),
        };
        Ok(kind)
    }

    /// Canonical kebab-case tag.
    pub fn name(self) -> &'static str {
        match self {
            Self::Blur => "blur",
            Self::MotionBlur => "motion-blur",
            Self::ZoomBlur => "zoom-blur",
            Self::RadialBlur => "radial-blur",
            Self::KawaseBlur => "kawase-blur",
            Self::TiltShift => "tilt-shift",
            Self::Bloom => "bloom",
            Self::Alpha => "alpha",
            Self::Brightness => "brightness",
            Self::Contrast => "contrast",
            Self::Saturation => "saturation",
            Self::Hue => "hue",
            Self::Grayscale => "grayscale",
            Self::Sepia => "sepia",
            Self::Negative => "negative",
            Self::ColorOverlay => "color-overlay",
            Self::ColorReplace => "color-replace",
            Self::ColorGradient => "color-gradient",
            Self::ColorMatrix => "color-matrix",
            Self::HslAdjustment => "hsl-adjustment",
            Self::Adjustment => "adjustment",
            Self::Vintage => "vintage",
            Self::BulgePinch => "bulge-pinch",
            Self::Twist => "twist",
            Self::Shockwave => "shockwave",
            Self::Reflection => "reflection",
            Self::Displacement => "displacement",
            Self::Pixelate => "pixelate",
            Self::Dot => "dot",
            Self::Ascii => "ascii",
            Self::CrossHatch => "cross-hatch",
            Self::Emboss => "emboss",
            Self::Outline => "outline",
            Self::Glow => "glow",
            Self::DropShadow => "drop-shadow",
            Self::Bevel => "bevel",
            Self::Glitch => "glitch",
            Self::RgbSplit => "rgb-split",
            Self::Noise => "noise",
            Self::OldFilm => "old-film",
            Self::Crt => "crt",
            Self::Godray => "godray",
            Self::LightMap => "light-map",
            Self::ColorMap => "color-map",
        }
    }

    pub fn family(self) -> EffectFamily {
        match self {
            Self::Blur
            | Self::MotionBlur
            | Self::ZoomBlur
            | Self::RadialBlur
            | Self::KawaseBlur
            | Self::TiltShift
            | Self::Bloom => EffectFamily::Blur,
            Self::Alpha
            | Self::Brightness
            | Self::Contrast
            | Self::Saturation
            | Self::Hue
            | Self::Grayscale
            | Self::Sepia
            | Self::Negative
            | Self::ColorOverlay
            | Self::ColorReplace
            | Self::ColorGradient
            | Self::ColorMatrix
            | Self::HslAdjustment
            | Self::Adjustment
            | Self::Vintage => EffectFamily::Color,
            Self::BulgePinch
            | Self::Twist
            | Self::Shockwave
            | Self::Reflection
            | Self::Displacement => EffectFamily::Distortion,
            Self::Pixelate
            | Self::Dot
            | Self::Ascii
            | Self::CrossHatch
            | Self::Emboss
            | Self::Outline
            | Self::Glow
            | Self::DropShadow
            | Self::Bevel
            | Self::Glitch
            | Self::RgbSplit
            | Self::Noise
            | Self::OldFilm
            | Self::Crt => EffectFamily::Stylize,
            Self::Godray | Self::LightMap => EffectFamily::Lighting,
            Self::ColorMap => EffectFamily::Mapping,
        }
    }

    pub fn intensity_pattern(self) -> IntensityPattern {
        use IntensityPattern::*;
        match self {
            Self::Alpha
            | Self::Grayscale
            | Self::Sepia
            | Self::Negative
            | Self::ColorOverlay
            | Self::ColorReplace
            | Self::ColorGradient
            | Self::ColorMatrix
            | Self::HslAdjustment
            | Self::CrossHatch
            | Self::Noise
            | Self::Godray
            | Self::LightMap
            | Self::ColorMap => LinearScalar,
            Self::BulgePinch | Self::Twist => SignedBipolar,
            Self::Bloom
            | Self::Adjustment
            | Self::Vintage
            | Self::OldFilm
            | Self::Crt
            | Self::DropShadow => Composite,
            _ => LinearRange,
        }
    }

    /// Kinds whose native state evolves every frame (time or noise seed).
    pub fn is_time_varying(self) -> bool {
        matches!(
            self,
            Self::Shockwave
                | Self::Reflection
                | Self::Glitch
                | Self::Noise
                | Self::OldFilm
                | Self::Crt
                | Self::Godray
        )
    }

    /// Kinds that reference a texture by path.
    pub fn uses_texture(self) -> bool {
        matches!(self, Self::ColorMap | Self::LightMap | Self::Displacement)
    }
}

impl std::fmt::Display for EffectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/catalog.rs"]
mod tests;
