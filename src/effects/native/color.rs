use crate::{
    assets::cache::{ResourceCache, TextureHandle},
    effects::{
        catalog::EffectKind,
        intensity::{linear_range, linear_scalar},
        native::{NativeControl, NativeEffect, unsupported},
        params::{ParamBag, parse_color},
    },
    foundation::{
        core::Rgb8,
        error::{SlideFxError, SlideFxResult},
    },
};

/// Single-amount color operators that share one uniform layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatrixOp {
    Alpha,
    Brightness,
    Contrast,
    Saturation,
    Hue,
    Grayscale,
    Sepia,
    Negative,
}

impl MatrixOp {
    fn for_kind(kind: EffectKind) -> Option<Self> {
        Some(match kind {
            EffectKind::Alpha => Self::Alpha,
            EffectKind::Brightness => Self::Brightness,
            EffectKind::Contrast => Self::Contrast,
            EffectKind::Saturation => Self::Saturation,
            EffectKind::Hue => Self::Hue,
            EffectKind::Grayscale => Self::Grayscale,
            EffectKind::Sepia => Self::Sepia,
            EffectKind::Negative => Self::Negative,
            _ => return None,
        })
    }

    /// Library default when the descriptor leaves `amount` out.
    fn default_amount(self) -> f64 {
        match self {
            Self::Alpha | Self::Brightness | Self::Contrast | Self::Saturation => 1.0,
            Self::Hue => 0.0,
            Self::Grayscale | Self::Sepia | Self::Negative => 1.0,
        }
    }

    fn amount_for(self, level: f64) -> f64 {
        match self {
            Self::Brightness | Self::Contrast | Self::Saturation => linear_range(level, 0.0, 2.0),
            Self::Hue => linear_range(level, 0.0, 360.0),
            Self::Alpha | Self::Grayscale | Self::Sepia | Self::Negative => linear_scalar(level),
        }
    }

    fn upper(self) -> f64 {
        match self {
            Self::Brightness | Self::Contrast | Self::Saturation => 10.0,
            Self::Hue => 360.0,
            Self::Alpha | Self::Grayscale | Self::Sepia | Self::Negative => 1.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ColorAdjust {
    pub op: MatrixOp,
    pub amount: f64,
}

impl NativeControl for ColorAdjust {
    fn apply_intensity(&mut self, level: f64) {
        self.amount = self.op.amount_for(level);
    }

    fn magnitude(&self) -> f64 {
        self.amount
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ColorOverlay {
    pub color: Rgb8,
    pub alpha: f64,
}

impl NativeControl for ColorOverlay {
    fn apply_intensity(&mut self, level: f64) {
        self.alpha = linear_scalar(level);
    }

    fn magnitude(&self) -> f64 {
        self.alpha
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ColorReplace {
    pub original: Rgb8,
    pub target: Rgb8,
    pub tolerance: f64,
}

impl NativeControl for ColorReplace {
    fn apply_intensity(&mut self, level: f64) {
        self.tolerance = linear_scalar(level);
    }

    fn magnitude(&self) -> f64 {
        self.tolerance
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GradientStop {
    pub offset: f64,
    pub color: Rgb8,
    pub alpha: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ColorGradient {
    pub stops: Vec<GradientStop>,
    pub angle_deg: f64,
    pub alpha: f64,
}

impl NativeControl for ColorGradient {
    fn apply_intensity(&mut self, level: f64) {
        self.alpha = linear_scalar(level);
    }

    fn magnitude(&self) -> f64 {
        self.alpha
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatrixPreset {
    BlackAndWhite,
    Browni,
    Kodachrome,
    Lsd,
    Night,
    Polaroid,
    Predator,
    Technicolor,
    Vintage,
}

impl MatrixPreset {
    pub fn parse(name: &str) -> Option<Self> {
        let key: String = name
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();
        Some(match key.as_str() {
            "blackandwhite" | "bw" => Self::BlackAndWhite,
            "browni" | "brownie" => Self::Browni,
            "kodachrome" => Self::Kodachrome,
            "lsd" => Self::Lsd,
            "night" => Self::Night,
            "polaroid" => Self::Polaroid,
            "predator" => Self::Predator,
            "technicolor" => Self::Technicolor,
            "vintage" => Self::Vintage,
            _ => return None,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ColorMatrix {
    pub preset: MatrixPreset,
    /// Blend between identity (0) and the full preset (1).
    pub amount: f64,
}

impl NativeControl for ColorMatrix {
    fn apply_intensity(&mut self, level: f64) {
        self.amount = linear_scalar(level);
    }

    fn magnitude(&self) -> f64 {
        self.amount
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HslAdjustment {
    pub hue_deg: f64,
    pub saturation: f64,
    pub lightness: f64,
    pub colorize: bool,
    pub alpha: f64,
}

impl NativeControl for HslAdjustment {
    fn apply_intensity(&mut self, level: f64) {
        self.alpha = linear_scalar(level);
    }

    fn magnitude(&self) -> f64 {
        self.alpha
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Adjustment {
    pub gamma: f64,
    pub saturation: f64,
    pub contrast: f64,
    pub brightness: f64,
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl NativeControl for Adjustment {
    fn apply_intensity(&mut self, level: f64) {
        let t = linear_scalar(level);
        self.saturation = 1.0 + t;
        self.contrast = 1.0 + 0.5 * t;
        self.brightness = 1.0 + 0.25 * t;
    }

    fn magnitude(&self) -> f64 {
        self.saturation
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Vintage {
    pub sepia: f64,
    pub vignetting: f64,
    pub vignetting_alpha: f64,
    pub noise: f64,
}

impl NativeControl for Vintage {
    fn apply_intensity(&mut self, level: f64) {
        let t = linear_scalar(level);
        self.sepia = t;
        self.vignetting = 0.3 * t;
        self.vignetting_alpha = t;
        self.noise = 0.2 * t;
    }

    fn magnitude(&self) -> f64 {
        self.sepia
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ColorMap {
    /// `None` once disposed.
    pub texture: Option<TextureHandle>,
    pub nearest: bool,
    pub mix: f64,
}

impl NativeControl for ColorMap {
    fn apply_intensity(&mut self, level: f64) {
        self.mix = linear_scalar(level);
    }

    fn magnitude(&self) -> f64 {
        self.mix
    }

    fn texture(&self) -> Option<&TextureHandle> {
        self.texture.as_ref()
    }

    fn release_texture(&mut self) {
        self.texture = None;
    }
}

fn gradient_stops(bag: &ParamBag<'_>) -> SlideFxResult<Vec<GradientStop>> {
    let Some(raw) = bag.raw("stops") else {
        return Ok(vec![
            GradientStop {
                offset: 0.0,
                color: Rgb8::BLACK,
                alpha: 1.0,
            },
            GradientStop {
                offset: 1.0,
                color: Rgb8::WHITE,
                alpha: 1.0,
            },
        ]);
    };
    let items = raw
        .as_array()
        .ok_or_else(|| SlideFxError::validation("color-gradient.stops must be an array"))?;
    if items.len() < 2 {
        return Err(SlideFxError::validation(
            "color-gradient.stops needs at least two stops",
        ));
    }

    let mut stops = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let bad = || SlideFxError::validation(format!("color-gradient.stops[{i}] is malformed"));
        let offset = item
            .get("offset")
            .and_then(|v| v.as_f64())
            .filter(|o| (0.0..=1.0).contains(o))
            .ok_or_else(bad)?;
        let color = item.get("color").and_then(parse_color).ok_or_else(bad)?;
        let alpha = match item.get("alpha") {
            None => 1.0,
            Some(v) => v.as_f64().filter(|a| (0.0..=1.0).contains(a)).ok_or_else(bad)?,
        };
        stops.push(GradientStop {
            offset,
            color,
            alpha,
        });
    }
    if stops.windows(2).any(|w| w[1].offset < w[0].offset) {
        return Err(SlideFxError::validation(
            "color-gradient.stops must be sorted by offset",
        ));
    }
    Ok(stops)
}

pub(crate) fn build(
    kind: EffectKind,
    bag: &ParamBag<'_>,
    resources: &mut ResourceCache,
) -> SlideFxResult<NativeEffect> {
    if let Some(op) = MatrixOp::for_kind(kind) {
        return Ok(NativeEffect::ColorAdjust(ColorAdjust {
            op,
            amount: bag.f64_in("amount", op.default_amount(), 0.0, op.upper())?,
        }));
    }

    let fx = match kind {
        EffectKind::ColorOverlay => NativeEffect::ColorOverlay(ColorOverlay {
            color: bag.color_or("color", Rgb8::new(0xff, 0x00, 0x00))?,
            alpha: bag.f64_in("alpha", 0.5, 0.0, 1.0)?,
        }),
        EffectKind::ColorReplace => NativeEffect::ColorReplace(ColorReplace {
            original: bag.color_or("original", Rgb8::new(0xff, 0x00, 0x00))?,
            target: bag.color_or("target", Rgb8::BLACK)?,
            tolerance: bag.f64_in("tolerance", 0.4, 0.0, 1.0)?,
        }),
        EffectKind::ColorGradient => NativeEffect::ColorGradient(ColorGradient {
            stops: gradient_stops(bag)?,
            angle_deg: bag.f64_or("angle", 90.0)?,
            alpha: bag.f64_in("alpha", 1.0, 0.0, 1.0)?,
        }),
        EffectKind::ColorMatrix => {
            let preset = match bag.str_opt("preset")? {
                None => MatrixPreset::Polaroid,
                Some(name) => MatrixPreset::parse(name).ok_or_else(|| {
                    SlideFxError::validation(format!("color-matrix.preset '{name}' is unknown"))
                })?,
            };
            NativeEffect::ColorMatrix(ColorMatrix {
                preset,
                amount: bag.f64_in("amount", 1.0, 0.0, 1.0)?,
            })
        }
        EffectKind::HslAdjustment => NativeEffect::HslAdjustment(HslAdjustment {
            hue_deg: bag.f64_in("hue", 0.0, -180.0, 180.0)?,
            saturation: bag.f64_in("saturation", 0.0, -1.0, 1.0)?,
            lightness: bag.f64_in("lightness", 0.0, -1.0, 1.0)?,
            colorize: bag.bool_or("colorize", false)?,
            alpha: bag.f64_in("alpha", 1.0, 0.0, 1.0)?,
        }),
        EffectKind::Adjustment => NativeEffect::Adjustment(Adjustment {
            gamma: bag.f64_in("gamma", 1.0, 0.0, 10.0)?,
            saturation: bag.f64_in("saturation", 1.0, 0.0, 10.0)?,
            contrast: bag.f64_in("contrast", 1.0, 0.0, 10.0)?,
            brightness: bag.f64_in("brightness", 1.0, 0.0, 10.0)?,
            red: bag.f64_in("red", 1.0, 0.0, 10.0)?,
            green: bag.f64_in("green", 1.0, 0.0, 10.0)?,
            blue: bag.f64_in("blue", 1.0, 0.0, 10.0)?,
            alpha: bag.f64_in("alpha", 1.0, 0.0, 1.0)?,
        }),
        EffectKind::Vintage => NativeEffect::Vintage(Vintage {
            sepia: bag.f64_in("sepia", 0.5, 0.0, 1.0)?,
            vignetting: bag.f64_in("vignetting", 0.3, 0.0, 1.0)?,
            vignetting_alpha: bag.f64_in("vignetting_alpha", 1.0, 0.0, 1.0)?,
            noise: bag.f64_in("noise", 0.1, 0.0, 1.0)?,
        }),
        EffectKind::ColorMap => NativeEffect::ColorMap(ColorMap {
            texture: Some(resources.request(bag.required_str("texture")?)?),
            nearest: bag.bool_or("nearest", false)?,
            mix: bag.f64_in("mix", 1.0, 0.0, 1.0)?,
        }),
        other => return Err(unsupported(other)),
    };
    Ok(fx)
}
