use crate::{
    effects::{
        catalog::EffectKind,
        intensity::{linear_range, linear_scalar},
        native::{NativeControl, NativeEffect, unsupported},
        params::ParamBag,
    },
    foundation::{
        core::{Rgb8, Vec2},
        error::SlideFxResult,
        math::next_unit_seed,
    },
};

/// Deterministic per-frame noise seed shared by the grainy kinds.
#[derive(Clone, Debug, PartialEq)]
pub struct NoiseSeed {
    pub seed: f64,
    pub frame: u64,
}

impl NoiseSeed {
    fn new(seed: f64) -> Self {
        Self { seed, frame: 0 }
    }

    fn step(&mut self) {
        self.frame = self.frame.wrapping_add(1);
        self.seed = next_unit_seed(self.seed, self.frame);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Pixelate {
    pub size: Vec2,
}

impl NativeControl for Pixelate {
    fn apply_intensity(&mut self, level: f64) {
        let s = linear_range(level, 1.0, 40.0);
        self.size = Vec2::new(s, s);
    }

    fn magnitude(&self) -> f64 {
        self.size.x
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Dot {
    pub scale: f64,
    pub angle: f64,
    pub grayscale: bool,
}

impl NativeControl for Dot {
    fn apply_intensity(&mut self, level: f64) {
        self.scale = linear_range(level, 1.0, 10.0);
    }

    fn magnitude(&self) -> f64 {
        self.scale
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Ascii {
    pub size: f64,
    pub color: Rgb8,
    pub replace_color: bool,
}

impl NativeControl for Ascii {
    fn apply_intensity(&mut self, level: f64) {
        self.size = linear_range(level, 2.0, 32.0);
    }

    fn magnitude(&self) -> f64 {
        self.size
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CrossHatch {
    pub mix: f64,
}

impl NativeControl for CrossHatch {
    fn apply_intensity(&mut self, level: f64) {
        self.mix = linear_scalar(level);
    }

    fn magnitude(&self) -> f64 {
        self.mix
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Emboss {
    pub strength: f64,
}

impl NativeControl for Emboss {
    fn apply_intensity(&mut self, level: f64) {
        self.strength = linear_range(level, 0.0, 20.0);
    }

    fn magnitude(&self) -> f64 {
        self.strength
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Outline {
    pub thickness: f64,
    pub color: Rgb8,
    pub alpha: f64,
    pub quality: f64,
    pub knockout: bool,
}

impl NativeControl for Outline {
    fn apply_intensity(&mut self, level: f64) {
        self.thickness = linear_range(level, 0.0, 10.0);
    }

    fn magnitude(&self) -> f64 {
        self.thickness
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Glow {
    pub distance: f64,
    pub outer_strength: f64,
    pub inner_strength: f64,
    pub color: Rgb8,
    pub alpha: f64,
    pub knockout: bool,
}

impl NativeControl for Glow {
    fn apply_intensity(&mut self, level: f64) {
        self.outer_strength = linear_range(level, 0.0, 10.0);
    }

    fn magnitude(&self) -> f64 {
        self.outer_strength
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DropShadow {
    /// Unit direction the shadow is cast along.
    pub direction: Vec2,
    pub offset: Vec2,
    pub blur: f64,
    pub alpha: f64,
    pub color: Rgb8,
    pub shadow_only: bool,
}

impl NativeControl for DropShadow {
    fn apply_intensity(&mut self, level: f64) {
        let t = linear_scalar(level);
        self.alpha = t;
        self.blur = 8.0 * t;
        self.offset = self.direction * (12.0 * t);
    }

    fn magnitude(&self) -> f64 {
        self.alpha
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bevel {
    pub rotation_deg: f64,
    pub thickness: f64,
    pub light_color: Rgb8,
    pub light_alpha: f64,
    pub shadow_color: Rgb8,
    pub shadow_alpha: f64,
}

impl NativeControl for Bevel {
    fn apply_intensity(&mut self, level: f64) {
        self.thickness = linear_range(level, 0.0, 10.0);
    }

    fn magnitude(&self) -> f64 {
        self.thickness
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Glitch {
    pub slices: u32,
    pub offset: f64,
    pub direction_deg: f64,
    pub red: Vec2,
    pub green: Vec2,
    pub blue: Vec2,
    pub noise: NoiseSeed,
}

impl NativeControl for Glitch {
    fn apply_intensity(&mut self, level: f64) {
        self.offset = linear_range(level, 0.0, 100.0);
    }

    fn magnitude(&self) -> f64 {
        self.offset
    }

    fn advance(&mut self, _dt: f64) {
        self.noise.step();
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RgbSplit {
    /// Per-channel unit directions scaled by the intensity-driven shift.
    pub directions: [Vec2; 3],
    pub red: Vec2,
    pub green: Vec2,
    pub blue: Vec2,
}

impl NativeControl for RgbSplit {
    fn apply_intensity(&mut self, level: f64) {
        let shift = linear_range(level, 0.0, 20.0);
        let [r, g, b] = self.directions;
        self.red = r * shift;
        self.green = g * shift;
        self.blue = b * shift;
    }

    fn magnitude(&self) -> f64 {
        self.red
            .hypot()
            .max(self.green.hypot())
            .max(self.blue.hypot())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Noise {
    pub noise: f64,
    pub seed: NoiseSeed,
}

impl NativeControl for Noise {
    fn apply_intensity(&mut self, level: f64) {
        self.noise = linear_scalar(level);
    }

    fn magnitude(&self) -> f64 {
        self.noise
    }

    fn advance(&mut self, _dt: f64) {
        self.seed.step();
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct OldFilm {
    pub sepia: f64,
    pub noise: f64,
    pub noise_size: f64,
    pub scratch: f64,
    pub scratch_density: f64,
    pub vignetting: f64,
    pub seed: NoiseSeed,
}

impl NativeControl for OldFilm {
    fn apply_intensity(&mut self, level: f64) {
        let t = linear_scalar(level);
        self.sepia = 0.6 * t;
        self.noise = 0.4 * t;
        self.scratch = t;
        self.scratch_density = 0.6 * t;
        self.vignetting = 0.3 * t;
    }

    fn magnitude(&self) -> f64 {
        self.scratch
    }

    fn advance(&mut self, _dt: f64) {
        self.seed.step();
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Crt {
    pub curvature: f64,
    pub line_width: f64,
    pub line_contrast: f64,
    pub vertical_line: bool,
    pub noise: f64,
    pub vignetting: f64,
    pub time: f64,
    pub seed: NoiseSeed,
}

impl NativeControl for Crt {
    fn apply_intensity(&mut self, level: f64) {
        let t = linear_scalar(level);
        self.curvature = 2.0 * t;
        self.line_contrast = 0.5 * t;
        self.noise = 0.3 * t;
        self.vignetting = 0.4 * t;
    }

    fn magnitude(&self) -> f64 {
        self.line_contrast
    }

    fn advance(&mut self, dt: f64) {
        self.time += dt;
        self.seed.step();
    }
}

fn unit_or(v: Vec2, fallback: Vec2) -> Vec2 {
    if v.hypot() > f64::EPSILON {
        v.normalize()
    } else {
        fallback
    }
}

pub(crate) fn build(kind: EffectKind, bag: &ParamBag<'_>) -> SlideFxResult<NativeEffect> {
    let fx = match kind {
        EffectKind::Pixelate => {
            let s = bag.f64_in("size", 10.0, 1.0, 512.0)?;
            NativeEffect::Pixelate(Pixelate {
                size: Vec2::new(s, s),
            })
        }
        EffectKind::Dot => NativeEffect::Dot(Dot {
            scale: bag.f64_in("scale", 1.0, 0.0, 100.0)?,
            angle: bag.f64_or("angle", 5.0)?,
            grayscale: bag.bool_or("grayscale", true)?,
        }),
        EffectKind::Ascii => NativeEffect::Ascii(Ascii {
            size: bag.f64_in("size", 8.0, 1.0, 256.0)?,
            color: bag.color_or("color", Rgb8::WHITE)?,
            replace_color: bag.bool_or("replace_color", false)?,
        }),
        EffectKind::CrossHatch => NativeEffect::CrossHatch(CrossHatch {
            mix: bag.f64_in("mix", 1.0, 0.0, 1.0)?,
        }),
        EffectKind::Emboss => NativeEffect::Emboss(Emboss {
            strength: bag.f64_in("strength", 5.0, 0.0, 100.0)?,
        }),
        EffectKind::Outline => NativeEffect::Outline(Outline {
            thickness: bag.f64_in("thickness", 1.0, 0.0, 100.0)?,
            color: bag.color_or("color", Rgb8::BLACK)?,
            alpha: bag.f64_in("alpha", 1.0, 0.0, 1.0)?,
            quality: bag.f64_in("quality", 0.1, 0.0, 1.0)?,
            knockout: bag.bool_or("knockout", false)?,
        }),
        EffectKind::Glow => NativeEffect::Glow(Glow {
            distance: bag.f64_in("distance", 10.0, 0.0, 100.0)?,
            outer_strength: bag.f64_in("outer_strength", 4.0, 0.0, 100.0)?,
            inner_strength: bag.f64_in("inner_strength", 0.0, 0.0, 100.0)?,
            color: bag.color_or("color", Rgb8::WHITE)?,
            alpha: bag.f64_in("alpha", 1.0, 0.0, 1.0)?,
            knockout: bag.bool_or("knockout", false)?,
        }),
        EffectKind::DropShadow => {
            let direction = unit_or(
                bag.vec2_or("direction", Vec2::new(1.0, 1.0))?,
                Vec2::new(1.0, 1.0).normalize(),
            );
            NativeEffect::DropShadow(DropShadow {
                direction,
                offset: bag.vec2_or("offset", direction * 4.0)?,
                blur: bag.f64_in("blur", 2.0, 0.0, 100.0)?,
                alpha: bag.f64_in("alpha", 0.5, 0.0, 1.0)?,
                color: bag.color_or("color", Rgb8::BLACK)?,
                shadow_only: bag.bool_or("shadow_only", false)?,
            })
        }
        EffectKind::Bevel => NativeEffect::Bevel(Bevel {
            rotation_deg: bag.f64_or("rotation", 45.0)?,
            thickness: bag.f64_in("thickness", 2.0, 0.0, 100.0)?,
            light_color: bag.color_or("light_color", Rgb8::WHITE)?,
            light_alpha: bag.f64_in("light_alpha", 0.7, 0.0, 1.0)?,
            shadow_color: bag.color_or("shadow_color", Rgb8::BLACK)?,
            shadow_alpha: bag.f64_in("shadow_alpha", 0.7, 0.0, 1.0)?,
        }),
        EffectKind::Glitch => NativeEffect::Glitch(Glitch {
            slices: bag.u32_or("slices", 5)?.clamp(1, 64),
            offset: bag.f64_in("offset", 100.0, 0.0, 1000.0)?,
            direction_deg: bag.f64_or("direction", 0.0)?,
            red: bag.vec2_or("red", Vec2::ZERO)?,
            green: bag.vec2_or("green", Vec2::ZERO)?,
            blue: bag.vec2_or("blue", Vec2::ZERO)?,
            noise: NoiseSeed::new(bag.f64_in("seed", 0.5, 0.0, 1.0)?),
        }),
        EffectKind::RgbSplit => {
            let red = bag.vec2_or("red", Vec2::new(-10.0, 0.0))?;
            let green = bag.vec2_or("green", Vec2::new(0.0, 10.0))?;
            let blue = bag.vec2_or("blue", Vec2::ZERO)?;
            NativeEffect::RgbSplit(RgbSplit {
                directions: [
                    unit_or(red, Vec2::ZERO),
                    unit_or(green, Vec2::ZERO),
                    unit_or(blue, Vec2::ZERO),
                ],
                red,
                green,
                blue,
            })
        }
        EffectKind::Noise => NativeEffect::Noise(Noise {
            noise: bag.f64_in("noise", 0.5, 0.0, 1.0)?,
            seed: NoiseSeed::new(bag.f64_in("seed", 0.5, 0.0, 1.0)?),
        }),
        EffectKind::OldFilm => NativeEffect::OldFilm(OldFilm {
            sepia: bag.f64_in("sepia", 0.3, 0.0, 1.0)?,
            noise: bag.f64_in("noise", 0.3, 0.0, 1.0)?,
            noise_size: bag.f64_in("noise_size", 1.0, 0.0, 10.0)?,
            scratch: bag.f64_in("scratch", 0.5, -1.0, 1.0)?,
            scratch_density: bag.f64_in("scratch_density", 0.3, 0.0, 1.0)?,
            vignetting: bag.f64_in("vignetting", 0.3, 0.0, 1.0)?,
            seed: NoiseSeed::new(bag.f64_in("seed", 0.5, 0.0, 1.0)?),
        }),
        EffectKind::Crt => NativeEffect::Crt(Crt {
            curvature: bag.f64_in("curvature", 1.0, 0.0, 10.0)?,
            line_width: bag.f64_in("line_width", 1.0, 0.0, 10.0)?,
            line_contrast: bag.f64_in("line_contrast", 0.25, 0.0, 1.0)?,
            vertical_line: bag.bool_or("vertical_line", false)?,
            noise: bag.f64_in("noise", 0.3, 0.0, 1.0)?,
            vignetting: bag.f64_in("vignetting", 0.3, 0.0, 1.0)?,
            time: 0.0,
            seed: NoiseSeed::new(bag.f64_in("seed", 0.5, 0.0, 1.0)?),
        }),
        other => return Err(unsupported(other)),
    };
    Ok(fx)
}
