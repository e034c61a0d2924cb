use crate::{
    effects::{
        catalog::EffectKind,
        intensity::{linear_range, linear_scalar},
        native::{NativeControl, NativeEffect, unsupported},
        params::ParamBag,
    },
    foundation::{
        core::{Point, Vec2},
        error::{SlideFxError, SlideFxResult},
    },
};

#[derive(Clone, Debug, PartialEq)]
pub struct Blur {
    pub strength: f64,
    pub quality: u32,
    pub kernel_size: u32,
}

impl NativeControl for Blur {
    fn apply_intensity(&mut self, level: f64) {
        self.strength = linear_range(level, 0.0, 20.0);
    }

    fn magnitude(&self) -> f64 {
        self.strength
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MotionBlur {
    /// Unit direction the velocity is scaled along.
    pub direction: Vec2,
    pub velocity: Vec2,
    pub kernel_size: u32,
    pub offset: f64,
}

impl NativeControl for MotionBlur {
    fn apply_intensity(&mut self, level: f64) {
        self.velocity = self.direction * linear_range(level, 0.0, 40.0);
    }

    fn magnitude(&self) -> f64 {
        self.velocity.hypot()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ZoomBlur {
    pub strength: f64,
    pub center: Point,
    pub inner_radius: f64,
    /// Negative means unbounded.
    pub radius: f64,
}

impl NativeControl for ZoomBlur {
    fn apply_intensity(&mut self, level: f64) {
        self.strength = linear_range(level, 0.0, 0.5);
    }

    fn magnitude(&self) -> f64 {
        self.strength
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RadialBlur {
    pub angle_deg: f64,
    pub center: Point,
    pub kernel_size: u32,
    pub radius: f64,
}

impl NativeControl for RadialBlur {
    fn apply_intensity(&mut self, level: f64) {
        self.angle_deg = linear_range(level, 0.0, 180.0);
    }

    fn magnitude(&self) -> f64 {
        self.angle_deg
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct KawaseBlur {
    pub strength: f64,
    pub quality: u32,
    pub pixel_size: Vec2,
    pub clamp: bool,
}

impl NativeControl for KawaseBlur {
    fn apply_intensity(&mut self, level: f64) {
        self.strength = linear_range(level, 0.0, 20.0);
    }

    fn magnitude(&self) -> f64 {
        self.strength
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TiltShift {
    pub blur: f64,
    pub gradient_blur: f64,
    /// Band endpoints in normalized `[0, 1]` viewport coordinates.
    pub start: Point,
    pub end: Point,
}

impl NativeControl for TiltShift {
    fn apply_intensity(&mut self, level: f64) {
        self.blur = linear_range(level, 0.0, 200.0);
    }

    fn magnitude(&self) -> f64 {
        self.blur
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bloom {
    pub threshold: f64,
    pub bloom_scale: f64,
    pub brightness: f64,
    pub blur: f64,
    pub quality: u32,
}

impl NativeControl for Bloom {
    fn apply_intensity(&mut self, level: f64) {
        let t = linear_scalar(level);
        self.bloom_scale = 2.0 * t;
        self.blur = 16.0 * t;
        self.brightness = 1.0 + 0.5 * t;
    }

    fn magnitude(&self) -> f64 {
        self.bloom_scale
    }
}

fn kernel_size(bag: &ParamBag<'_>, key: &str, default: u32) -> SlideFxResult<u32> {
    let k = bag.u32_or(key, default)?;
    if !(3..=25).contains(&k) || k % 2 == 0 {
        return Err(SlideFxError::validation(format!(
            "{key} must be an odd number in [3, 25]"
        )));
    }
    Ok(k)
}

pub(crate) fn build(kind: EffectKind, bag: &ParamBag<'_>) -> SlideFxResult<NativeEffect> {
    let fx = match kind {
        EffectKind::Blur => NativeEffect::Blur(Blur {
            strength: bag.f64_in("strength", 8.0, 0.0, 100.0)?,
            quality: bag.u32_or("quality", 4)?.clamp(1, 16),
            kernel_size: kernel_size(bag, "kernel_size", 5)?,
        }),
        EffectKind::MotionBlur => {
            let dir = bag.vec2_or("direction", Vec2::new(1.0, 0.0))?;
            let direction = if dir.hypot() > f64::EPSILON {
                dir.normalize()
            } else {
                Vec2::new(1.0, 0.0)
            };
            NativeEffect::MotionBlur(MotionBlur {
                direction,
                velocity: bag.vec2_or("velocity", Vec2::ZERO)?,
                kernel_size: kernel_size(bag, "kernel_size", 5)?,
                offset: bag.f64_or("offset", 0.0)?,
            })
        }
        EffectKind::ZoomBlur => NativeEffect::ZoomBlur(ZoomBlur {
            strength: bag.f64_in("strength", 0.1, 0.0, 1.0)?,
            center: bag.point_or("center", Point::new(0.5, 0.5))?,
            inner_radius: bag.f64_in("inner_radius", 0.0, 0.0, f64::MAX)?,
            radius: bag.f64_or("radius", -1.0)?,
        }),
        EffectKind::RadialBlur => NativeEffect::RadialBlur(RadialBlur {
            angle_deg: bag.f64_or("angle", 0.0)?,
            center: bag.point_or("center", Point::new(0.5, 0.5))?,
            kernel_size: kernel_size(bag, "kernel_size", 5)?,
            radius: bag.f64_or("radius", -1.0)?,
        }),
        EffectKind::KawaseBlur => NativeEffect::KawaseBlur(KawaseBlur {
            strength: bag.f64_in("strength", 4.0, 0.0, 100.0)?,
            quality: bag.u32_or("quality", 3)?.clamp(1, 20),
            pixel_size: bag.vec2_or("pixel_size", Vec2::new(1.0, 1.0))?,
            clamp: bag.bool_or("clamp", false)?,
        }),
        EffectKind::TiltShift => NativeEffect::TiltShift(TiltShift {
            blur: bag.f64_in("blur", 100.0, 0.0, 1000.0)?,
            gradient_blur: bag.f64_in("gradient_blur", 600.0, 0.0, 10_000.0)?,
            start: bag.point_or("start", Point::new(0.0, 0.5))?,
            end: bag.point_or("end", Point::new(1.0, 0.5))?,
        }),
        EffectKind::Bloom => NativeEffect::Bloom(Bloom {
            threshold: bag.f64_in("threshold", 0.5, 0.0, 1.0)?,
            bloom_scale: bag.f64_in("bloom_scale", 1.0, 0.0, 10.0)?,
            brightness: bag.f64_in("brightness", 1.0, 0.0, 10.0)?,
            blur: bag.f64_in("blur", 8.0, 0.0, 100.0)?,
            quality: bag.u32_or("quality", 4)?.clamp(1, 16),
        }),
        other => return Err(unsupported(other)),
    };
    Ok(fx)
}
