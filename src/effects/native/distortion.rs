use crate::{
    assets::cache::{ResourceCache, TextureHandle},
    effects::{
        catalog::EffectKind,
        intensity::{linear_range, signed_bipolar},
        native::{NativeControl, NativeEffect, unsupported},
        params::ParamBag,
    },
    foundation::{
        core::{Point, Vec2},
        error::SlideFxResult,
    },
};

#[derive(Clone, Debug, PartialEq)]
pub struct BulgePinch {
    pub center: Point,
    pub radius: f64,
    /// `< 0` pinches, `> 0` bulges.
    pub strength: f64,
}

impl NativeControl for BulgePinch {
    fn apply_intensity(&mut self, level: f64) {
        self.strength = signed_bipolar(level);
    }

    fn magnitude(&self) -> f64 {
        self.strength
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Twist {
    pub radius: f64,
    /// Angle reached at either end of the intensity scale, in radians.
    pub max_angle: f64,
    pub angle: f64,
    pub offset: Point,
}

impl NativeControl for Twist {
    fn apply_intensity(&mut self, level: f64) {
        self.angle = signed_bipolar(level) * self.max_angle;
    }

    fn magnitude(&self) -> f64 {
        self.angle
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Shockwave {
    pub center: Point,
    pub amplitude: f64,
    pub wavelength: f64,
    pub speed: f64,
    pub brightness: f64,
    /// Negative means unbounded.
    pub radius: f64,
    pub time: f64,
}

impl NativeControl for Shockwave {
    fn apply_intensity(&mut self, level: f64) {
        self.amplitude = linear_range(level, 0.0, 60.0);
    }

    fn magnitude(&self) -> f64 {
        self.amplitude
    }

    fn advance(&mut self, dt: f64) {
        self.time += dt;
        // Restart once the ring has left a bounded radius.
        if self.radius > 0.0 && self.time * self.speed > self.radius {
            self.time = 0.0;
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Reflection {
    pub mirror: bool,
    pub boundary: f64,
    pub amplitude: [f64; 2],
    pub wavelength: [f64; 2],
    pub alpha: [f64; 2],
    pub time: f64,
}

impl NativeControl for Reflection {
    fn apply_intensity(&mut self, level: f64) {
        self.amplitude[1] = linear_range(level, 0.0, 40.0);
    }

    fn magnitude(&self) -> f64 {
        self.amplitude[1]
    }

    fn advance(&mut self, dt: f64) {
        self.time += dt;
    }
}

/// Displacement-map distortion. Base displacement instances are additionally steered by the
/// pointer coupling, which writes `offset` and `scale` directly.
#[derive(Clone, Debug, PartialEq)]
pub struct Displacement {
    /// `None` once disposed.
    pub texture: Option<TextureHandle>,
    pub scale: Vec2,
    pub offset: Vec2,
    pub wrap: bool,
}

impl Displacement {
    pub fn strength(&self) -> f64 {
        self.scale.x.max(self.scale.y)
    }
}

impl NativeControl for Displacement {
    fn apply_intensity(&mut self, level: f64) {
        let s = linear_range(level, 0.0, 100.0);
        self.scale = Vec2::new(s, s);
    }

    fn magnitude(&self) -> f64 {
        self.strength()
    }

    fn texture(&self) -> Option<&TextureHandle> {
        self.texture.as_ref()
    }

    fn release_texture(&mut self) {
        self.texture = None;
    }
}

pub(crate) fn build(
    kind: EffectKind,
    bag: &ParamBag<'_>,
    resources: &mut ResourceCache,
) -> SlideFxResult<NativeEffect> {
    let fx = match kind {
        EffectKind::BulgePinch => NativeEffect::BulgePinch(BulgePinch {
            center: bag.point_or("center", Point::new(0.5, 0.5))?,
            radius: bag.f64_in("radius", 100.0, 0.0, f64::MAX)?,
            strength: bag.f64_in("strength", 1.0, -1.0, 1.0)?,
        }),
        EffectKind::Twist => NativeEffect::Twist(Twist {
            radius: bag.f64_in("radius", 200.0, 0.0, f64::MAX)?,
            max_angle: bag.f64_in("max_angle", 4.0, 0.0, 100.0)?,
            angle: bag.f64_or("angle", 4.0)?,
            offset: bag.point_or("offset", Point::ORIGIN)?,
        }),
        EffectKind::Shockwave => NativeEffect::Shockwave(Shockwave {
            center: bag.point_or("center", Point::new(0.5, 0.5))?,
            amplitude: bag.f64_in("amplitude", 30.0, 0.0, 1000.0)?,
            wavelength: bag.f64_in("wavelength", 160.0, 0.0, f64::MAX)?,
            speed: bag.f64_in("speed", 500.0, 0.0, f64::MAX)?,
            brightness: bag.f64_in("brightness", 1.0, 0.0, 10.0)?,
            radius: bag.f64_or("radius", -1.0)?,
            time: bag.f64_in("time", 0.0, 0.0, f64::MAX)?,
        }),
        EffectKind::Reflection => {
            let amp = bag.vec2_or("amplitude", Vec2::new(0.0, 20.0))?;
            let wave = bag.vec2_or("wavelength", Vec2::new(30.0, 100.0))?;
            let alpha = bag.vec2_or("alpha", Vec2::new(1.0, 1.0))?;
            NativeEffect::Reflection(Reflection {
                mirror: bag.bool_or("mirror", true)?,
                boundary: bag.f64_in("boundary", 0.5, 0.0, 1.0)?,
                amplitude: [amp.x, amp.y],
                wavelength: [wave.x, wave.y],
                alpha: [alpha.x, alpha.y],
                time: 0.0,
            })
        }
        EffectKind::Displacement => {
            let scale = bag.f64_in("scale", 50.0, 0.0, 1000.0)?;
            NativeEffect::Displacement(Displacement {
                texture: Some(resources.request(bag.required_str("texture")?)?),
                scale: Vec2::new(scale, scale),
                offset: bag.vec2_or("offset", Vec2::ZERO)?,
                wrap: bag.bool_or("wrap", true)?,
            })
        }
        other => return Err(unsupported(other)),
    };
    Ok(fx)
}
