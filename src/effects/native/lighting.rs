use crate::{
    assets::cache::{ResourceCache, TextureHandle},
    effects::{
        catalog::EffectKind,
        intensity::linear_scalar,
        native::{NativeControl, NativeEffect, unsupported},
        params::ParamBag,
    },
    foundation::{core::Point, error::SlideFxResult},
};

#[derive(Clone, Debug, PartialEq)]
pub struct Godray {
    pub angle_deg: f64,
    pub gain: f64,
    pub lacunarity: f64,
    pub parallel: bool,
    pub center: Point,
    pub alpha: f64,
    pub time: f64,
}

impl NativeControl for Godray {
    fn apply_intensity(&mut self, level: f64) {
        self.gain = linear_scalar(level);
    }

    fn magnitude(&self) -> f64 {
        self.gain
    }

    fn advance(&mut self, dt: f64) {
        self.time += dt;
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LightMap {
    /// `None` once disposed.
    pub texture: Option<TextureHandle>,
    pub ambient: f64,
    pub alpha: f64,
}

impl NativeControl for LightMap {
    fn apply_intensity(&mut self, level: f64) {
        self.alpha = linear_scalar(level);
    }

    fn magnitude(&self) -> f64 {
        self.alpha
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
        EffectKind::Godray => NativeEffect::Godray(Godray {
            angle_deg: bag.f64_in("angle", 30.0, -90.0, 90.0)?,
            gain: bag.f64_in("gain", 0.5, 0.0, 1.0)?,
            lacunarity: bag.f64_in("lacunarity", 2.5, 0.0, 10.0)?,
            parallel: bag.bool_or("parallel", true)?,
            center: bag.point_or("center", Point::ORIGIN)?,
            alpha: bag.f64_in("alpha", 1.0, 0.0, 1.0)?,
            time: 0.0,
        }),
        EffectKind::LightMap => NativeEffect::LightMap(LightMap {
            texture: Some(resources.request(bag.required_str("texture")?)?),
            ambient: bag.f64_in("ambient", 0.0, 0.0, 1.0)?,
            alpha: bag.f64_in("alpha", 1.0, 0.0, 1.0)?,
        }),
        other => return Err(unsupported(other)),
    };
    Ok(fx)
}
