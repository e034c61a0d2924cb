use slotmap::new_key_type;

use crate::{
    assets::cache::TextureHandle,
    effects::{
        catalog::EffectKind,
        descriptor::EffectDescriptor,
        intensity::clamp_level,
        native::{Displacement, NativeControl, NativeEffect},
    },
    foundation::core::Vec2,
};

new_key_type! {
    /// Opaque handle to a live effect instance owned by the lifecycle manager.
    pub struct EffectHandle;
}

/// Capability shared by every live effect.
pub trait EffectControl {
    /// Maps `level` (clamped to `[0, 10]`, NaN as 0) onto the native parameters.
    fn update_intensity(&mut self, level: f64);
    /// Restores the descriptor-implied state. Idempotent.
    fn reset(&mut self);
    /// Releases backend resources. Idempotent.
    fn dispose(&mut self);
}

/// Live, mutable effect compiled from one [`EffectDescriptor`].
#[derive(Clone, Debug)]
pub struct EffectInstance {
    kind: EffectKind,
    descriptor: EffectDescriptor,
    baseline: NativeEffect,
    live: NativeEffect,
    level: Option<f64>,
    disposed: bool,
}

impl EffectInstance {
    pub(crate) fn new(kind: EffectKind, descriptor: EffectDescriptor, baseline: NativeEffect) -> Self {
        Self {
            kind,
            descriptor,
            live: baseline.clone(),
            baseline,
            level: None,
            disposed: false,
        }
    }

    pub fn kind(&self) -> EffectKind {
        self.kind
    }

    pub fn descriptor(&self) -> &EffectDescriptor {
        &self.descriptor
    }

    /// Current native state.
    pub fn native(&self) -> &NativeEffect {
        &self.live
    }

    /// Descriptor-implied state that `reset` restores.
    pub fn baseline(&self) -> &NativeEffect {
        &self.baseline
    }

    /// Last applied level; `None` after a reset.
    pub fn level(&self) -> Option<f64> {
        self.level
    }

    pub fn magnitude(&self) -> f64 {
        self.live.magnitude()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn texture(&self) -> Option<&TextureHandle> {
        self.live.texture()
    }

    /// Per-frame evolution; a no-op for static kinds and after disposal.
    pub fn advance(&mut self, dt: f64) {
        if !self.disposed && dt > 0.0 {
            self.live.advance(dt);
        }
    }

    pub fn displacement(&self) -> Option<&Displacement> {
        match &self.live {
            NativeEffect::Displacement(d) => Some(d),
            _ => None,
        }
    }

    /// Steers a displacement instance directly. Returns false for other kinds.
    pub fn set_displacement(&mut self, offset: Vec2, strength: f64) -> bool {
        match &mut self.live {
            NativeEffect::Displacement(d) => {
                d.offset = offset;
                d.scale = Vec2::new(strength, strength);
                true
            }
            _ => false,
        }
    }
}

impl EffectControl for EffectInstance {
    fn update_intensity(&mut self, level: f64) {
        if self.disposed {
            return;
        }
        let level = clamp_level(level);
        self.live.apply_intensity(level);
        self.level = Some(level);
    }

    fn reset(&mut self) {
        if self.disposed {
            return;
        }
        self.live = self.baseline.clone();
        self.level = None;
    }

    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.live.release_texture();
        self.baseline.release_texture();
        self.disposed = true;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/instance.rs"]
mod tests;
