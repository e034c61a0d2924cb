use std::time::Duration;

use crate::{
    animation::{ease::Ease, tween::TweenSlot},
    foundation::core::{Point, Size, Vec2, normalized_from_center},
    scene::graph::{NodeId, Scene},
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParallaxSettings {
    /// Maximum container shift as a fraction of the viewport, per axis.
    pub max_shift_fraction: f64,
    /// Maximum caption tilt in degrees.
    pub tilt_deg: f64,
    pub smoothing: Duration,
    pub ease: Ease,
}

impl Default for ParallaxSettings {
    fn default() -> Self {
        Self {
            max_shift_fraction: 0.05,
            tilt_deg: 6.0,
            smoothing: Duration::from_millis(140),
            ease: Ease::OutCubic,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParallaxSample {
    pub container_offset: Vec2,
    pub caption_rotation_deg: f64,
    /// Skew in degrees.
    pub caption_skew: Vec2,
}

/// Pointer-driven container shift and caption tilt.
#[derive(Clone, Debug)]
pub struct Parallax {
    settings: ParallaxSettings,
    shift: TweenSlot<Vec2>,
    /// `x`: rotation, `y`: vertical skew, both in degrees.
    tilt: TweenSlot<Vec2>,
}

impl Parallax {
    pub fn new(settings: ParallaxSettings) -> Self {
        Self {
            settings,
            shift: TweenSlot::new(Vec2::ZERO),
            tilt: TweenSlot::new(Vec2::ZERO),
        }
    }

    pub fn pointer_move(&mut self, now: Duration, pointer: Point, viewport: Size) {
        let n = normalized_from_center(pointer, viewport);
        let s = &self.settings;
        let shift = Vec2::new(
            -n.x * s.max_shift_fraction * viewport.width,
            -n.y * s.max_shift_fraction * viewport.height,
        );
        let tilt = Vec2::new(n.x * s.tilt_deg, n.y * s.tilt_deg);
        self.shift.animate_to(shift, now, s.smoothing, s.ease);
        self.tilt.animate_to(tilt, now, s.smoothing, s.ease);
    }

    /// Relaxes shift and tilt back to neutral.
    pub fn pointer_leave(&mut self, now: Duration) {
        let s = self.settings;
        self.shift.animate_to(Vec2::ZERO, now, s.smoothing, s.ease);
        self.tilt.animate_to(Vec2::ZERO, now, s.smoothing, s.ease);
    }

    pub fn tick(&mut self, now: Duration) -> ParallaxSample {
        let shift = self.shift.tick(now);
        let tilt = self.tilt.tick(now);
        ParallaxSample {
            container_offset: shift,
            caption_rotation_deg: tilt.x,
            caption_skew: Vec2::new(0.0, tilt.y),
        }
    }

    /// Ticks and writes the result onto the container and every caption currently on screen.
    pub fn apply(&mut self, now: Duration, scene: &mut Scene, container: NodeId, captions: &[NodeId]) {
        let sample = self.tick(now);
        if let Some(node) = scene.get_mut(container) {
            node.position = Point::ORIGIN + sample.container_offset;
        }
        for &caption in captions {
            if let Some(node) = scene.get_mut(caption) {
                node.rotation_deg = sample.caption_rotation_deg;
                node.skew = sample.caption_skew;
            }
        }
    }

    /// Puts a caption that left the screen back to zero tilt.
    pub fn release_caption(scene: &mut Scene, caption: NodeId) {
        if let Some(node) = scene.get_mut(caption) {
            node.rotation_deg = 0.0;
            node.skew = Vec2::ZERO;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/parallax.rs"]
mod tests;
