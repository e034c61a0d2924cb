use std::time::Duration;

use crate::{
    animation::{ease::Ease, tween::Tween},
    foundation::error::{SlideFxError, SlideFxResult, TransitionRejection},
    scene::graph::{NodeId, Scene},
};

/// Scene nodes of one slide.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlideNodes {
    pub image: NodeId,
    pub caption: NodeId,
    pub base_scale: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionSettings {
    pub duration: Duration,
    pub ease: Ease,
    /// `k`: incoming slides start at `base * (1 + k)`, outgoing ones end there.
    pub scale_intensity: f64,
}

impl Default for TransitionSettings {
    fn default() -> Self {
        Self {
            duration: Duration::from_secs(1),
            ease: Ease::InOutQuad,
            scale_intensity: 0.30,
        }
    }
}

/// Emitted by [`TransitionEngine::tick`] on the frame a crossfade completes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionOutcome {
    pub from: usize,
    pub to: usize,
    pub finished_at: Duration,
}

#[derive(Clone, Copy, Debug)]
struct Flight {
    from: usize,
    to: usize,
    fade_out: Tween<f64>,
    fade_in: Tween<f64>,
    grow_out: Tween<f64>,
    shrink_in: Tween<f64>,
}

impl Flight {
    fn end(&self) -> Duration {
        self.fade_in.end()
    }
}

/// Crossfade/scale state machine over an ordered set of slides.
///
/// A request while another transition is in flight is rejected; the engine never retargets
/// or queues.
#[derive(Debug)]
pub struct TransitionEngine {
    slides: Vec<SlideNodes>,
    settings: TransitionSettings,
    current: usize,
    flight: Option<Flight>,
    settle: Option<Tween<f64>>,
}

impl TransitionEngine {
    pub fn new(slides: Vec<SlideNodes>, settings: TransitionSettings) -> Self {
        Self {
            slides,
            settings,
            current: 0,
            flight: None,
            settle: None,
        }
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn is_transitioning(&self) -> bool {
        self.flight.is_some()
    }

    /// Target of the in-flight transition, if any.
    pub fn in_flight_target(&self) -> Option<usize> {
        self.flight.map(|f| f.to)
    }

    pub fn settings(&self) -> &TransitionSettings {
        &self.settings
    }

    pub fn slide(&self, index: usize) -> Option<&SlideNodes> {
        self.slides.get(index)
    }

    pub fn current_slide(&self) -> Option<&SlideNodes> {
        self.slides.get(self.current)
    }

    /// Puts every slide at rest: the current one visible at base scale, the rest hidden.
    pub fn install(&self, scene: &mut Scene) {
        self.settle_all(scene, self.current);
    }

    fn settle_all(&self, scene: &mut Scene, visible: usize) {
        for (i, s) in self.slides.iter().enumerate() {
            let opacity = if i == visible { 1.0 } else { 0.0 };
            scene.set_opacity(s.image, opacity);
            scene.set_opacity(s.caption, opacity);
            scene.set_scale(s.image, s.base_scale);
            scene.set_scale(s.caption, 1.0);
        }
    }

    fn check(&self, next: usize) -> Result<(), TransitionRejection> {
        if self.slides.is_empty() {
            return Err(TransitionRejection::Empty);
        }
        if next >= self.slides.len() {
            return Err(TransitionRejection::OutOfRange);
        }
        if self.flight.is_some() {
            return Err(TransitionRejection::InFlight);
        }
        if next == self.current {
            return Err(TransitionRejection::AlreadyCurrent);
        }
        Ok(())
    }

    /// Starts a crossfade from the current slide to `next`.
    ///
    /// All four sub-animations start at `now` and share duration and easing. Rejected
    /// requests leave every piece of state untouched.
    #[tracing::instrument(skip_all, fields(requested = next, current = self.current))]
    pub fn transition_to(&mut self, next: usize, now: Duration, scene: &mut Scene) -> SlideFxResult<()> {
        if let Err(reason) = self.check(next) {
            tracing::debug!(%reason, "transition rejected");
            return Err(SlideFxError::transition(next, self.slides.len(), reason));
        }

        let from = self.current;
        let s = self.settings;
        let k = s.scale_intensity;
        let out_base = self.slides[from].base_scale;
        let in_base = self.slides[next].base_scale;
        let out_start = scene.scale(self.slides[from].image).unwrap_or(out_base);

        self.settle = None;
        let incoming = self.slides[next];
        scene.set_opacity(incoming.image, 0.0);
        scene.set_opacity(incoming.caption, 0.0);
        scene.set_scale(incoming.image, in_base * (1.0 + k));
        scene.set_scale(incoming.caption, 1.0 + k);

        self.flight = Some(Flight {
            from,
            to: next,
            fade_out: Tween::new(1.0, 0.0, now, s.duration, s.ease),
            fade_in: Tween::new(0.0, 1.0, now, s.duration, s.ease),
            grow_out: Tween::new(out_start, out_base * (1.0 + k), now, s.duration, s.ease),
            shrink_in: Tween::new(in_base * (1.0 + k), in_base, now, s.duration, s.ease),
        });
        tracing::debug!(from, to = next, "transition started");
        Ok(())
    }

    pub fn next(&mut self, now: Duration, scene: &mut Scene) -> SlideFxResult<()> {
        let len = self.slides.len().max(1);
        self.transition_to((self.current + 1) % len, now, scene)
    }

    pub fn previous(&mut self, now: Duration, scene: &mut Scene) -> SlideFxResult<()> {
        let len = self.slides.len().max(1);
        self.transition_to((self.current + len - 1) % len, now, scene)
    }

    /// Samples the running animations into the scene. Returns the outcome on the frame the
    /// crossfade completes.
    pub fn tick(&mut self, now: Duration, scene: &mut Scene) -> Option<TransitionOutcome> {
        if let Some(tw) = self.settle {
            if let Some(s) = self.slides.get(self.current) {
                scene.set_scale(s.image, tw.sample(now));
            }
            if tw.is_finished(now) {
                self.settle = None;
            }
        }

        let flight = self.flight?;
        if now < flight.end() {
            let out = self.slides[flight.from];
            let inc = self.slides[flight.to];
            let fade_out = flight.fade_out.sample(now);
            let fade_in = flight.fade_in.sample(now);
            let grow = flight.grow_out.sample(now);
            let shrink = flight.shrink_in.sample(now);
            scene.set_opacity(out.image, fade_out);
            scene.set_opacity(out.caption, fade_out);
            scene.set_opacity(inc.image, fade_in);
            scene.set_opacity(inc.caption, fade_in);
            scene.set_scale(out.image, grow);
            scene.set_scale(out.caption, grow / out.base_scale);
            scene.set_scale(inc.image, shrink);
            scene.set_scale(inc.caption, shrink / inc.base_scale);
            return None;
        }

        self.flight = None;
        self.current = flight.to;
        self.settle_all(scene, flight.to);
        tracing::debug!(from = flight.from, to = flight.to, "transition complete");
        Some(TransitionOutcome {
            from: flight.from,
            to: flight.to,
            finished_at: now,
        })
    }

    /// Live drag preview on the current slide. Ignored while a transition is in flight.
    pub fn preview_scale(&mut self, scale: f64, scene: &mut Scene) -> bool {
        if self.flight.is_some() || !scale.is_finite() {
            return false;
        }
        let Some(s) = self.slides.get(self.current) else {
            return false;
        };
        self.settle = None;
        scene.set_scale(s.image, scale);
        true
    }

    /// Animates the current slide back to its base scale after a cancelled drag.
    pub fn settle_preview(&mut self, now: Duration, scene: &Scene) {
        if self.flight.is_some() {
            return;
        }
        let Some(s) = self.slides.get(self.current) else {
            return;
        };
        let from = scene.scale(s.image).unwrap_or(s.base_scale);
        let st = self.settings;
        self.settle = Some(Tween::new(from, s.base_scale, now, st.duration, st.ease));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transition/engine.rs"]
mod tests;
