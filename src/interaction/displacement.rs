//! Pointer- and idle-driven coupling for the two base displacement effects.
//!
//! Each channel runs its own small state machine:
//!
//! * `Idle`: strength 0, nothing tracked.
//! * `Tracking`: the offset eases toward the pointer on every move.
//! * `Amplifying`: hover-enter ramps strength toward the channel default; any pointer motion
//!   pushes the idle deadline back.
//! * `Decaying`: after hover-leave (plus a short delay) or an idle timeout, strength ramps
//!   back to 0 from wherever it currently is.

use std::time::Duration;

use smallvec::SmallVec;

use crate::{
    animation::{ease::Ease, tween::TweenSlot},
    effects::{instance::EffectHandle, manager::EffectLifecycleManager},
    foundation::core::{Point, Size, Vec2},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplacementPhase {
    Idle,
    Tracking,
    Amplifying,
    Decaying,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplacementSettings {
    /// Strength reached at the end of a hover ramp.
    pub default_strength: f64,
    /// Smoothing duration for offset tweens, shared by both channels.
    pub smoothing: Duration,
    pub ramp: Duration,
    pub idle_timeout: Duration,
    pub leave_delay: Duration,
    pub ease: Ease,
    /// Fraction of the pointer's offset from the viewport centre the map follows.
    pub follow: f64,
}

impl Default for DisplacementSettings {
    fn default() -> Self {
        Self {
            default_strength: 30.0,
            smoothing: Duration::from_millis(140),
            ramp: Duration::from_millis(500),
            idle_timeout: Duration::from_secs(3),
            leave_delay: Duration::from_millis(200),
            ease: Ease::OutCubic,
            follow: 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChannelSample {
    pub offset: Vec2,
    pub strength: f64,
}

#[derive(Clone, Debug)]
pub struct DisplacementChannel {
    handle: EffectHandle,
    settings: DisplacementSettings,
    phase: DisplacementPhase,
    offset: TweenSlot<Vec2>,
    strength: TweenSlot<f64>,
    inside: bool,
    last_motion: Duration,
    idle_deadline: Option<Duration>,
    decay_at: Option<Duration>,
}

impl DisplacementChannel {
    pub fn new(handle: EffectHandle, settings: DisplacementSettings) -> Self {
        Self {
            handle,
            settings,
            phase: DisplacementPhase::Idle,
            offset: TweenSlot::new(Vec2::ZERO),
            strength: TweenSlot::new(0.0),
            inside: false,
            last_motion: Duration::ZERO,
            idle_deadline: None,
            decay_at: None,
        }
    }

    pub fn handle(&self) -> EffectHandle {
        self.handle
    }

    pub fn phase(&self) -> DisplacementPhase {
        self.phase
    }

    pub fn settings(&self) -> &DisplacementSettings {
        &self.settings
    }

    pub fn is_inside(&self) -> bool {
        self.inside
    }

    pub fn idle_deadline(&self) -> Option<Duration> {
        self.idle_deadline
    }

    /// Strength as of the last tick.
    pub fn strength(&self) -> f64 {
        self.strength.value()
    }

    pub fn offset(&self) -> Vec2 {
        self.offset.value()
    }

    fn amplify(&mut self, now: Duration) {
        self.phase = DisplacementPhase::Amplifying;
        self.decay_at = None;
        self.idle_deadline = Some(now + self.settings.idle_timeout);
        self.strength.animate_to(
            self.settings.default_strength,
            now,
            self.settings.ramp,
            self.settings.ease,
        );
    }

    fn decay(&mut self, at: Duration) {
        self.phase = DisplacementPhase::Decaying;
        self.idle_deadline = None;
        self.decay_at = None;
        self.strength
            .animate_to(0.0, at, self.settings.ramp, self.settings.ease);
    }

    pub fn pointer_enter(&mut self, now: Duration) {
        self.inside = true;
        self.last_motion = now;
        self.amplify(now);
    }

    /// Freezes any ramp-up in flight; the ramp-down starts after the leave delay.
    pub fn pointer_leave(&mut self, now: Duration) {
        self.inside = false;
        self.last_motion = now;
        self.strength.hold(now);
        self.idle_deadline = None;
        self.phase = DisplacementPhase::Decaying;
        self.decay_at = Some(now + self.settings.leave_delay);
    }

    /// `offset` is the pointer's displacement from the viewport centre, in pixels.
    pub fn pointer_move(&mut self, now: Duration, offset: Vec2) {
        self.last_motion = now;
        self.offset.animate_to(
            offset * self.settings.follow,
            now,
            self.settings.smoothing,
            self.settings.ease,
        );
        match self.phase {
            DisplacementPhase::Amplifying => {
                self.idle_deadline = Some(now + self.settings.idle_timeout);
            }
            DisplacementPhase::Decaying if self.decay_at.is_some() => {}
            DisplacementPhase::Idle | DisplacementPhase::Tracking | DisplacementPhase::Decaying
                if self.inside =>
            {
                self.amplify(now);
            }
            DisplacementPhase::Idle => self.phase = DisplacementPhase::Tracking,
            DisplacementPhase::Tracking | DisplacementPhase::Decaying => {}
        }
    }

    /// Advances timers and tweens to `now`.
    pub fn tick(&mut self, now: Duration) -> ChannelSample {
        if let Some(at) = self.decay_at
            && now >= at
        {
            self.decay(at);
        }
        if self.phase == DisplacementPhase::Amplifying
            && let Some(deadline) = self.idle_deadline
            && now >= deadline
        {
            tracing::debug!(handle = ?self.handle, "displacement idle timeout");
            self.decay(deadline);
        }

        let offset = self.offset.tick(now);
        let mut strength = self.strength.tick(now);

        if !self.inside && now.saturating_sub(self.last_motion) >= self.settings.idle_timeout {
            self.strength.set(0.0);
            strength = 0.0;
        }
        if self.phase == DisplacementPhase::Decaying
            && self.decay_at.is_none()
            && !self.strength.is_animating()
            && strength == 0.0
        {
            self.phase = if self.inside {
                DisplacementPhase::Tracking
            } else {
                DisplacementPhase::Idle
            };
        }
        ChannelSample { offset, strength }
    }
}

/// Background channel plus the optional cursor channel.
#[derive(Clone, Debug)]
pub struct DisplacementCoupling {
    background: DisplacementChannel,
    cursor: Option<DisplacementChannel>,
}

impl DisplacementCoupling {
    pub fn new(background: DisplacementChannel, cursor: Option<DisplacementChannel>) -> Self {
        Self { background, cursor }
    }

    pub fn background(&self) -> &DisplacementChannel {
        &self.background
    }

    pub fn cursor(&self) -> Option<&DisplacementChannel> {
        self.cursor.as_ref()
    }

    /// Base effect handles in stack order: background first.
    pub fn handles(&self) -> SmallVec<[EffectHandle; 2]> {
        let mut out = SmallVec::new();
        out.push(self.background.handle());
        if let Some(c) = &self.cursor {
            out.push(c.handle());
        }
        out
    }

    fn channels_mut(&mut self) -> impl Iterator<Item = &mut DisplacementChannel> {
        std::iter::once(&mut self.background).chain(self.cursor.as_mut())
    }

    pub fn pointer_enter(&mut self, now: Duration) {
        self.channels_mut().for_each(|c| c.pointer_enter(now));
    }

    pub fn pointer_leave(&mut self, now: Duration) {
        self.channels_mut().for_each(|c| c.pointer_leave(now));
    }

    pub fn pointer_move(&mut self, now: Duration, pointer: Point, viewport: Size) {
        let centre = Point::new(viewport.width * 0.5, viewport.height * 0.5);
        let offset = pointer - centre;
        self.channels_mut().for_each(|c| c.pointer_move(now, offset));
    }

    /// Advances both channels and writes their offset/strength into the effect instances.
    pub fn tick(&mut self, now: Duration, effects: &mut EffectLifecycleManager) {
        for channel in self.channels_mut() {
            let sample = channel.tick(now);
            if let Some(instance) = effects.instance_mut(channel.handle()) {
                instance.set_displacement(sample.offset, sample.strength);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/displacement.rs"]
mod tests;
