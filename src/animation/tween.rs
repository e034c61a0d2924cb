use std::time::Duration;

use crate::{
    animation::ease::Ease,
    foundation::core::{Point, Vec2},
};

pub trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

impl Lerp for Point {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

/// A single timed interpolation between two values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween<T> {
    pub from: T,
    pub to: T,
    pub start: Duration,
    pub duration: Duration,
    pub ease: Ease,
}

impl<T> Tween<T>
where
    T: Lerp + Copy,
{
    pub fn new(from: T, to: T, start: Duration, duration: Duration, ease: Ease) -> Self {
        Self {
            from,
            to,
            start,
            duration,
            ease,
        }
    }

    /// Linear progress in `[0, 1]`; zero-length tweens are complete immediately.
    pub fn progress(&self, now: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.start).as_secs_f64();
        (elapsed / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    pub fn sample(&self, now: Duration) -> T {
        let p = self.progress(now);
        if p >= 1.0 {
            return self.to;
        }
        T::lerp(&self.from, &self.to, self.ease.apply(p))
    }

    pub fn is_finished(&self, now: Duration) -> bool {
        self.progress(now) >= 1.0
    }

    pub fn end(&self) -> Duration {
        self.start + self.duration
    }
}

/// An animated property. Starting a new tween supersedes the running one from its
/// current sampled value, so overlapping animations never race.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TweenSlot<T> {
    value: T,
    active: Option<Tween<T>>,
}

impl<T> TweenSlot<T>
where
    T: Lerp + Copy,
{
    pub fn new(value: T) -> Self {
        Self {
            value,
            active: None,
        }
    }

    pub fn value(&self) -> T {
        self.value
    }

    /// Value at `now` without advancing the slot.
    pub fn peek(&self, now: Duration) -> T {
        match &self.active {
            Some(tw) => tw.sample(now),
            None => self.value,
        }
    }

    /// Where the slot is heading (its current value when idle).
    pub fn target(&self) -> T {
        match &self.active {
            Some(tw) => tw.to,
            None => self.value,
        }
    }

    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    /// Jumps to `value`, cancelling any running tween.
    pub fn set(&mut self, value: T) {
        self.active = None;
        self.value = value;
    }

    pub fn animate_to(&mut self, to: T, now: Duration, duration: Duration, ease: Ease) {
        let from = self.peek(now);
        self.value = from;
        self.active = Some(Tween::new(from, to, now, duration, ease));
    }

    /// Cancels the running tween, freezing the property at its value at `now`.
    pub fn hold(&mut self, now: Duration) {
        self.value = self.peek(now);
        self.active = None;
    }

    /// Samples at `now`, retiring the tween once complete.
    pub fn tick(&mut self, now: Duration) -> T {
        if let Some(tw) = self.active {
            self.value = tw.sample(now);
            if tw.is_finished(now) {
                self.active = None;
            }
        }
        self.value
    }
}

impl<T> Default for TweenSlot<T>
where
    T: Lerp + Copy + Default,
{
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
