use crate::foundation::core::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwipeOutcome {
    /// Leftward past the threshold.
    Next,
    /// Rightward past the threshold.
    Previous,
    /// Too short; the preview springs back.
    Cancel,
}

/// Horizontal drag/swipe tracker shared by pointer-drag and touch input.
#[derive(Clone, Debug, PartialEq)]
pub struct SwipeGesture {
    threshold_fraction: f64,
    scale_intensity: f64,
    start: Option<Point>,
    current: Point,
}

impl SwipeGesture {
    pub fn new(threshold_fraction: f64, scale_intensity: f64) -> Self {
        Self {
            threshold_fraction,
            scale_intensity,
            start: None,
            current: Point::ORIGIN,
        }
    }

    pub fn is_active(&self) -> bool {
        self.start.is_some()
    }

    pub fn begin(&mut self, at: Point) {
        self.start = Some(at);
        self.current = at;
    }

    /// Returns the horizontal drag distance, or `None` when no gesture is active.
    pub fn update(&mut self, at: Point) -> Option<f64> {
        self.start?;
        self.current = at;
        Some(self.dx())
    }

    pub fn dx(&self) -> f64 {
        self.start.map(|s| self.current.x - s.x).unwrap_or(0.0)
    }

    /// Live preview scale: `base * (1 + min(|dx| / width, 1) * scale_intensity)`.
    pub fn live_scale(&self, base: f64, width: f64) -> f64 {
        if width <= 0.0 {
            return base;
        }
        let fraction = (self.dx().abs() / width).min(1.0);
        base * (1.0 + fraction * self.scale_intensity)
    }

    /// Ends the gesture. `None` when no gesture was active.
    pub fn release(&mut self, at: Point, width: f64) -> Option<SwipeOutcome> {
        self.start?;
        self.current = at;
        let dx = self.dx();
        self.start = None;
        if width > 0.0 && dx.abs() > self.threshold_fraction * width {
            Some(if dx < 0.0 {
                SwipeOutcome::Next
            } else {
                SwipeOutcome::Previous
            })
        } else {
            Some(SwipeOutcome::Cancel)
        }
    }

    pub fn cancel(&mut self) {
        self.start = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/gesture.rs"]
mod tests;
