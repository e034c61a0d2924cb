use std::{collections::VecDeque, time::Duration};

use crate::foundation::{
    core::secs,
    error::{SlideFxError, SlideFxResult},
};

const WINDOW: usize = 60;
const ADAPT_EVERY: Duration = Duration::from_secs(1);

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "strategy", rename_all = "kebab-case")]
pub enum ThrottleStrategy {
    FixedFps {
        fps: f64,
    },
    /// Re-evaluated once a second against the rolling frame rate: below `min_fps` the target
    /// drops 20%, above `max_fps` it rises 20%, always clamped to `[min_fps, max_fps]`.
    Adaptive {
        target_fps: f64,
        min_fps: f64,
        max_fps: f64,
    },
    /// High-priority frames always run; the rest are gated at `fps`.
    Priority {
        fps: f64,
    },
    None,
}

impl Default for ThrottleStrategy {
    fn default() -> Self {
        Self::Adaptive {
            target_fps: 60.0,
            min_fps: 30.0,
            max_fps: 60.0,
        }
    }
}

impl ThrottleStrategy {
    pub fn validate(&self) -> SlideFxResult<()> {
        let positive = |name: &str, v: f64| {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(SlideFxError::validation(format!(
                    "throttle {name} must be finite and > 0"
                )))
            }
        };
        match *self {
            Self::FixedFps { fps } | Self::Priority { fps } => positive("fps", fps),
            Self::Adaptive {
                target_fps,
                min_fps,
                max_fps,
            } => {
                positive("target_fps", target_fps)?;
                positive("min_fps", min_fps)?;
                positive("max_fps", max_fps)?;
                if min_fps > max_fps {
                    return Err(SlideFxError::validation(
                        "throttle min_fps must be <= max_fps",
                    ));
                }
                Ok(())
            }
            Self::None => Ok(()),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum FramePriority {
    Low,
    #[default]
    Normal,
    High,
}

/// Decides whether a frame's update work runs.
#[derive(Clone, Debug)]
pub struct FrameThrottler {
    strategy: ThrottleStrategy,
    target_fps: f64,
    last_frame: Option<Duration>,
    last_adapt: Option<Duration>,
    samples: VecDeque<f64>,
}

impl FrameThrottler {
    pub fn new(strategy: ThrottleStrategy) -> Self {
        let target_fps = match strategy {
            ThrottleStrategy::FixedFps { fps } | ThrottleStrategy::Priority { fps } => fps,
            ThrottleStrategy::Adaptive {
                target_fps,
                min_fps,
                max_fps,
            } => target_fps.max(min_fps).min(max_fps),
            ThrottleStrategy::None => f64::INFINITY,
        };
        Self {
            strategy,
            target_fps,
            last_frame: None,
            last_adapt: None,
            samples: VecDeque::with_capacity(WINDOW),
        }
    }

    pub fn strategy(&self) -> ThrottleStrategy {
        self.strategy
    }

    /// Current frame-rate ceiling; infinite for [`ThrottleStrategy::None`].
    pub fn target_fps(&self) -> f64 {
        self.target_fps
    }

    pub fn should_process(&mut self, now: Duration, priority: FramePriority) -> bool {
        match self.strategy {
            ThrottleStrategy::None => true,
            ThrottleStrategy::Priority { .. } if priority == FramePriority::High => {
                self.last_frame = Some(now);
                true
            }
            ThrottleStrategy::Adaptive { .. } => {
                self.adapt(now);
                self.gate(now)
            }
            ThrottleStrategy::FixedFps { .. } | ThrottleStrategy::Priority { .. } => {
                self.gate(now)
            }
        }
    }

    fn gate(&mut self, now: Duration) -> bool {
        if self.target_fps.is_nan() || self.target_fps <= 0.0 {
            return true;
        }
        let interval = Duration::try_from_secs_f64(1.0 / self.target_fps).unwrap_or(Duration::MAX);
        let due = match self.last_frame {
            None => true,
            Some(last) => now.saturating_sub(last) >= interval,
        };
        if due {
            self.last_frame = Some(now);
        }
        due
    }

    fn adapt(&mut self, now: Duration) {
        let ThrottleStrategy::Adaptive {
            min_fps, max_fps, ..
        } = self.strategy
        else {
            return;
        };
        let last = *self.last_adapt.get_or_insert(now);
        if now.saturating_sub(last) < ADAPT_EVERY || self.samples.is_empty() {
            return;
        }
        self.last_adapt = Some(now);

        let fps = self.current_fps();
        let before = self.target_fps;
        if fps < min_fps {
            self.target_fps = (self.target_fps * 0.8).max(min_fps).min(max_fps);
        } else if fps > max_fps {
            self.target_fps = (self.target_fps * 1.2).max(min_fps).min(max_fps);
        }
        if self.target_fps != before {
            tracing::debug!(from = before, to = self.target_fps, measured_fps = fps, "adaptive fps");
        }
    }

    fn average_cost(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().sum::<f64>() / self.samples.len() as f64
    }

    /// Records the time since the previous processed frame.
    pub fn frame_processed(&mut self, duration: Duration) {
        if self.samples.len() == WINDOW {
            self.samples.pop_front();
        }
        self.samples.push_back(secs(duration));
    }

    /// Rolling average over the last 60 recorded frames; 0 before any were recorded.
    pub fn current_fps(&self) -> f64 {
        let cost = self.average_cost();
        if cost > 0.0 { 1.0 / cost } else { 0.0 }
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }
}

impl Default for FrameThrottler {
    fn default() -> Self {
        Self::new(ThrottleStrategy::default())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/throttle.rs"]
mod tests;
