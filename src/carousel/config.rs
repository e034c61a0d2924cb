use std::time::Duration;

use crate::{
    animation::ease::Ease,
    foundation::{
        core::duration_from_secs,
        error::{SlideFxError, SlideFxResult},
    },
    interaction::{displacement::DisplacementSettings, parallax::ParallaxSettings, throttle::ThrottleStrategy},
    transition::engine::TransitionSettings,
};

/// Native strength units per unit of `cursor_scale_intensity`.
const CURSOR_STRENGTH_SCALE: f64 = 100.0;

/// Numeric tuning of a carousel. Durations are in seconds.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    pub cursor_scale_intensity: f64,
    /// Smoothing of pointer-driven offset tweens.
    pub cursor_momentum: f64,
    pub transition_scale_intensity: f64,
    pub swipe_scale_intensity: f64,
    pub idle_timeout: f64,
    pub max_container_shift_fraction: f64,
    pub transition_duration: f64,
    pub transition_ease: Ease,
    pub swipe_threshold_fraction: f64,
    pub cursor_displacement_enabled: bool,
    pub background_displacement_strength: f64,
    pub displacement_ramp: f64,
    pub hover_leave_delay: f64,
    pub caption_tilt_deg: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autoplay_interval: Option<f64>,
    pub throttle: ThrottleStrategy,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            cursor_scale_intensity: 0.65,
            cursor_momentum: 0.14,
            transition_scale_intensity: 0.30,
            swipe_scale_intensity: 0.25,
            idle_timeout: 3.0,
            max_container_shift_fraction: 0.05,
            transition_duration: 1.0,
            transition_ease: Ease::InOutQuad,
            swipe_threshold_fraction: 0.20,
            cursor_displacement_enabled: true,
            background_displacement_strength: 30.0,
            displacement_ramp: 0.5,
            hover_leave_delay: 0.2,
            caption_tilt_deg: 6.0,
            autoplay_interval: None,
            throttle: ThrottleStrategy::default(),
        }
    }
}

fn non_negative(name: &str, v: f64) -> SlideFxResult<()> {
    if !v.is_finite() || v < 0.0 {
        return Err(SlideFxError::validation(format!(
            "{name} must be finite and >= 0 (got {v})"
        )));
    }
    Ok(())
}

fn positive(name: &str, v: f64) -> SlideFxResult<()> {
    non_negative(name, v)?;
    if v == 0.0 {
        return Err(SlideFxError::validation(format!("{name} must be > 0")));
    }
    Ok(())
}

fn fraction(name: &str, v: f64) -> SlideFxResult<()> {
    non_negative(name, v)?;
    if v > 1.0 {
        return Err(SlideFxError::validation(format!(
            "{name} must be within [0, 1] (got {v})"
        )));
    }
    Ok(())
}

impl CarouselConfig {
    pub fn from_json_str(s: &str) -> SlideFxResult<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SlideFxResult<()> {
        non_negative("cursor_scale_intensity", self.cursor_scale_intensity)?;
        non_negative("cursor_momentum", self.cursor_momentum)?;
        non_negative("transition_scale_intensity", self.transition_scale_intensity)?;
        non_negative("swipe_scale_intensity", self.swipe_scale_intensity)?;
        non_negative("background_displacement_strength", self.background_displacement_strength)?;
        non_negative("hover_leave_delay", self.hover_leave_delay)?;
        non_negative("caption_tilt_deg", self.caption_tilt_deg)?;
        positive("idle_timeout", self.idle_timeout)?;
        positive("transition_duration", self.transition_duration)?;
        positive("displacement_ramp", self.displacement_ramp)?;
        fraction("max_container_shift_fraction", self.max_container_shift_fraction)?;
        fraction("swipe_threshold_fraction", self.swipe_threshold_fraction)?;
        if let Some(interval) = self.autoplay_interval {
            positive("autoplay_interval", interval)?;
        }
        self.throttle.validate()
    }

    pub fn transition_settings(&self) -> TransitionSettings {
        TransitionSettings {
            duration: duration_from_secs(self.transition_duration),
            ease: self.transition_ease,
            scale_intensity: self.transition_scale_intensity,
        }
    }

    fn displacement_settings(&self, default_strength: f64) -> DisplacementSettings {
        DisplacementSettings {
            default_strength,
            smoothing: duration_from_secs(self.cursor_momentum),
            ramp: duration_from_secs(self.displacement_ramp),
            idle_timeout: duration_from_secs(self.idle_timeout),
            leave_delay: duration_from_secs(self.hover_leave_delay),
            ..DisplacementSettings::default()
        }
    }

    pub fn background_settings(&self) -> DisplacementSettings {
        self.displacement_settings(self.background_displacement_strength)
    }

    pub fn cursor_settings(&self) -> DisplacementSettings {
        self.displacement_settings(self.cursor_scale_intensity * CURSOR_STRENGTH_SCALE)
    }

    pub fn parallax_settings(&self) -> ParallaxSettings {
        ParallaxSettings {
            max_shift_fraction: self.max_container_shift_fraction,
            tilt_deg: self.caption_tilt_deg,
            smoothing: duration_from_secs(self.cursor_momentum),
            ..ParallaxSettings::default()
        }
    }

    pub fn autoplay(&self) -> Option<Duration> {
        self.autoplay_interval.map(duration_from_secs)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/carousel/config.rs"]
mod tests;
