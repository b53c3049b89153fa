//! Rep counter configuration.
//!
//! Thresholds are validated eagerly at construction: an inconsistent
//! configuration (e.g. the down threshold at or above the up threshold)
//! is a fatal error, never a silent mis-count.

use repmeter_core::{CoreError, CoreResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for [`RepCounter`](crate::RepCounter).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RepCounterConfig {
    /// Smoothed angle above this is the extended (up) position, degrees.
    pub up_threshold_deg: f32,
    /// Smoothed angle below this is the bent (down) position, degrees.
    pub down_threshold_deg: f32,
    /// Extra margin beyond each threshold required before accepting a
    /// state change, degrees.
    pub hysteresis_deg: f32,
    /// Consecutive frames a pending transition must hold before it is
    /// accepted.
    pub min_frames_in_state: u32,
    /// Minimum elapsed time between accepted state changes, milliseconds.
    pub min_cooldown_ms: u64,
    /// Minimum accumulated shoulder drop for a rep to qualify, pixels.
    pub min_depth_px: f32,
    /// Moving-average window for the angle and shoulder-height filters.
    pub smoothing_window: usize,
    /// Per-joint confidence floor for a side to qualify.
    pub min_joint_confidence: f32,
    /// Lower edge of the plausible counting-position angle band, degrees.
    pub min_position_angle_deg: f32,
    /// Upper edge of the plausible counting-position angle band, degrees.
    pub max_position_angle_deg: f32,
    /// Consecutive valid frames required before data reaches the smoother
    /// and state machine.
    pub min_valid_frames: u32,
}

impl Default for RepCounterConfig {
    fn default() -> Self {
        Self {
            up_threshold_deg: 140.0,
            down_threshold_deg: 110.0,
            hysteresis_deg: 8.0,
            min_frames_in_state: 3,
            min_cooldown_ms: 400,
            min_depth_px: 40.0,
            smoothing_window: 3,
            min_joint_confidence: 0.5,
            min_position_angle_deg: 50.0,
            max_position_angle_deg: 175.0,
            min_valid_frames: 5,
        }
    }
}

impl RepCounterConfig {
    /// Create a new builder.
    #[must_use]
    pub fn builder() -> RepCounterConfigBuilder {
        RepCounterConfigBuilder::new()
    }

    /// Validate internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Configuration`] when any threshold is out of
    /// range or the thresholds are mutually inconsistent.
    pub fn validate(&self) -> CoreResult<()> {
        if !(0.0..=180.0).contains(&self.up_threshold_deg)
            || !(0.0..=180.0).contains(&self.down_threshold_deg)
        {
            return Err(CoreError::configuration(
                "angle thresholds must lie in [0, 180] degrees",
            ));
        }
        if self.down_threshold_deg >= self.up_threshold_deg {
            return Err(CoreError::configuration(format!(
                "down_threshold_deg ({}) must be below up_threshold_deg ({})",
                self.down_threshold_deg, self.up_threshold_deg
            )));
        }
        if self.hysteresis_deg < 0.0 {
            return Err(CoreError::configuration("hysteresis_deg must be >= 0"));
        }
        if self.up_threshold_deg + self.hysteresis_deg >= 180.0 {
            return Err(CoreError::configuration(
                "up_threshold_deg + hysteresis_deg must stay below 180 degrees",
            ));
        }
        if self.down_threshold_deg - self.hysteresis_deg <= 0.0 {
            return Err(CoreError::configuration(
                "down_threshold_deg - hysteresis_deg must stay above 0 degrees",
            ));
        }
        if self.min_frames_in_state == 0 {
            return Err(CoreError::configuration("min_frames_in_state must be >= 1"));
        }
        if self.smoothing_window == 0 {
            return Err(CoreError::configuration("smoothing_window must be >= 1"));
        }
        if self.min_valid_frames == 0 {
            return Err(CoreError::configuration("min_valid_frames must be >= 1"));
        }
        if !(0.0..=1.0).contains(&self.min_joint_confidence) {
            return Err(CoreError::configuration(
                "min_joint_confidence must lie in [0, 1]",
            ));
        }
        if self.min_position_angle_deg >= self.max_position_angle_deg {
            return Err(CoreError::configuration(
                "min_position_angle_deg must be below max_position_angle_deg",
            ));
        }
        if self.min_depth_px < 0.0 {
            return Err(CoreError::configuration("min_depth_px must be >= 0"));
        }
        Ok(())
    }

    /// The post-hysteresis thresholds and timing parameters actually
    /// applied by the state machine, for external verification/display.
    #[must_use]
    pub fn effective_thresholds(&self) -> EffectiveThresholds {
        EffectiveThresholds {
            enter_down_below_deg: self.down_threshold_deg - self.hysteresis_deg,
            enter_up_above_deg: self.up_threshold_deg + self.hysteresis_deg,
            min_frames_in_state: self.min_frames_in_state,
            min_cooldown_ms: self.min_cooldown_ms,
            min_depth_px: self.min_depth_px,
            smoothing_window: self.smoothing_window,
        }
    }
}

/// Read-only view of the effective (post-hysteresis) transition
/// parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EffectiveThresholds {
    /// Up→Down requires the smoothed angle below this, degrees.
    pub enter_down_below_deg: f32,
    /// Down→Up requires the smoothed angle above this, degrees.
    pub enter_up_above_deg: f32,
    /// Consecutive frames a pending transition must hold.
    pub min_frames_in_state: u32,
    /// Minimum time between accepted transitions, milliseconds.
    pub min_cooldown_ms: u64,
    /// Minimum qualifying shoulder drop, pixels.
    pub min_depth_px: f32,
    /// Smoothing window in frames.
    pub smoothing_window: usize,
}

/// Builder for [`RepCounterConfig`].
#[derive(Debug, Default)]
pub struct RepCounterConfigBuilder {
    config: RepCounterConfig,
}

impl RepCounterConfigBuilder {
    /// Create a builder seeded with the defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: RepCounterConfig::default(),
        }
    }

    /// Set the up threshold in degrees.
    #[must_use]
    pub fn up_threshold_deg(mut self, deg: f32) -> Self {
        self.config.up_threshold_deg = deg;
        self
    }

    /// Set the down threshold in degrees.
    #[must_use]
    pub fn down_threshold_deg(mut self, deg: f32) -> Self {
        self.config.down_threshold_deg = deg;
        self
    }

    /// Set the hysteresis margin in degrees.
    #[must_use]
    pub fn hysteresis_deg(mut self, deg: f32) -> Self {
        self.config.hysteresis_deg = deg;
        self
    }

    /// Set the per-transition frame debounce.
    #[must_use]
    pub fn min_frames_in_state(mut self, frames: u32) -> Self {
        self.config.min_frames_in_state = frames;
        self
    }

    /// Set the transition cooldown in milliseconds.
    #[must_use]
    pub fn min_cooldown_ms(mut self, ms: u64) -> Self {
        self.config.min_cooldown_ms = ms;
        self
    }

    /// Set the qualifying shoulder-drop depth in pixels.
    #[must_use]
    pub fn min_depth_px(mut self, px: f32) -> Self {
        self.config.min_depth_px = px;
        self
    }

    /// Set the smoothing window in frames.
    #[must_use]
    pub fn smoothing_window(mut self, window: usize) -> Self {
        self.config.smoothing_window = window;
        self
    }

    /// Set the per-joint confidence floor.
    #[must_use]
    pub fn min_joint_confidence(mut self, confidence: f32) -> Self {
        self.config.min_joint_confidence = confidence;
        self
    }

    /// Set the plausible counting-position angle band in degrees.
    #[must_use]
    pub fn position_band_deg(mut self, min: f32, max: f32) -> Self {
        self.config.min_position_angle_deg = min;
        self.config.max_position_angle_deg = max;
        self
    }

    /// Set the warm-up streak length.
    #[must_use]
    pub fn min_valid_frames(mut self, frames: u32) -> Self {
        self.config.min_valid_frames = frames;
        self
    }

    /// Finish building. The result is not yet validated; validation
    /// happens in [`RepCounter::new`](crate::RepCounter::new) or via
    /// [`RepCounterConfig::validate`].
    #[must_use]
    pub fn build(self) -> RepCounterConfig {
        self.config
    }
}
