//! The rep-counting state machine.
//!
//! [`RepCounter`] owns the whole per-frame pipeline: angle estimation,
//! position validation, smoothing, and the three-state machine
//! (Unknown / Up / Down) that turns the smoothed signals into a
//! monotonically increasing count.
//!
//! A transition is accepted only when the smoothed angle clears the
//! threshold *plus* hysteresis, holds there for a configured number of
//! consecutive frames, and the cooldown since the previous transition
//! has elapsed. A Down→Up transition additionally checks the accumulated
//! shoulder drop against the minimum depth (live mode only); a shallow
//! rep completes the transition but does not increment the count.
//!
//! The live path ([`process_frame`](RepCounter::process_frame)) and the
//! scripted path ([`process_scripted_angle`](RepCounter::process_scripted_angle))
//! drive one shared transition function, parameterized by whether depth
//! qualification applies, so production and test behavior cannot diverge.

use repmeter_core::{CoreResult, PoseFrame, RepQuality, RepReading, RepState};

use crate::angle::AngleEstimator;
use crate::clock::{MonotonicClock, TimeSource};
use crate::config::{EffectiveThresholds, RepCounterConfig};
use crate::smoothing::MovingAverage;
use crate::validator::PositionValidator;

/// Which entry point has been feeding this counter.
///
/// Live and scripted input must not be interleaved on one instance
/// without an intervening [`RepCounter::reset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputMode {
    /// Joint frames via `process_frame`.
    Live,
    /// Raw angles via `process_scripted_angle`.
    Scripted,
}

/// Streaming rep counter over noisy joint measurements.
#[derive(Debug)]
pub struct RepCounter {
    config: RepCounterConfig,
    clock: Box<dyn TimeSource>,
    estimator: AngleEstimator,
    validator: PositionValidator,
    angle_filter: MovingAverage,
    shoulder_filter: MovingAverage,
    state: RepState,
    count: u32,
    /// Consecutive frames the pending transition's angle condition has held.
    pending_streak: u32,
    /// Time of the last accepted Up↔Down transition. `None` until the
    /// first one; the Unknown→{Up,Down} classification does not start
    /// the cooldown.
    last_transition_ms: Option<u64>,
    /// Zero-reference for depth measurement, set on the first admitted
    /// frame and kept until reset.
    baseline_shoulder_y: Option<f32>,
    /// Running maximum shoulder drop for the rep in progress, pixels.
    max_shoulder_drop_px: f32,
    last_quality: Option<RepQuality>,
    mode: Option<InputMode>,
}

impl RepCounter {
    /// Create a counter using the real monotonic clock.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the config is inconsistent
    /// (see [`RepCounterConfig::validate`]).
    pub fn new(config: RepCounterConfig) -> CoreResult<Self> {
        Self::with_time_source(config, Box::new(MonotonicClock::new()))
    }

    /// Create a counter with an injected time source.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the config is inconsistent.
    pub fn with_time_source(
        config: RepCounterConfig,
        clock: Box<dyn TimeSource>,
    ) -> CoreResult<Self> {
        config.validate()?;
        Ok(Self {
            estimator: AngleEstimator::new(config.min_joint_confidence),
            validator: PositionValidator::new(
                config.min_position_angle_deg,
                config.max_position_angle_deg,
                config.min_joint_confidence,
                config.min_valid_frames,
            ),
            angle_filter: MovingAverage::new(config.smoothing_window),
            shoulder_filter: MovingAverage::new(config.smoothing_window),
            state: RepState::Unknown,
            count: 0,
            pending_streak: 0,
            last_transition_ms: None,
            baseline_shoulder_y: None,
            max_shoulder_drop_px: 0.0,
            last_quality: None,
            mode: None,
            clock,
            config,
        })
    }

    /// Process one frame of joint input to completion.
    ///
    /// Frames that fail the confidence gate, the position band, or the
    /// warm-up streak are absorbed silently: no smoothing update, no
    /// state change, `in_position = false` in the returned reading.
    pub fn process_frame(&mut self, frame: &PoseFrame) -> RepReading {
        self.enter_mode(InputMode::Live);

        let sample = self.estimator.sample(frame);
        let admitted = self.validator.admit(sample.as_ref());
        if let (true, Some(sample)) = (admitted, sample) {
            self.advance(sample.angle_degrees, Some(sample.shoulder_y), true);
        }
        self.reading(admitted)
    }

    /// Feed one scripted angle value (deterministic test harness).
    ///
    /// Bypasses the estimator and validator: the frame is always in
    /// position, the warm-up streak is forced past its minimum, and the
    /// depth-qualification branch is disabled so every accepted Down→Up
    /// transition increments the count.
    pub fn process_scripted_angle(&mut self, angle_degrees: f32) -> RepReading {
        self.enter_mode(InputMode::Scripted);

        self.validator.force_warm();
        self.advance(angle_degrees, None, false);
        self.reading(true)
    }

    /// Clear count and all internal state back to construction-time
    /// defaults. Always succeeds; callable at any time.
    pub fn reset(&mut self) {
        self.validator.reset();
        self.angle_filter.clear();
        self.shoulder_filter.clear();
        self.state = RepState::Unknown;
        self.count = 0;
        self.pending_streak = 0;
        self.last_transition_ms = None;
        self.baseline_shoulder_y = None;
        self.max_shoulder_drop_px = 0.0;
        self.last_quality = None;
        self.mode = None;
        tracing::debug!("rep counter reset");
    }

    /// Cumulative validated rep count.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Current state machine state.
    #[must_use]
    pub fn state(&self) -> RepState {
        self.state
    }

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &RepCounterConfig {
        &self.config
    }

    /// The effective (post-hysteresis) thresholds and timing parameters,
    /// for external verification or display.
    #[must_use]
    pub fn effective_thresholds(&self) -> EffectiveThresholds {
        self.config.effective_thresholds()
    }

    fn enter_mode(&mut self, mode: InputMode) {
        match self.mode {
            None => self.mode = Some(mode),
            Some(current) if current != mode => {
                tracing::warn!(
                    from = ?current,
                    to = ?mode,
                    "input modes interleaved without reset; call reset() between modes"
                );
                self.mode = Some(mode);
            }
            Some(_) => {}
        }
    }

    /// Shared transition function for the live and scripted paths.
    fn advance(&mut self, raw_angle: f32, raw_shoulder_y: Option<f32>, depth_gated: bool) {
        self.angle_filter.push(raw_angle);
        if let Some(y) = raw_shoulder_y {
            self.shoulder_filter.push(y);
        }
        let Some(smoothed_angle) = self.angle_filter.mean() else {
            return;
        };
        let smoothed_shoulder = self.shoulder_filter.mean();

        if self.baseline_shoulder_y.is_none() {
            if let Some(y) = smoothed_shoulder {
                self.baseline_shoulder_y = Some(y);
                tracing::debug!(baseline_y = y, "shoulder baseline established");
            }
        }

        let now_ms = self.clock.now_ms();
        match self.state {
            RepState::Unknown => {
                // First admitted frame: classify immediately. Does not
                // start the cooldown timer.
                let initial = if smoothed_angle > self.config.up_threshold_deg {
                    RepState::Up
                } else {
                    RepState::Down
                };
                self.state = initial;
                tracing::debug!(
                    state = initial.name(),
                    angle = smoothed_angle,
                    "initial state classified"
                );
            }
            RepState::Up => {
                let enter_down = self.config.down_threshold_deg - self.config.hysteresis_deg;
                if smoothed_angle < enter_down {
                    self.pending_streak = self.pending_streak.saturating_add(1);
                    if self.pending_streak >= self.config.min_frames_in_state
                        && self.cooldown_elapsed(now_ms)
                    {
                        self.transition_to(RepState::Down, now_ms);
                        self.max_shoulder_drop_px = 0.0;
                    }
                } else {
                    self.pending_streak = 0;
                }
            }
            RepState::Down => {
                // Track the deepest point of the rep in progress.
                if let (Some(shoulder), Some(baseline)) =
                    (smoothed_shoulder, self.baseline_shoulder_y)
                {
                    self.max_shoulder_drop_px = self.max_shoulder_drop_px.max(shoulder - baseline);
                }

                let enter_up = self.config.up_threshold_deg + self.config.hysteresis_deg;
                if smoothed_angle > enter_up {
                    self.pending_streak = self.pending_streak.saturating_add(1);
                    if self.pending_streak >= self.config.min_frames_in_state
                        && self.cooldown_elapsed(now_ms)
                    {
                        self.complete_rep(depth_gated, now_ms);
                    }
                } else {
                    self.pending_streak = 0;
                }
            }
        }
    }

    /// Evaluate a completed Down→Up transition.
    fn complete_rep(&mut self, depth_gated: bool, now_ms: u64) {
        let depth = self.max_shoulder_drop_px;
        let met = !depth_gated || depth >= self.config.min_depth_px;
        if met {
            self.count += 1;
            tracing::debug!(count = self.count, depth_px = depth, "rep counted");
        } else {
            tracing::debug!(
                depth_px = depth,
                required_px = self.config.min_depth_px,
                "rep rejected: insufficient depth"
            );
        }
        self.last_quality = Some(RepQuality {
            met_depth_requirement: met,
            depth_achieved_px: depth,
        });
        self.transition_to(RepState::Up, now_ms);
        self.max_shoulder_drop_px = 0.0;
    }

    fn transition_to(&mut self, next: RepState, now_ms: u64) {
        tracing::debug!(from = self.state.name(), to = next.name(), "state transition");
        self.state = next;
        self.pending_streak = 0;
        self.last_transition_ms = Some(now_ms);
    }

    fn cooldown_elapsed(&self, now_ms: u64) -> bool {
        self.last_transition_ms
            .map_or(true, |t| now_ms.saturating_sub(t) > self.config.min_cooldown_ms)
    }

    fn reading(&self, in_position: bool) -> RepReading {
        RepReading {
            count: self.count,
            state: self.state,
            in_position,
            smoothed_angle: self.angle_filter.mean(),
            last_quality: self.last_quality,
        }
    }
}
