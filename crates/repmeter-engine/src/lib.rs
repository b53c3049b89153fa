//! Streaming rep counting over noisy joint measurements.
//!
//! Converts a per-frame stream of anatomical joint positions into a
//! monotonically increasing repetition count, rejecting false positives
//! from jitter, partial movements, and rapid oscillation. The engine
//! knows nothing about cameras, image decoding, or rendering; it
//! consumes already-extracted joint coordinates with confidence scores
//! and emits a per-frame [`RepReading`].
//!
//! # Architecture
//!
//! Each accepted frame flows through four stages:
//!
//! 1. **Angle estimation** ([`AngleEstimator`]): per-side elbow-bend
//!    angle from the shoulder/elbow/wrist triple, confidence-gated and
//!    fused across sides into one [`JointSample`].
//! 2. **Position validation** ([`PositionValidator`]): plausible-angle
//!    band plus a consecutive-valid-frame warm-up that absorbs detector
//!    start-up noise and brief occlusions.
//! 3. **Smoothing** ([`MovingAverage`]): independent fixed-window
//!    moving averages for the angle and shoulder-height signals.
//! 4. **State machine** ([`RepCounter`]): Unknown/Up/Down transitions
//!    gated by hysteresis, frame debouncing, a wall-clock cooldown, and
//!    (in live mode) a minimum shoulder-drop depth per rep.
//!
//! Time is injected through [`clock::TimeSource`], so the cooldown is
//! fully deterministic under test.
//!
//! # Example
//!
//! Scripted angles drive the same state machine as live frames, with
//! depth qualification disabled:
//!
//! ```
//! use repmeter_engine::clock::ManualClock;
//! use repmeter_engine::{RepCounter, RepCounterConfig};
//!
//! let clock = ManualClock::new();
//! let mut counter = RepCounter::with_time_source(
//!     RepCounterConfig::default(),
//!     Box::new(clock.clone()),
//! )
//! .unwrap();
//!
//! // One clean rep at ~6.7 frames per second.
//! let angles = [
//!     160.0, 160.0, 160.0, // settle in the up position
//!     80.0, 80.0, 80.0, 80.0, 80.0, // descend and hold
//!     165.0, 165.0, 165.0, 165.0, 165.0, // ascend and hold
//! ];
//! let mut reading = None;
//! for angle in angles {
//!     clock.advance_ms(150);
//!     reading = Some(counter.process_scripted_angle(angle));
//! }
//!
//! assert_eq!(reading.unwrap().count, 1);
//! ```

pub mod angle;
pub mod clock;
pub mod config;
pub mod counter;
pub mod smoothing;
pub mod validator;

pub use angle::{elbow_angle_degrees, AngleEstimator};
pub use config::{EffectiveThresholds, RepCounterConfig, RepCounterConfigBuilder};
pub use counter::RepCounter;
pub use smoothing::MovingAverage;
pub use validator::PositionValidator;

// Re-export the core vocabulary so callers need only this crate.
pub use repmeter_core::{
    ArmLandmarks, BodySide, Confidence, CoreError, CoreResult, JointSample, Keypoint, PoseFrame,
    RepQuality, RepReading, RepState,
};
