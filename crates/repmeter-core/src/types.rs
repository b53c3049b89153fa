//! Core data types for the repmeter rep-counting system.
//!
//! # Type Categories
//!
//! - **Landmark Types**: [`Keypoint`], [`ArmLandmarks`], [`PoseFrame`],
//!   [`BodySide`]: the per-frame joint input produced by an upstream
//!   pose-extraction pipeline.
//! - **Sample Types**: [`JointSample`], one frame's derived elbow-bend
//!   angle and supporting coordinates.
//! - **Counting Types**: [`RepState`], [`RepQuality`], [`RepReading`]:
//!   the state machine's state and per-frame output.
//! - **Common Types**: [`Confidence`], a validated score in [0.0, 1.0].
//!
//! Coordinates are image-space pixels with the Y axis growing downward,
//! so a lowering shoulder has an *increasing* `y`.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::DEFAULT_CONFIDENCE_THRESHOLD;

// =============================================================================
// Common Types
// =============================================================================

/// Confidence score in the range [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Confidence(f32);

impl Confidence {
    /// Creates a new confidence value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not in the range [0.0, 1.0].
    pub fn new(value: f32) -> CoreResult<Self> {
        if !(0.0..=1.0).contains(&value) {
            return Err(CoreError::validation(format!(
                "Confidence must be in [0.0, 1.0], got {value}"
            )));
        }
        Ok(Self(value))
    }

    /// Creates a confidence value without validation (for internal use).
    ///
    /// The caller must ensure the value is in [0.0, 1.0].
    #[must_use]
    pub(crate) fn new_unchecked(value: f32) -> Self {
        debug_assert!((0.0..=1.0).contains(&value));
        Self(value)
    }

    /// Returns the raw confidence value.
    #[must_use]
    pub fn value(&self) -> f32 {
        self.0
    }

    /// Returns `true` if the confidence meets the given threshold.
    #[must_use]
    pub fn meets(&self, threshold: f32) -> bool {
        self.0 >= threshold
    }

    /// Returns `true` if the confidence meets the default threshold.
    #[must_use]
    pub fn is_high(&self) -> bool {
        self.meets(DEFAULT_CONFIDENCE_THRESHOLD)
    }

    /// Maximum confidence (1.0).
    pub const MAX: Self = Self(1.0);

    /// Minimum confidence (0.0).
    pub const MIN: Self = Self(0.0);
}

impl Default for Confidence {
    fn default() -> Self {
        Self(0.0)
    }
}

// =============================================================================
// Landmark Types
// =============================================================================

/// Side of the body an arm belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BodySide {
    /// Left arm
    Left,
    /// Right arm
    Right,
}

impl BodySide {
    /// Returns the side name as a string.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// A single detected joint position with confidence.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Keypoint {
    /// X coordinate in pixels
    pub x: f32,
    /// Y coordinate in pixels (grows downward)
    pub y: f32,
    /// Detection confidence
    pub confidence: Confidence,
}

impl Keypoint {
    /// Creates a new keypoint.
    #[must_use]
    pub fn new(x: f32, y: f32, confidence: Confidence) -> Self {
        Self { x, y, confidence }
    }

    /// Returns the position as a tuple.
    #[must_use]
    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }
}

/// One arm's shoulder/elbow/wrist landmarks for a single frame.
///
/// A landmark the upstream detector did not report is `None` and is
/// treated as confidence 0 everywhere, so it can never pass a
/// confidence gate. This is the single missing-landmark policy for the whole system.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ArmLandmarks {
    /// Shoulder position, if detected
    pub shoulder: Option<Keypoint>,
    /// Elbow position, if detected
    pub elbow: Option<Keypoint>,
    /// Wrist position, if detected
    pub wrist: Option<Keypoint>,
}

impl ArmLandmarks {
    /// Creates a fully detected arm.
    #[must_use]
    pub fn new(shoulder: Keypoint, elbow: Keypoint, wrist: Keypoint) -> Self {
        Self {
            shoulder: Some(shoulder),
            elbow: Some(elbow),
            wrist: Some(wrist),
        }
    }

    /// Returns the (shoulder, elbow, wrist) triple when all three joints
    /// are present.
    #[must_use]
    pub fn triple(&self) -> Option<(Keypoint, Keypoint, Keypoint)> {
        match (self.shoulder, self.elbow, self.wrist) {
            (Some(s), Some(e), Some(w)) => Some((s, e, w)),
            _ => None,
        }
    }

    /// Minimum confidence across the three joints.
    ///
    /// A missing joint counts as confidence 0.
    #[must_use]
    pub fn min_confidence(&self) -> Confidence {
        let conf = |kp: Option<Keypoint>| kp.map_or(0.0, |k| k.confidence.value());
        let min = conf(self.shoulder)
            .min(conf(self.elbow))
            .min(conf(self.wrist));
        Confidence::new_unchecked(min)
    }
}

/// Per-frame input bundle: up to two arms' landmark triples.
///
/// This is the narrow interface to the upstream capture/extraction
/// pipeline; frames arrive at whatever cadence it produces.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PoseFrame {
    /// Left arm landmarks
    pub left: ArmLandmarks,
    /// Right arm landmarks
    pub right: ArmLandmarks,
}

impl PoseFrame {
    /// Creates a frame from both arms.
    #[must_use]
    pub fn new(left: ArmLandmarks, right: ArmLandmarks) -> Self {
        Self { left, right }
    }

    /// Returns the landmarks for one side.
    #[must_use]
    pub fn side(&self, side: BodySide) -> &ArmLandmarks {
        match side {
            BodySide::Left => &self.left,
            BodySide::Right => &self.right,
        }
    }
}

// =============================================================================
// Sample Types
// =============================================================================

/// One frame's derived elbow-bend angle and supporting coordinates.
///
/// Produced by the angle estimator from whichever side(s) passed the
/// confidence gate: two qualifying sides are averaged componentwise, a
/// single qualifying side is used as-is.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JointSample {
    /// Interior elbow angle in degrees, [0, 180]
    pub angle_degrees: f32,
    /// Sample confidence (per side: the minimum joint confidence)
    pub confidence: Confidence,
    /// Wrist Y coordinate in pixels
    pub wrist_y: f32,
    /// Shoulder Y coordinate in pixels
    pub shoulder_y: f32,
    /// Elbow Y coordinate in pixels
    pub elbow_y: f32,
}

impl JointSample {
    /// Componentwise average of two sides' samples.
    #[must_use]
    pub fn average(a: &Self, b: &Self) -> Self {
        Self {
            angle_degrees: (a.angle_degrees + b.angle_degrees) / 2.0,
            confidence: Confidence::new_unchecked(
                (a.confidence.value() + b.confidence.value()) / 2.0,
            ),
            wrist_y: (a.wrist_y + b.wrist_y) / 2.0,
            shoulder_y: (a.shoulder_y + b.shoulder_y) / 2.0,
            elbow_y: (a.elbow_y + b.elbow_y) / 2.0,
        }
    }
}

// =============================================================================
// Counting Types
// =============================================================================

/// State of the rep-counting state machine.
///
/// `Unknown` is the only initial state and is never re-entered once the
/// machine has classified the first validated frame; `Up` and `Down` are
/// the steady operating states. Legal transitions are
/// Unknown→{Up,Down}, Up→Down, and Down→Up only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RepState {
    /// No validated frame classified yet
    #[default]
    Unknown,
    /// Arm extended (angle above the up threshold)
    Up,
    /// Arm bent (angle below the down threshold)
    Down,
}

impl RepState {
    /// Returns the state name as a string.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Up => "up",
            Self::Down => "down",
        }
    }

    /// Returns `true` once the machine has left `Unknown`.
    #[must_use]
    pub fn is_operating(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

/// Outcome recorded when a Down→Up transition is evaluated, whether or
/// not it incremented the count.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RepQuality {
    /// Whether the accumulated shoulder drop met the minimum depth
    pub met_depth_requirement: bool,
    /// Maximum shoulder drop observed during the rep, in pixels
    pub depth_achieved_px: f32,
}

/// Per-frame output of the rep counter.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RepReading {
    /// Cumulative validated rep count
    pub count: u32,
    /// Current state machine state
    pub state: RepState,
    /// Whether the subject is currently in countable position
    pub in_position: bool,
    /// Current smoothed elbow angle in degrees, for display
    pub smoothed_angle: Option<f32>,
    /// Quality of the most recently completed Down→Up transition
    pub last_quality: Option<RepQuality>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kp(x: f32, y: f32, conf: f32) -> Keypoint {
        Keypoint::new(x, y, Confidence::new(conf).unwrap())
    }

    #[test]
    fn confidence_range_validation() {
        assert!(Confidence::new(0.5).is_ok());
        assert!(Confidence::new(0.0).is_ok());
        assert!(Confidence::new(1.0).is_ok());
        assert!(Confidence::new(-0.1).is_err());
        assert!(Confidence::new(1.1).is_err());
    }

    #[test]
    fn confidence_comparison() {
        let high = Confidence::new(0.8).unwrap();
        let low = Confidence::new(0.3).unwrap();
        assert!(high.is_high());
        assert!(!low.is_high());
        assert!(high.meets(0.8));
        assert!(!low.meets(0.31));
    }

    #[test]
    fn missing_landmark_is_zero_confidence() {
        let arm = ArmLandmarks {
            shoulder: Some(kp(0.0, 0.0, 0.9)),
            elbow: Some(kp(1.0, 1.0, 0.9)),
            wrist: None,
        };
        assert!((arm.min_confidence().value() - 0.0).abs() < f32::EPSILON);
        assert!(arm.triple().is_none());
    }

    #[test]
    fn complete_arm_min_confidence() {
        let arm = ArmLandmarks::new(kp(0.0, 0.0, 0.9), kp(1.0, 1.0, 0.6), kp(2.0, 2.0, 0.8));
        assert!((arm.min_confidence().value() - 0.6).abs() < f32::EPSILON);
        assert!(arm.triple().is_some());
    }

    #[test]
    fn frame_side_access() {
        let left = ArmLandmarks::new(kp(0.0, 0.0, 0.9), kp(1.0, 1.0, 0.9), kp(2.0, 2.0, 0.9));
        let frame = PoseFrame::new(left, ArmLandmarks::default());
        assert!(frame.side(BodySide::Left).triple().is_some());
        assert!(frame.side(BodySide::Right).triple().is_none());
    }

    #[test]
    fn joint_sample_average_is_componentwise() {
        let a = JointSample {
            angle_degrees: 100.0,
            confidence: Confidence::new(0.6).unwrap(),
            wrist_y: 10.0,
            shoulder_y: 20.0,
            elbow_y: 30.0,
        };
        let b = JointSample {
            angle_degrees: 140.0,
            confidence: Confidence::new(0.8).unwrap(),
            wrist_y: 30.0,
            shoulder_y: 40.0,
            elbow_y: 50.0,
        };
        let avg = JointSample::average(&a, &b);
        assert!((avg.angle_degrees - 120.0).abs() < f32::EPSILON);
        assert!((avg.confidence.value() - 0.7).abs() < f32::EPSILON);
        assert!((avg.wrist_y - 20.0).abs() < f32::EPSILON);
        assert!((avg.shoulder_y - 30.0).abs() < f32::EPSILON);
        assert!((avg.elbow_y - 40.0).abs() < f32::EPSILON);
    }

    #[test]
    fn rep_state_defaults_to_unknown() {
        assert_eq!(RepState::default(), RepState::Unknown);
        assert!(!RepState::Unknown.is_operating());
        assert!(RepState::Up.is_operating());
        assert_eq!(RepState::Down.name(), "down");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn rep_reading_serde_roundtrip() {
        let reading = RepReading {
            count: 3,
            state: RepState::Up,
            in_position: true,
            smoothed_angle: Some(151.5),
            last_quality: Some(RepQuality {
                met_depth_requirement: true,
                depth_achieved_px: 55.0,
            }),
        };
        let json = serde_json::to_string(&reading).unwrap();
        let parsed: RepReading = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.count, 3);
        assert_eq!(parsed.state, RepState::Up);
        assert!(parsed.last_quality.unwrap().met_depth_requirement);
    }
}
