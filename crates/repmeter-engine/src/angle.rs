//! Elbow-bend angle estimation from 2D joint positions.
//!
//! Computes the interior angle at the elbow from the shoulder→elbow and
//! wrist→elbow vectors using the dot-product formula
//! `cos(θ) = (v1 · v2) / (|v1| × |v2|)`, in degrees:
//!
//! - 180°: arm fully extended
//! - 90°: arm bent at a right angle
//!
//! The [`AngleEstimator`] applies the per-joint confidence gate and fuses
//! the two sides into a single [`JointSample`] per frame. It is a pure
//! function of the current frame: a frame where neither side qualifies
//! yields no sample, never stale data.

use repmeter_core::{ArmLandmarks, JointSample, Keypoint, PoseFrame};
use repmeter_core::{DEFAULT_CONFIDENCE_THRESHOLD, FULL_EXTENSION_DEGREES};

/// Vectors shorter than this are degenerate (coincident joints).
const MIN_SEGMENT_LENGTH: f32 = 1e-4;

/// Interior angle at the elbow, in degrees [0, 180].
///
/// Degenerate geometry (shoulder or wrist coincident with the elbow) is
/// treated as a straight arm.
#[must_use]
pub fn elbow_angle_degrees(shoulder: Keypoint, elbow: Keypoint, wrist: Keypoint) -> f32 {
    let upper = (shoulder.x - elbow.x, shoulder.y - elbow.y);
    let fore = (wrist.x - elbow.x, wrist.y - elbow.y);

    let dot = upper.0 * fore.0 + upper.1 * fore.1;
    let mag_upper = (upper.0 * upper.0 + upper.1 * upper.1).sqrt();
    let mag_fore = (fore.0 * fore.0 + fore.1 * fore.1).sqrt();

    if mag_upper < MIN_SEGMENT_LENGTH || mag_fore < MIN_SEGMENT_LENGTH {
        return FULL_EXTENSION_DEGREES;
    }

    let cos_angle = (dot / (mag_upper * mag_fore)).clamp(-1.0, 1.0);
    cos_angle.acos().to_degrees()
}

/// Derives at most one [`JointSample`] per frame from the qualifying
/// side(s).
///
/// A side qualifies when all three joints are present and the minimum of
/// their confidences meets the floor. Two qualifying sides are averaged
/// componentwise; one is used as-is; none yields `None`.
#[derive(Debug, Clone)]
pub struct AngleEstimator {
    /// Minimum per-joint confidence for a side to qualify.
    min_joint_confidence: f32,
}

impl AngleEstimator {
    /// Create an estimator with the given confidence floor.
    #[must_use]
    pub fn new(min_joint_confidence: f32) -> Self {
        Self {
            min_joint_confidence: min_joint_confidence.clamp(0.0, 1.0),
        }
    }

    /// Derive this frame's sample, if any side qualifies.
    #[must_use]
    pub fn sample(&self, frame: &PoseFrame) -> Option<JointSample> {
        let left = self.side_sample(&frame.left);
        let right = self.side_sample(&frame.right);

        match (left, right) {
            (Some(l), Some(r)) => Some(JointSample::average(&l, &r)),
            (Some(s), None) | (None, Some(s)) => Some(s),
            (None, None) => None,
        }
    }

    /// Confidence floor in use.
    #[must_use]
    pub fn min_joint_confidence(&self) -> f32 {
        self.min_joint_confidence
    }

    fn side_sample(&self, arm: &ArmLandmarks) -> Option<JointSample> {
        let (shoulder, elbow, wrist) = arm.triple()?;
        let confidence = arm.min_confidence();
        if !confidence.meets(self.min_joint_confidence) {
            return None;
        }

        Some(JointSample {
            angle_degrees: elbow_angle_degrees(shoulder, elbow, wrist),
            confidence,
            wrist_y: wrist.y,
            shoulder_y: shoulder.y,
            elbow_y: elbow.y,
        })
    }
}

impl Default for AngleEstimator {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIDENCE_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use repmeter_core::Confidence;

    fn kp(x: f32, y: f32, conf: f32) -> Keypoint {
        Keypoint::new(x, y, Confidence::new(conf).unwrap())
    }

    fn arm_at(angle_deg: f32, conf: f32) -> ArmLandmarks {
        // Elbow at the origin, shoulder straight up, wrist rotated by the
        // requested interior angle.
        let rad = angle_deg.to_radians();
        ArmLandmarks::new(
            kp(0.0, -100.0, conf),
            kp(0.0, 0.0, conf),
            kp(100.0 * rad.sin(), -100.0 * rad.cos(), conf),
        )
    }

    #[test]
    fn straight_arm_is_180() {
        let angle = elbow_angle_degrees(kp(0.0, 0.0, 1.0), kp(0.5, 0.0, 1.0), kp(1.0, 0.0, 1.0));
        assert!((angle - 180.0).abs() < 1.0);
    }

    #[test]
    fn right_angle_arm_is_90() {
        let angle = elbow_angle_degrees(kp(0.0, 0.0, 1.0), kp(1.0, 0.0, 1.0), kp(1.0, 1.0, 1.0));
        assert!((angle - 90.0).abs() < 1.0);
    }

    #[test]
    fn folded_arm_is_0() {
        let angle = elbow_angle_degrees(kp(0.0, 0.0, 1.0), kp(1.0, 0.0, 1.0), kp(0.0, 0.0, 1.0));
        assert!(angle < 1.0);
    }

    #[test]
    fn degenerate_geometry_reads_straight() {
        let angle = elbow_angle_degrees(kp(1.0, 1.0, 1.0), kp(1.0, 1.0, 1.0), kp(2.0, 2.0, 1.0));
        assert!((angle - 180.0).abs() < f32::EPSILON);
    }

    #[test]
    fn synthetic_arm_matches_requested_angle() {
        for &deg in &[30.0_f32, 60.0, 90.0, 120.0, 150.0, 175.0] {
            let arm = arm_at(deg, 1.0);
            let (s, e, w) = arm.triple().unwrap();
            let angle = elbow_angle_degrees(s, e, w);
            assert!(
                (angle - deg).abs() < 0.5,
                "requested {deg}, estimated {angle}"
            );
        }
    }

    #[test]
    fn low_confidence_side_rejected() {
        let estimator = AngleEstimator::new(0.5);
        let frame = PoseFrame::new(arm_at(120.0, 0.3), ArmLandmarks::default());
        assert!(estimator.sample(&frame).is_none());
    }

    #[test]
    fn missing_joint_rejects_side() {
        let estimator = AngleEstimator::default();
        let mut arm = arm_at(120.0, 0.9);
        arm.wrist = None;
        let frame = PoseFrame::new(arm, ArmLandmarks::default());
        assert!(estimator.sample(&frame).is_none());
    }

    #[test]
    fn single_side_used_as_is() {
        let estimator = AngleEstimator::default();
        let frame = PoseFrame::new(arm_at(120.0, 0.9), ArmLandmarks::default());
        let sample = estimator.sample(&frame).unwrap();
        assert!((sample.angle_degrees - 120.0).abs() < 0.5);
        assert!((sample.confidence.value() - 0.9).abs() < 1e-6);
    }

    #[test]
    fn both_sides_averaged() {
        let estimator = AngleEstimator::default();
        let frame = PoseFrame::new(arm_at(100.0, 0.8), arm_at(140.0, 0.6));
        let sample = estimator.sample(&frame).unwrap();
        assert!((sample.angle_degrees - 120.0).abs() < 0.5);
        assert!((sample.confidence.value() - 0.7).abs() < 1e-6);
    }

    #[test]
    fn empty_frame_yields_no_sample() {
        let estimator = AngleEstimator::default();
        assert!(estimator.sample(&PoseFrame::default()).is_none());
    }
}
