//! # Repmeter Core
//!
//! Core types and errors for the repmeter rep-counting system.
//!
//! This crate provides the foundational building blocks used by the
//! counting engine:
//!
//! - **Landmark Types**: [`PoseFrame`], [`ArmLandmarks`], [`Keypoint`], and
//!   [`BodySide`] for representing per-frame joint input from an upstream
//!   pose-extraction pipeline.
//!
//! - **Sample and Counting Types**: [`JointSample`], [`RepState`],
//!   [`RepQuality`], and [`RepReading`] for the derived per-frame signal and
//!   the counter's output.
//!
//! - **Error Types**: construction-time and validation errors via the
//!   [`error`] module.
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization via serde
//!
//! ## Example
//!
//! ```rust
//! use repmeter_core::{ArmLandmarks, Confidence, Keypoint, PoseFrame};
//!
//! let arm = ArmLandmarks::new(
//!     Keypoint::new(120.0, 200.0, Confidence::new(0.95).unwrap()),
//!     Keypoint::new(140.0, 300.0, Confidence::new(0.92).unwrap()),
//!     Keypoint::new(150.0, 390.0, Confidence::new(0.90).unwrap()),
//! );
//! let frame = PoseFrame::new(arm, ArmLandmarks::default());
//!
//! assert!(frame.left.min_confidence().is_high());
//! assert!(frame.right.triple().is_none());
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod types;

// Re-export commonly used types at the crate root
pub use error::{CoreError, CoreResult};
pub use types::{
    // Landmark types
    ArmLandmarks, BodySide, Keypoint, PoseFrame,
    // Sample types
    JointSample,
    // Counting types
    RepQuality, RepReading, RepState,
    // Common types
    Confidence,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default confidence threshold for accepting a joint detection
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.5;

/// Elbow angle of a fully extended arm, in degrees
pub const FULL_EXTENSION_DEGREES: f32 = 180.0;

/// Prelude module for convenient imports.
///
/// ```rust
/// use repmeter_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{
        ArmLandmarks, BodySide, Confidence, JointSample, Keypoint, PoseFrame, RepQuality,
        RepReading, RepState,
    };
}
