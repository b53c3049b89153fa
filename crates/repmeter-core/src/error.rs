//! Error types for the repmeter rep-counting system.
//!
//! Error handling uses [`thiserror`] for automatic `Display` and `Error`
//! trait implementations.
//!
//! The runtime processing path never returns errors: malformed or
//! low-confidence frames are absorbed by the position validator and
//! reported as "not in counting position". Errors here surface only at
//! construction time (inconsistent configuration) or when building
//! validated values such as [`Confidence`](crate::types::Confidence).
//!
//! # Example
//!
//! ```rust
//! use repmeter_core::error::{CoreError, CoreResult};
//!
//! fn check(window: usize) -> CoreResult<()> {
//!     if window == 0 {
//!         return Err(CoreError::configuration("smoothing window must be >= 1"));
//!     }
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// A specialized `Result` type for repmeter operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Top-level error type for the repmeter system.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CoreError {
    /// Inconsistent or out-of-range configuration. Construction-time fatal:
    /// a counter is never built from a configuration that would silently
    /// mis-count.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
    },

    /// Validation error for input values (e.g. a confidence outside [0, 1]).
    #[error("Validation error: {message}")]
    Validation {
        /// Description of what validation failed
        message: String,
    },
}

impl CoreError {
    /// Creates a new configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates a new validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_error_display() {
        let err = CoreError::configuration("down threshold above up threshold");
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("down threshold"));
    }

    #[test]
    fn validation_error_display() {
        let err = CoreError::validation("confidence out of range");
        assert!(err.to_string().contains("Validation error"));
        assert!(err.to_string().contains("confidence"));
    }

    #[test]
    fn errors_match_variants() {
        assert!(matches!(
            CoreError::configuration("x"),
            CoreError::Configuration { .. }
        ));
        assert!(matches!(
            CoreError::validation("x"),
            CoreError::Validation { .. }
        ));
    }
}
