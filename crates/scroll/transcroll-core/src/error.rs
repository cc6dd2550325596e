//! Error types for scroll animations

use serde::{Deserialize, Serialize};

/// Errors raised while preparing or driving a scroll animation.
///
/// A host without frame scheduling is not an error: the animator falls back to
/// an immediate position change instead.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ScrollError {
    /// Selector matched nothing in the container's document
    #[error("Scroll target not found: {selector}")]
    TargetNotFound { selector: String },

    /// Target could not be turned into a position
    #[error("Invalid scroll target: {reason}")]
    InvalidTarget { reason: String },

    /// Axis name other than "x" or "y"
    #[error("Invalid axis: {value}")]
    InvalidAxis { value: String },

    /// Negative or non-finite duration
    #[error("Invalid duration: {duration}")]
    InvalidDuration { duration: f64 },

    /// Any other option outside its domain
    #[error("Invalid option: {reason}")]
    InvalidOption { reason: String },

    /// Easing name missing from the easing table
    #[error("Unknown easing function: {name}")]
    UnknownEasing { name: String },

    /// Host capability failed (frame request, DOM access)
    #[error("Host error: {reason}")]
    Host { reason: String },
}

impl ScrollError {
    /// Create a host error
    pub fn host(reason: impl Into<String>) -> Self {
        Self::Host {
            reason: reason.into(),
        }
    }

    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::TargetNotFound { .. } => "data",
            Self::InvalidTarget { .. }
            | Self::InvalidAxis { .. }
            | Self::InvalidDuration { .. }
            | Self::InvalidOption { .. } => "validation",
            Self::UnknownEasing { .. } => "easing",
            Self::Host { .. } => "host",
        }
    }
}

impl From<serde_json::Error> for ScrollError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidOption {
            reason: err.to_string(),
        }
    }
}
