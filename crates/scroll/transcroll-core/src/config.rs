//! Per-call animation options.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::axis::Axis;
use crate::easing::EasingCurve;
use crate::error::ScrollError;

/// Animation length used when none is given, in milliseconds.
pub const DEFAULT_DURATION_MS: f64 = 200.0;

/// Jump coefficient used when jumping is enabled without an explicit factor.
pub const DEFAULT_JUMP_FACTOR: f64 = 2.0;

/// Jump policy for long distances.
///
/// With `Factor(j)`, a distance longer than `duration * j` is shortened by an
/// instant position change before interpolation starts, leaving exactly
/// `duration * j` pixels to animate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Jump {
    Disabled,
    Factor(f64),
}

impl Jump {
    #[inline]
    pub fn factor(&self) -> Option<f64> {
        match self {
            Self::Disabled => None,
            Self::Factor(f) => Some(*f),
        }
    }
}

impl Default for Jump {
    fn default() -> Self {
        Self::Factor(DEFAULT_JUMP_FACTOR)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JumpRepr {
    Flag(bool),
    Factor(f64),
}

// Accepts `false`, `true` (default factor) or a number. A zero factor
// disables jumping the same way `false` does.
impl<'de> Deserialize<'de> for Jump {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match JumpRepr::deserialize(deserializer)? {
            JumpRepr::Flag(false) => Self::Disabled,
            JumpRepr::Flag(true) => Self::default(),
            JumpRepr::Factor(f) if f == 0.0 => Self::Disabled,
            JumpRepr::Factor(f) => Self::Factor(f),
        })
    }
}

impl Serialize for Jump {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Disabled => serializer.serialize_bool(false),
            Self::Factor(f) => serializer.serialize_f64(*f),
        }
    }
}

/// Options for one `animate` call. Decodes from a camelCase object where every
/// field is optional.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScrollOptions {
    pub axis: Axis,
    /// Pixel adjustment added after clamping.
    pub offset: f64,
    /// Animation length in milliseconds.
    pub duration: f64,
    pub easing: EasingCurve,
    pub jump: Jump,
    /// Stop on the first wheel event over the container.
    pub interrupt: bool,
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self {
            axis: Axis::Y,
            offset: 0.0,
            duration: DEFAULT_DURATION_MS,
            easing: EasingCurve::default(),
            jump: Jump::default(),
            interrupt: true,
        }
    }
}

impl ScrollOptions {
    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_easing(mut self, easing: impl Into<EasingCurve>) -> Self {
        self.easing = easing.into();
        self
    }

    pub fn with_jump(mut self, jump: Jump) -> Self {
        self.jump = jump;
        self
    }

    pub fn with_interrupt(mut self, interrupt: bool) -> Self {
        self.interrupt = interrupt;
        self
    }

    /// Parse options from a JSON object.
    pub fn from_json(json: &str) -> Result<Self, ScrollError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reject values the animation loop cannot work with.
    pub fn validate(&self) -> Result<(), ScrollError> {
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(ScrollError::InvalidDuration {
                duration: self.duration,
            });
        }
        if !self.offset.is_finite() {
            return Err(ScrollError::InvalidOption {
                reason: format!("offset must be finite, got {}", self.offset),
            });
        }
        if let Jump::Factor(f) = self.jump {
            if !f.is_finite() || f < 0.0 {
                return Err(ScrollError::InvalidOption {
                    reason: format!("jump factor must be a finite non-negative number, got {f}"),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Easing;

    #[test]
    fn defaults_match_documented_values() {
        let opts = ScrollOptions::default();
        assert_eq!(opts.axis, Axis::Y);
        assert_eq!(opts.offset, 0.0);
        assert_eq!(opts.duration, 200.0);
        assert_eq!(opts.jump, Jump::Factor(2.0));
        assert!(opts.interrupt);
        assert!(matches!(opts.easing, EasingCurve::Named(Easing::EaseInQuad)));
    }

    #[test]
    fn empty_object_uses_defaults() {
        let opts = ScrollOptions::from_json("{}").unwrap();
        assert_eq!(opts.duration, DEFAULT_DURATION_MS);
        assert_eq!(opts.jump, Jump::default());
    }

    #[test]
    fn decodes_camel_case_object() {
        let opts = ScrollOptions::from_json(
            r#"{ "axis": "x", "offset": -10, "duration": 350, "easing": "easeOutCubic", "jump": false, "interrupt": false }"#,
        )
        .unwrap();
        assert_eq!(opts.axis, Axis::X);
        assert_eq!(opts.offset, -10.0);
        assert_eq!(opts.duration, 350.0);
        assert!(matches!(opts.easing, EasingCurve::Named(Easing::EaseOutCubic)));
        assert_eq!(opts.jump, Jump::Disabled);
        assert!(!opts.interrupt);
    }

    #[test]
    fn jump_accepts_true_and_numbers() {
        let on = ScrollOptions::from_json(r#"{ "jump": true }"#).unwrap();
        assert_eq!(on.jump, Jump::Factor(DEFAULT_JUMP_FACTOR));
        let half = ScrollOptions::from_json(r#"{ "jump": 0.5 }"#).unwrap();
        assert_eq!(half.jump, Jump::Factor(0.5));
        let zero = ScrollOptions::from_json(r#"{ "jump": 0 }"#).unwrap();
        assert_eq!(zero.jump, Jump::Disabled);
    }

    #[test]
    fn unknown_easing_name_is_rejected() {
        let err = ScrollOptions::from_json(r#"{ "easing": "wobble" }"#).unwrap_err();
        assert!(err.to_string().contains("Unknown easing function: wobble"));
    }

    #[test]
    fn unknown_axis_is_rejected() {
        let err = ScrollOptions::from_json(r#"{ "axis": "z" }"#).unwrap_err();
        assert!(matches!(err, ScrollError::InvalidOption { .. }));
        assert!(err.to_string().contains("Invalid axis: z"));
    }

    #[test]
    fn validate_rejects_bad_duration_and_jump() {
        let negative = ScrollOptions::default().with_duration(-1.0);
        assert_eq!(
            negative.validate(),
            Err(ScrollError::InvalidDuration { duration: -1.0 })
        );

        let nan_jump = ScrollOptions::default().with_jump(Jump::Factor(f64::NAN));
        assert!(matches!(
            nan_jump.validate(),
            Err(ScrollError::InvalidOption { .. })
        ));

        assert!(ScrollOptions::default().with_duration(0.0).validate().is_ok());
    }

    #[test]
    fn jump_serializes_like_it_decodes() {
        assert_eq!(serde_json::to_string(&Jump::Disabled).unwrap(), "false");
        assert_eq!(serde_json::to_string(&Jump::Factor(0.5)).unwrap(), "0.5");
    }
}
