//! Time-to-position math for one animation.

use crate::config::Jump;
use crate::easing::EasingCurve;

/// Interpolation from a start position to a target over a fixed duration.
#[derive(Debug, Clone)]
pub struct ScrollTween {
    pub start_position: f64,
    pub target_position: f64,
    /// Clock reading (ms) at which the fraction is zero.
    pub start_time: f64,
    /// Length in milliseconds; zero finishes on the first sample.
    pub duration: f64,
    pub easing: EasingCurve,
}

/// One frame's worth of output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSample {
    /// Elapsed fraction, clamped to `[0, 1]`.
    pub fraction: f64,
    /// Position to write this frame.
    pub position: f64,
}

impl FrameSample {
    #[inline]
    pub fn finished(&self) -> bool {
        self.fraction >= 1.0
    }
}

impl ScrollTween {
    /// Elapsed fraction at clock reading `now`.
    #[inline]
    pub fn fraction(&self, now: f64) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((now - self.start_time) / self.duration).clamp(0.0, 1.0)
    }

    pub fn sample(&self, now: f64) -> FrameSample {
        let fraction = self.fraction(now);
        let progress = self.easing.apply(fraction);
        FrameSample {
            fraction,
            position: self.start_position
                + progress * (self.target_position - self.start_position),
        }
    }
}

/// Position to jump to before interpolating, if any.
///
/// Jumps when `|start - target| > duration * factor`, landing `duration *
/// factor` pixels short of the target on the side of `start`.
pub fn plan_jump(start: f64, target: f64, duration: f64, jump: Jump) -> Option<f64> {
    let factor = jump.factor()?;
    let diff = start - target;
    let reach = duration * factor;
    if diff.abs() > reach {
        Some(target + reach * diff.signum())
    } else {
        None
    }
}
