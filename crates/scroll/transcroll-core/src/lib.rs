//! Transcroll Core (host-agnostic)
//!
//! Animates the scroll position of a page or a scrollable container toward a
//! target using an easing curve over a fixed duration. Everything that touches
//! a real rendering host (scroll positions, layout offsets, the frame
//! scheduler, wheel input) goes through the traits in [`host`], so the same
//! animator drives the browser binding and the fake host used in tests.

pub mod animator;
pub mod axis;
pub mod config;
pub mod easing;
pub mod error;
pub mod handle;
pub mod host;
pub mod target;
pub mod tween;

// Re-exports for consumers (adapters)
pub use animator::Animator;
pub use axis::Axis;
pub use config::{Jump, ScrollOptions, DEFAULT_DURATION_MS, DEFAULT_JUMP_FACTOR};
pub use easing::{Easing, EasingCurve, EasingFn};
pub use error::ScrollError;
pub use handle::{ScrollHandle, ScrollResult};
pub use host::{FrameCallback, FrameScheduler, ListenerId, ScrollSurface, WheelCallback};
pub use target::ScrollTarget;
pub use tween::{plan_jump, FrameSample, ScrollTween};

/// Result type for scroll operations.
pub type Result<T> = core::result::Result<T, ScrollError>;
