//! Easing table.
//!
//! Each curve maps normalized time `t` in `[0, 1]` to progress, with
//! `f(0) = 0` and `f(1) = 1`. Curves are exposed three ways: as free
//! functions, as the [`Easing`] enum, and through a process-wide lookup by
//! name that is built once and never mutated.

use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use hashbrown::HashMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ScrollError;

/// Plain easing function pointer.
pub type EasingFn = fn(f64) -> f64;

#[inline]
pub fn linear(t: f64) -> f64 {
    t
}

#[inline]
pub fn ease_in_quad(t: f64) -> f64 {
    t * t
}

#[inline]
pub fn ease_out_quad(t: f64) -> f64 {
    t * (2.0 - t)
}

#[inline]
pub fn ease_in_out_quad(t: f64) -> f64 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}

#[inline]
pub fn ease_in_cubic(t: f64) -> f64 {
    t * t * t
}

#[inline]
pub fn ease_out_cubic(t: f64) -> f64 {
    let u = t - 1.0;
    u * u * u + 1.0
}

#[inline]
pub fn ease_in_out_cubic(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        (t - 1.0) * (2.0 * t - 2.0) * (2.0 * t - 2.0) + 1.0
    }
}

#[inline]
pub fn ease_in_quart(t: f64) -> f64 {
    t * t * t * t
}

#[inline]
pub fn ease_out_quart(t: f64) -> f64 {
    let u = t - 1.0;
    1.0 - u * u * u * u
}

#[inline]
pub fn ease_in_out_quart(t: f64) -> f64 {
    if t < 0.5 {
        8.0 * t * t * t * t
    } else {
        let u = t - 1.0;
        1.0 - 8.0 * u * u * u * u
    }
}

#[inline]
pub fn ease_in_quint(t: f64) -> f64 {
    t * t * t * t * t
}

#[inline]
pub fn ease_out_quint(t: f64) -> f64 {
    let u = t - 1.0;
    1.0 + u * u * u * u * u
}

#[inline]
pub fn ease_in_out_quint(t: f64) -> f64 {
    if t < 0.5 {
        16.0 * t * t * t * t * t
    } else {
        let u = t - 1.0;
        1.0 + 16.0 * u * u * u * u * u
    }
}

/// Named easing curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Easing {
    Linear,
    #[default]
    EaseInQuad,
    EaseOutQuad,
    EaseInOutQuad,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
    EaseInQuart,
    EaseOutQuart,
    EaseInOutQuart,
    EaseInQuint,
    EaseOutQuint,
    EaseInOutQuint,
}

impl Easing {
    /// Every named curve, in table order.
    pub const ALL: [Easing; 13] = [
        Easing::Linear,
        Easing::EaseInQuad,
        Easing::EaseOutQuad,
        Easing::EaseInOutQuad,
        Easing::EaseInCubic,
        Easing::EaseOutCubic,
        Easing::EaseInOutCubic,
        Easing::EaseInQuart,
        Easing::EaseOutQuart,
        Easing::EaseInOutQuart,
        Easing::EaseInQuint,
        Easing::EaseOutQuint,
        Easing::EaseInOutQuint,
    ];

    /// Table name of this curve (camelCase, as accepted in options).
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::EaseInQuad => "easeInQuad",
            Self::EaseOutQuad => "easeOutQuad",
            Self::EaseInOutQuad => "easeInOutQuad",
            Self::EaseInCubic => "easeInCubic",
            Self::EaseOutCubic => "easeOutCubic",
            Self::EaseInOutCubic => "easeInOutCubic",
            Self::EaseInQuart => "easeInQuart",
            Self::EaseOutQuart => "easeOutQuart",
            Self::EaseInOutQuart => "easeInOutQuart",
            Self::EaseInQuint => "easeInQuint",
            Self::EaseOutQuint => "easeOutQuint",
            Self::EaseInOutQuint => "easeInOutQuint",
        }
    }

    #[inline]
    pub fn function(&self) -> EasingFn {
        match self {
            Self::Linear => linear,
            Self::EaseInQuad => ease_in_quad,
            Self::EaseOutQuad => ease_out_quad,
            Self::EaseInOutQuad => ease_in_out_quad,
            Self::EaseInCubic => ease_in_cubic,
            Self::EaseOutCubic => ease_out_cubic,
            Self::EaseInOutCubic => ease_in_out_cubic,
            Self::EaseInQuart => ease_in_quart,
            Self::EaseOutQuart => ease_out_quart,
            Self::EaseInOutQuart => ease_in_out_quart,
            Self::EaseInQuint => ease_in_quint,
            Self::EaseOutQuint => ease_out_quint,
            Self::EaseInOutQuint => ease_in_out_quint,
        }
    }

    #[inline]
    pub fn apply(&self, t: f64) -> f64 {
        (self.function())(t)
    }
}

static REGISTRY: Lazy<HashMap<&'static str, Easing>> =
    Lazy::new(|| Easing::ALL.iter().map(|e| (e.name(), *e)).collect());

/// Look up a named curve in the shared table.
pub fn lookup(name: &str) -> Result<Easing, ScrollError> {
    REGISTRY
        .get(name)
        .copied()
        .ok_or_else(|| ScrollError::UnknownEasing {
            name: name.to_string(),
        })
}

/// Names of all curves in the table, in table order.
pub fn names() -> Vec<&'static str> {
    Easing::ALL.iter().map(Easing::name).collect()
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Easing {
    type Err = ScrollError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup(s)
    }
}

impl Serialize for Easing {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Easing {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        lookup(&raw).map_err(serde::de::Error::custom)
    }
}

/// Easing selected for one animation: a named curve or a caller function.
#[derive(Clone)]
pub enum EasingCurve {
    Named(Easing),
    Custom(Rc<dyn Fn(f64) -> f64>),
}

impl EasingCurve {
    /// Wrap an arbitrary function (closures from a host binding, etc).
    pub fn custom(f: impl Fn(f64) -> f64 + 'static) -> Self {
        Self::Custom(Rc::new(f))
    }

    #[inline]
    pub fn apply(&self, t: f64) -> f64 {
        match self {
            Self::Named(easing) => easing.apply(t),
            Self::Custom(f) => f(t),
        }
    }
}

impl Default for EasingCurve {
    fn default() -> Self {
        Self::Named(Easing::default())
    }
}

impl fmt::Debug for EasingCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(easing) => f.debug_tuple("Named").field(easing).finish(),
            Self::Custom(_) => f.write_str("Custom(<fn>)"),
        }
    }
}

impl From<Easing> for EasingCurve {
    fn from(easing: Easing) -> Self {
        Self::Named(easing)
    }
}

impl From<EasingFn> for EasingCurve {
    fn from(f: EasingFn) -> Self {
        Self::Custom(Rc::new(f))
    }
}

impl<'de> Deserialize<'de> for EasingCurve {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Easing::deserialize(deserializer).map(Self::Named)
    }
}
