//! Target resolution: numbers, selectors and nodes to a clamped position.

use crate::axis::Axis;
use crate::error::ScrollError;
use crate::host::ScrollSurface;

/// What to scroll to.
#[derive(Debug, Clone, PartialEq)]
pub enum ScrollTarget<N> {
    /// Absolute scroll position in pixels.
    Position(f64),
    /// Selector resolved in the container's document.
    Selector(String),
    /// Node whose page offset becomes the target.
    Element(N),
}

impl<N> From<f64> for ScrollTarget<N> {
    fn from(value: f64) -> Self {
        Self::Position(value)
    }
}

impl<N> From<&str> for ScrollTarget<N> {
    fn from(selector: &str) -> Self {
        Self::Selector(selector.to_string())
    }
}

impl<N> From<String> for ScrollTarget<N> {
    fn from(selector: String) -> Self {
        Self::Selector(selector)
    }
}

impl<N> ScrollTarget<N> {
    /// Short label for logs.
    pub fn describe(&self) -> String {
        match self {
            Self::Position(v) => format!("position {v}"),
            Self::Selector(s) => format!("selector '{s}'"),
            Self::Element(_) => "element".to_string(),
        }
    }
}

/// Resolve `target` to the final scroll position along `axis`.
///
/// Node targets become their page offset minus the container's page offset.
/// The raw position is clamped to `[0, max_position]` and `offset` is added
/// after clamping, so the result may sit outside the scrollable range by
/// exactly `offset`.
pub fn resolve<S: ScrollSurface>(
    surface: &S,
    target: &ScrollTarget<S::Node>,
    axis: Axis,
    offset: f64,
) -> Result<f64, ScrollError> {
    let raw = match target {
        ScrollTarget::Position(v) => {
            if !v.is_finite() {
                return Err(ScrollError::InvalidTarget {
                    reason: format!("position must be finite, got {v}"),
                });
            }
            *v
        }
        ScrollTarget::Selector(selector) => {
            let node = surface.query_selector(selector)?.ok_or_else(|| {
                ScrollError::TargetNotFound {
                    selector: selector.clone(),
                }
            })?;
            relative_offset(surface, &node, axis)
        }
        ScrollTarget::Element(node) => relative_offset(surface, node, axis),
    };
    Ok(clamp_position(raw, surface.max_position(axis)) + offset)
}

#[inline]
fn relative_offset<S: ScrollSurface>(surface: &S, node: &S::Node, axis: Axis) -> f64 {
    surface.page_offset(node, axis) - surface.container_offset(axis)
}

/// `max(0, min(value, max))`: the upper bound applies first, so a negative
/// `max` still yields zero.
#[inline]
pub fn clamp_position(value: f64, max: f64) -> f64 {
    value.min(max).max(0.0)
}
