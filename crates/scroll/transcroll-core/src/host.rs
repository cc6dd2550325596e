//! Host capabilities consumed by the animator.
//!
//! A host provides a scroll surface (the container plus the document it lives
//! in) and a frame scheduler. Both are used through `&self` and shared via
//! `Rc`, so implementations keep mutable state behind `Cell`/`RefCell`.
//! Implementations must not hold a borrow of their own state while invoking a
//! frame or wheel callback: callbacks re-enter the host.

use std::rc::Rc;

use crate::axis::Axis;
use crate::error::ScrollError;

/// Callback queued for the next frame.
pub type FrameCallback = Box<dyn FnOnce()>;

/// Callback run on every wheel event over the container.
pub type WheelCallback = Rc<dyn Fn()>;

/// Handle returned by [`ScrollSurface::add_wheel_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u32);

/// The scrolling container and the layout tree around it.
pub trait ScrollSurface {
    /// Element handle of the host's layout tree.
    type Node: Clone;

    /// Current scroll position along `axis`.
    fn position(&self, axis: Axis) -> f64;

    /// Write the scroll position along `axis`. The host may clamp the value;
    /// callers re-read [`ScrollSurface::position`] when they need the result.
    fn set_position(&self, axis: Axis, value: f64);

    /// Full content size of the scrolling element along `axis`.
    fn scroll_size(&self, axis: Axis) -> f64;

    /// Visible size of the scrolling element along `axis`.
    fn client_size(&self, axis: Axis) -> f64;

    /// First node matching `selector` inside the container's document
    /// (or inside the container itself when it is an element).
    fn query_selector(&self, selector: &str) -> Result<Option<Self::Node>, ScrollError>;

    /// The container node, or `None` when the container is the viewport.
    fn container(&self) -> Option<Self::Node>;

    /// Offset of `node` relative to its offset parent along `axis`.
    fn node_offset(&self, node: &Self::Node, axis: Axis) -> f64;

    fn offset_parent(&self, node: &Self::Node) -> Option<Self::Node>;

    fn add_wheel_listener(&self, callback: WheelCallback) -> ListenerId;

    fn remove_wheel_listener(&self, id: ListenerId);

    /// Largest reachable scroll position along `axis`.
    #[inline]
    fn max_position(&self, axis: Axis) -> f64 {
        self.scroll_size(axis) - self.client_size(axis)
    }

    /// Absolute offset of `node` in its document: the sum of axis offsets
    /// along the offset-parent chain.
    fn page_offset(&self, node: &Self::Node, axis: Axis) -> f64 {
        let mut pos = self.node_offset(node, axis);
        let mut current = self.offset_parent(node);
        while let Some(parent) = current {
            pos += self.node_offset(&parent, axis);
            current = self.offset_parent(&parent);
        }
        pos
    }

    /// Page offset of the container itself; zero for the viewport.
    fn container_offset(&self, axis: Axis) -> f64 {
        self.container()
            .map(|node| self.page_offset(&node, axis))
            .unwrap_or(0.0)
    }
}

/// Repaint-driven scheduling and the clock it runs on.
pub trait FrameScheduler {
    /// Monotonic time in milliseconds.
    fn now(&self) -> f64;

    /// Whether frames can be scheduled at all. When false the animator sets
    /// the final position synchronously.
    fn can_schedule_frames(&self) -> bool;

    /// Queue `callback` to run before the next repaint.
    fn request_frame(&self, callback: FrameCallback) -> Result<(), ScrollError>;
}
