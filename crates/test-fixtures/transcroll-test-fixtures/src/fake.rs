//! In-memory host for driving the animator without a browser.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap, VecDeque};

use transcroll_core::{
    Axis, FrameCallback, FrameScheduler, ListenerId, ScrollError, ScrollSurface, WheelCallback,
};

use crate::{AxisPair, Layout, NodeSpec};

#[inline]
fn pick(pair: &AxisPair, axis: Axis) -> f64 {
    match axis {
        Axis::X => pair.x,
        Axis::Y => pair.y,
    }
}

/// Scroll container backed by a [`Layout`]. Writes are clamped to the
/// scrollable range like a browser does, and every requested write is logged.
pub struct FakeSurface {
    container: Option<String>,
    scroll_size: AxisPair,
    client_size: AxisPair,
    nodes: HashMap<String, NodeSpec>,
    order: Vec<String>,
    position: Cell<AxisPair>,
    writes: RefCell<Vec<(Axis, f64)>>,
    listeners: RefCell<BTreeMap<ListenerId, WheelCallback>>,
    next_listener: Cell<u32>,
}

impl FakeSurface {
    /// Viewport without nodes, sized by its content and client extents.
    pub fn new(scroll_size: AxisPair, client_size: AxisPair) -> Self {
        Self {
            container: None,
            scroll_size,
            client_size,
            nodes: HashMap::new(),
            order: Vec::new(),
            position: Cell::new(AxisPair::default()),
            writes: RefCell::new(Vec::new()),
            listeners: RefCell::new(BTreeMap::new()),
            next_listener: Cell::new(0),
        }
    }

    /// Vertical-only viewport whose maximum scroll position is `max_y`.
    pub fn with_max_y(max_y: f64) -> Self {
        Self::new(
            AxisPair {
                x: 0.0,
                y: max_y + 600.0,
            },
            AxisPair { x: 0.0, y: 600.0 },
        )
    }

    pub fn from_layout(layout: &Layout) -> Self {
        let mut surface = Self::new(layout.scroll_size, layout.client_size);
        surface.container = layout.container.clone();
        for node in &layout.nodes {
            surface.order.push(node.id.clone());
            surface.nodes.insert(node.id.clone(), node.clone());
        }
        surface
    }

    /// Place the scroll position without logging a write.
    pub fn set_initial(&self, axis: Axis, value: f64) {
        let mut pos = self.position.get();
        match axis {
            Axis::X => pos.x = value,
            Axis::Y => pos.y = value,
        }
        self.position.set(pos);
    }

    /// Every value passed to `set_position`, before clamping.
    pub fn writes(&self) -> Vec<(Axis, f64)> {
        self.writes.borrow().clone()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Deliver one wheel event to every armed listener.
    pub fn fire_wheel(&self) {
        // Clone out first: listeners remove themselves while running.
        let callbacks: Vec<WheelCallback> = self.listeners.borrow().values().cloned().collect();
        for callback in callbacks {
            callback();
        }
    }

    /// Simulate the user scrolling the container.
    pub fn user_scroll(&self, axis: Axis, value: f64) {
        self.set_initial(axis, value.min(self.max_position(axis)).max(0.0));
    }

    fn in_container(&self, id: &str) -> bool {
        let Some(container) = &self.container else {
            return true;
        };
        let mut current = self.nodes.get(id).and_then(|n| n.parent.clone());
        while let Some(parent) = current {
            if &parent == container {
                return true;
            }
            current = self.nodes.get(&parent).and_then(|n| n.parent.clone());
        }
        false
    }
}

impl ScrollSurface for FakeSurface {
    type Node = String;

    fn position(&self, axis: Axis) -> f64 {
        pick(&self.position.get(), axis)
    }

    fn set_position(&self, axis: Axis, value: f64) {
        self.writes.borrow_mut().push((axis, value));
        let clamped = value.min(self.max_position(axis)).max(0.0);
        self.set_initial(axis, clamped);
    }

    fn scroll_size(&self, axis: Axis) -> f64 {
        pick(&self.scroll_size, axis)
    }

    fn client_size(&self, axis: Axis) -> f64 {
        pick(&self.client_size, axis)
    }

    fn query_selector(&self, selector: &str) -> Result<Option<String>, ScrollError> {
        if selector.trim().is_empty() {
            return Err(ScrollError::InvalidTarget {
                reason: format!("'{selector}' is not a valid selector"),
            });
        }
        Ok(self
            .order
            .iter()
            .filter(|id| self.in_container(id))
            .find(|id| {
                self.nodes[id.as_str()]
                    .selectors
                    .iter()
                    .any(|s| s == selector)
            })
            .cloned())
    }

    fn container(&self) -> Option<String> {
        self.container.clone()
    }

    fn node_offset(&self, node: &String, axis: Axis) -> f64 {
        self.nodes
            .get(node)
            .map(|n| pick(&n.offset, axis))
            .unwrap_or(0.0)
    }

    fn offset_parent(&self, node: &String) -> Option<String> {
        self.nodes.get(node).and_then(|n| n.parent.clone())
    }

    fn add_wheel_listener(&self, callback: WheelCallback) -> ListenerId {
        let id = ListenerId(self.next_listener.get());
        self.next_listener.set(id.0 + 1);
        self.listeners.borrow_mut().insert(id, callback);
        id
    }

    fn remove_wheel_listener(&self, id: ListenerId) {
        self.listeners.borrow_mut().remove(&id);
    }
}

/// Manual clock plus a frame queue that only advances when a test pumps it.
pub struct FakeScheduler {
    now: Cell<f64>,
    frames_supported: bool,
    fail_requests: Cell<bool>,
    queue: RefCell<VecDeque<FrameCallback>>,
}

impl Default for FakeScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeScheduler {
    pub fn new() -> Self {
        Self {
            now: Cell::new(0.0),
            frames_supported: true,
            fail_requests: Cell::new(false),
            queue: RefCell::new(VecDeque::new()),
        }
    }

    /// Host with no frame scheduling; the animator must take its
    /// synchronous path.
    pub fn without_frames() -> Self {
        Self {
            frames_supported: false,
            ..Self::new()
        }
    }

    /// Make every later `request_frame` fail.
    pub fn fail_requests(&self, fail: bool) {
        self.fail_requests.set(fail);
    }

    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Run the callbacks queued so far as one frame. Callbacks queued while
    /// running wait for the next frame. Returns how many ran.
    pub fn run_frame(&self) -> usize {
        let batch: Vec<FrameCallback> = self.queue.borrow_mut().drain(..).collect();
        let count = batch.len();
        for callback in batch {
            callback();
        }
        count
    }

    /// Advance by `frame_ms` and run a frame until nothing is queued or
    /// `max_frames` frames ran. Returns the number of frames run.
    pub fn pump(&self, frame_ms: f64, max_frames: usize) -> usize {
        let mut frames = 0;
        while frames < max_frames && self.pending() > 0 {
            self.advance(frame_ms);
            self.run_frame();
            frames += 1;
        }
        frames
    }
}

impl FrameScheduler for FakeScheduler {
    fn now(&self) -> f64 {
        self.now.get()
    }

    fn can_schedule_frames(&self) -> bool {
        self.frames_supported
    }

    fn request_frame(&self, callback: FrameCallback) -> Result<(), ScrollError> {
        if self.fail_requests.get() {
            return Err(ScrollError::host("frame queue closed"));
        }
        self.queue.borrow_mut().push_back(callback);
        Ok(())
    }
}
