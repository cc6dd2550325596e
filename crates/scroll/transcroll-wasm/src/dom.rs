//! Browser host: scroll surface and frame scheduler over `web-sys`.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use js_sys::{Date, Reflect};
use log::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, Window};

use transcroll_core::{
    Axis, FrameCallback, FrameScheduler, ListenerId, ScrollError, ScrollSurface, WheelCallback,
};

/// Event that interrupts a running animation.
const WHEEL_EVENT: &str = "wheel";

type WheelClosure = Closure<dyn FnMut(Event)>;

/// What scrolls: the page viewport or one element.
#[derive(Debug, Clone)]
pub enum Container {
    Window(Window),
    Element(Element),
}

/// Scroll surface backed by the live DOM.
pub struct DomSurface {
    window: Window,
    container: Container,
    listeners: RefCell<HashMap<ListenerId, WheelClosure>>,
    // Closures removed while possibly executing; dropped on the next add.
    retired: RefCell<Vec<WheelClosure>>,
    next_listener: Cell<u32>,
}

impl DomSurface {
    pub fn new(window: Window, container: Container) -> Self {
        Self {
            window,
            container,
            listeners: RefCell::new(HashMap::new()),
            retired: RefCell::new(Vec::new()),
            next_listener: Cell::new(0),
        }
    }

    fn document(&self) -> Option<Document> {
        self.window.document()
    }

    /// Element whose scroll extents describe the container.
    fn scrolling_element(&self) -> Option<Element> {
        match &self.container {
            Container::Window(_) => self.document().and_then(|d| d.document_element()),
            Container::Element(el) => Some(el.clone()),
        }
    }

    fn event_target(&self) -> &EventTarget {
        match &self.container {
            Container::Window(w) => w.as_ref(),
            Container::Element(el) => el.as_ref(),
        }
    }
}

impl ScrollSurface for DomSurface {
    type Node = Element;

    fn position(&self, axis: Axis) -> f64 {
        match &self.container {
            Container::Window(w) => {
                let offset = match axis {
                    Axis::X => w.page_x_offset(),
                    Axis::Y => w.page_y_offset(),
                };
                offset.unwrap_or(0.0)
            }
            Container::Element(el) => match axis {
                Axis::X => el.scroll_left() as f64,
                Axis::Y => el.scroll_top() as f64,
            },
        }
    }

    fn set_position(&self, axis: Axis, value: f64) {
        match &self.container {
            Container::Window(w) => {
                let (x, y) = match axis {
                    Axis::X => (value, self.position(Axis::Y)),
                    Axis::Y => (self.position(Axis::X), value),
                };
                w.scroll_with_x_and_y(x, y);
            }
            Container::Element(el) => match axis {
                Axis::X => el.set_scroll_left(value.round() as i32),
                Axis::Y => el.set_scroll_top(value.round() as i32),
            },
        }
    }

    fn scroll_size(&self, axis: Axis) -> f64 {
        self.scrolling_element()
            .map(|el| match axis {
                Axis::X => el.scroll_width() as f64,
                Axis::Y => el.scroll_height() as f64,
            })
            .unwrap_or(0.0)
    }

    fn client_size(&self, axis: Axis) -> f64 {
        self.scrolling_element()
            .map(|el| match axis {
                Axis::X => el.client_width() as f64,
                Axis::Y => el.client_height() as f64,
            })
            .unwrap_or(0.0)
    }

    fn query_selector(&self, selector: &str) -> Result<Option<Element>, ScrollError> {
        let found = match &self.container {
            Container::Window(_) => self
                .document()
                .ok_or_else(|| ScrollError::host("window has no document"))?
                .query_selector(selector),
            Container::Element(el) => el.query_selector(selector),
        };
        found.map_err(|e| ScrollError::InvalidTarget {
            reason: format!("selector '{selector}' rejected: {e:?}"),
        })
    }

    fn container(&self) -> Option<Element> {
        match &self.container {
            Container::Window(_) => None,
            Container::Element(el) => Some(el.clone()),
        }
    }

    fn node_offset(&self, node: &Element, axis: Axis) -> f64 {
        node.dyn_ref::<HtmlElement>()
            .map(|html| match axis {
                Axis::X => html.offset_left() as f64,
                Axis::Y => html.offset_top() as f64,
            })
            .unwrap_or(0.0)
    }

    fn offset_parent(&self, node: &Element) -> Option<Element> {
        node.dyn_ref::<HtmlElement>()
            .and_then(HtmlElement::offset_parent)
    }

    fn add_wheel_listener(&self, callback: WheelCallback) -> ListenerId {
        self.retired.borrow_mut().clear();

        let id = ListenerId(self.next_listener.get());
        self.next_listener.set(id.0.wrapping_add(1));

        let closure = WheelClosure::new(move |_event: Event| callback());
        if let Err(e) = self
            .event_target()
            .add_event_listener_with_callback(WHEEL_EVENT, closure.as_ref().unchecked_ref())
        {
            warn!("transcroll: could not arm wheel listener: {e:?}");
        }
        self.listeners.borrow_mut().insert(id, closure);
        id
    }

    fn remove_wheel_listener(&self, id: ListenerId) {
        let removed = self.listeners.borrow_mut().remove(&id);
        if let Some(closure) = removed {
            if let Err(e) = self
                .event_target()
                .remove_event_listener_with_callback(WHEEL_EVENT, closure.as_ref().unchecked_ref())
            {
                warn!("transcroll: could not remove wheel listener: {e:?}");
            }
            self.retired.borrow_mut().push(closure);
        }
    }
}

/// `requestAnimationFrame` scheduler with a `performance.now()` clock.
pub struct DomScheduler {
    window: Window,
}

impl DomScheduler {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl FrameScheduler for DomScheduler {
    fn now(&self) -> f64 {
        self.window
            .performance()
            .map(|p| p.now())
            .unwrap_or_else(Date::now)
    }

    fn can_schedule_frames(&self) -> bool {
        Reflect::has(&self.window, &JsValue::from_str("requestAnimationFrame")).unwrap_or(false)
    }

    fn request_frame(&self, callback: FrameCallback) -> Result<(), ScrollError> {
        let frame = Closure::once_into_js(move || callback());
        self.window
            .request_animation_frame(frame.unchecked_ref())
            .map(|_| ())
            .map_err(|e| ScrollError::host(format!("requestAnimationFrame failed: {e:?}")))
    }
}
