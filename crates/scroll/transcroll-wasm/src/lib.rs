//! JS bindings for Transcroll.
//!
//! ```javascript
//! import { transcroll, easings } from "./pkg/transcroll_wasm.js";
//! const { interrupted, jumped } = await transcroll("#details", { duration: 300, easing: "easeOutCubic" });
//! ```

use std::rc::Rc;

use js_sys::{Array, Function, Object, Promise, Reflect};
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use transcroll_core::{easing, Animator, Easing, ScrollError, ScrollHandle};

pub mod dom;
pub mod logging;
pub mod options;

use dom::{DomScheduler, DomSurface};
use options::{decode_options, decode_target};

fn to_js_error(err: ScrollError) -> JsError {
    JsError::new(&format!("transcroll {} error: {err}", err.category()))
}

fn promise_from_handle(handle: ScrollHandle) -> Promise {
    let mut pending = Some(handle);
    Promise::new(&mut |resolve: Function, _reject: Function| {
        if let Some(handle) = pending.take() {
            handle.on_settle(move |result| {
                let value = swb::to_value(&result).unwrap_or(JsValue::UNDEFINED);
                let _ = resolve.call1(&JsValue::UNDEFINED, &value);
            });
        }
    })
}

/// Animate scrolling toward `target`.
///
/// `target` is a pixel position, a selector string or an Element. `options`
/// is optional: `{ el, offset, axis, duration, easing, jump, interrupt }`.
/// Resolves with `{ interrupted, jumped }`. Throws when the target cannot be
/// resolved or an option is invalid.
#[wasm_bindgen]
pub fn transcroll(target: JsValue, options: JsValue) -> Result<Promise, JsError> {
    console_error_panic_hook::set_once();

    let window = web_sys::window()
        .ok_or_else(|| to_js_error(ScrollError::host("no global window")))?;
    let target = decode_target(&target).map_err(to_js_error)?;
    let (container, opts) = decode_options(&window, &options).map_err(to_js_error)?;

    let surface = DomSurface::new(window.clone(), container);
    let scheduler = DomScheduler::new(window);
    let animator = Animator::new(Rc::new(surface), Rc::new(scheduler));
    let handle = animator.animate(target, opts).map_err(to_js_error)?;
    Ok(promise_from_handle(handle))
}

/// The easing table as an object of `name -> (t) => number`.
#[wasm_bindgen]
pub fn easings() -> Result<Object, JsError> {
    let table = Object::new();
    for curve in Easing::ALL {
        let f = Closure::<dyn Fn(f64) -> f64>::new(move |t| curve.apply(t)).into_js_value();
        Reflect::set(&table, &JsValue::from_str(curve.name()), &f)
            .map_err(|e| JsError::new(&format!("easings: {e:?}")))?;
    }
    Ok(table)
}

/// Evaluate one named easing curve at `t`.
#[wasm_bindgen]
pub fn ease(name: &str, t: f64) -> Result<f64, JsError> {
    easing::lookup(name)
        .map(|curve| curve.apply(t))
        .map_err(to_js_error)
}

#[wasm_bindgen(js_name = easingNames)]
pub fn easing_names() -> Array {
    easing::names()
        .into_iter()
        .map(JsValue::from_str)
        .collect()
}

/// Route `log` output to the browser console at `level` (default "warn").
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging(level: Option<String>) {
    logging::install(logging::parse_level(level.as_deref()));
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
