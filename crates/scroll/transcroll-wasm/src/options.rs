//! Decoding of the JS `(target, options)` arguments.

use js_sys::{Function, Object, Reflect};
use log::warn;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Window};

use transcroll_core::{EasingCurve, ScrollError, ScrollOptions, ScrollTarget};

use crate::dom::Container;

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

/// `target` argument: number, selector string, element or the window.
/// The window stands for the top of the container.
pub fn decode_target(target: &JsValue) -> Result<ScrollTarget<Element>, ScrollError> {
    if let Some(n) = target.as_f64() {
        return Ok(ScrollTarget::Position(n));
    }
    if let Some(s) = target.as_string() {
        return Ok(ScrollTarget::Selector(s));
    }
    if let Some(el) = target.dyn_ref::<Element>() {
        return Ok(ScrollTarget::Element(el.clone()));
    }
    if target.is_instance_of::<Window>() {
        return Ok(ScrollTarget::Position(0.0));
    }
    Err(ScrollError::InvalidTarget {
        reason: "expected a number, a selector string, an Element or the window".to_string(),
    })
}

/// `options.el`: window (default) or an element.
fn decode_container(window: &Window, el: JsValue) -> Result<Container, ScrollError> {
    if jsvalue_is_undefined_or_null(&el) || el.is_instance_of::<Window>() {
        return Ok(Container::Window(window.clone()));
    }
    el.dyn_into::<Element>()
        .map(Container::Element)
        .map_err(|_| ScrollError::InvalidOption {
            reason: "el must be the window or an Element".to_string(),
        })
}

fn js_easing(f: Function) -> EasingCurve {
    EasingCurve::custom(move |t| {
        match f.call1(&JsValue::UNDEFINED, &JsValue::from_f64(t)) {
            Ok(v) => v.as_f64().unwrap_or(t),
            Err(e) => {
                warn!("transcroll: easing function threw {e:?}, using linear progress");
                t
            }
        }
    })
}

fn get(obj: &JsValue, key: &str) -> Result<JsValue, ScrollError> {
    Reflect::get(obj, &JsValue::from_str(key)).map_err(|e| ScrollError::InvalidOption {
        reason: format!("could not read options.{key}: {e:?}"),
    })
}

/// Split the options object into the container and the serde-decodable rest.
///
/// `el` and a function-valued `easing` cannot go through serde, so they are
/// read by hand and removed from a shallow copy before decoding.
pub fn decode_options(
    window: &Window,
    options: &JsValue,
) -> Result<(Container, ScrollOptions), ScrollError> {
    if jsvalue_is_undefined_or_null(options) {
        return Ok((Container::Window(window.clone()), ScrollOptions::default()));
    }
    if !options.is_object() {
        return Err(ScrollError::InvalidOption {
            reason: "options must be an object".to_string(),
        });
    }

    let container = decode_container(window, get(options, "el")?)?;
    let easing_fn = get(options, "easing")?.dyn_into::<Function>().ok();

    let plain = Object::assign(&Object::new(), options.unchecked_ref());
    let _ = Reflect::delete_property(&plain, &JsValue::from_str("el"));
    if easing_fn.is_some() {
        let _ = Reflect::delete_property(&plain, &JsValue::from_str("easing"));
    }

    let mut opts: ScrollOptions =
        swb::from_value(plain.into()).map_err(|e| ScrollError::InvalidOption {
            reason: e.to_string(),
        })?;
    if let Some(f) = easing_fn {
        opts.easing = js_easing(f);
    }
    Ok((container, opts))
}
