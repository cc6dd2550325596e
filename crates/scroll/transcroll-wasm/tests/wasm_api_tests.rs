#![cfg(target_arch = "wasm32")]
use js_sys::{Function, Object, Promise, Reflect, JSON};
use transcroll_core::{Axis, Jump, ScrollError, ScrollResult, ScrollSurface, ScrollTarget};
use transcroll_wasm::dom::{Container, DomSurface};
use transcroll_wasm::options::{decode_options, decode_target};
use transcroll_wasm::{abi_version, ease, easing_names, easings, transcroll};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn window() -> web_sys::Window {
    web_sys::window().expect("browser window")
}

/// Scrollable 200px box holding a 1000px tall list with a marker at 450px.
fn scroll_box(id: &str) -> web_sys::Element {
    let doc = window().document().unwrap();
    let outer = doc.create_element("div").unwrap();
    outer.set_id(id);
    outer
        .set_attribute(
            "style",
            "position: relative; height: 200px; width: 200px; overflow: auto;",
        )
        .unwrap();
    outer.set_inner_html(
        r#"<div style="height: 1000px; position: relative;">
             <p class="marker" style="position: absolute; top: 450px; margin: 0;">here</p>
           </div>"#,
    );
    doc.body().unwrap().append_child(&outer).unwrap();
    outer
}

fn options_for(el: Option<&web_sys::Element>, json: &str) -> JsValue {
    let obj = JSON::parse(json).unwrap();
    if let Some(el) = el {
        Reflect::set(&obj, &"el".into(), el).unwrap();
    }
    obj
}

async fn settle(promise: Promise) -> ScrollResult {
    let value = JsFuture::from(promise).await.expect("promise resolves");
    serde_wasm_bindgen::from_value(value).expect("result record")
}

#[wasm_bindgen_test]
fn abi_is_1() {
    assert_eq!(abi_version(), 1);
}

#[wasm_bindgen_test]
fn easing_table_is_exposed() {
    assert_eq!(easing_names().length(), 13);
    assert_eq!(ease("easeInQuad", 0.5).ok(), Some(0.25));
    assert!(ease("nope", 0.5).is_err());

    let table = easings().ok().expect("easing table");
    let f: Function = Reflect::get(&table, &JsValue::from_str("easeOutQuad"))
        .unwrap()
        .dyn_into()
        .unwrap();
    let v = f.call1(&JsValue::UNDEFINED, &JsValue::from_f64(0.5)).unwrap();
    assert_eq!(v.as_f64(), Some(0.75));
}

#[wasm_bindgen_test]
fn options_decode_defaults_and_overrides() {
    let (container, opts) = decode_options(&window(), &JsValue::UNDEFINED).unwrap();
    assert!(matches!(container, Container::Window(_)));
    assert_eq!(opts.duration, 200.0);

    let raw = JSON::parse(
        r#"{ "axis": "x", "duration": 50, "jump": false, "interrupt": false, "easing": "linear" }"#,
    )
    .unwrap();
    let (_, opts) = decode_options(&window(), &raw).unwrap();
    assert_eq!(opts.axis, Axis::X);
    assert_eq!(opts.duration, 50.0);
    assert_eq!(opts.jump, Jump::Disabled);
    assert!(!opts.interrupt);
}

#[wasm_bindgen_test]
fn options_accept_element_and_function_easing() {
    let el = scroll_box("opts-box");
    let obj = Object::new();
    Reflect::set(&obj, &"el".into(), &el).unwrap();
    let easing = Function::new_with_args("t", "return 1 - t;");
    Reflect::set(&obj, &"easing".into(), &easing).unwrap();

    let (container, opts) = decode_options(&window(), &obj.into()).unwrap();
    assert!(matches!(container, Container::Element(_)));
    assert_eq!(opts.easing.apply(0.25), 0.75);
}

#[wasm_bindgen_test]
fn invalid_axis_is_reported() {
    let raw = JSON::parse(r#"{ "axis": "z" }"#).unwrap();
    let err = decode_options(&window(), &raw).unwrap_err();
    assert!(matches!(err, ScrollError::InvalidOption { .. }));
}

#[wasm_bindgen_test]
fn targets_decode_by_type() {
    assert!(matches!(
        decode_target(&JsValue::from_f64(12.0)),
        Ok(ScrollTarget::Position(v)) if v == 12.0
    ));
    assert!(matches!(
        decode_target(&JsValue::from_str("#a")),
        Ok(ScrollTarget::Selector(_))
    ));
    assert!(matches!(
        decode_target(&window().into()),
        Ok(ScrollTarget::Position(v)) if v == 0.0
    ));
    assert!(decode_target(&JsValue::TRUE).is_err());
}

#[wasm_bindgen_test]
fn dom_surface_resolves_offsets_inside_box() {
    let el = scroll_box("offset-box");
    let surface = DomSurface::new(window(), Container::Element(el));
    assert_eq!(surface.max_position(Axis::Y), 800.0);

    let marker = surface.query_selector(".marker").unwrap().unwrap();
    let relative = surface.page_offset(&marker, Axis::Y) - surface.container_offset(Axis::Y);
    assert_eq!(relative, 450.0);

    surface.set_position(Axis::Y, 120.0);
    assert_eq!(surface.position(Axis::Y), 120.0);
}

#[wasm_bindgen_test]
fn transcroll_returns_promise_or_throws() {
    let el = scroll_box("api-box");
    let obj = Object::new();
    Reflect::set(&obj, &"el".into(), &el).unwrap();

    let promise = transcroll(JsValue::from_str(".marker"), obj.clone().into())
        .ok()
        .expect("animation promise");
    assert!(promise.is_instance_of::<Promise>());

    assert!(transcroll(JsValue::from_str("#does-not-exist"), obj.into()).is_err());
}

#[wasm_bindgen_test]
async fn promise_resolves_after_frames_in_element() {
    let el = scroll_box("await-box");
    let opts = options_for(Some(&el), r#"{ "duration": 0, "jump": false }"#);

    let promise = transcroll(JsValue::from_str(".marker"), opts)
        .ok()
        .expect("animation promise");
    let result = settle(promise).await;

    assert_eq!(result, ScrollResult::default());
    assert_eq!(el.scroll_top(), 450);
}

#[wasm_bindgen_test]
async fn wheel_event_interrupts_before_first_frame() {
    let el = scroll_box("wheel-box");
    let opts = options_for(Some(&el), r#"{ "duration": 1000 }"#);

    let promise = transcroll(JsValue::from_str(".marker"), opts)
        .ok()
        .expect("animation promise");
    let wheel = web_sys::WheelEvent::new("wheel").unwrap();
    el.dispatch_event(&wheel).unwrap();
    let result = settle(promise).await;

    assert_eq!(
        result,
        ScrollResult {
            interrupted: true,
            jumped: false
        }
    );
    assert_eq!(el.scroll_top(), 0);
}

#[wasm_bindgen_test]
async fn window_container_scrolls_page() {
    let doc = window().document().unwrap();
    let spacer = doc.create_element("div").unwrap();
    spacer.set_attribute("style", "height: 5000px;").unwrap();
    doc.body().unwrap().append_child(&spacer).unwrap();

    let opts = r#"{ "duration": 0, "jump": false }"#;
    let promise = transcroll(JsValue::from_f64(300.0), options_for(None, opts))
        .ok()
        .expect("animation promise");
    assert_eq!(settle(promise).await, ScrollResult::default());
    assert_eq!(window().page_y_offset().unwrap(), 300.0);

    // The window itself as a target means the top.
    let promise = transcroll(window().into(), options_for(None, opts))
        .ok()
        .expect("animation promise");
    settle(promise).await;
    assert_eq!(window().page_y_offset().unwrap(), 0.0);

    spacer.remove();
}
