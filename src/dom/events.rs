// ============================================================================
// EVENT HANDLING
// ============================================================================
// Element listeners are forgotten: they go away with the element when the
// page re-renders through set_inner_html(""). Window listeners are
// registered once, from lib.rs.
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlInputElement, HtmlTextAreaElement, MouseEvent};

fn listen<E, F>(element: &Element, event_type: &str, handler: F) -> Result<(), JsValue>
where
    E: FromWasmAbi + 'static,
    F: FnMut(E) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    element.add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

pub fn on_click<F>(element: &Element, handler: F) -> Result<(), JsValue>
where
    F: FnMut(MouseEvent) + 'static,
{
    listen(element, "click", handler)
}

/// Form submit with the default navigation suppressed
pub fn on_submit<F>(element: &Element, mut handler: F) -> Result<(), JsValue>
where
    F: FnMut() + 'static,
{
    listen(element, "submit", move |e: Event| {
        e.prevent_default();
        handler();
    })
}

/// Current value of an `<input>` or `<textarea>` on every keystroke
pub fn on_input_value<F>(element: &Element, mut handler: F) -> Result<(), JsValue>
where
    F: FnMut(String) + 'static,
{
    listen(element, "input", move |e: Event| {
        if let Some(value) = e.target().and_then(|t| event_target_value(&t)) {
            handler(value);
        }
    })
}

fn event_target_value(target: &web_sys::EventTarget) -> Option<String> {
    if let Some(input) = target.dyn_ref::<HtmlInputElement>() {
        return Some(input.value());
    }
    target.dyn_ref::<HtmlTextAreaElement>().map(|t| t.value())
}
