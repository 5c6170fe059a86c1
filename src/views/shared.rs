// ============================================================================
// SHARED VIEW PIECES - Banners, spinner, links, buttons
// ============================================================================

use std::future::Future;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::context::AppContext;
use crate::dom::{on_click, ElementBuilder};

pub fn error_banner(message: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .class("error-banner")
        .attr("role", "alert")?
        .text(message)
        .build())
}

pub fn spinner(label: &str) -> Result<Element, JsValue> {
    let wheel = ElementBuilder::new("div")?.class("spinner").build();
    let text = ElementBuilder::new("p")?.class("spinner-label").text(label).build();
    Ok(ElementBuilder::new("div")?
        .class("loading-state")
        .child(wheel)?
        .child(text)?
        .build())
}

/// `<a href>` that navigates through the History API instead of reloading
pub fn link(ctx: &AppContext, path: &str, label: &str, class: &str) -> Result<Element, JsValue> {
    let anchor = ElementBuilder::new("a")?
        .class(class)
        .attr("href", path)?
        .text(label)
        .build();
    let ctx = ctx.clone();
    let target = path.to_string();
    on_click(&anchor, move |e| {
        e.prevent_default();
        ctx.navigate(&target);
    })?;
    Ok(anchor)
}

pub fn button(label: &str, class: &str, disabled: bool) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("button")?
        .attr("type", "button")?
        .class(class)
        .text(label)
        .disabled(disabled)?
        .build())
}

/// Click runs an async view-model action on the event loop
pub fn on_click_spawn<F, Fut>(element: &Element, action: F) -> Result<(), JsValue>
where
    F: Fn() -> Fut + 'static,
    Fut: Future<Output = ()> + 'static,
{
    on_click(element, move |_| spawn_local(action()))
}

/// Label / value pair used by the analysis card
pub fn field(label: &str, value: &str) -> Result<Element, JsValue> {
    let name = ElementBuilder::new("span")?.class("field-label").text(label).build();
    let val = ElementBuilder::new("p")?.class("field-value").text(value).build();
    Ok(ElementBuilder::new("div")?
        .class("field")
        .child(name)?
        .child(val)?
        .build())
}
