// ============================================================================
// VIEWS - DOM rendering, one function per page
// ============================================================================

pub mod auth;
pub mod dashboard;
pub mod document;
pub mod generate;
pub mod layout;
pub mod shared;

pub use auth::render_auth;
pub use dashboard::render_dashboard;
pub use document::render_document;
pub use generate::render_generate;
pub use layout::render_layout;

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::context::AppContext;
use crate::dom::ElementBuilder;
use crate::routing::Route;
use crate::state::Page;

fn render_not_found(ctx: &AppContext) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .class("not-found")
        .child(ElementBuilder::new("h1")?.text("Page not found").build())?
        .child(shared::link(ctx, &Route::Generate.path(), "Go to Generate", "btn-primary")?)?
        .build())
}

/// Auth pages render full-screen; everything else sits inside the layout
pub fn render_page(ctx: &AppContext, route: &Route, page: &Page) -> Result<Element, JsValue> {
    let content = match page {
        Page::Login(vm) | Page::Register(vm) => return render_auth(ctx, vm),
        Page::Generate(vm) => render_generate(ctx, vm)?,
        Page::Dashboard(vm) => render_dashboard(ctx, vm)?,
        Page::Document(vm) => render_document(ctx, vm)?,
        Page::NotFound => render_not_found(ctx)?,
    };
    render_layout(ctx, route, content)
}
