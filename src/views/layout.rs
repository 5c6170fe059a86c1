// ============================================================================
// LAYOUT - Header with navigation around every signed-in page
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::context::AppContext;
use crate::dom::{on_click, ElementBuilder};
use crate::routing::Route;
use crate::views::shared::{button, link};

fn nav_link(ctx: &AppContext, current: &Route, target: Route, label: &str) -> Result<Element, JsValue> {
    let class = if *current == target { "nav-link active" } else { "nav-link" };
    link(ctx, &target.path(), label, class)
}

fn render_header(ctx: &AppContext, current: &Route) -> Result<Element, JsValue> {
    let title = ElementBuilder::new("span")?
        .class("app-title")
        .text("Test Assistant")
        .build();

    let nav = ElementBuilder::new("nav")?
        .class("app-nav")
        .child(nav_link(ctx, current, Route::Dashboard, "Dashboard")?)?
        .child(nav_link(ctx, current, Route::Generate, "Generate")?)?
        .build();

    let email = ctx.session.user_email().unwrap_or_default();
    let user = ElementBuilder::new("span")?.class("user-email").text(&email).build();

    let logout = button("Logout", "btn-logout", false)?;
    {
        let ctx = ctx.clone();
        on_click(&logout, move |_| {
            log::info!("👋 [LAYOUT] Logout");
            ctx.logout();
        })?;
    }

    let account = ElementBuilder::new("div")?
        .class("app-account")
        .child(user)?
        .child(logout)?
        .build();

    Ok(ElementBuilder::new("header")?
        .class("app-header")
        .child(title)?
        .child(nav)?
        .child(account)?
        .build())
}

/// Header + `<main>` wrapping `content`
pub fn render_layout(ctx: &AppContext, current: &Route, content: Element) -> Result<Element, JsValue> {
    let main = ElementBuilder::new("main")?
        .class("app-main")
        .child(content)?
        .build();
    Ok(ElementBuilder::new("div")?
        .class("app-shell")
        .child(render_header(ctx, current)?)?
        .child(main)?
        .build())
}
