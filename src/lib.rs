// ============================================================================
// TEST ASSISTANT PWA - Rust + WebAssembly frontend (MVVM)
// ============================================================================
// - Views: functions that build DOM (no logic)
// - ViewModels: page state + async actions
// - Services: backend communication only
// - State: Rc<RefCell> state with change notifications
// - Models: structures shared with the backend
// ============================================================================

mod app;
mod config;
mod context;
mod dom;
mod error;
mod markdown;
mod models;
mod routing;
mod services;
mod state;
mod utils;
mod viewmodels;
mod views;

#[cfg(test)]
mod testing;

use std::cell::{Cell, RefCell};

use gloo_timers::callback::Timeout;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::app::App;
use crate::config::CONFIG;

thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
    static RENDER_PENDING: Cell<bool> = Cell::new(false);
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    if CONFIG.is_logging_enabled() {
        wasm_logger::init(wasm_logger::Config::new(CONFIG.log_level()));
    }
    log::info!("🚀 Test Assistant - backend {}", CONFIG.backend_url);

    let app = App::new()?;
    app.render()?;
    APP.with(|cell| *cell.borrow_mut() = Some(app));

    // Back/forward buttons; registered once
    if let Some(win) = web_sys::window() {
        let closure = Closure::wrap(Box::new(move |_e: web_sys::PopStateEvent| {
            log::info!("🧭 [NAV] popstate");
            schedule_render();
        }) as Box<dyn FnMut(web_sys::PopStateEvent)>);
        win.add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    Ok(())
}

/// Coalesce every change in the current tick into one full re-render
pub fn schedule_render() {
    if RENDER_PENDING.with(|pending| pending.replace(true)) {
        return;
    }
    Timeout::new(0, || {
        RENDER_PENDING.with(|pending| pending.set(false));
        rerender_app();
    })
    .forget();
}

pub fn rerender_app() {
    APP.with(|cell| match cell.borrow().as_ref() {
        Some(app) => {
            if let Err(e) = app.render() {
                log::error!("❌ [RERENDER] {:?}", e);
            }
        }
        None => log::warn!("⚠️ [RERENDER] App is not initialised"),
    });
}
