// ============================================================================
// APP - Root element, routing and page mounting
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::context::AppContext;
use crate::dom::{append_child, get_element_by_id, set_inner_html};
use crate::state::{AppState, Page, Resolution};
use crate::views::render_page;

pub struct App {
    state: AppState,
    root: Element,
}

impl App {
    pub fn new() -> Result<Self, JsValue> {
        let root = get_element_by_id("app")
            .ok_or_else(|| JsValue::from_str("No #app element found"))?;

        let ctx = AppContext::browser();
        if ctx.session.is_authenticated() {
            log::info!("💾 [APP] Session restored");
        }

        // Every view-model change is batched into one re-render
        let state = AppState::new(ctx, crate::schedule_render);
        Ok(Self { state, root })
    }

    /// Data fetched once when a page is entered
    fn mount(page: &Page) {
        match page {
            Page::Dashboard(vm) => {
                let vm = vm.clone();
                spawn_local(async move { vm.load().await });
            }
            Page::Document(vm) => {
                let vm = vm.clone();
                spawn_local(async move { vm.load().await });
            }
            Page::Login(_) | Page::Register(_) | Page::Generate(_) | Page::NotFound => {}
        }
    }

    /// Clear the root and render the current route from scratch
    pub fn render(&self) -> Result<(), JsValue> {
        let page = match self.state.resolve() {
            Resolution::Redirect(to) => {
                // replace() schedules the next render
                self.state.ctx.navigator.replace(&to);
                return Ok(());
            }
            Resolution::Show { page, entered } => {
                if entered {
                    log::info!("🧭 [APP] Entered {}", self.state.current_route().path());
                    Self::mount(&page);
                }
                page
            }
        };

        let view = render_page(&self.state.ctx, &self.state.current_route(), &page)?;
        set_inner_html(&self.root, "");
        append_child(&self.root, &view)?;
        Ok(())
    }
}
