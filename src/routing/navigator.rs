use wasm_bindgen::JsValue;

use super::Route;

/// Location access, so view-models can navigate without touching `window`
pub trait Navigator {
    fn current_path(&self) -> String;
    /// New history entry
    fn push(&self, path: &str);
    /// Replace the current entry (redirects)
    fn replace(&self, path: &str);

    fn current_route(&self) -> Route {
        Route::parse(&self.current_path())
    }
}

/// History API navigator; every navigation schedules a re-render
#[derive(Clone, Default)]
pub struct BrowserNavigator;

impl BrowserNavigator {
    pub fn new() -> Self {
        Self
    }

    fn apply(&self, path: &str, replace: bool) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
        let history = window.history()?;
        if replace {
            history.replace_state_with_url(&JsValue::NULL, "", Some(path))?;
        } else {
            history.push_state_with_url(&JsValue::NULL, "", Some(path))?;
        }
        Ok(())
    }
}

impl Navigator for BrowserNavigator {
    fn current_path(&self) -> String {
        web_sys::window()
            .and_then(|w| w.location().pathname().ok())
            .unwrap_or_else(|| "/".to_string())
    }

    fn push(&self, path: &str) {
        log::info!("🧭 [NAV] push {}", path);
        if let Err(e) = self.apply(path, false) {
            log::error!("❌ [NAV] pushState failed: {:?}", e);
        }
        crate::schedule_render();
    }

    fn replace(&self, path: &str) {
        log::info!("🧭 [NAV] replace {}", path);
        if let Err(e) = self.apply(path, true) {
            log::error!("❌ [NAV] replaceState failed: {:?}", e);
        }
        crate::schedule_render();
    }
}
