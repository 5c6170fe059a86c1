// ============================================================================
// APP CONTEXT - Services shared by every view-model
// ============================================================================

use std::rc::Rc;

use crate::routing::{BrowserNavigator, Navigator};
use crate::services::{ApiClient, BrowserFileSaver, FileSaver, GlooTransport};
use crate::state::SessionStore;
use crate::utils::browser_or_memory;

#[derive(Clone)]
pub struct AppContext {
    pub session: SessionStore,
    pub api: ApiClient,
    pub navigator: Rc<dyn Navigator>,
    pub files: Rc<dyn FileSaver>,
}

impl AppContext {
    /// Wire the browser implementations together
    pub fn browser() -> Self {
        let session = SessionStore::restore(Rc::from(browser_or_memory()));
        let navigator: Rc<dyn Navigator> = Rc::new(BrowserNavigator::new());
        let api = ApiClient::new(Rc::new(GlooTransport), session.clone(), navigator.clone());
        Self {
            session,
            api,
            navigator,
            files: Rc::new(BrowserFileSaver),
        }
    }

    pub fn navigate(&self, path: &str) {
        self.navigator.push(path);
    }

    /// Logout button: forget the session and go to /login
    pub fn logout(&self) {
        self.session.logout();
        self.navigator.push("/login");
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::Harness;
    use crate::utils::KeyValueStore;

    #[test]
    fn logout_clears_session_and_goes_to_login() {
        let h = Harness::signed_in("/dashboard");
        assert!(h.storage.get("accessToken").is_some());

        h.ctx.logout();

        assert!(!h.session.is_authenticated());
        for key in ["accessToken", "refreshToken", "user"] {
            assert_eq!(h.storage.get(key), None, "{} should be removed", key);
        }
        assert_eq!(h.navigator.pushed(), vec!["/login".to_string()]);
    }

    #[test]
    fn navigate_pushes_history_entry() {
        let h = Harness::signed_in("/dashboard");

        h.ctx.navigate("/generate");

        assert_eq!(h.navigator.pushed(), vec!["/generate".to_string()]);
        assert!(h.session.is_authenticated());
    }
}
