// ============================================================================
// SESSION STATE - Tokens + user, in memory and in persistent storage
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::models::{Session, User};
use crate::utils::KeyValueStore;

pub const ACCESS_TOKEN_KEY: &str = "accessToken";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
pub const USER_KEY: &str = "user";

/// Session store. Clones share the same session and backing storage.
#[derive(Clone)]
pub struct SessionStore {
    current: Rc<RefCell<Option<Session>>>,
    storage: Rc<dyn KeyValueStore>,
}

impl SessionStore {
    /// Rebuild the session persisted by a previous page load
    pub fn restore(storage: Rc<dyn KeyValueStore>) -> Self {
        let restored = Self::read(storage.as_ref());
        if restored.is_none() {
            // Drop half-written leftovers so the next login starts clean
            for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY] {
                storage.remove(key);
            }
        } else {
            log::info!("💾 [SESSION] Session restored from storage");
        }
        Self {
            current: Rc::new(RefCell::new(restored)),
            storage,
        }
    }

    fn read(storage: &dyn KeyValueStore) -> Option<Session> {
        let access_token = storage.get(ACCESS_TOKEN_KEY).filter(|t| !t.is_empty())?;
        let refresh_token = storage.get(REFRESH_TOKEN_KEY)?;
        let user_json = storage.get(USER_KEY)?;
        let user: User = match serde_json::from_str(&user_json) {
            Ok(user) => user,
            Err(e) => {
                log::warn!("⚠️ [SESSION] Stored user is not valid JSON: {}", e);
                return None;
            }
        };
        Some(Session {
            access_token,
            refresh_token,
            user,
        })
    }

    /// Store a fresh session (login/register)
    pub fn login(&self, session: Session) {
        self.persist(&session);
        log::info!("✅ [SESSION] Logged in");
        *self.current.borrow_mut() = Some(session);
    }

    fn persist(&self, session: &Session) {
        let user_json = match serde_json::to_string(&session.user) {
            Ok(json) => json,
            Err(e) => {
                log::error!("❌ [SESSION] Could not serialize user: {}", e);
                return;
            }
        };
        let writes = [
            (ACCESS_TOKEN_KEY, session.access_token.as_str()),
            (REFRESH_TOKEN_KEY, session.refresh_token.as_str()),
            (USER_KEY, user_json.as_str()),
        ];
        for (key, value) in writes {
            if let Err(e) = self.storage.set(key, value) {
                // In-memory session still works for this page load
                log::error!("❌ [SESSION] {}", e);
            }
        }
    }

    /// Clear memory and storage; safe to call repeatedly
    pub fn logout(&self) {
        for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY] {
            self.storage.remove(key);
        }
        if self.current.borrow_mut().take().is_some() {
            log::info!("👋 [SESSION] Session cleared");
        }
    }

    pub fn access_token(&self) -> Option<String> {
        self.current
            .borrow()
            .as_ref()
            .map(|s| s.access_token.clone())
    }

    pub fn user(&self) -> Option<User> {
        self.current.borrow().as_ref().map(|s| s.user.clone())
    }

    pub fn user_email(&self) -> Option<String> {
        self.user().map(|u| u.email)
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.borrow().is_some()
    }
}
