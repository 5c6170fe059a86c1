// ============================================================================
// AUTH VIEWMODEL - Login and registration forms
// ============================================================================

use crate::context::AppContext;
use crate::models::Session;
use crate::error::ApiError;
use crate::routing::Route;
use crate::state::ReactiveState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Register,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthForm {
    pub email: String,
    pub name: String,
    pub password: String,
    pub error: Option<String>,
    pub loading: bool,
}

pub struct AuthViewModel {
    ctx: AppContext,
    mode: AuthMode,
    pub state: ReactiveState<AuthForm>,
}

impl AuthViewModel {
    pub fn new(ctx: AppContext, mode: AuthMode) -> Self {
        Self {
            ctx,
            mode,
            state: ReactiveState::default(),
        }
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    pub fn set_email(&self, value: String) {
        self.state.update_silent(|f| f.email = value);
    }

    pub fn set_name(&self, value: String) {
        self.state.update_silent(|f| f.name = value);
    }

    pub fn set_password(&self, value: String) {
        self.state.update_silent(|f| f.password = value);
    }

    fn missing_fields(&self, form: &AuthForm) -> bool {
        let blank_name = self.mode == AuthMode::Register && form.name.trim().is_empty();
        form.email.trim().is_empty() || form.password.is_empty() || blank_name
    }

    fn fallback_error(&self) -> &'static str {
        match self.mode {
            AuthMode::Login => "Login failed. Please try again.",
            AuthMode::Register => "Registration failed. Please try again.",
        }
    }

    /// Send the form; on success store the session and go to the generate page
    pub async fn submit(&self) {
        let form = self.state.snapshot();
        if form.loading {
            return;
        }
        if self.missing_fields(&form) {
            self.state
                .update(|f| f.error = Some("Please fill in all fields.".to_string()));
            return;
        }

        self.state.update(|f| {
            f.loading = true;
            f.error = None;
        });

        let email = form.email.trim();
        let result: Result<Session, ApiError> = match self.mode {
            AuthMode::Login => {
                log::debug!("🔐 [LOGIN] Signing in");
                self.ctx.api.login(email, &form.password).await
            }
            AuthMode::Register => {
                log::debug!("📝 [REGISTER] Creating account");
                self.ctx
                    .api
                    .register(email, form.name.trim(), &form.password)
                    .await
            }
        };

        match result {
            Ok(session) => {
                self.ctx.session.login(session);
                self.state.update(|f| {
                    f.loading = false;
                    f.password.clear();
                });
                self.ctx.navigate(&Route::Generate.path());
            }
            Err(e) => {
                log::warn!("⚠️ [AUTH] {:?} failed: {}", self.mode, e);
                let message = e.server_message_or(self.fallback_error());
                self.state.update(|f| {
                    f.loading = false;
                    f.error = Some(message);
                });
            }
        }
    }
}
