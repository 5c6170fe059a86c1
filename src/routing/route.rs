/// Client-side routes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Generate,
    Dashboard,
    View(String),
    NotFound,
}

impl Route {
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or("");
        let trimmed = path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Route::Generate,
            ["login"] => Route::Login,
            ["register"] => Route::Register,
            ["dashboard"] => Route::Dashboard,
            ["view", id] => Route::View(id.to_string()),
            _ => Route::NotFound,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Generate => "/".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::View(id) => format!("/view/{}", id),
            Route::NotFound => "/404".to_string(),
        }
    }

    /// Login/register render full-screen and never trigger the 401 redirect
    pub fn is_auth_page(&self) -> bool {
        matches!(self, Route::Login | Route::Register)
    }

    pub fn requires_session(&self) -> bool {
        !self.is_auth_page() && *self != Route::NotFound
    }
}

pub fn is_auth_path(path: &str) -> bool {
    Route::parse(path).is_auth_page()
}
