// ============================================================================
// DASHBOARD VIEWMODEL - Paginated, filtered list of generations
// ============================================================================

use crate::config::CONFIG;
use crate::context::AppContext;
use crate::models::{Generation, ListFilter, Pagination};
use crate::state::ReactiveState;

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub items: Vec<Generation>,
    pub loading: bool,
    pub error: Option<String>,
    pub page: u32,
    pub pagination: Option<Pagination>,
    pub filter: ListFilter,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: true,
            error: None,
            page: 1,
            pagination: None,
            filter: ListFilter::All,
        }
    }
}

impl DashboardState {
    fn total_pages(&self) -> u32 {
        self.pagination.as_ref().map(|p| p.pages).unwrap_or(0)
    }

    pub fn shows_pagination(&self) -> bool {
        self.total_pages() > 1
    }

    pub fn can_go_previous(&self) -> bool {
        self.page > 1
    }

    /// Server-reported total decides the last page
    pub fn can_go_next(&self) -> bool {
        self.page < self.total_pages()
    }

    /// Page number as reported by the server, falling back to the requested one
    pub fn reported_page(&self) -> u32 {
        self.pagination.as_ref().map(|p| p.page).unwrap_or(self.page)
    }

    pub fn is_empty(&self) -> bool {
        !self.loading && self.items.is_empty()
    }
}

pub struct DashboardViewModel {
    ctx: AppContext,
    pub state: ReactiveState<DashboardState>,
}

impl DashboardViewModel {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            state: ReactiveState::default(),
        }
    }

    pub fn current_user_email(&self) -> Option<String> {
        self.ctx.session.user_email()
    }

    /// "You" for the signed-in user's rows, the owner's email otherwise
    pub fn owner_label(&self, generation: &Generation) -> String {
        let me = self.current_user_email();
        if generation.is_owned_by(me.as_deref()) {
            "You".to_string()
        } else {
            generation.email.clone().unwrap_or_default()
        }
    }

    pub async fn load(&self) {
        let (page, filter) = self.state.with(|s| (s.page, s.filter));
        self.state.update(|s| {
            s.loading = true;
            s.error = None;
        });

        log::info!("📋 [DASHBOARD] Loading page {} ({})", page, filter.as_query());
        let result = self
            .ctx
            .api
            .list_generations(page, CONFIG.page_size, filter)
            .await;

        self.state.update(|s| {
            s.loading = false;
            match result {
                Ok(list) => {
                    s.items = list.generations;
                    s.pagination = list.pagination;
                }
                Err(e) => {
                    log::error!("❌ [DASHBOARD] Failed to load generations: {}", e);
                    // 401 already redirected to /login
                    if !e.is_unauthorized() {
                        s.error = Some(
                            e.server_message_or("Failed to load generations. Please try again."),
                        );
                    }
                }
            }
        });
    }

    pub async fn set_filter(&self, filter: ListFilter) {
        self.state.update_silent(|s| {
            s.filter = filter;
            s.page = 1;
        });
        self.load().await;
    }

    pub async fn previous_page(&self) {
        if !self.state.with(DashboardState::can_go_previous) {
            return;
        }
        self.state.update_silent(|s| s.page = s.page.saturating_sub(1).max(1));
        self.load().await;
    }

    pub async fn next_page(&self) {
        if !self.state.with(DashboardState::can_go_next) {
            return;
        }
        self.state.update_silent(|s| s.page += 1);
        self.load().await;
    }
}
