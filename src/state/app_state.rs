// ============================================================================
// APP STATE - Active route and the view-model behind it
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::context::AppContext;
use crate::routing::Route;
use crate::viewmodels::{AuthMode, AuthViewModel, DashboardViewModel, DocumentViewModel, GenerateViewModel};

/// One view-model per page, created when the route is entered
#[derive(Clone)]
pub enum Page {
    Login(Rc<AuthViewModel>),
    Register(Rc<AuthViewModel>),
    Generate(Rc<GenerateViewModel>),
    Dashboard(Rc<DashboardViewModel>),
    Document(Rc<DocumentViewModel>),
    NotFound,
}

/// What the app should do for the current location
pub enum Resolution {
    /// Guarded route without a session
    Redirect(String),
    /// `entered` is true the first time a route is shown, which is when its data loads
    Show { page: Page, entered: bool },
}

#[derive(Clone)]
pub struct AppState {
    pub ctx: AppContext,
    current: Rc<RefCell<Option<(Route, Page)>>>,
    on_change: Rc<dyn Fn()>,
}

impl AppState {
    pub fn new(ctx: AppContext, on_change: impl Fn() + 'static) -> Self {
        Self {
            ctx,
            current: Rc::new(RefCell::new(None)),
            on_change: Rc::new(on_change),
        }
    }

    pub fn current_route(&self) -> Route {
        self.ctx.navigator.current_route()
    }

    pub fn resolve(&self) -> Resolution {
        let route = self.current_route();
        if route.requires_session() && !self.ctx.session.is_authenticated() {
            log::info!("🔒 [ROUTER] {} needs a session, redirecting", route.path());
            *self.current.borrow_mut() = None;
            return Resolution::Redirect(Route::Login.path());
        }

        if let Some((active, page)) = self.current.borrow().as_ref() {
            if *active == route {
                return Resolution::Show {
                    page: page.clone(),
                    entered: false,
                };
            }
        }

        let page = self.build_page(&route);
        *self.current.borrow_mut() = Some((route, page.clone()));
        Resolution::Show { page, entered: true }
    }

    fn build_page(&self, route: &Route) -> Page {
        let ctx = self.ctx.clone();
        match route {
            Route::Login => {
                let vm = AuthViewModel::new(ctx, AuthMode::Login);
                self.watch(&vm.state);
                Page::Login(Rc::new(vm))
            }
            Route::Register => {
                let vm = AuthViewModel::new(ctx, AuthMode::Register);
                self.watch(&vm.state);
                Page::Register(Rc::new(vm))
            }
            Route::Generate => {
                let vm = GenerateViewModel::new(ctx);
                self.watch(&vm.state);
                Page::Generate(Rc::new(vm))
            }
            Route::Dashboard => {
                let vm = DashboardViewModel::new(ctx);
                self.watch(&vm.state);
                Page::Dashboard(Rc::new(vm))
            }
            Route::View(id) => {
                let vm = DocumentViewModel::new(ctx, id.clone());
                self.watch(&vm.state);
                Page::Document(Rc::new(vm))
            }
            Route::NotFound => Page::NotFound,
        }
    }

    fn watch<T>(&self, state: &crate::state::ReactiveState<T>) {
        let on_change = self.on_change.clone();
        state.subscribe(move || on_change());
    }
}
