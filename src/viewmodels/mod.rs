// ============================================================================
// VIEWMODELS - Page state + async actions, no DOM access
// ============================================================================

pub mod auth_viewmodel;
pub mod dashboard_viewmodel;
pub mod document_viewmodel;
pub mod generate_viewmodel;

pub use auth_viewmodel::{AuthForm, AuthMode, AuthViewModel};
pub use dashboard_viewmodel::{DashboardState, DashboardViewModel};
pub use document_viewmodel::{DocumentState, DocumentViewModel};
pub use generate_viewmodel::{GenerateState, GenerateViewModel};
