pub mod navigator;
pub mod route;

pub use navigator::{BrowserNavigator, Navigator};
pub use route::{is_auth_path, Route};
