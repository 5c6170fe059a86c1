pub mod api_client;
pub mod download_service;
pub mod transport;

pub use api_client::ApiClient;
pub use download_service::{mime_for, BrowserFileSaver, FileSaver};
pub use transport::{ApiRequest, ApiResponse, GlooTransport, HttpMethod, HttpTransport};
