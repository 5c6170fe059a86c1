use serde::{Deserialize, Serialize};

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:3000";
pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub backend_url: String,
    pub page_size: u32,
    pub log_level: String,
    pub enable_logging: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            log_level: "info".to_string(),
            enable_logging: true,
        }
    }
}

impl AppConfig {
    /// Build the configuration from compile-time variables (see build.rs)
    pub fn from_env() -> Self {
        Self::from_values(
            option_env!("BACKEND_URL"),
            option_env!("PAGE_SIZE"),
            option_env!("LOG_LEVEL"),
            option_env!("ENABLE_LOGGING"),
        )
    }

    fn from_values(
        backend_url: Option<&str>,
        page_size: Option<&str>,
        log_level: Option<&str>,
        enable_logging: Option<&str>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            backend_url: backend_url
                .map(|url| url.trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty())
                .unwrap_or(defaults.backend_url),
            page_size: page_size
                .and_then(|v| v.parse().ok())
                .filter(|size| *size > 0)
                .unwrap_or(defaults.page_size),
            log_level: log_level
                .map(|v| v.to_lowercase())
                .unwrap_or(defaults.log_level),
            enable_logging: enable_logging
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.enable_logging),
        }
    }

    /// Level handed to wasm-logger; unknown names fall back to info
    pub fn log_level(&self) -> log::Level {
        match self.log_level.as_str() {
            "trace" => log::Level::Trace,
            "debug" => log::Level::Debug,
            "warn" => log::Level::Warn,
            "error" => log::Level::Error,
            _ => log::Level::Info,
        }
    }

    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }
}

lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_values_use_defaults() {
        let config = AppConfig::from_values(None, None, None, None);
        assert_eq!(config.backend_url, "http://localhost:3000");
        assert_eq!(config.page_size, 10);
        assert_eq!(config.log_level(), log::Level::Info);
        assert!(config.is_logging_enabled());
    }

    #[test]
    fn trailing_slash_is_stripped_and_bad_numbers_ignored() {
        let config = AppConfig::from_values(
            Some("https://qa.example.com/"),
            Some("zero"),
            Some("DEBUG"),
            Some("false"),
        );
        assert_eq!(config.backend_url, "https://qa.example.com");
        assert_eq!(config.page_size, 10);
        assert_eq!(config.log_level(), log::Level::Debug);
        assert!(!config.is_logging_enabled());
    }

    #[test]
    fn zero_page_size_falls_back() {
        let config = AppConfig::from_values(None, Some("0"), None, None);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    }
}
