//! Application-level configuration.

use log::Level;

// Server
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
pub const API_BASE_URL_META: &str = "api-base-url";

// Logging
pub const LOG_LEVEL: Level = Level::Info;

// UI
pub const VIDEO_ACCEPT: &str = "video/*";

/// Runtime settings handed to the upload screen through context.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

impl AppConfig {
    /// Build a config from an optional override, ignoring blank values.
    pub fn with_base_url(base_url: Option<String>) -> Self {
        match base_url.map(|u| u.trim().to_string()) {
            Some(url) if !url.is_empty() => AppConfig { api_base_url: url },
            _ => AppConfig::default(),
        }
    }

    /// Read `<meta name="api-base-url" content="...">` from the host page.
    pub fn from_document() -> Self {
        let selector = format!("meta[name=\"{}\"]", API_BASE_URL_META);
        let content = gloo_utils::document()
            .query_selector(&selector)
            .ok()
            .flatten()
            .and_then(|meta| meta.get_attribute("content"));
        AppConfig::with_base_url(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_local_server() {
        assert_eq!(AppConfig::default().api_base_url, "http://localhost:5000");
    }

    #[test]
    fn test_override() {
        let config = AppConfig::with_base_url(Some(" https://analyzer.example/api ".into()));
        assert_eq!(config.api_base_url, "https://analyzer.example/api");
    }

    #[test]
    fn test_blank_override_falls_back() {
        assert_eq!(AppConfig::with_base_url(Some("   ".into())), AppConfig::default());
        assert_eq!(AppConfig::with_base_url(None), AppConfig::default());
    }
}
