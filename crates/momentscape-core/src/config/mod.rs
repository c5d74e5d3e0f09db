//! Client configuration.
//!
//! The notes service is addressed through a single base URL, read once at
//! startup. Every request URL is derived from it through
//! [`ClientConfig::endpoint`], which is the only place paths are joined.

use std::time::Duration;

use crate::error::{Error, Result};
use crate::util::{is_http_url, normalize_text_option};

/// Environment variable holding the notes service base URL.
pub const API_URL_ENV: &str = "MOMENTSCAPE_API_URL";
/// Base URL used when neither a flag nor the environment provides one.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
/// Path probed to confirm the service is reachable.
pub const DEFAULT_HEALTH_PATH: &str = "/api/test";
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 4;

const NOTES_PATH: &str = "/api/notes";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    health_path: String,
    probe_timeout: Duration,
}

impl ClientConfig {
    /// Builds a config for an explicit base URL with default probe settings.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            base_url: normalize_base_url(base_url.into())?,
            health_path: DEFAULT_HEALTH_PATH.to_string(),
            probe_timeout: Duration::from_secs(DEFAULT_PROBE_TIMEOUT_SECS),
        })
    }

    /// Builds a config from an optional explicit URL, then the
    /// `MOMENTSCAPE_API_URL` environment variable, then the default.
    pub fn resolve(explicit: Option<String>) -> Result<Self> {
        let from_env = std::env::var(API_URL_ENV).ok();
        Self::new(resolve_base_url(explicit, from_env))
    }

    #[must_use]
    pub fn with_health_path(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        if let Some(path) = normalize_text_option(Some(path)) {
            self.health_path = path;
        }
        self
    }

    #[must_use]
    pub const fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn health_path(&self) -> &str {
        &self.health_path
    }

    pub const fn probe_timeout(&self) -> Duration {
        self.probe_timeout
    }

    /// Joins `path` onto the base URL with exactly one separating slash.
    pub fn endpoint(&self, path: &str) -> String {
        let path = path.trim().trim_start_matches('/');
        if path.is_empty() {
            self.base_url.clone()
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    pub fn health_url(&self) -> String {
        self.endpoint(&self.health_path)
    }

    pub fn notes_url(&self) -> String {
        self.endpoint(NOTES_PATH)
    }

    /// URL of a single note; the id is encoded as one path segment.
    pub fn note_url(&self, id: &str) -> String {
        self.endpoint(&format!("{NOTES_PATH}/{}", urlencoding::encode(id)))
    }
}

/// Picks the base URL by precedence: explicit value, environment, default.
pub fn resolve_base_url(explicit: Option<String>, from_env: Option<String>) -> String {
    normalize_text_option(explicit)
        .or_else(|| normalize_text_option(from_env))
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}

fn normalize_base_url(raw: String) -> Result<String> {
    let value = normalize_text_option(Some(raw))
        .ok_or_else(|| Error::Config("API base URL must not be empty".to_string()))?;
    if is_http_url(&value) {
        Ok(value.trim_end_matches('/').to_string())
    } else {
        Err(Error::Config(format!(
            "API base URL '{value}' must include http:// or https://"
        )))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn new_rejects_invalid_base_urls() {
        let empty = ClientConfig::new("  ").unwrap_err();
        assert!(empty.to_string().contains("must not be empty"));

        let missing_scheme = ClientConfig::new("api.example.com").unwrap_err();
        assert!(missing_scheme.to_string().contains("http:// or https://"));
    }

    #[test]
    fn endpoint_joins_with_single_slash() {
        for base in [
            "https://notes.example.com",
            "https://notes.example.com/",
            " https://notes.example.com// ",
        ] {
            let config = ClientConfig::new(base).unwrap();
            assert_eq!(config.base_url(), "https://notes.example.com");
            assert_eq!(
                config.notes_url(),
                "https://notes.example.com/api/notes"
            );
            assert_eq!(
                config.endpoint("api/notes"),
                "https://notes.example.com/api/notes"
            );
        }
    }

    #[test]
    fn base_url_path_prefix_is_kept() {
        let config = ClientConfig::new("https://example.com/momentscape/").unwrap();
        assert_eq!(
            config.health_url(),
            "https://example.com/momentscape/api/test"
        );
    }

    #[test]
    fn note_url_encodes_id_segment() {
        let config = ClientConfig::new("http://localhost:5000").unwrap();
        assert_eq!(
            config.note_url("65f0c1"),
            "http://localhost:5000/api/notes/65f0c1"
        );
        assert_eq!(
            config.note_url("a/b c"),
            "http://localhost:5000/api/notes/a%2Fb%20c"
        );
    }

    #[test]
    fn resolve_base_url_prefers_explicit_then_env() {
        assert_eq!(
            resolve_base_url(
                Some("https://flag.example.com".to_string()),
                Some("https://env.example.com".to_string())
            ),
            "https://flag.example.com"
        );
        assert_eq!(
            resolve_base_url(Some("  ".to_string()), Some("https://env.example.com".to_string())),
            "https://env.example.com"
        );
        assert_eq!(resolve_base_url(None, None), DEFAULT_BASE_URL);
    }

    #[test]
    fn builder_overrides_probe_settings() {
        let config = ClientConfig::new(DEFAULT_BASE_URL)
            .unwrap()
            .with_health_path("/healthz")
            .with_health_path("   ")
            .with_probe_timeout(Duration::from_millis(250));
        assert_eq!(config.health_path(), "/healthz");
        assert_eq!(config.health_url(), "http://localhost:5000/healthz");
        assert_eq!(config.probe_timeout(), Duration::from_millis(250));
    }
}
