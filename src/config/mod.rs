//! Configuration module for the site chat client.
//!
//! The backend mounts every route under a fixed `/api` prefix. Only the
//! origin the backend runs on, the request timeout and a set of extra
//! headers are configurable.

use std::time::Duration;
use url::Url;

use crate::errors::{ChatClientError, ChatClientResult};

/// Default origin of the chat backend.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Path prefix under which the backend mounts its routes.
pub const BASE_PATH: &str = "/api";

/// Default request timeout (30 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the site chat client.
#[derive(Debug, Clone)]
pub struct ChatClientConfig {
    /// Origin of the backend, without trailing slash.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Custom headers to include in requests.
    pub custom_headers: Vec<(String, String)>,
    /// Write request and response bodies to debug logs.
    pub log_bodies: bool,
}

impl ChatClientConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> ChatClientConfigBuilder {
        ChatClientConfigBuilder::new()
    }

    /// Creates a configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `SITE_CHAT_BASE_URL` (optional): Backend origin
    /// - `SITE_CHAT_TIMEOUT` (optional): Request timeout in seconds;
    ///   unparsable values are ignored
    /// - `SITE_CHAT_LOG_BODIES` (optional): `true`/`1` to log bodies
    pub fn from_env() -> ChatClientResult<Self> {
        let mut builder = ChatClientConfigBuilder::new();

        if let Ok(base_url) = std::env::var("SITE_CHAT_BASE_URL") {
            builder = builder.base_url(base_url);
        }

        if let Ok(timeout_str) = std::env::var("SITE_CHAT_TIMEOUT") {
            if let Ok(timeout_secs) = timeout_str.parse::<u64>() {
                builder = builder.timeout(Duration::from_secs(timeout_secs));
            } else {
                tracing::warn!(value = %timeout_str, "Ignoring unparsable SITE_CHAT_TIMEOUT");
            }
        }

        if let Ok(flag) = std::env::var("SITE_CHAT_LOG_BODIES") {
            builder = builder.log_bodies(matches!(
                flag.to_ascii_lowercase().as_str(),
                "1" | "true" | "yes"
            ));
        }

        builder.build()
    }

    /// Returns the URL prefix every request path is appended to.
    pub fn api_root(&self) -> String {
        format!("{}{}", self.base_url, BASE_PATH)
    }

    /// Returns the full URL for an endpoint.
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}/{}", self.api_root(), path.trim_start_matches('/'))
    }
}

impl Default for ChatClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            custom_headers: Vec::new(),
            log_bodies: false,
        }
    }
}

/// Builder for `ChatClientConfig`.
#[derive(Debug, Default)]
pub struct ChatClientConfigBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    custom_headers: Vec<(String, String)>,
    log_bodies: bool,
}

impl ChatClientConfigBuilder {
    /// Creates a new configuration builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the backend origin, e.g. `http://localhost:8000`.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Some(Duration::from_secs(secs));
        self
    }

    /// Adds a custom header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_headers.push((name.into(), value.into()));
        self
    }

    /// Enables or disables body logging. Off by default.
    pub fn log_bodies(mut self, enabled: bool) -> Self {
        self.log_bodies = enabled;
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> ChatClientResult<ChatClientConfig> {
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let parsed = Url::parse(&base_url)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ChatClientError::configuration(format!(
                "Unsupported URL scheme: {}",
                parsed.scheme()
            )));
        }

        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);
        if timeout.is_zero() {
            return Err(ChatClientError::configuration("Timeout must be greater than zero"));
        }

        Ok(ChatClientConfig {
            base_url,
            timeout,
            custom_headers: self.custom_headers,
            log_bodies: self.log_bodies,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_config_builder_success() {
        let config = ChatClientConfig::builder()
            .base_url("https://site.example.com/")
            .timeout(Duration::from_secs(10))
            .header("X-Site", "north-gate")
            .build()
            .unwrap();

        assert_eq!(config.base_url, "https://site.example.com");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(
            config.custom_headers,
            vec![("X-Site".to_string(), "north-gate".to_string())]
        );
    }

    #[test]
    fn test_config_builder_defaults() {
        let config = ChatClientConfig::builder().build().unwrap();

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_millis(30_000));
        assert!(config.custom_headers.is_empty());
        assert!(!config.log_bodies);
    }

    #[test]
    fn test_config_builder_invalid_base_url() {
        let result = ChatClientConfig::builder().base_url("localhost").build();
        assert!(result.is_err());

        let result = ChatClientConfig::builder()
            .base_url("ftp://site.example.com")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_config_builder_zero_timeout() {
        let result = ChatClientConfig::builder().timeout_secs(0).build();
        assert!(result.is_err());
    }

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const ENV_VARS: [&str; 3] = ["SITE_CHAT_BASE_URL", "SITE_CHAT_TIMEOUT", "SITE_CHAT_LOG_BODIES"];

    fn with_env<R>(vars: &[(&str, &str)], f: impl FnOnce() -> R) -> R {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        for name in ENV_VARS {
            std::env::remove_var(name);
        }
        for (name, value) in vars {
            std::env::set_var(name, value);
        }
        let result = f();
        for name in ENV_VARS {
            std::env::remove_var(name);
        }
        result
    }

    #[test]
    fn test_from_env_overrides() {
        let config = with_env(
            &[
                ("SITE_CHAT_BASE_URL", "https://site.example.com/"),
                ("SITE_CHAT_TIMEOUT", "12"),
                ("SITE_CHAT_LOG_BODIES", "true"),
            ],
            ChatClientConfig::from_env,
        )
        .unwrap();

        assert_eq!(config.base_url, "https://site.example.com");
        assert_eq!(config.timeout, Duration::from_secs(12));
        assert!(config.log_bodies);
    }

    #[test]
    fn test_from_env_unset_uses_defaults() {
        let config = with_env(&[], ChatClientConfig::from_env).unwrap();

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert!(!config.log_bodies);
    }

    #[test]
    fn test_from_env_unparsable_timeout_is_ignored() {
        let config = with_env(&[("SITE_CHAT_TIMEOUT", "thirty")], ChatClientConfig::from_env)
            .unwrap();

        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_from_env_zero_timeout_is_rejected() {
        let result = with_env(&[("SITE_CHAT_TIMEOUT", "0")], ChatClientConfig::from_env);

        assert!(matches!(result, Err(ChatClientError::Configuration { .. })));
    }

    #[test]
    fn test_from_env_invalid_base_url_is_rejected() {
        let result = with_env(&[("SITE_CHAT_BASE_URL", "site-backend")], ChatClientConfig::from_env);

        assert!(result.is_err());
    }

    #[test]
    fn test_endpoint_url() {
        let config = ChatClientConfig::default();

        assert_eq!(config.api_root(), "http://localhost:8000/api");
        assert_eq!(
            config.endpoint_url("/multi_turn_chat"),
            "http://localhost:8000/api/multi_turn_chat"
        );
        assert_eq!(config.endpoint_url("chat"), "http://localhost:8000/api/chat");
    }
}
