//! Logging configuration and utilities.
//!
//! Structured logging goes through `tracing`. Applications that want the
//! client's spans and events printed call [`LoggingConfig::init`] once at
//! startup; libraries embedding the client should leave subscriber setup
//! to their host.

use std::borrow::Cow;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Longest body excerpt written to debug logs, in characters.
pub const MAX_LOGGED_BODY_CHARS: usize = 1000;

/// Placeholder logged instead of a body when body logging is off.
pub const OMITTED_BODY: &str = "<omitted>";

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// The minimum log level to capture
    pub level: LogLevel,
    /// The output format for log messages
    pub format: LogFormat,
    /// Whether to include the module target in log output
    pub include_target: bool,
    /// Whether to include file and line number in log output
    pub include_file_line: bool,
}

/// Log level enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Trace-level logging (most verbose)
    Trace,
    /// Debug-level logging
    Debug,
    /// Info-level logging
    Info,
    /// Warning-level logging
    Warn,
    /// Error-level logging (least verbose)
    Error,
}

impl LogLevel {
    /// Parses a level name such as `"debug"` or `"WARNING"`.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" | "critical" => Some(LogLevel::Error),
            _ => None,
        }
    }
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

impl From<LogLevel> for tracing::level_filters::LevelFilter {
    fn from(level: LogLevel) -> Self {
        tracing::level_filters::LevelFilter::from_level(level.into())
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable format with colors (for development)
    Pretty,
    /// JSON format (for structured logging in production)
    Json,
    /// Compact format (for space-constrained environments)
    Compact,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Pretty,
            include_target: true,
            include_file_line: false,
        }
    }
}

impl LoggingConfig {
    /// Creates a new logging configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration from `SITE_CHAT_LOG_LEVEL` and
    /// `SITE_CHAT_LOG_FORMAT` (`pretty`, `json` or `compact`).
    ///
    /// Unknown values fall back to the defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(level) = std::env::var("SITE_CHAT_LOG_LEVEL")
            .ok()
            .and_then(|v| LogLevel::parse(&v))
        {
            config.level = level;
        }
        if let Ok(format) = std::env::var("SITE_CHAT_LOG_FORMAT") {
            config.format = match format.to_ascii_lowercase().as_str() {
                "json" => LogFormat::Json,
                "compact" => LogFormat::Compact,
                _ => LogFormat::Pretty,
            };
        }
        config
    }

    /// Sets the log level.
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Sets the log format.
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets whether to include the module target.
    pub fn with_target(mut self, include: bool) -> Self {
        self.include_target = include;
        self
    }

    /// Sets whether to include file and line number.
    pub fn with_file_line(mut self, include: bool) -> Self {
        self.include_file_line = include;
        self
    }

    /// Initialize logging with this configuration.
    ///
    /// `RUST_LOG` directives are honoured on top of the configured level.
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber has already been installed.
    pub fn init(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let filter = EnvFilter::from_default_env().add_directive(
            tracing::level_filters::LevelFilter::from(self.level).into(),
        );

        match self.format {
            LogFormat::Pretty => {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(
                        fmt::layer()
                            .with_ansi(true)
                            .with_target(self.include_target)
                            .with_file(self.include_file_line)
                            .with_line_number(self.include_file_line),
                    )
                    .try_init()?;
            }
            LogFormat::Json => {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt::layer().json().with_target(self.include_target))
                    .try_init()?;
            }
            LogFormat::Compact => {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt::layer().compact().with_target(self.include_target))
                    .try_init()?;
            }
        }

        Ok(())
    }
}

fn excerpt(body: &str) -> &str {
    match body.char_indices().nth(MAX_LOGGED_BODY_CHARS) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

/// Returns what the debug logs show for `body`.
///
/// Bodies carry prompts, history and model answers, so they appear only
/// when `enabled` is set; otherwise [`OMITTED_BODY`] is logged.
pub fn loggable_body(body: &[u8], enabled: bool) -> Cow<'_, str> {
    if enabled {
        String::from_utf8_lossy(body)
    } else {
        Cow::Borrowed(OMITTED_BODY)
    }
}

/// Log an outgoing HTTP request.
pub fn log_request(method: &str, path: &str, body: Option<&str>) {
    tracing::debug!(
        method = method,
        path = path,
        body = body.map(excerpt).unwrap_or("<empty>"),
        "Outgoing request"
    );
}

/// Log an incoming HTTP response.
pub fn log_response(status: u16, duration_ms: u64, body: Option<&str>) {
    tracing::debug!(
        status = status,
        duration_ms = duration_ms,
        body = body.map(excerpt).unwrap_or("<empty>"),
        "Incoming response"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use test_case::test_case;

    #[test]
    fn test_logging_config_default() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, LogLevel::Info);
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(config.include_target);
        assert!(!config.include_file_line);
    }

    #[test]
    fn test_logging_config_builder_chain() {
        let config = LoggingConfig::new()
            .with_level(LogLevel::Trace)
            .with_format(LogFormat::Compact)
            .with_target(false)
            .with_file_line(true);

        assert_eq!(config.level, LogLevel::Trace);
        assert_eq!(config.format, LogFormat::Compact);
        assert!(!config.include_target);
        assert!(config.include_file_line);
    }

    #[test_case("debug", Some(LogLevel::Debug))]
    #[test_case("INFO", Some(LogLevel::Info))]
    #[test_case("Warning", Some(LogLevel::Warn))]
    #[test_case("CRITICAL", Some(LogLevel::Error))]
    #[test_case("loud", None)]
    fn test_log_level_parse(name: &str, expected: Option<LogLevel>) {
        assert_eq!(LogLevel::parse(name), expected);
    }

    #[test]
    fn test_log_level_to_level() {
        assert_eq!(Level::from(LogLevel::Trace), Level::TRACE);
        assert_eq!(Level::from(LogLevel::Warn), Level::WARN);
        assert_eq!(Level::from(LogLevel::Error), Level::ERROR);
    }

    #[test]
    fn test_excerpt_is_char_safe() {
        let long_body = "工".repeat(MAX_LOGGED_BODY_CHARS + 5);
        assert_eq!(excerpt(&long_body).chars().count(), MAX_LOGGED_BODY_CHARS);
        assert_eq!(excerpt("short"), "short");
    }

    #[test]
    fn test_loggable_body_disabled() {
        let body = br#"{"prompt":"who is on site"}"#;
        assert_eq!(loggable_body(body, false), OMITTED_BODY);
    }

    #[test]
    fn test_loggable_body_when_enabled() {
        let body = br#"{"prompt":"who is on site"}"#;
        assert_eq!(loggable_body(body, true), r#"{"prompt":"who is on site"}"#);
        assert_eq!(loggable_body(&[0x66, 0xff], true), "f\u{fffd}");
    }

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_from_env_overrides() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        std::env::set_var("SITE_CHAT_LOG_LEVEL", "WARNING");
        std::env::set_var("SITE_CHAT_LOG_FORMAT", "json");

        let config = LoggingConfig::from_env();

        std::env::remove_var("SITE_CHAT_LOG_LEVEL");
        std::env::remove_var("SITE_CHAT_LOG_FORMAT");

        assert_eq!(config.level, LogLevel::Warn);
        assert_eq!(config.format, LogFormat::Json);
    }

    #[test]
    fn test_from_env_unknown_values_fall_back() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        std::env::set_var("SITE_CHAT_LOG_LEVEL", "loud");
        std::env::set_var("SITE_CHAT_LOG_FORMAT", "xml");

        let config = LoggingConfig::from_env();

        std::env::remove_var("SITE_CHAT_LOG_LEVEL");
        std::env::remove_var("SITE_CHAT_LOG_FORMAT");

        assert_eq!(config.level, LogLevel::Info);
        assert_eq!(config.format, LogFormat::Pretty);
    }

    #[test]
    fn test_log_helpers_do_not_panic() {
        log_request("POST", "/chat", Some(r#"{"prompt":"hi"}"#));
        log_request("GET", "/debug", None);
        log_response(200, 12, Some(&"x".repeat(2000)));
        log_response(500, 3, None);
    }
}
