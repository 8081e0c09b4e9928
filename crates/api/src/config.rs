//! Server settings loaded from environment variables.

use tracing_subscriber::EnvFilter;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 4567;
const DEFAULT_LOG_LEVEL: &str = "info";

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Text
        }
    }
}

/// HTTP server settings.
///
/// - `HOST` — bind address (default: `"0.0.0.0"`)
/// - `PORT` — listen port (default: `4567`, the Yelb appserver port)
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
/// - `LOG_FORMAT` — `"json"` for JSON log lines, anything else for text
///
/// Backend settings are read separately by [`restaurant_store::Config`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary variable source. An unparsable
    /// port falls back to the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: lookup("PORT")
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or(defaults.port),
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            log_format: lookup("LOG_FORMAT")
                .map(|f| LogFormat::parse(&f))
                .unwrap_or(defaults.log_format),
        }
    }

    /// Builds the tracing filter from `log_level`, falling back to the
    /// default level when the directive does not parse.
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.log_level).unwrap_or_else(|e| {
            eprintln!("invalid RUST_LOG '{}': {e}", self.log_level);
            EnvFilter::new(DEFAULT_LOG_LEVEL)
        })
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_format: LogFormat::default(),
        }
    }
}
