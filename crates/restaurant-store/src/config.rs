//! Backend configuration loaded from environment variables.

use std::path::PathBuf;

use crate::{RestaurantStoreError, Result};

/// DynamoDB table holding restaurant items. Setting it selects the DynamoDB backend.
pub const ENV_DDB_TABLE: &str = "YELB_DDB_RESTAURANTS";
pub const ENV_DDB_ENDPOINT_URL: &str = "YELB_DDB_ENDPOINT_URL";
pub const ENV_AWS_REGION: &str = "AWS_REGION";
pub const ENV_AWS_DEFAULT_REGION: &str = "AWS_DEFAULT_REGION";
pub const ENV_DB_HOST: &str = "YELB_DB_SERVER_ENDPOINT";
pub const ENV_DB_PORT: &str = "YELB_DB_SERVER_PORT";
pub const ENV_DB_NAME: &str = "YELB_DB_NAME";
pub const ENV_DB_USERNAME: &str = "YELB_DB_USERNAME";
pub const ENV_DB_PASSWORD: &str = "YELB_DB_PASSWORD";
pub const ENV_DB_SSL_MODE: &str = "YELB_DB_SSL_MODE";
pub const ENV_DB_SSL_ROOT_CERT: &str = "YELB_DB_SSL_ROOT_CERT";

const DEFAULT_DB_HOST: &str = "yelb-db";
const DEFAULT_DB_PORT: u16 = 5432;
const DEFAULT_DB_NAME: &str = "yelbdatabase";
const DEFAULT_DB_USERNAME: &str = "postgres";

/// TLS mode for the PostgreSQL connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SslMode {
    Disable,
    Prefer,
    Require,
    VerifyCa,
    /// Encrypted, with the server certificate and host name verified.
    #[default]
    VerifyFull,
}

impl SslMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SslMode::Disable => "disable",
            SslMode::Prefer => "prefer",
            SslMode::Require => "require",
            SslMode::VerifyCa => "verify-ca",
            SslMode::VerifyFull => "verify-full",
        }
    }
}

impl std::fmt::Display for SslMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SslMode {
    type Err = RestaurantStoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "disable" => Ok(SslMode::Disable),
            "prefer" => Ok(SslMode::Prefer),
            "require" => Ok(SslMode::Require),
            "verify-ca" => Ok(SslMode::VerifyCa),
            "verify-full" => Ok(SslMode::VerifyFull),
            other => Err(RestaurantStoreError::Configuration(format!(
                "unsupported ssl mode '{other}'"
            ))),
        }
    }
}

/// Connection parameters for the PostgreSQL backend.
#[derive(Clone, PartialEq, Eq)]
pub struct PostgresConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: Option<String>,
    pub ssl_mode: SslMode,
    /// PEM bundle used to verify the server certificate.
    pub ssl_root_cert: Option<PathBuf>,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_DB_HOST.to_string(),
            port: DEFAULT_DB_PORT,
            database: DEFAULT_DB_NAME.to_string(),
            username: DEFAULT_DB_USERNAME.to_string(),
            password: None,
            ssl_mode: SslMode::default(),
            ssl_root_cert: None,
        }
    }
}

// Hand-written so the password never reaches logs.
impl std::fmt::Debug for PostgresConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("ssl_mode", &self.ssl_mode)
            .field("ssl_root_cert", &self.ssl_root_cert)
            .finish()
    }
}

/// Connection parameters for the DynamoDB backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamoDbConfig {
    pub table: String,
    pub region: String,
    /// Overrides the regional endpoint, e.g. for DynamoDB Local.
    pub endpoint_url: Option<String>,
}

impl DynamoDbConfig {
    pub fn new(table: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            region: region.into(),
            endpoint_url: None,
        }
    }

    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }
}

/// The store a lookup reads from, fixed at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    Relational(PostgresConfig),
    KeyValue(DynamoDbConfig),
}

/// Lookup configuration.
///
/// Reads from environment variables:
/// - `YELB_DDB_RESTAURANTS` — DynamoDB table; when set and non-empty the
///   DynamoDB backend is used, otherwise PostgreSQL
/// - `AWS_REGION` / `AWS_DEFAULT_REGION` — required with the DynamoDB backend
/// - `YELB_DDB_ENDPOINT_URL` — optional DynamoDB endpoint override
/// - `YELB_DB_SERVER_ENDPOINT` (default `"yelb-db"`), `YELB_DB_SERVER_PORT`
///   (default `5432`), `YELB_DB_NAME` (default `"yelbdatabase"`),
///   `YELB_DB_USERNAME` (default `"postgres"`), `YELB_DB_PASSWORD`
/// - `YELB_DB_SSL_MODE` (default `"verify-full"`), `YELB_DB_SSL_ROOT_CERT`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub backend: Backend,
}

impl Config {
    pub fn new(backend: Backend) -> Self {
        Self { backend }
    }

    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration from an arbitrary variable source.
    ///
    /// Empty values are treated the same as unset ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.is_empty());

        if let Some(table) = var(ENV_DDB_TABLE) {
            let region = var(ENV_AWS_REGION)
                .or_else(|| var(ENV_AWS_DEFAULT_REGION))
                .ok_or_else(|| {
                    RestaurantStoreError::Configuration(format!(
                        "{ENV_DDB_TABLE} is set but neither {ENV_AWS_REGION} nor {ENV_AWS_DEFAULT_REGION} is"
                    ))
                })?;

            return Ok(Self::new(Backend::KeyValue(DynamoDbConfig {
                table,
                region,
                endpoint_url: var(ENV_DDB_ENDPOINT_URL),
            })));
        }

        let defaults = PostgresConfig::default();
        let port = match var(ENV_DB_PORT) {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| {
                RestaurantStoreError::Configuration(format!(
                    "{ENV_DB_PORT} must be a port number, got '{raw}'"
                ))
            })?,
            None => defaults.port,
        };
        let ssl_mode = match var(ENV_DB_SSL_MODE) {
            Some(raw) => raw.parse()?,
            None => defaults.ssl_mode,
        };

        Ok(Self::new(Backend::Relational(PostgresConfig {
            host: var(ENV_DB_HOST).unwrap_or(defaults.host),
            port,
            database: var(ENV_DB_NAME).unwrap_or(defaults.database),
            username: var(ENV_DB_USERNAME).unwrap_or(defaults.username),
            password: var(ENV_DB_PASSWORD),
            ssl_mode,
            ssl_root_cert: var(ENV_DB_SSL_ROOT_CERT).map(PathBuf::from),
        })))
    }
}
