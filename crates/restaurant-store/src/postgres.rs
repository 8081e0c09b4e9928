use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use sqlx::{Connection, PgConnection};

use crate::{
    Count, PostgresConfig, RestaurantName, RestaurantStoreError, Result, SslMode,
    store::{BackendKind, RestaurantStore},
};

const READ_COUNT_SQL: &str = "SELECT count::BIGINT FROM restaurants WHERE name = $1";

/// PostgreSQL-backed restaurant store.
///
/// Opens one connection per lookup and closes it before returning, so no
/// connection outlives the call that acquired it.
#[derive(Clone)]
pub struct PostgresRestaurantStore {
    options: PgConnectOptions,
}

impl PostgresRestaurantStore {
    /// Creates a store for the given connection parameters.
    ///
    /// No connection is opened until the first lookup.
    pub fn new(config: &PostgresConfig) -> Self {
        let mut options = PgConnectOptions::new_without_pgpass()
            .host(&config.host)
            .port(config.port)
            .database(&config.database)
            .username(&config.username)
            .ssl_mode(pg_ssl_mode(config.ssl_mode));

        if let Some(password) = &config.password {
            options = options.password(password);
        }
        if let Some(root_cert) = &config.ssl_root_cert {
            options = options.ssl_root_cert(root_cert);
        }

        Self { options }
    }

    /// Gets a reference to the connection options.
    pub fn options(&self) -> &PgConnectOptions {
        &self.options
    }

    async fn connect(&self) -> Result<PgConnection> {
        PgConnection::connect_with(&self.options)
            .await
            .map_err(|e| match e {
                sqlx::Error::Configuration(err) => {
                    RestaurantStoreError::Configuration(err.to_string())
                }
                other => RestaurantStoreError::ConnectionFailure(other.to_string()),
            })
    }
}

fn pg_ssl_mode(mode: SslMode) -> PgSslMode {
    match mode {
        SslMode::Disable => PgSslMode::Disable,
        SslMode::Prefer => PgSslMode::Prefer,
        SslMode::Require => PgSslMode::Require,
        SslMode::VerifyCa => PgSslMode::VerifyCa,
        SslMode::VerifyFull => PgSslMode::VerifyFull,
    }
}

/// Splits transport failures from query failures.
fn query_error(err: sqlx::Error) -> RestaurantStoreError {
    match err {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => RestaurantStoreError::ConnectionFailure(err.to_string()),
        other => RestaurantStoreError::Database(other),
    }
}

fn to_count(name: &RestaurantName, value: Option<i64>) -> Result<Count> {
    let value = value.ok_or_else(|| RestaurantStoreError::InvalidValue {
        restaurant: name.clone(),
        reason: "count is NULL".to_string(),
    })?;

    Count::try_from(value).map_err(|_| RestaurantStoreError::InvalidValue {
        restaurant: name.clone(),
        reason: format!("count {value} is negative"),
    })
}

#[async_trait]
impl RestaurantStore for PostgresRestaurantStore {
    #[tracing::instrument(skip(self), fields(backend = "postgres"))]
    async fn read_count(&self, name: &RestaurantName) -> Result<Option<Count>> {
        let mut conn = self.connect().await?;

        let row = sqlx::query_scalar::<_, Option<i64>>(READ_COUNT_SQL)
            .bind(name.as_str())
            .fetch_optional(&mut conn)
            .await;

        // Release the connection before inspecting the result.
        if let Err(e) = conn.close().await {
            tracing::warn!(error = %e, "failed to close postgres connection cleanly");
        }

        match row.map_err(query_error)? {
            Some(value) => to_count(name, value).map(Some),
            None => {
                tracing::debug!("no restaurant row");
                Ok(None)
            }
        }
    }

    fn kind(&self) -> BackendKind {
        BackendKind::Relational
    }
}
