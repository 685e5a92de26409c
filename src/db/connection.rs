use anyhow::{Context, Result};
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::{ConnectOptions, Connection};
use std::fmt;
use std::time::Duration;
use tracing::info;
use tracing::log::LevelFilter;

/// How long to wait for the server before giving up on a connection.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Credentials and location of the database to describe.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl ConnectionSettings {
    /// `user:***@host:port/database`, safe to print.
    pub fn masked_target(&self) -> String {
        format!(
            "{}:***@{}:{}/{}",
            self.user, self.host, self.port, self.database
        )
    }

    pub fn pg_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
            .log_slow_statements(LevelFilter::Off, Duration::from_secs(0))
    }

    pub fn mysql_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
            .log_slow_statements(LevelFilter::Off, Duration::from_secs(0))
    }
}

// Hand-written so the password never reaches logs through `{:?}`.
impl fmt::Debug for ConnectionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"***")
            .field("database", &self.database)
            .finish()
    }
}

/// Open a single PostgreSQL connection, failing after [`CONNECT_TIMEOUT`].
pub async fn connect_postgres(settings: &ConnectionSettings) -> Result<PgConnection> {
    let target = settings.masked_target();
    let conn = tokio::time::timeout(
        CONNECT_TIMEOUT,
        PgConnection::connect_with(&settings.pg_options()),
    )
    .await
    .with_context(|| {
        format!(
            "Could not connect to the database at {}: timed out after {}s",
            target,
            CONNECT_TIMEOUT.as_secs()
        )
    })?
    .with_context(|| format!("Could not connect to the database at {}", target))?;

    info!("✅ Connected to database {}", target);
    Ok(conn)
}

/// Open a single MySQL connection, failing after [`CONNECT_TIMEOUT`].
pub async fn connect_mysql(settings: &ConnectionSettings) -> Result<MySqlConnection> {
    let target = settings.masked_target();
    let conn = tokio::time::timeout(
        CONNECT_TIMEOUT,
        MySqlConnection::connect_with(&settings.mysql_options()),
    )
    .await
    .with_context(|| {
        format!(
            "Could not connect to the database at {}: timed out after {}s",
            target,
            CONNECT_TIMEOUT.as_secs()
        )
    })?
    .with_context(|| format!("Could not connect to the database at {}", target))?;

    info!("✅ Connected to database {}", target);
    Ok(conn)
}
