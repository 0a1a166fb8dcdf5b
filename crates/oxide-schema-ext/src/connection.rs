//! sqlx-backed database connection.

use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use crate::config::DatabaseConfig;
use crate::dialect::DriverName;
use crate::error::Result;
use crate::introspect::SchemaConnection;

/// Lists base tables and views of the connected MySQL database.
const MYSQL_TABLE_NAMES_SQL: &str = "SELECT CAST(table_name AS CHAR) FROM information_schema.tables \
     WHERE table_schema = DATABASE() ORDER BY table_name";

/// Lists base tables and views of the first schema on the search path.
const POSTGRES_TABLE_NAMES_SQL: &str = "SELECT table_name::text FROM information_schema.tables \
     WHERE table_schema = current_schema() ORDER BY table_name";

#[derive(Debug, Clone)]
enum Pool {
    MySql(MySqlPool),
    Postgres(PgPool),
}

/// A pooled connection to MySQL or PostgreSQL plus its table prefix.
#[derive(Debug, Clone)]
pub struct Database {
    pool: Pool,
    table_prefix: String,
}

impl Database {
    /// Opens a pool for the configured URL.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnsupportedDialect`] for an unknown URL
    /// scheme and [`SchemaError::SchemaQuery`] if the connection fails.
    ///
    /// [`SchemaError::UnsupportedDialect`]: crate::error::SchemaError::UnsupportedDialect
    /// [`SchemaError::SchemaQuery`]: crate::error::SchemaError::SchemaQuery
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let driver = config.driver()?;
        let pool = match driver {
            DriverName::MySql => Pool::MySql(
                MySqlPoolOptions::new()
                    .max_connections(config.max_connections)
                    .connect(&config.url)
                    .await?,
            ),
            DriverName::Postgres => Pool::Postgres(
                PgPoolOptions::new()
                    .max_connections(config.max_connections)
                    .connect(&config.url)
                    .await?,
            ),
        };

        info!(
            driver = %driver,
            max_connections = config.max_connections,
            "Connected to database"
        );

        Ok(Self {
            pool,
            table_prefix: config.table_prefix.clone(),
        })
    }

    /// Wraps an existing MySQL pool.
    #[must_use]
    pub fn from_mysql_pool(pool: MySqlPool, table_prefix: impl Into<String>) -> Self {
        Self {
            pool: Pool::MySql(pool),
            table_prefix: table_prefix.into(),
        }
    }

    /// Wraps an existing PostgreSQL pool.
    #[must_use]
    pub fn from_pg_pool(pool: PgPool, table_prefix: impl Into<String>) -> Self {
        Self {
            pool: Pool::Postgres(pool),
            table_prefix: table_prefix.into(),
        }
    }

    /// Returns the driver of the underlying pool.
    #[must_use]
    pub const fn driver(&self) -> DriverName {
        match self.pool {
            Pool::MySql(_) => DriverName::MySql,
            Pool::Postgres(_) => DriverName::Postgres,
        }
    }

    /// Closes the pool, waiting for checked-out connections.
    pub async fn close(&self) {
        match &self.pool {
            Pool::MySql(pool) => pool.close().await,
            Pool::Postgres(pool) => pool.close().await,
        }
    }
}

impl SchemaConnection for Database {
    fn driver_name(&self) -> &str {
        self.driver().as_str()
    }

    fn table_prefix(&self) -> &str {
        &self.table_prefix
    }

    async fn table_names(&self) -> std::result::Result<Vec<String>, sqlx::Error> {
        match &self.pool {
            Pool::MySql(pool) => {
                sqlx::query_scalar::<_, String>(MYSQL_TABLE_NAMES_SQL)
                    .fetch_all(pool)
                    .await
            }
            Pool::Postgres(pool) => {
                sqlx::query_scalar::<_, String>(POSTGRES_TABLE_NAMES_SQL)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    async fn execute(&self, sql: &str) -> std::result::Result<u64, sqlx::Error> {
        let rows = match &self.pool {
            Pool::MySql(pool) => sqlx::query(sql).execute(pool).await?.rows_affected(),
            Pool::Postgres(pool) => sqlx::query(sql).execute(pool).await?.rows_affected(),
        };
        Ok(rows)
    }
}
