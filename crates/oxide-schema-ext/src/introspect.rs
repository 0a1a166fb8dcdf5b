//! Schema introspection.
//!
//! [`SchemaConnection`] is the injected database collaborator: it knows
//! its driver, its table prefix, how to list live tables and how to run
//! a statement. The crate never opens or closes it. [`Database`] is the
//! sqlx-backed implementation; tests use in-memory fakes.
//!
//! [`Database`]: crate::connection::Database

use std::future::Future;

use tracing::debug;

use crate::error::{Result, SchemaError};

/// Resolves a table-name template against a prefix.
///
/// Every `{{` and `}}` is removed, then every `%` is replaced by
/// `prefix`. Names without template tokens come back unchanged, so
/// normalizing an already resolved name is a no-op.
///
/// ```
/// use oxide_schema_ext::introspect::normalize_table_name;
///
/// assert_eq!(normalize_table_name("{{%user}}", "app_"), "app_user");
/// assert_eq!(normalize_table_name("plain", "app_"), "plain");
/// ```
#[must_use]
pub fn normalize_table_name(template: &str, prefix: &str) -> String {
    template
        .replace("{{", "")
        .replace("}}", "")
        .replace('%', prefix)
}

/// A live database connection, as seen by the schema helpers.
pub trait SchemaConnection {
    /// Driver identifier (`mysql` or `postgres`).
    fn driver_name(&self) -> &str;

    /// Prefix substituted for `%` in table-name templates.
    fn table_prefix(&self) -> &str;

    /// Lists the tables of the current schema.
    fn table_names(
        &self,
    ) -> impl Future<Output = std::result::Result<Vec<String>, sqlx::Error>> + Send;

    /// Executes a statement, returning the number of affected rows.
    fn execute(
        &self,
        sql: &str,
    ) -> impl Future<Output = std::result::Result<u64, sqlx::Error>> + Send;
}

/// Answers questions about the live schema of one connection.
#[derive(Debug)]
pub struct SchemaIntrospector<'c, C> {
    conn: &'c C,
}

impl<C> Clone for SchemaIntrospector<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for SchemaIntrospector<'_, C> {}

impl<'c, C: SchemaConnection> SchemaIntrospector<'c, C> {
    /// Creates an introspector over `conn`.
    #[must_use]
    pub const fn new(conn: &'c C) -> Self {
        Self { conn }
    }

    /// Resolves a template against the connection's prefix.
    #[must_use]
    pub fn table_name(&self, template: &str) -> String {
        normalize_table_name(template, self.conn.table_prefix())
    }

    /// Lists the tables of the current schema.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::SchemaQuery`] if the query fails.
    pub async fn table_names(&self) -> Result<Vec<String>> {
        Ok(self.conn.table_names().await?)
    }

    /// Checks whether a table exists. `table` may be a template.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidArgument`] if `table` is empty, before
    /// any query is issued, and [`SchemaError::SchemaQuery`] if the
    /// metadata query fails.
    pub async fn table_exists(&self, table: &str) -> Result<bool> {
        if table.is_empty() {
            return Err(SchemaError::invalid("Table name must be a non-empty string"));
        }

        let name = self.table_name(table);
        debug!(template = %table, table = %name, "Checking table existence");

        let tables = self.conn.table_names().await?;
        Ok(tables.iter().any(|t| *t == name))
    }
}
