//! Per-run schema context.
//!
//! A migration runner creates one [`SchemaContext`] per run and calls it
//! from its up/down steps. The context resolves the dialect once and hands
//! out column builders, the introspector and guarded DDL helpers.

use tracing::{debug, info};

use crate::column::{ColumnSpec, ColumnTypeBuilder};
use crate::ddl;
use crate::dialect::{self, DialectDescriptor};
use crate::error::Result;
use crate::introspect::{SchemaConnection, SchemaIntrospector};

/// Schema helpers bound to one connection and its resolved dialect.
#[derive(Debug)]
pub struct SchemaContext<'c, C> {
    conn: &'c C,
    dialect: DialectDescriptor,
}

impl<'c, C: SchemaConnection> SchemaContext<'c, C> {
    /// Resolves the dialect of `conn`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnsupportedDialect`] if the connection's
    /// driver has no dialect.
    ///
    /// [`SchemaError::UnsupportedDialect`]: crate::error::SchemaError::UnsupportedDialect
    pub fn new(conn: &'c C) -> Result<Self> {
        let dialect = dialect::resolve(conn.driver_name())?;
        Ok(Self { conn, dialect })
    }

    /// Returns the resolved dialect.
    #[must_use]
    pub const fn dialect(&self) -> &DialectDescriptor {
        &self.dialect
    }

    /// Returns the table options for `CREATE TABLE`.
    #[must_use]
    pub const fn table_options(&self) -> Option<&'static str> {
        self.dialect.table_options()
    }

    /// Returns a column builder for the active dialect.
    #[must_use]
    pub const fn columns(&self) -> ColumnTypeBuilder<'_> {
        ColumnTypeBuilder::new(&self.dialect)
    }

    /// Returns the introspector for the connection.
    #[must_use]
    pub const fn introspector(&self) -> SchemaIntrospector<'c, C> {
        SchemaIntrospector::new(self.conn)
    }

    /// Resolves a table-name template against the connection's prefix.
    #[must_use]
    pub fn table_name(&self, template: &str) -> String {
        self.introspector().table_name(template)
    }

    /// Checks whether a table exists.
    ///
    /// # Errors
    ///
    /// See [`SchemaIntrospector::table_exists`].
    pub async fn table_exists(&self, table: &str) -> Result<bool> {
        self.introspector().table_exists(table).await
    }

    /// Creates a table with the dialect's table options.
    ///
    /// # Errors
    ///
    /// Returns the validation errors of [`ddl::create_table_sql`] and
    /// [`SchemaError::SchemaQuery`] if execution fails.
    ///
    /// [`SchemaError::SchemaQuery`]: crate::error::SchemaError::SchemaQuery
    pub async fn create_table(
        &self,
        template: &str,
        columns: &[(String, ColumnSpec)],
    ) -> Result<()> {
        let table = self.table_name(template);
        let sql = ddl::create_table_sql(&self.dialect, &table, columns, self.table_options())?;
        self.execute(&sql).await?;
        info!(table = %table, columns = columns.len(), "Created table");
        Ok(())
    }

    /// Adds a column, honouring any `AFTER` clause in `spec`.
    ///
    /// # Errors
    ///
    /// Returns the validation errors of [`ddl::add_column_sql`] and
    /// [`SchemaError::SchemaQuery`] if execution fails.
    ///
    /// [`SchemaError::SchemaQuery`]: crate::error::SchemaError::SchemaQuery
    pub async fn add_column(
        &self,
        template: &str,
        column: &str,
        spec: &ColumnSpec,
    ) -> Result<()> {
        let table = self.table_name(template);
        let sql = ddl::add_column_sql(&self.dialect, &table, column, spec)?;
        self.execute(&sql).await?;
        info!(table = %table, column = %column, "Added column");
        Ok(())
    }

    /// Drops a table if it exists. Returns whether a table was dropped.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidArgument`] for an empty name and
    /// [`SchemaError::SchemaQuery`] if the existence check or the drop
    /// fails.
    ///
    /// [`SchemaError::InvalidArgument`]: crate::error::SchemaError::InvalidArgument
    /// [`SchemaError::SchemaQuery`]: crate::error::SchemaError::SchemaQuery
    pub async fn drop_table_if_exists(&self, template: &str) -> Result<bool> {
        if !self.table_exists(template).await? {
            debug!(template = %template, "Table does not exist, skipping drop");
            return Ok(false);
        }

        let table = self.table_name(template);
        let sql = ddl::drop_table_sql(&self.dialect, &table)?;
        self.execute(&sql).await?;
        info!(table = %table, "Dropped table");
        Ok(true)
    }

    /// Executes a raw statement on the connection.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::SchemaQuery`] if execution fails.
    ///
    /// [`SchemaError::SchemaQuery`]: crate::error::SchemaError::SchemaQuery
    pub async fn execute(&self, sql: &str) -> Result<u64> {
        debug!(sql = %sql, "Executing SQL");
        Ok(self.conn.execute(sql).await?)
    }
}
