//! Schema helpers for MySQL and PostgreSQL migrations.
//!
//! `oxide-schema-ext` supplies the pieces a migration runner needs beyond
//! a generic schema builder:
//! - Dialect resolution from the connection's driver, with per-dialect
//!   table options and capability flags
//! - Column fragments for `TINYINT`, `ENUM`, `BLOB`/`TEXT` variants and
//!   the MySQL `COMMENT` and `AFTER` clauses, checked against the dialect
//! - Table-name template resolution (`{{%user}}`) and live table-existence
//!   checks
//!
//! # Architecture
//!
//! - **Dialect** - [`dialect::resolve`] maps `mysql`/`postgres` to an
//!   immutable [`DialectDescriptor`]
//! - **Column** - [`ColumnTypeBuilder`] produces [`ColumnSpec`] fragments
//! - **Introspect** - [`normalize_table_name`] and [`SchemaIntrospector`]
//!   over an injected [`SchemaConnection`]
//! - **DDL** - statement assembly with table options
//! - **Context** - [`SchemaContext`], what a runner holds for one run
//!
//! # Example
//!
//! ```rust,ignore
//! use oxide_schema_ext::prelude::*;
//!
//! let config = DatabaseConfig::from_env()?;
//! let db = Database::connect(&config).await?;
//! let schema = SchemaContext::new(&db)?;
//!
//! if !schema.table_exists("{{%user}}").await? {
//!     let columns = schema.columns();
//!     schema
//!         .create_table(
//!             "{{%user}}",
//!             &[
//!                 ("id".to_string(), ColumnSpec::of_type("INT").not_null()),
//!                 ("status".to_string(), columns.enum_type(["active", "banned"])?),
//!                 ("avatar".to_string(), columns.blob_of("MEDIUMBLOB")),
//!             ],
//!         )
//!         .await?;
//! }
//! ```

pub mod column;
pub mod config;
pub mod connection;
pub mod context;
pub mod ddl;
pub mod dialect;
pub mod error;
pub mod introspect;

pub use column::{ColumnSpec, ColumnTypeBuilder};
pub use context::SchemaContext;
pub use dialect::DialectDescriptor;
pub use introspect::{normalize_table_name, SchemaConnection, SchemaIntrospector};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::column::{ColumnSpec, ColumnTypeBuilder, DefaultValue, LengthArg};
    pub use crate::config::DatabaseConfig;
    pub use crate::connection::Database;
    pub use crate::context::SchemaContext;
    pub use crate::dialect::{resolve, DialectDescriptor, DriverName};
    pub use crate::error::{Result, SchemaError};
    pub use crate::introspect::{normalize_table_name, SchemaConnection, SchemaIntrospector};
}
