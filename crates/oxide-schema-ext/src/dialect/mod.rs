//! Database dialect resolution.
//!
//! A dialect is resolved once per run from the connection's driver
//! identifier. The resulting [`DialectDescriptor`] is immutable and is
//! shared read-only by the column builder, the introspector and the
//! statement assembly.

mod mysql;
mod postgres;

pub use mysql::MYSQL_TABLE_OPTIONS;

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SchemaError};

/// Supported database drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DriverName {
    /// MySQL (and MariaDB).
    MySql,
    /// PostgreSQL.
    Postgres,
}

impl DriverName {
    /// Returns the driver identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MySql => "mysql",
            Self::Postgres => "postgres",
        }
    }
}

impl fmt::Display for DriverName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DriverName {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "mysql" => Ok(Self::MySql),
            "postgres" => Ok(Self::Postgres),
            other => Err(SchemaError::UnsupportedDialect(other.to_string())),
        }
    }
}

/// Syntax and capability profile of a database engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialectDescriptor {
    driver: DriverName,
    table_options: Option<&'static str>,
    quote_char: char,
    supports_inline_comment: bool,
    supports_after_clause: bool,
}

impl DialectDescriptor {
    /// The MySQL profile.
    #[must_use]
    pub const fn mysql() -> Self {
        mysql::descriptor()
    }

    /// The PostgreSQL profile.
    #[must_use]
    pub const fn postgres() -> Self {
        postgres::descriptor()
    }

    /// Returns the driver this profile belongs to.
    #[must_use]
    pub const fn driver(&self) -> DriverName {
        self.driver
    }

    /// Returns the clause appended after the column list of
    /// `CREATE TABLE`, if the dialect has one.
    #[must_use]
    pub const fn table_options(&self) -> Option<&'static str> {
        self.table_options
    }

    /// Returns the identifier quote character.
    #[must_use]
    pub const fn quote_char(&self) -> char {
        self.quote_char
    }

    /// Whether `COMMENT "..."` may follow a column definition.
    #[must_use]
    pub const fn supports_inline_comment(&self) -> bool {
        self.supports_inline_comment
    }

    /// Whether `AFTER column` may position an added column.
    #[must_use]
    pub const fn supports_after_clause(&self) -> bool {
        self.supports_after_clause
    }

    /// Quotes an identifier, doubling any embedded quote character.
    #[must_use]
    pub fn quote_identifier(&self, name: &str) -> String {
        let q = self.quote_char;
        let escaped = name.replace(q, &format!("{q}{q}"));
        format!("{q}{escaped}{q}")
    }
}

/// Resolves a driver identifier to its dialect.
///
/// # Errors
///
/// Returns [`SchemaError::UnsupportedDialect`] for anything other than
/// `mysql` or `postgres`. There is no fallback dialect.
pub fn resolve(driver_name: &str) -> Result<DialectDescriptor> {
    let dialect = match driver_name.parse::<DriverName>()? {
        DriverName::MySql => DialectDescriptor::mysql(),
        DriverName::Postgres => DialectDescriptor::postgres(),
    };
    Ok(dialect)
}
