//! MySQL dialect profile.

use super::{DialectDescriptor, DriverName};

/// Table options appended to every MySQL `CREATE TABLE`.
pub const MYSQL_TABLE_OPTIONS: &str = "CHARACTER SET utf8 COLLATE utf8_unicode_ci ENGINE=InnoDB";

/// MySQL quotes identifiers with backticks and accepts inline
/// `COMMENT` and positional `AFTER` clauses.
pub(super) const fn descriptor() -> DialectDescriptor {
    DialectDescriptor {
        driver: DriverName::MySql,
        table_options: Some(MYSQL_TABLE_OPTIONS),
        quote_char: '`',
        supports_inline_comment: true,
        supports_after_clause: true,
    }
}
