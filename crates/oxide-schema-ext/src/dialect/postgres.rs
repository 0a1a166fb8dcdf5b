//! PostgreSQL dialect profile.

use super::{DialectDescriptor, DriverName};

/// PostgreSQL has no table options, no column positioning and only
/// out-of-line `COMMENT ON COLUMN`.
pub(super) const fn descriptor() -> DialectDescriptor {
    DialectDescriptor {
        driver: DriverName::Postgres,
        table_options: None,
        quote_char: '"',
        supports_inline_comment: false,
        supports_after_clause: false,
    }
}
