//! Error types for schema helpers.

use crate::dialect::DriverName;

/// Errors that can occur while building column fragments or inspecting
/// the live schema.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Malformed caller input, detected before any side effect.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The configured driver has no dialect.
    #[error("Unsupported database driver '{0}'")]
    UnsupportedDialect(String),

    /// A builder call the active dialect cannot express.
    #[error("{operation} is not supported by the {dialect} dialect")]
    UnsupportedOperation {
        /// The rejected clause (e.g. `AFTER`).
        operation: &'static str,
        /// The active dialect.
        dialect: DriverName,
    },

    /// The metadata query or the connection behind it failed.
    #[error("Schema query failed: {0}")]
    SchemaQuery(#[from] sqlx::Error),

    /// Connection settings are missing or malformed.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl SchemaError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}

/// Result type for schema operations.
pub type Result<T> = std::result::Result<T, SchemaError>;
