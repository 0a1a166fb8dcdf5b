//! Column type builder.
//!
//! Builds column fragments for the type extensions the generic schema
//! builder lacks: `TINYINT`, `ENUM`, the `BLOB`/`TEXT` families, and the
//! MySQL-only `COMMENT` and `AFTER` clauses. Each operation returns a
//! [`ColumnSpec`] that callers combine with [`ColumnSpec::merge`] and
//! render with [`ColumnSpec::to_sql`].
//!
//! ```
//! use oxide_schema_ext::column::ColumnTypeBuilder;
//! use oxide_schema_ext::dialect::DialectDescriptor;
//!
//! let mysql = DialectDescriptor::mysql();
//! let columns = ColumnTypeBuilder::new(&mysql);
//! let status = columns
//!     .enum_type(["draft", "published"])
//!     .unwrap()
//!     .not_null()
//!     .merge(columns.after_column("title").unwrap());
//! assert_eq!(
//!     status.to_sql(&mysql),
//!     "ENUM(\"draft\", \"published\") NOT NULL AFTER `title`"
//! );
//! ```

use tracing::debug;

use crate::dialect::DialectDescriptor;
use crate::error::{Result, SchemaError};

/// Length used by `TINYINT` when none (or a non-integer) is given.
pub const DEFAULT_TINYINT_LENGTH: u32 = 1;

/// Loosely typed length argument.
///
/// Integers are validated; anything else silently becomes
/// [`DEFAULT_TINYINT_LENGTH`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthArg {
    /// An integer length, validated to be positive.
    Integer(i64),
    /// Any non-integer input.
    NotInteger,
}

impl Default for LengthArg {
    fn default() -> Self {
        Self::Integer(i64::from(DEFAULT_TINYINT_LENGTH))
    }
}

macro_rules! length_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for LengthArg {
                fn from(value: $t) -> Self {
                    Self::Integer(i64::from(value))
                }
            }
        )*
    };
}

length_from_int!(i8, i16, i32, i64, u8, u16, u32);

// Values beyond i64 saturate; `tiny_int` then rejects them as too large.
impl From<u64> for LengthArg {
    fn from(value: u64) -> Self {
        Self::Integer(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<usize> for LengthArg {
    fn from(value: usize) -> Self {
        Self::Integer(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<f64> for LengthArg {
    fn from(_: f64) -> Self {
        Self::NotInteger
    }
}

impl From<&str> for LengthArg {
    fn from(_: &str) -> Self {
        Self::NotInteger
    }
}

impl From<String> for LengthArg {
    fn from(_: String) -> Self {
        Self::NotInteger
    }
}

/// Default value for a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultValue {
    /// NULL default.
    Null,
    /// Boolean default.
    Boolean(bool),
    /// Integer default.
    Integer(i64),
    /// String default.
    String(String),
    /// Raw SQL expression (e.g., `CURRENT_TIMESTAMP`).
    Expression(String),
}

impl DefaultValue {
    /// Returns the SQL representation of the default value.
    #[must_use]
    pub fn to_sql(&self) -> String {
        match self {
            Self::Null => String::from("NULL"),
            Self::Boolean(true) => String::from("TRUE"),
            Self::Boolean(false) => String::from("FALSE"),
            Self::Integer(i) => i.to_string(),
            Self::String(s) => format!("'{}'", s.replace('\'', "''")),
            Self::Expression(expr) => expr.clone(),
        }
    }
}

/// A column definition fragment.
///
/// A spec either carries a base type (a full column type) or only
/// modifiers such as `COMMENT` or `AFTER`, in which case it is meant to
/// be merged into a typed spec.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSpec {
    base_type: Option<String>,
    length: Option<u32>,
    enum_values: Option<Vec<String>>,
    not_null: bool,
    default: Option<DefaultValue>,
    comment: Option<String>,
    after_column: Option<String>,
}

impl ColumnSpec {
    /// Creates a spec for a raw type keyword, e.g. `VARCHAR(64)`.
    #[must_use]
    pub fn of_type(base_type: impl Into<String>) -> Self {
        Self {
            base_type: Some(base_type.into()),
            ..Self::default()
        }
    }

    /// Returns the base type keyword.
    #[must_use]
    pub fn base_type(&self) -> Option<&str> {
        self.base_type.as_deref()
    }

    /// Returns the length parameter.
    #[must_use]
    pub const fn length(&self) -> Option<u32> {
        self.length
    }

    /// Returns the enum literal set, in declaration order.
    #[must_use]
    pub fn enum_values(&self) -> Option<&[String]> {
        self.enum_values.as_deref()
    }

    /// Returns the column comment.
    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Returns the column this one is positioned after.
    #[must_use]
    pub fn after(&self) -> Option<&str> {
        self.after_column.as_deref()
    }

    /// Returns whether the column is NOT NULL.
    #[must_use]
    pub const fn is_not_null(&self) -> bool {
        self.not_null
    }

    /// Returns the default value.
    #[must_use]
    pub const fn default_value(&self) -> Option<&DefaultValue> {
        self.default.as_ref()
    }

    /// Returns true when the spec has modifiers but no column type.
    #[must_use]
    pub const fn is_fragment_only(&self) -> bool {
        self.base_type.is_none()
    }

    /// Marks the column as NOT NULL.
    #[must_use]
    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn with_default(mut self, value: DefaultValue) -> Self {
        self.default = Some(value);
        self
    }

    /// Combines two fragments. Anything set on `other` wins; a base type
    /// from `other` replaces this spec's type together with its length
    /// and enum values.
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        if other.base_type.is_some() {
            self.base_type = other.base_type;
            self.length = other.length;
            self.enum_values = other.enum_values;
        }
        self.not_null |= other.not_null;
        if other.default.is_some() {
            self.default = other.default;
        }
        if other.comment.is_some() {
            self.comment = other.comment;
        }
        if other.after_column.is_some() {
            self.after_column = other.after_column;
        }
        self
    }

    /// Renders the fragment, omitting every absent part.
    #[must_use]
    pub fn to_sql(&self, dialect: &DialectDescriptor) -> String {
        let mut parts = Vec::new();

        if let Some(ref base) = self.base_type {
            let rendered = match (&self.enum_values, self.length) {
                (Some(values), _) => format!("{base}(\"{}\")", values.join("\", \"")),
                (None, Some(len)) => format!("{base}({len})"),
                (None, None) => base.clone(),
            };
            parts.push(rendered);
        }

        if self.not_null {
            parts.push("NOT NULL".to_string());
        }

        if let Some(ref default) = self.default {
            parts.push(format!("DEFAULT {}", default.to_sql()));
        }

        if let Some(ref comment) = self.comment {
            parts.push(format!("COMMENT \"{comment}\""));
        }

        if let Some(ref after) = self.after_column {
            parts.push(format!("AFTER {}", dialect.quote_identifier(after)));
        }

        parts.join(" ")
    }
}

/// Builds dialect-checked column fragments.
#[derive(Debug, Clone, Copy)]
pub struct ColumnTypeBuilder<'d> {
    dialect: &'d DialectDescriptor,
}

impl<'d> ColumnTypeBuilder<'d> {
    /// Creates a builder for the given dialect.
    #[must_use]
    pub const fn new(dialect: &'d DialectDescriptor) -> Self {
        Self { dialect }
    }

    /// Returns the dialect fragments are checked against.
    #[must_use]
    pub const fn dialect(&self) -> &'d DialectDescriptor {
        self.dialect
    }

    /// `TINYINT(length)`.
    ///
    /// Non-integer input falls back to a length of 1 instead of failing.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidArgument`] if an integer length is
    /// not positive or does not fit in 32 bits.
    pub fn tiny_int(&self, length: impl Into<LengthArg>) -> Result<ColumnSpec> {
        let length = match length.into() {
            LengthArg::Integer(n) if n > 0 => u32::try_from(n)
                .map_err(|_| SchemaError::invalid(format!("TINYINT length {n} is too large")))?,
            LengthArg::Integer(n) => {
                return Err(SchemaError::invalid(format!(
                    "TINYINT length must be a positive integer, got {n}"
                )));
            }
            LengthArg::NotInteger => {
                debug!(
                    length = DEFAULT_TINYINT_LENGTH,
                    "Non-integer TINYINT length, using default"
                );
                DEFAULT_TINYINT_LENGTH
            }
        };

        Ok(ColumnSpec {
            length: Some(length),
            ..ColumnSpec::of_type("TINYINT")
        })
    }

    /// `ENUM("v1", "v2", ...)`, preserving the order of `values`.
    ///
    /// Values are not escaped; a value containing `"` produces broken SQL.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidArgument`] if `values` is empty.
    pub fn enum_type<I, S>(&self, values: I) -> Result<ColumnSpec>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            return Err(SchemaError::invalid("Enum values must not be empty"));
        }

        Ok(ColumnSpec {
            enum_values: Some(values),
            ..ColumnSpec::of_type("ENUM")
        })
    }

    /// `AFTER column`, positioning a column added with `ALTER TABLE`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidArgument`] if `column` is empty and
    /// [`SchemaError::UnsupportedOperation`] if the dialect cannot
    /// position columns.
    pub fn after_column(&self, column: &str) -> Result<ColumnSpec> {
        if column.is_empty() {
            return Err(SchemaError::invalid("After column name must not be empty"));
        }
        if !self.dialect.supports_after_clause() {
            return Err(SchemaError::UnsupportedOperation {
                operation: "AFTER",
                dialect: self.dialect.driver(),
            });
        }

        Ok(ColumnSpec {
            after_column: Some(column.to_string()),
            ..ColumnSpec::default()
        })
    }

    /// Inline `COMMENT "text"`.
    ///
    /// The text is not escaped.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidArgument`] if `text` is empty and
    /// [`SchemaError::UnsupportedOperation`] if the dialect has no inline
    /// column comments.
    pub fn with_comment(&self, text: &str) -> Result<ColumnSpec> {
        if text.is_empty() {
            return Err(SchemaError::invalid("Comment must not be empty"));
        }
        if !self.dialect.supports_inline_comment() {
            return Err(SchemaError::UnsupportedOperation {
                operation: "COMMENT",
                dialect: self.dialect.driver(),
            });
        }

        Ok(ColumnSpec {
            comment: Some(text.to_string()),
            ..ColumnSpec::default()
        })
    }

    /// `BLOB`.
    #[must_use]
    pub fn blob(&self) -> ColumnSpec {
        self.blob_of("BLOB")
    }

    /// A blob type keyword such as `TINYBLOB`, `MEDIUMBLOB` or
    /// `LONGBLOB`. The keyword is passed through unchecked.
    #[must_use]
    pub fn blob_of(&self, variant: &str) -> ColumnSpec {
        ColumnSpec::of_type(variant)
    }

    /// `TEXT`.
    #[must_use]
    pub fn text(&self) -> ColumnSpec {
        self.text_of("TEXT")
    }

    /// A text type keyword such as `TINYTEXT`, `MEDIUMTEXT` or
    /// `LONGTEXT`. The keyword is passed through unchecked.
    #[must_use]
    pub fn text_of(&self, variant: &str) -> ColumnSpec {
        ColumnSpec::of_type(variant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::DriverName;

    #[test]
    fn test_tiny_int_with_length() {
        let mysql = DialectDescriptor::mysql();
        let spec = ColumnTypeBuilder::new(&mysql).tiny_int(5).unwrap();
        assert_eq!(spec.base_type(), Some("TINYINT"));
        assert_eq!(spec.length(), Some(5));
        assert_eq!(spec.to_sql(&mysql), "TINYINT(5)");
    }

    #[test]
    fn test_tiny_int_default_length() {
        let mysql = DialectDescriptor::mysql();
        let spec = ColumnTypeBuilder::new(&mysql)
            .tiny_int(LengthArg::default())
            .unwrap();
        assert_eq!(spec.length(), Some(1));
    }

    #[test]
    fn test_tiny_int_non_integer_falls_back() {
        let mysql = DialectDescriptor::mysql();
        let columns = ColumnTypeBuilder::new(&mysql);
        assert_eq!(columns.tiny_int("x").unwrap().length(), Some(1));
        assert_eq!(columns.tiny_int("5").unwrap().length(), Some(1));
        assert_eq!(columns.tiny_int(2.5).unwrap().length(), Some(1));
    }

    #[test]
    fn test_tiny_int_rejects_non_positive() {
        let mysql = DialectDescriptor::mysql();
        let columns = ColumnTypeBuilder::new(&mysql);
        assert!(matches!(
            columns.tiny_int(0),
            Err(SchemaError::InvalidArgument(_))
        ));
        assert!(matches!(
            columns.tiny_int(-3),
            Err(SchemaError::InvalidArgument(_))
        ));
        assert!(matches!(
            columns.tiny_int(i64::MAX),
            Err(SchemaError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_tiny_int_from_unsigned_sizes() {
        let mysql = DialectDescriptor::mysql();
        let columns = ColumnTypeBuilder::new(&mysql);
        assert_eq!(columns.tiny_int(3usize).unwrap().length(), Some(3));
        assert_eq!(columns.tiny_int(4u64).unwrap().length(), Some(4));
        assert!(matches!(
            columns.tiny_int(u64::MAX),
            Err(SchemaError::InvalidArgument(_))
        ));
        assert!(matches!(
            columns.tiny_int(usize::MAX),
            Err(SchemaError::InvalidArgument(_))
        ));
        assert!(matches!(
            columns.tiny_int(0usize),
            Err(SchemaError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_enum_type() {
        let mysql = DialectDescriptor::mysql();
        let spec = ColumnTypeBuilder::new(&mysql)
            .enum_type(["a", "b"])
            .unwrap();
        assert_eq!(spec.to_sql(&mysql), "ENUM(\"a\", \"b\")");
        assert_eq!(
            spec.enum_values(),
            Some(&["a".to_string(), "b".to_string()][..])
        );
    }

    #[test]
    fn test_enum_type_empty() {
        let mysql = DialectDescriptor::mysql();
        let result = ColumnTypeBuilder::new(&mysql).enum_type(Vec::<String>::new());
        assert!(matches!(result, Err(SchemaError::InvalidArgument(_))));
    }

    #[test]
    fn test_enum_values_are_not_escaped() {
        let mysql = DialectDescriptor::mysql();
        let spec = ColumnTypeBuilder::new(&mysql)
            .enum_type(["say \"hi\""])
            .unwrap();
        assert_eq!(spec.to_sql(&mysql), "ENUM(\"say \"hi\"\")");
    }

    #[test]
    fn test_after_column_mysql() {
        let mysql = DialectDescriptor::mysql();
        let spec = ColumnTypeBuilder::new(&mysql).after_column("x").unwrap();
        assert!(spec.is_fragment_only());
        assert_eq!(spec.to_sql(&mysql), "AFTER `x`");
    }

    #[test]
    fn test_after_column_postgres() {
        let pg = DialectDescriptor::postgres();
        let err = ColumnTypeBuilder::new(&pg).after_column("x").unwrap_err();
        assert!(matches!(
            err,
            SchemaError::UnsupportedOperation {
                operation: "AFTER",
                dialect: DriverName::Postgres,
            }
        ));
    }

    #[test]
    fn test_after_column_empty_is_invalid_everywhere() {
        for dialect in [DialectDescriptor::mysql(), DialectDescriptor::postgres()] {
            let result = ColumnTypeBuilder::new(&dialect).after_column("");
            assert!(matches!(result, Err(SchemaError::InvalidArgument(_))));
        }
    }

    #[test]
    fn test_with_comment() {
        let mysql = DialectDescriptor::mysql();
        let columns = ColumnTypeBuilder::new(&mysql);
        let spec = columns.with_comment("User flag").unwrap();
        assert_eq!(spec.to_sql(&mysql), "COMMENT \"User flag\"");
        assert!(matches!(
            columns.with_comment(""),
            Err(SchemaError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_with_comment_postgres() {
        let pg = DialectDescriptor::postgres();
        let result = ColumnTypeBuilder::new(&pg).with_comment("note");
        assert!(matches!(
            result,
            Err(SchemaError::UnsupportedOperation {
                operation: "COMMENT",
                ..
            })
        ));
    }

    #[test]
    fn test_blob_and_text_variants() {
        let mysql = DialectDescriptor::mysql();
        let columns = ColumnTypeBuilder::new(&mysql);
        assert_eq!(columns.blob().to_sql(&mysql), "BLOB");
        assert_eq!(columns.blob_of("LONGBLOB").to_sql(&mysql), "LONGBLOB");
        assert_eq!(columns.text().to_sql(&mysql), "TEXT");
        assert_eq!(columns.text_of("MEDIUMTEXT").to_sql(&mysql), "MEDIUMTEXT");
        // Unknown keywords pass through.
        assert_eq!(columns.text_of("HUGETEXT").to_sql(&mysql), "HUGETEXT");
    }

    #[test]
    fn test_merge_and_full_render() {
        let mysql = DialectDescriptor::mysql();
        let columns = ColumnTypeBuilder::new(&mysql);
        let spec = columns
            .tiny_int(1)
            .unwrap()
            .not_null()
            .with_default(DefaultValue::Integer(0))
            .merge(columns.with_comment("Is active").unwrap())
            .merge(columns.after_column("email").unwrap());

        assert_eq!(
            spec.to_sql(&mysql),
            "TINYINT(1) NOT NULL DEFAULT 0 COMMENT \"Is active\" AFTER `email`"
        );
    }

    #[test]
    fn test_merge_replaces_type_and_keeps_modifiers() {
        let mysql = DialectDescriptor::mysql();
        let columns = ColumnTypeBuilder::new(&mysql);
        let spec = columns
            .with_comment("payload")
            .unwrap()
            .merge(columns.blob_of("MEDIUMBLOB"));
        assert_eq!(spec.base_type(), Some("MEDIUMBLOB"));
        assert_eq!(spec.comment(), Some("payload"));
        assert_eq!(spec.length(), None);
    }

    #[test]
    fn test_default_value_quoting() {
        assert_eq!(DefaultValue::String("it's".into()).to_sql(), "'it''s'");
        assert_eq!(DefaultValue::Boolean(true).to_sql(), "TRUE");
        assert_eq!(DefaultValue::Null.to_sql(), "NULL");
        assert_eq!(
            DefaultValue::Expression("CURRENT_TIMESTAMP".into()).to_sql(),
            "CURRENT_TIMESTAMP"
        );
    }
}
