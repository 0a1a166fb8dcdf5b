//! DDL statement assembly from column fragments.
//!
//! Column fragments are embedded verbatim; the functions here check that
//! each fragment is a complete, dialect-legal column definition first.

use crate::column::ColumnSpec;
use crate::dialect::DialectDescriptor;
use crate::error::{Result, SchemaError};

/// Generates `CREATE TABLE`, appending `options` after the column list.
///
/// # Errors
///
/// Returns [`SchemaError::InvalidArgument`] if the table name is empty,
/// there are no columns, a column name is empty, a spec has no type, an
/// `ENUM` spec has no values, or a spec carries an `AFTER` clause. A spec
/// with a clause the dialect cannot express is
/// [`SchemaError::UnsupportedOperation`].
pub fn create_table_sql(
    dialect: &DialectDescriptor,
    table: &str,
    columns: &[(String, ColumnSpec)],
    options: Option<&str>,
) -> Result<String> {
    check_table(table)?;
    if columns.is_empty() {
        return Err(SchemaError::invalid(format!(
            "Table '{table}' needs at least one column"
        )));
    }

    let mut defs = Vec::with_capacity(columns.len());
    for (name, spec) in columns {
        check_column(dialect, name, spec)?;
        if spec.after().is_some() {
            return Err(SchemaError::invalid(format!(
                "Column '{name}': AFTER is only valid when adding a column"
            )));
        }
        defs.push(format!(
            "    {} {}",
            dialect.quote_identifier(name),
            spec.to_sql(dialect)
        ));
    }

    let mut sql = format!("CREATE TABLE {} (\n", dialect.quote_identifier(table));
    sql.push_str(&defs.join(",\n"));
    sql.push_str("\n)");

    if let Some(options) = options.filter(|o| !o.is_empty()) {
        sql.push(' ');
        sql.push_str(options);
    }

    Ok(sql)
}

/// Generates `ALTER TABLE ... ADD COLUMN`.
///
/// # Errors
///
/// Returns [`SchemaError::InvalidArgument`] if a name is empty, the spec
/// has no type or is an `ENUM` without values, and
/// [`SchemaError::UnsupportedOperation`] if the spec carries a clause the
/// dialect cannot express.
pub fn add_column_sql(
    dialect: &DialectDescriptor,
    table: &str,
    column: &str,
    spec: &ColumnSpec,
) -> Result<String> {
    check_table(table)?;
    check_column(dialect, column, spec)?;

    Ok(format!(
        "ALTER TABLE {} ADD COLUMN {} {}",
        dialect.quote_identifier(table),
        dialect.quote_identifier(column),
        spec.to_sql(dialect)
    ))
}

/// Generates `DROP TABLE`.
///
/// # Errors
///
/// Returns [`SchemaError::InvalidArgument`] if the table name is empty.
pub fn drop_table_sql(dialect: &DialectDescriptor, table: &str) -> Result<String> {
    check_table(table)?;
    Ok(format!("DROP TABLE {}", dialect.quote_identifier(table)))
}

fn check_table(table: &str) -> Result<()> {
    if table.is_empty() {
        return Err(SchemaError::invalid("Table name must not be empty"));
    }
    Ok(())
}

fn check_column(dialect: &DialectDescriptor, name: &str, spec: &ColumnSpec) -> Result<()> {
    if name.is_empty() {
        return Err(SchemaError::invalid("Column name must not be empty"));
    }
    if spec.is_fragment_only() {
        return Err(SchemaError::invalid(format!(
            "Column '{name}' has no type"
        )));
    }
    let is_enum = spec
        .base_type()
        .is_some_and(|t| t.eq_ignore_ascii_case("ENUM"));
    if is_enum && spec.enum_values().unwrap_or_default().is_empty() {
        return Err(SchemaError::invalid(format!(
            "Column '{name}': ENUM needs at least one value"
        )));
    }
    // Fragments built under another dialect can still reach us via merge.
    if spec.comment().is_some() && !dialect.supports_inline_comment() {
        return Err(SchemaError::UnsupportedOperation {
            operation: "COMMENT",
            dialect: dialect.driver(),
        });
    }
    if spec.after().is_some() && !dialect.supports_after_clause() {
        return Err(SchemaError::UnsupportedOperation {
            operation: "AFTER",
            dialect: dialect.driver(),
        });
    }
    Ok(())
}
