// src/schema/sql.rs

use anyhow::{bail, Result};

use super::types::{Column, ColumnType};

/// Map a column type onto its SQLite declared type.
pub fn map_to_sql_type(ty: ColumnType) -> &'static str {
    match ty {
        ColumnType::Text => "TEXT",
        ColumnType::Real => "REAL",
    }
}

/// Table names are interpolated into statements, so only plain
/// identifiers (`[A-Za-z_][A-Za-z0-9_]*`) are accepted.
pub fn check_identifier(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let first_ok = chars
        .next()
        .map(|c| c.is_ascii_alphabetic() || c == '_')
        .unwrap_or(false);
    if !first_ok || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        bail!("`{}` is not a valid table name", name);
    }
    Ok(())
}

/// `CREATE TABLE <table> (...)` for the given columns.
pub fn create_table_sql(table: &str, cols: &[Column]) -> Result<String> {
    check_identifier(table)?;
    let defs: Vec<String> = cols
        .iter()
        .map(|c| format!("\"{}\" {}", c.name, map_to_sql_type(c.ty)))
        .collect();
    Ok(format!("CREATE TABLE {} ({})", table, defs.join(", ")))
}

/// Positional `INSERT INTO <table> (...) VALUES (?1, ...)` for the given columns.
pub fn insert_sql(table: &str, cols: &[Column]) -> Result<String> {
    check_identifier(table)?;
    let names: Vec<String> = cols.iter().map(|c| format!("\"{}\"", c.name)).collect();
    let params: Vec<String> = (1..=cols.len()).map(|i| format!("?{}", i)).collect();
    Ok(format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table,
        names.join(", "),
        params.join(", ")
    ))
}
