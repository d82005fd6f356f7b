use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use std::{fs, path::Path};
use tracing::info;

use crate::schema::{check_identifier, create_table_sql, insert_sql, EnrichedRow};

/// Open the single-file database at `path`, creating it if it doesn't exist.
pub fn open_database(path: impl AsRef<Path>) -> Result<Connection> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("creating {:?}", parent))?;
    }
    Connection::open(path).with_context(|| format!("opening database {:?}", path))
}

/// Replace `table` with `rows`: drop, recreate and insert in one
/// transaction. Returns the number of rows inserted.
pub fn load_table(conn: &mut Connection, table: &str, rows: &[EnrichedRow]) -> Result<usize> {
    check_identifier(table)?;
    let create = create_table_sql(table, &EnrichedRow::COLUMNS)?;
    let insert = insert_sql(table, &EnrichedRow::COLUMNS)?;

    let tx = conn.transaction().context("starting load transaction")?;
    tx.execute(&format!("DROP TABLE IF EXISTS {}", table), [])
        .with_context(|| format!("dropping {}", table))?;
    tx.execute(&create, [])
        .with_context(|| format!("creating {}", table))?;
    {
        let mut stmt = tx.prepare(&insert)?;
        for row in rows {
            stmt.execute(params![
                row.name,
                row.mc_usd_billion,
                row.mc_gbp_billion,
                row.mc_eur_billion,
                row.mc_inr_billion,
            ])
            .with_context(|| format!("inserting `{}` into {}", row.name, table))?;
        }
    }
    tx.commit().with_context(|| format!("committing {}", table))?;

    info!(table, rows = rows.len(), "loaded table");
    Ok(rows.len())
}

/// `SELECT COUNT(*)` on `table`.
pub fn count_rows(conn: &Connection, table: &str) -> Result<i64> {
    check_identifier(table)?;
    conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |r| r.get(0))
        .with_context(|| format!("counting rows in {}", table))
}
