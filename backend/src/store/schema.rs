//! Table creation and the versioned migration step.

use super::{quote_ident, RECORDS_TABLE};
use crate::error::Result;
use common::model::record::{CANONICAL_COLUMNS, CATEGORY_COLUMN};
use log::info;
use rusqlite::Connection;
use std::collections::HashSet;

/// Current schema version, stored in `PRAGMA user_version`.
pub const SCHEMA_VERSION: i64 = 1;

/// `category` followed by the canonical columns.
pub fn records_columns() -> Vec<&'static str> {
    std::iter::once(CATEGORY_COLUMN)
        .chain(CANONICAL_COLUMNS.iter().copied())
        .collect()
}

/// Creates `table` with an integer key and one TEXT column per name, if absent.
pub fn ensure_table<S: AsRef<str>>(conn: &Connection, table: &str, columns: &[S]) -> Result<()> {
    let mut defs = vec!["id INTEGER PRIMARY KEY AUTOINCREMENT".to_string()];
    defs.extend(
        columns
            .iter()
            .map(|c| format!("{} TEXT", quote_ident(c.as_ref()))),
    );
    conn.execute(
        &format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            quote_ident(table),
            defs.join(", ")
        ),
        [],
    )?;
    Ok(())
}

/// Column names of `table` in declaration order. Empty when the table is absent.
pub fn table_columns(conn: &Connection, table: &str) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", quote_ident(table)))?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(names)
}

/// Adds every column in `columns` that `table` lacks. Existing data is kept.
pub fn add_missing_columns<S: AsRef<str>>(
    conn: &Connection,
    table: &str,
    columns: &[S],
) -> Result<usize> {
    let mut existing: HashSet<String> = table_columns(conn, table)?
        .iter()
        .map(|c| c.to_lowercase())
        .collect();
    let mut added = 0;
    for column in columns.iter().map(AsRef::as_ref) {
        if existing.insert(column.to_lowercase()) {
            conn.execute(
                &format!(
                    "ALTER TABLE {} ADD COLUMN {} TEXT",
                    quote_ident(table),
                    quote_ident(column)
                ),
                [],
            )?;
            added += 1;
        }
    }
    Ok(added)
}

/// Ensures the canonical table exists with its full column set.
pub fn ensure_records_table(conn: &Connection) -> Result<()> {
    let columns = records_columns();
    ensure_table(conn, RECORDS_TABLE, &columns)?;
    let added = add_missing_columns(conn, RECORDS_TABLE, &columns)?;
    if added > 0 {
        info!("Added {} missing column(s) to {}", added, RECORDS_TABLE);
    }
    Ok(())
}

pub fn schema_version(conn: &Connection) -> Result<i64> {
    Ok(conn.query_row("PRAGMA user_version", [], |row| row.get(0))?)
}

/// Brings the database up to `SCHEMA_VERSION`. A no-op when already current.
pub fn migrate(conn: &Connection) -> Result<()> {
    let version = schema_version(conn)?;
    if version >= SCHEMA_VERSION {
        return Ok(());
    }
    if version < 1 {
        ensure_records_table(conn)?;
    }
    conn.execute_batch(&format!("PRAGMA user_version = {}", SCHEMA_VERSION))?;
    info!("Database schema migrated from v{} to v{}", version, SCHEMA_VERSION);
    Ok(())
}
