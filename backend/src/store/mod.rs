//! SQLite persistence.
//!
//! A connection is opened per action with [`open`] and dropped when the action
//! finishes; there is no pool. Opening also brings the schema up to date.

pub mod records;
pub mod schema;
pub mod tables;

use crate::error::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::Connection;
use std::path::Path;

/// Name of the canonical table.
pub const RECORDS_TABLE: &str = "records";

static NON_ALNUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9a-zA-Z]+").unwrap());
static UNDERSCORES: Lazy<Regex> = Lazy::new(|| Regex::new(r"_+").unwrap());

/// Opens the database at `path` and runs pending migrations.
pub fn open(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)?;
    schema::migrate(&conn)?;
    Ok(conn)
}

/// Quotes an SQL identifier, doubling embedded quotes.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Lowercase alphanumeric-and-underscore table name for a category.
///
/// Runs of other characters become a single `_`, edges are trimmed, and an
/// empty result becomes `sheet`.
pub fn slug(name: &str) -> String {
    let replaced = NON_ALNUM.replace_all(name.trim(), "_");
    let lowered = replaced.trim_matches('_').to_lowercase();
    let collapsed = UNDERSCORES.replace_all(&lowered, "_").into_owned();
    if collapsed.is_empty() {
        "sheet".to_string()
    } else {
        collapsed
    }
}

/// Mirror table name for a category, never colliding with the canonical table.
pub fn mirror_table_name(category: &str) -> String {
    let s = slug(category);
    if s == RECORDS_TABLE {
        format!("sheet_{}", s)
    } else {
        s
    }
}
