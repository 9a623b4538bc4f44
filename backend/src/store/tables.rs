//! Generic whole-table access used by the raw per-sheet mirrors and by
//! edit-grid saves.

use super::{quote_ident, RECORDS_TABLE};
use crate::error::{CmsError, Result};
use common::model::table::TableData;
use rusqlite::types::ValueRef;
use rusqlite::{params_from_iter, Connection};

pub fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
        [name],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// SQLite's own bookkeeping tables.
fn is_internal(name: &str) -> bool {
    name.to_lowercase().starts_with("sqlite_")
}

fn require_table(conn: &Connection, name: &str) -> Result<()> {
    if !is_internal(name) && table_exists(conn, name)? {
        Ok(())
    } else {
        Err(CmsError::NotFound(format!("table '{}'", name)))
    }
}

/// Mirror tables, ordered by name. Excludes the canonical and internal tables.
pub fn list_tables(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT name FROM sqlite_master
         WHERE type = 'table' AND name <> ?1 AND name NOT LIKE 'sqlite_%'
         ORDER BY name",
    )?;
    let names = stmt
        .query_map([RECORDS_TABLE], |row| row.get::<_, String>(0))?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(names)
}

fn value_to_text(value: ValueRef<'_>) -> Option<String> {
    match value {
        ValueRef::Null => None,
        ValueRef::Integer(i) => Some(i.to_string()),
        ValueRef::Real(f) => Some(f.to_string()),
        ValueRef::Text(t) => Some(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(b) => Some(String::from_utf8_lossy(b).into_owned()),
    }
}

/// Every row of `name`, id column included, ordered by id.
pub fn read_table(conn: &Connection, name: &str) -> Result<TableData> {
    require_table(conn, name)?;
    let mut stmt = conn.prepare(&format!("SELECT * FROM {} ORDER BY id", quote_ident(name)))?;
    let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();
    let width = columns.len();
    let rows = stmt
        .query_map([], |row| {
            (0..width)
                .map(|i| row.get_ref(i).map(value_to_text))
                .collect::<rusqlite::Result<Vec<_>>>()
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(TableData { columns, rows })
}

/// Inserts `rows` under `columns` without touching existing rows.
pub(crate) fn append_rows(
    conn: &Connection,
    name: &str,
    columns: &[String],
    rows: &[Vec<Option<String>>],
) -> Result<usize> {
    if columns.is_empty() {
        return Ok(0);
    }
    let names: Vec<String> = columns.iter().map(|c| quote_ident(c)).collect();
    let placeholders = vec!["?"; columns.len()].join(", ");
    let mut stmt = conn.prepare(&format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quote_ident(name),
        names.join(", "),
        placeholders
    ))?;
    for row in rows {
        if row.len() != columns.len() {
            return Err(CmsError::InvalidInput(format!(
                "row has {} cells but {} columns were given",
                row.len(),
                columns.len()
            )));
        }
        stmt.execute(params_from_iter(row.iter()))?;
    }
    Ok(rows.len())
}

/// Overwrites the whole table with `data`. Any `id` column in `data` is ignored
/// and fresh ids are assigned in row order.
pub fn replace_table(conn: &mut Connection, name: &str, data: &TableData) -> Result<usize> {
    require_table(conn, name)?;
    let keep: Vec<usize> = data
        .columns
        .iter()
        .enumerate()
        .filter(|(_, c)| c.as_str() != "id")
        .map(|(i, _)| i)
        .collect();
    let columns: Vec<String> = keep.iter().map(|&i| data.columns[i].clone()).collect();
    let mut rows = Vec::with_capacity(data.rows.len());
    for row in &data.rows {
        if row.len() != data.columns.len() {
            return Err(CmsError::InvalidInput(format!(
                "row has {} cells but {} columns were given",
                row.len(),
                data.columns.len()
            )));
        }
        rows.push(keep.iter().map(|&i| row[i].clone()).collect::<Vec<_>>());
    }

    let tx = conn.transaction()?;
    tx.execute(&format!("DELETE FROM {}", quote_ident(name)), [])?;
    let written = append_rows(&tx, name, &columns, &rows)?;
    tx.commit()?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::records::{insert_record, read_all};
    use crate::store::schema::ensure_table;
    use common::model::record::NewRecord;

    fn mirror(conn: &Connection) {
        ensure_table(conn, "asia", &["Country", "Body"]).unwrap();
        append_rows(
            conn,
            "asia",
            &["Country".to_string(), "Body".to_string()],
            &[
                vec![Some("Benin".into()), Some("CENA".into())],
                vec![Some("Maldives".into()), None],
            ],
        )
        .unwrap();
    }

    #[test]
    fn read_table_returns_ids_and_nulls() {
        let conn = Connection::open_in_memory().unwrap();
        mirror(&conn);
        let data = read_table(&conn, "asia").unwrap();
        assert_eq!(data.columns, vec!["id", "Country", "Body"]);
        assert_eq!(data.rows.len(), 2);
        assert_eq!(data.rows[0][0].as_deref(), Some("1"));
        assert_eq!(data.rows[1][2], None);
    }

    #[test]
    fn replace_table_overwrites_everything() {
        let mut conn = Connection::open_in_memory().unwrap();
        mirror(&conn);
        let edited = TableData {
            columns: vec!["id".into(), "Country".into(), "Body".into()],
            rows: vec![vec![Some("2".into()), Some("Togo".into()), Some("CENI".into())]],
        };
        assert_eq!(replace_table(&mut conn, "asia", &edited).unwrap(), 1);

        let data = read_table(&conn, "asia").unwrap();
        assert_eq!(data.rows.len(), 1);
        assert_eq!(data.rows[0][1].as_deref(), Some("Togo"));
    }

    #[test]
    fn replace_works_on_canonical_table() {
        let mut conn = Connection::open_in_memory().unwrap();
        insert_record(
            &conn,
            &NewRecord {
                category: Some("Asia".into()),
                ..Default::default()
            },
        )
        .unwrap();
        let data = TableData {
            columns: vec!["category".into(), "Ref #".into()],
            rows: vec![
                vec![Some("Europe".into()), Some("E-1".into())],
                vec![Some("Europe".into()), Some("E-2".into())],
            ],
        };
        replace_table(&mut conn, RECORDS_TABLE, &data).unwrap();
        let all = read_all(&conn).unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.iter().all(|r| r.category.as_deref() == Some("Europe")));
    }

    #[test]
    fn unknown_tables_are_not_found() {
        let mut conn = Connection::open_in_memory().unwrap();
        assert!(matches!(
            read_table(&conn, "nope"),
            Err(CmsError::NotFound(_))
        ));
        assert!(matches!(
            replace_table(&mut conn, "nope", &TableData::default()),
            Err(CmsError::NotFound(_))
        ));
    }

    #[test]
    fn ragged_rows_are_rejected_and_nothing_changes() {
        let mut conn = Connection::open_in_memory().unwrap();
        mirror(&conn);
        let bad = TableData {
            columns: vec!["Country".into(), "Body".into()],
            rows: vec![vec![Some("Togo".into())]],
        };
        assert!(matches!(
            replace_table(&mut conn, "asia", &bad),
            Err(CmsError::InvalidInput(_))
        ));
        assert_eq!(read_table(&conn, "asia").unwrap().rows.len(), 2);
    }

    #[test]
    fn list_tables_skips_canonical() {
        let conn = Connection::open_in_memory().unwrap();
        crate::store::schema::ensure_records_table(&conn).unwrap();
        ensure_table(&conn, "europe", &["A"]).unwrap();
        ensure_table(&conn, "asia", &["A"]).unwrap();
        assert_eq!(list_tables(&conn).unwrap(), vec!["asia", "europe"]);
    }

    #[test]
    fn internal_tables_are_not_reachable() {
        let mut conn = Connection::open_in_memory().unwrap();
        mirror(&conn);
        assert!(table_exists(&conn, "sqlite_sequence").unwrap());

        for name in ["sqlite_sequence", "SQLITE_SEQUENCE", "sqlite_master"] {
            assert!(matches!(read_table(&conn, name), Err(CmsError::NotFound(_))));
            assert!(matches!(
                replace_table(&mut conn, name, &TableData::default()),
                Err(CmsError::NotFound(_))
            ));
        }
    }
}
