//! Access to the canonical `records` table.

use super::schema::{ensure_records_table, records_columns};
use super::{quote_ident, RECORDS_TABLE};
use crate::error::Result;
use common::model::record::{NewRecord, Record, RecordFilter};
use rusqlite::{params_from_iter, Connection, Row};

fn select_sql() -> String {
    let cols: Vec<String> = records_columns().iter().map(|c| quote_ident(c)).collect();
    format!(
        "SELECT id, {} FROM {} ORDER BY id",
        cols.join(", "),
        quote_ident(RECORDS_TABLE)
    )
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<Record> {
    Ok(Record {
        id: row.get(0)?,
        category: row.get(1)?,
        ref_no: row.get(2)?,
        candidate_countries: row.get(3)?,
        election_body: row.get(4)?,
        proposal_sent_by: row.get(5)?,
        confirmation: row.get(6)?,
        attachment_path: row.get(7)?,
        created_by: row.get(8)?,
        created_at: row.get(9)?,
    })
}

/// Appends one record in canonical column order. Returns the new id.
pub fn insert_record(conn: &Connection, record: &NewRecord) -> Result<i64> {
    ensure_records_table(conn)?;
    let columns = records_columns();
    let names: Vec<String> = columns.iter().map(|c| quote_ident(c)).collect();
    let placeholders = vec!["?"; columns.len()].join(", ");
    conn.execute(
        &format!(
            "INSERT INTO {} ({}) VALUES ({})",
            quote_ident(RECORDS_TABLE),
            names.join(", "),
            placeholders
        ),
        params_from_iter(record.column_values()),
    )?;
    Ok(conn.last_insert_rowid())
}

/// Every canonical record, ordered by id.
pub fn read_all(conn: &Connection) -> Result<Vec<Record>> {
    ensure_records_table(conn)?;
    let mut stmt = conn.prepare(&select_sql())?;
    let records = stmt
        .query_map([], record_from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(records)
}

/// Removes every canonical record. Used before a full re-import.
pub fn clear_records(conn: &Connection) -> Result<usize> {
    ensure_records_table(conn)?;
    Ok(conn.execute(&format!("DELETE FROM {}", quote_ident(RECORDS_TABLE)), [])?)
}

/// Applies the browse filter: exact category, then a case-insensitive
/// substring search over the report columns.
pub fn filter_records(records: Vec<Record>, filter: &RecordFilter) -> Vec<Record> {
    let category = filter.category.as_deref().filter(|c| !c.is_empty());
    let needle = filter
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    records
        .into_iter()
        .filter(|r| category.map_or(true, |c| r.category.as_deref() == Some(c)))
        .filter(|r| match &needle {
            None => true,
            Some(n) => r
                .report_values()
                .iter()
                .flatten()
                .any(|v| v.to_lowercase().contains(n.as_str())),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_record(category: &str, ref_no: &str, country: &str) -> NewRecord {
        NewRecord {
            category: Some(category.into()),
            ref_no: Some(ref_no.into()),
            candidate_countries: Some(country.into()),
            ..Default::default()
        }
    }

    #[test]
    fn insert_defaults_missing_fields_to_empty() {
        let conn = Connection::open_in_memory().unwrap();
        let id = insert_record(&conn, &new_record("Asia", "R-1", "Benin")).unwrap();

        let all = read_all(&conn).unwrap();
        assert_eq!(all.len(), 1);
        let rec = &all[0];
        assert_eq!(rec.id, id);
        assert_eq!(rec.category.as_deref(), Some("Asia"));
        assert_eq!(rec.election_body.as_deref(), Some(""));
        assert_eq!(rec.created_at.as_deref(), Some(""));
    }

    #[test]
    fn read_all_orders_by_id() {
        let conn = Connection::open_in_memory().unwrap();
        for (i, cat) in ["Europe", "Asia", "Africa"].iter().enumerate() {
            insert_record(&conn, &new_record(cat, &format!("R-{}", i), "X")).unwrap();
        }
        let cats: Vec<_> = read_all(&conn)
            .unwrap()
            .into_iter()
            .map(|r| r.category.unwrap())
            .collect();
        assert_eq!(cats, vec!["Europe", "Asia", "Africa"]);
    }

    #[test]
    fn clear_removes_everything() {
        let conn = Connection::open_in_memory().unwrap();
        insert_record(&conn, &new_record("Asia", "R-1", "Benin")).unwrap();
        insert_record(&conn, &new_record("Asia", "R-2", "Benin")).unwrap();
        assert_eq!(clear_records(&conn).unwrap(), 2);
        assert!(read_all(&conn).unwrap().is_empty());
    }

    #[test]
    fn filter_by_category_and_search() {
        let conn = Connection::open_in_memory().unwrap();
        insert_record(&conn, &new_record("Asia", "R-1", "Maldives")).unwrap();
        insert_record(&conn, &new_record("Asia", "R-2", "Benin")).unwrap();
        insert_record(&conn, &new_record("Europe", "R-3", "Maldives")).unwrap();
        let all = read_all(&conn).unwrap();

        let filter = RecordFilter {
            category: Some("Asia".into()),
            search: Some("maldiv".into()),
        };
        let hits = filter_records(all.clone(), &filter);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].ref_no.as_deref(), Some("R-1"));

        let everything = filter_records(all, &RecordFilter::default());
        assert_eq!(everything.len(), 3);
    }
}
