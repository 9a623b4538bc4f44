//! Workbook import.
//!
//! Every sheet becomes one category. For each sheet the header row is
//! detected, headers are normalised and matched against the report columns,
//! matched values are appended to `records`, and the whole normalised sheet is
//! copied into a per-category mirror table whose previous contents are
//! replaced.
//!
//! A full import first clears `records`. Sheets are then written one at a
//! time, each in its own transaction, so a failure on a later sheet leaves the
//! earlier sheets imported and the rest missing.

pub mod cells;
pub mod columns;
pub mod header;

use crate::error::Result;
use crate::store::records::clear_records;
use crate::store::schema::{add_missing_columns, ensure_records_table, ensure_table, records_columns};
use crate::store::tables::append_rows;
use crate::store::{mirror_table_name, quote_ident, RECORDS_TABLE};
use calamine::{open_workbook, Data, Reader, Xlsx};
use cells::{cell_text, sheet_grid};
use columns::map_columns;
use common::model::import::{ImportSummary, SheetImport};
use header::{detect_header_row, normalize_columns, MAX_HEADER_SCAN};
use log::info;
use rusqlite::Connection;
use std::io::{Read, Seek};
use std::path::Path;

/// A sheet after header detection and cleanup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetFrame {
    pub header_row: usize,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl SheetFrame {
    /// Reads the grid using `header_row` as column names, then drops columns
    /// with no data and rows with no data.
    pub fn from_grid(grid: &[Vec<Data>], header_row: usize) -> SheetFrame {
        let width = grid
            .iter()
            .skip(header_row)
            .map(Vec::len)
            .max()
            .unwrap_or(0);
        let raw_headers: Vec<Option<String>> = (0..width)
            .map(|i| {
                grid.get(header_row)
                    .and_then(|r| r.get(i))
                    .and_then(cell_text)
            })
            .collect();
        let names = normalize_columns(&raw_headers);

        let data: Vec<Vec<Option<String>>> = grid
            .iter()
            .skip(header_row + 1)
            .map(|row| {
                (0..width)
                    .map(|i| row.get(i).and_then(cell_text))
                    .collect()
            })
            .collect();

        let keep: Vec<usize> = (0..width)
            .filter(|&i| data.iter().any(|row| row[i].is_some()))
            .collect();
        let columns = keep.iter().map(|&i| names[i].clone()).collect();
        let rows = data
            .into_iter()
            .map(|row| keep.iter().map(|&i| row[i].clone()).collect::<Vec<_>>())
            .filter(|row| row.iter().any(Option::is_some))
            .collect();

        SheetFrame {
            header_row,
            columns,
            rows,
        }
    }

    /// Rows shaped for `records`: category, the five report columns pulled
    /// through the header mapping, then empty attachment and creation stamps.
    /// A sheet with no mapped header yields no rows.
    pub fn canonical_rows(&self, category: &str) -> Vec<Vec<Option<String>>> {
        let sources: Vec<Option<usize>> = map_columns(&self.columns)
            .into_iter()
            .map(|(_, src)| src.and_then(|name| self.columns.iter().position(|c| *c == name)))
            .collect();
        if sources.iter().all(Option::is_none) {
            return Vec::new();
        }

        self.rows
            .iter()
            .map(|row| {
                let mut out = Vec::with_capacity(records_columns().len());
                out.push(Some(category.to_string()));
                out.extend(sources.iter().map(|src| src.and_then(|i| row[i].clone())));
                out.extend(std::iter::repeat(Some(String::new())).take(3));
                out
            })
            .collect()
    }
}

/// Loads `sheet_name` from an open workbook and shapes it into a frame.
pub fn read_sheet<RS: Read + Seek>(workbook: &mut Xlsx<RS>, sheet_name: &str) -> Result<SheetFrame> {
    let range = workbook.worksheet_range(sheet_name)?;
    let grid = sheet_grid(&range);
    let header_row = detect_header_row(&grid, MAX_HEADER_SCAN);
    Ok(SheetFrame::from_grid(&grid, header_row))
}

/// Imports one sheet: appends its canonical rows and replaces its mirror table.
pub fn import_sheet<RS: Read + Seek>(
    conn: &mut Connection,
    workbook: &mut Xlsx<RS>,
    sheet_name: &str,
) -> Result<SheetImport> {
    let frame = read_sheet(workbook, sheet_name)?;
    let table = mirror_table_name(sheet_name);
    let record_columns: Vec<String> = records_columns().iter().map(|c| c.to_string()).collect();

    let tx = conn.transaction()?;
    ensure_records_table(&tx)?;
    append_rows(&tx, RECORDS_TABLE, &record_columns, &frame.canonical_rows(sheet_name))?;

    ensure_table(&tx, &table, &frame.columns)?;
    add_missing_columns(&tx, &table, &frame.columns)?;
    tx.execute(&format!("DELETE FROM {}", quote_ident(&table)), [])?;
    append_rows(&tx, &table, &frame.columns, &frame.rows)?;
    tx.commit()?;

    info!(
        "Imported sheet '{}' ({} rows, header at row {}) into {}",
        sheet_name,
        frame.rows.len(),
        frame.header_row,
        table
    );
    Ok(SheetImport {
        sheet: sheet_name.to_string(),
        header_row: frame.header_row,
        rows: frame.rows.len(),
        table,
    })
}

/// Replaces all canonical records with the contents of the workbook at `path`.
pub fn import_workbook(conn: &mut Connection, path: &Path) -> Result<ImportSummary> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let sheet_names = workbook.sheet_names().to_vec();

    ensure_records_table(conn)?;
    let cleared = clear_records(conn)?;
    info!("Cleared {} canonical record(s) before import", cleared);

    let mut summary = ImportSummary::default();
    for sheet_name in &sheet_names {
        summary
            .sheets
            .push(import_sheet(conn, &mut workbook, sheet_name)?);
    }
    info!(
        "Imported {} sheet(s), {} row(s) from {}",
        summary.sheets.len(),
        summary.total_rows(),
        path.display()
    );
    Ok(summary)
}
