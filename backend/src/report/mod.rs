//! Consolidated report export.
//!
//! One sheet per category that has records, holding an index column and the
//! five report columns, plus optional header-only placeholder sheets for
//! template categories that have no records yet.

use crate::error::{CmsError, Result};
use crate::reference::template_categories;
use crate::store::records::read_all;
use common::model::record::{report_columns, Record};
use log::{info, warn};
use rusqlite::Connection;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Longest sheet name the XLSX format accepts.
pub const MAX_SHEET_NAME: usize = 31;

/// Header of the synthetic 1-based index column.
pub const INDEX_HEADER: &str = "Ref # (auto)";

/// Sheet name for a category: empty names become `Sheet`, long ones are cut
/// to 31 characters.
pub fn sheet_name(category: &str) -> String {
    let name = if category.is_empty() { "Sheet" } else { category };
    name.chars().take(MAX_SHEET_NAME).collect()
}

/// Records grouped by category in ascending category order. Records without
/// a category are left out.
pub fn group_by_category(records: &[Record]) -> BTreeMap<&str, Vec<&Record>> {
    let mut groups: BTreeMap<&str, Vec<&Record>> = BTreeMap::new();
    for record in records {
        if let Some(category) = record.category.as_deref() {
            groups.entry(category).or_default().push(record);
        }
    }
    groups
}

fn write_header(ws: &mut Worksheet, first_col: u16, bold: &Format) -> Result<()> {
    for (i, name) in report_columns().iter().enumerate() {
        ws.write_string_with_format(0, first_col + i as u16, *name, bold)?;
    }
    Ok(())
}

fn write_category(ws: &mut Worksheet, records: &[&Record], bold: &Format) -> Result<()> {
    ws.write_string_with_format(0, 0, INDEX_HEADER, bold)?;
    write_header(ws, 1, bold)?;
    for (i, record) in records.iter().enumerate() {
        let row = (i + 1) as u32;
        ws.write_number(row, 0, (i + 1) as f64)?;
        for (col, value) in record.report_values().iter().enumerate() {
            if let Some(v) = value {
                ws.write_string(row, (col + 1) as u16, *v)?;
            }
        }
    }
    Ok(())
}

/// Builds the report workbook and returns its bytes.
///
/// Sheet names are unique without regard to case. A category whose sheet name
/// matches an earlier one writes into that sheet from the top.
pub fn build_report(records: &[Record], template_categories: &[String]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    // Lowercased sheet name -> name the sheet was created with.
    let mut emitted: HashMap<String, String> = HashMap::new();

    for (category, group) in group_by_category(records) {
        let name = sheet_name(category);
        let ws = match emitted.get(&name.to_lowercase()) {
            Some(existing) => {
                warn!(
                    "Category '{}' shares sheet name '{}' with an earlier category",
                    category, existing
                );
                workbook.worksheet_from_name(existing)?
            }
            None => {
                emitted.insert(name.to_lowercase(), name.clone());
                let ws = workbook.add_worksheet();
                ws.set_name(&name)?;
                ws
            }
        };
        write_category(ws, &group, &bold)?;
    }

    for category in template_categories {
        let name = sheet_name(category);
        if emitted.contains_key(&name.to_lowercase()) {
            continue;
        }
        emitted.insert(name.to_lowercase(), name.clone());
        let ws = workbook.add_worksheet();
        ws.set_name(&name)?;
        write_header(ws, 0, &bold)?;
    }

    if emitted.is_empty() {
        return Err(CmsError::InvalidInput("nothing to export".to_string()));
    }
    Ok(workbook.save_to_buffer()?)
}

/// Exports the canonical table, optionally adding template placeholders.
pub fn export(
    conn: &Connection,
    template: &Path,
    include_template_categories: bool,
) -> Result<Vec<u8>> {
    let records = read_all(conn)?;
    let categories = if include_template_categories {
        template_categories(template)
    } else {
        Vec::new()
    };
    let bytes = build_report(&records, &categories)?;
    info!(
        "Exported {} record(s) ({} bytes)",
        records.len(),
        bytes.len()
    );
    Ok(bytes)
}
