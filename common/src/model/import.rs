use serde::{Deserialize, Serialize};

/// Outcome of importing one sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetImport {
    pub sheet: String,
    /// Zero-based sheet row that was used as the header.
    pub header_row: usize,
    pub rows: usize,
    /// Name of the raw mirror table the sheet was copied into.
    pub table: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub sheets: Vec<SheetImport>,
}

impl ImportSummary {
    pub fn total_rows(&self) -> usize {
        self.sheets.iter().map(|s| s.rows).sum()
    }
}
