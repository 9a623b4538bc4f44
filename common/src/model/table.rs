use serde::{Deserialize, Serialize};

/// A whole table as column names plus rows of nullable text cells.
///
/// Used for the per-sheet mirror tables, whose columns follow the imported
/// sheet rather than the canonical schema, and for whole-table edit saves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableData {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}
