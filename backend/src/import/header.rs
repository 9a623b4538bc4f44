//! Header row detection and column-name normalisation.

use super::cells::{cell_text, is_text_cell};
use calamine::Data;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// How many leading rows are searched for a header.
pub const MAX_HEADER_SCAN: usize = 50;

/// A header row needs at least this many non-empty cells.
const MIN_HEADER_CELLS: usize = 3;

/// Primary key column of every mirror table.
const RESERVED_COLUMN: &str = "id";

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Index of the first row, within the first `max_scan`, that has at least three
/// non-empty cells and at least one text cell. Falls back to row 0.
pub fn detect_header_row(grid: &[Vec<Data>], max_scan: usize) -> usize {
    grid.iter()
        .take(max_scan)
        .position(|row| {
            let filled = row.iter().filter(|c| cell_text(c).is_some()).count();
            filled >= MIN_HEADER_CELLS && row.iter().any(is_text_cell)
        })
        .unwrap_or(0)
}

/// Collapses whitespace, turns `/` into a space and `&` into `and`, then trims.
pub fn normalize_column(name: &str) -> String {
    WHITESPACE
        .replace_all(name, " ")
        .replace('/', " ")
        .replace('&', "and")
        .trim()
        .to_string()
}

/// Normalised, unique column names for a header row.
///
/// Blank header cells become `Unnamed: {index}`; repeated names get `.1`,
/// `.2`, ... appended in order of appearance. Names are compared without
/// regard to case, as SQLite does, and `id` is reserved for the row key.
pub fn normalize_columns(raw: &[Option<String>]) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::from([RESERVED_COLUMN.to_string()]);
    raw.iter()
        .enumerate()
        .map(|(idx, name)| {
            let base = match name {
                Some(n) => normalize_column(n),
                None => format!("Unnamed: {}", idx),
            };
            let base = if base.is_empty() {
                format!("Unnamed: {}", idx)
            } else {
                base
            };
            let mut candidate = base.clone();
            let mut n = 1;
            while !seen.insert(candidate.to_lowercase()) {
                candidate = format!("{}.{}", base, n);
                n += 1;
            }
            candidate
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Data {
        Data::String(s.to_string())
    }

    #[test]
    fn header_after_two_blank_rows() {
        let grid = vec![
            vec![],
            vec![Data::Empty, Data::Empty],
            vec![text("Ref #"), text("Country"), text("Body"), text("Sender")],
            vec![text("1"), text("Benin"), text("CENA"), text("MoFA")],
        ];
        assert_eq!(detect_header_row(&grid, MAX_HEADER_SCAN), 2);
    }

    #[test]
    fn title_rows_with_few_cells_are_skipped() {
        let grid = vec![
            vec![text("Candidature Matrix")],
            vec![text("As of"), Data::Float(45600.0)],
            vec![text("Ref #"), text("Country"), Data::Empty, text("Body")],
        ];
        assert_eq!(detect_header_row(&grid, MAX_HEADER_SCAN), 2);
    }

    #[test]
    fn numeric_rows_do_not_qualify() {
        let grid = vec![
            vec![Data::Float(1.0), Data::Float(2.0), Data::Float(3.0)],
            vec![text("A"), text("B"), text("C")],
        ];
        assert_eq!(detect_header_row(&grid, MAX_HEADER_SCAN), 1);
    }

    #[test]
    fn defaults_to_first_row() {
        let grid = vec![vec![text("only")], vec![text("two"), text("cells")]];
        assert_eq!(detect_header_row(&grid, MAX_HEADER_SCAN), 0);
        assert_eq!(detect_header_row(&[], MAX_HEADER_SCAN), 0);
    }

    #[test]
    fn scan_is_bounded() {
        let mut grid = vec![vec![text("x")]; 5];
        grid.push(vec![text("A"), text("B"), text("C")]);
        assert_eq!(detect_header_row(&grid, 5), 0);
        assert_eq!(detect_header_row(&grid, 6), 5);
    }

    #[test]
    fn normalizes_header_text() {
        assert_eq!(normalize_column("  Ref   #\n"), "Ref #");
        assert_eq!(normalize_column("Name/Title"), "Name Title");
        assert_eq!(normalize_column("Terms & Conditions"), "Terms and Conditions");
    }

    #[test]
    fn blank_and_duplicate_headers_get_unique_names() {
        let raw = vec![
            Some("Country".to_string()),
            None,
            Some("Country ".to_string()),
            Some("Country".to_string()),
        ];
        assert_eq!(
            normalize_columns(&raw),
            vec!["Country", "Unnamed: 1", "Country.1", "Country.2"]
        );
    }

    #[test]
    fn headers_differing_only_in_case_are_renamed() {
        let raw = vec![
            Some("Ref".to_string()),
            Some("Country".to_string()),
            Some("COUNTRY".to_string()),
            Some("country".to_string()),
        ];
        assert_eq!(
            normalize_columns(&raw),
            vec!["Ref", "Country", "COUNTRY.1", "country.2"]
        );
    }

    #[test]
    fn id_header_does_not_shadow_row_key() {
        let raw = vec![
            Some("ID".to_string()),
            Some("Ref".to_string()),
            Some("id".to_string()),
        ];
        assert_eq!(normalize_columns(&raw), vec!["ID.1", "Ref", "id.2"]);
    }
}
