use calamine::{Data, Range};

/// Text stored for a cell, or `None` for a cell that counts as empty.
pub fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) if s.trim().is_empty() => None,
        Data::String(s) => Some(s.clone()),
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) => {
            if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
                Some((*f as i64).to_string())
            } else {
                Some(f.to_string())
            }
        }
        Data::Bool(b) => Some(b.to_string()),
        Data::DateTime(dt) => Some(format!("{}", dt)),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
    }
}

pub fn is_text_cell(cell: &Data) -> bool {
    matches!(cell, Data::String(s) if !s.trim().is_empty())
}

/// The used range as a grid addressed from A1.
///
/// The reader trims leading blank rows and columns; they are put back so row
/// indices match what a user sees in the sheet.
pub fn sheet_grid(range: &Range<Data>) -> Vec<Vec<Data>> {
    let Some((row_offset, col_offset)) = range.start() else {
        return Vec::new();
    };
    let mut grid = vec![Vec::new(); row_offset as usize];
    for row in range.rows() {
        let mut cells = vec![Data::Empty; col_offset as usize];
        cells.extend_from_slice(row);
        grid.push(cells);
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_render_without_spurious_fraction() {
        assert_eq!(cell_text(&Data::Float(12.0)).as_deref(), Some("12"));
        assert_eq!(cell_text(&Data::Float(1.5)).as_deref(), Some("1.5"));
        assert_eq!(cell_text(&Data::Int(7)).as_deref(), Some("7"));
    }

    #[test]
    fn blank_strings_are_empty() {
        assert_eq!(cell_text(&Data::String("   ".into())), None);
        assert_eq!(cell_text(&Data::Empty), None);
        assert!(!is_text_cell(&Data::String(" ".into())));
        assert!(is_text_cell(&Data::String("Ref".into())));
        assert!(!is_text_cell(&Data::Float(1.0)));
    }
}
