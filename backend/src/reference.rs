//! Reference data that degrades to defaults when its source file is missing.

use calamine::{open_workbook, Reader, Xlsx};
use log::warn;
use serde::Deserialize;
use std::path::Path;

const FALLBACK_COUNTRIES: [&str; 4] = ["Maldives", "Benin", "Burkina Faso", "Other"];
const FALLBACK_CATEGORY: &str = "General";

/// Sheet names of the template workbook, or nothing if it can't be read.
pub fn template_categories(path: &Path) -> Vec<String> {
    if !path.exists() {
        warn!("Template workbook {} not found", path.display());
        return Vec::new();
    }
    match open_workbook::<Xlsx<_>, _>(path) {
        Ok(workbook) => workbook.sheet_names().to_vec(),
        Err(e) => {
            warn!("Template workbook {} unreadable: {}", path.display(), e);
            Vec::new()
        }
    }
}

/// Categories offered on the data-entry form.
pub fn form_categories(template: &Path) -> Vec<String> {
    let categories = template_categories(template);
    if categories.is_empty() {
        vec![FALLBACK_CATEGORY.to_string()]
    } else {
        categories
    }
}

#[derive(Deserialize)]
struct CountryRow {
    name: Option<String>,
}

fn read_countries(path: &Path) -> Result<Vec<String>, csv::Error> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut names = Vec::new();
    for row in reader.deserialize::<CountryRow>() {
        if let Some(name) = row?.name.map(|n| n.trim().to_string()) {
            if !name.is_empty() {
                names.push(name);
            }
        }
    }
    names.sort();
    Ok(names)
}

/// Sorted country names from the `name` column, or a short fixed list.
pub fn load_countries(path: &Path) -> Vec<String> {
    let countries = if path.exists() {
        read_countries(path).unwrap_or_else(|e| {
            warn!("Countries file {} unreadable: {}", path.display(), e);
            Vec::new()
        })
    } else {
        Vec::new()
    };
    if countries.is_empty() {
        FALLBACK_COUNTRIES.iter().map(|c| c.to_string()).collect()
    } else {
        countries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::tests::write_workbook;

    #[test]
    fn countries_are_sorted_and_blank_names_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("countries.csv");
        std::fs::write(&path, "code,name\nTG,Togo\nXX,\nBJ,Benin\n").unwrap();
        assert_eq!(load_countries(&path), vec!["Benin", "Togo"]);
    }

    #[test]
    fn countries_fall_back_when_missing_or_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("none.csv");
        assert_eq!(load_countries(&missing), FALLBACK_COUNTRIES.to_vec());

        let no_name = dir.path().join("codes.csv");
        std::fs::write(&no_name, "code\nTG\n").unwrap();
        assert_eq!(load_countries(&no_name), FALLBACK_COUNTRIES.to_vec());
    }

    #[test]
    fn categories_come_from_template_sheets() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_workbook(
            dir.path(),
            "template.xlsx",
            &[("Asia", vec![]), ("Europe", vec![])],
        );
        assert_eq!(template_categories(&path), vec!["Asia", "Europe"]);
        assert_eq!(form_categories(&path), vec!["Asia", "Europe"]);
    }

    #[test]
    fn missing_template_yields_general() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.xlsx");
        assert!(template_categories(&path).is_empty());
        assert_eq!(form_categories(&path), vec!["General"]);
    }
}
