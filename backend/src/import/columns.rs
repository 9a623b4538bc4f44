use common::model::record::report_columns;

/// Maps each report column to the first header whose name starts with the
/// report column's first word, compared case-insensitively.
pub fn map_columns(headers: &[String]) -> Vec<(&'static str, Option<String>)> {
    report_columns()
        .iter()
        .map(|&field| {
            let first_word = field
                .split_whitespace()
                .next()
                .unwrap_or(field)
                .to_lowercase();
            let source = headers
                .iter()
                .find(|h| h.to_lowercase().starts_with(&first_word))
                .cloned();
            (field, source)
        })
        .collect()
}
