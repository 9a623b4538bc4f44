use serde::{Deserialize, Serialize};

/// The eight attributes every candidature record carries, in storage order.
pub static CANONICAL_COLUMNS: [&str; 8] = [
    "Ref #",
    "Candidate Countries",
    "Respective Country's Election Body",
    "Proposal sent by",
    "Indicate Confirmation with date and TPN #",
    "Attachment Path",
    "Created By",
    "Created At",
];

/// Number of leading canonical columns that appear in imports and reports.
pub const REPORT_COLUMN_COUNT: usize = 5;

/// Column holding the originating sheet name.
pub const CATEGORY_COLUMN: &str = "category";

/// The canonical columns shown in report sheets and filled by imports.
pub fn report_columns() -> &'static [&'static str] {
    &CANONICAL_COLUMNS[..REPORT_COLUMN_COUNT]
}

/// One row of the canonical `records` table.
///
/// Imported rows may leave any field NULL, so every column is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: i64,
    pub category: Option<String>,
    #[serde(rename = "Ref #")]
    pub ref_no: Option<String>,
    #[serde(rename = "Candidate Countries")]
    pub candidate_countries: Option<String>,
    #[serde(rename = "Respective Country's Election Body")]
    pub election_body: Option<String>,
    #[serde(rename = "Proposal sent by")]
    pub proposal_sent_by: Option<String>,
    #[serde(rename = "Indicate Confirmation with date and TPN #")]
    pub confirmation: Option<String>,
    #[serde(rename = "Attachment Path")]
    pub attachment_path: Option<String>,
    #[serde(rename = "Created By")]
    pub created_by: Option<String>,
    #[serde(rename = "Created At")]
    pub created_at: Option<String>,
}

impl Record {
    /// Canonical field values in `CANONICAL_COLUMNS` order.
    pub fn canonical_values(&self) -> [Option<&str>; 8] {
        [
            self.ref_no.as_deref(),
            self.candidate_countries.as_deref(),
            self.election_body.as_deref(),
            self.proposal_sent_by.as_deref(),
            self.confirmation.as_deref(),
            self.attachment_path.as_deref(),
            self.created_by.as_deref(),
            self.created_at.as_deref(),
        ]
    }

    pub fn report_values(&self) -> [Option<&str>; REPORT_COLUMN_COUNT] {
        let all = self.canonical_values();
        [all[0], all[1], all[2], all[3], all[4]]
    }
}

/// A record submitted through the data-entry form.
///
/// Fields left out are stored as empty strings, never NULL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRecord {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, rename = "Ref #")]
    pub ref_no: Option<String>,
    #[serde(default, rename = "Candidate Countries")]
    pub candidate_countries: Option<String>,
    #[serde(default, rename = "Respective Country's Election Body")]
    pub election_body: Option<String>,
    #[serde(default, rename = "Proposal sent by")]
    pub proposal_sent_by: Option<String>,
    #[serde(default, rename = "Indicate Confirmation with date and TPN #")]
    pub confirmation: Option<String>,
    #[serde(default, rename = "Attachment Path")]
    pub attachment_path: Option<String>,
    #[serde(default, rename = "Created By")]
    pub created_by: Option<String>,
    #[serde(default, rename = "Created At")]
    pub created_at: Option<String>,
}

impl NewRecord {
    /// Sets a field by its column name. Returns `false` for unknown names.
    pub fn set_field(&mut self, column: &str, value: String) -> bool {
        let slot = match column {
            CATEGORY_COLUMN => &mut self.category,
            "Ref #" => &mut self.ref_no,
            "Candidate Countries" => &mut self.candidate_countries,
            "Respective Country's Election Body" => &mut self.election_body,
            "Proposal sent by" => &mut self.proposal_sent_by,
            "Indicate Confirmation with date and TPN #" => &mut self.confirmation,
            "Attachment Path" => &mut self.attachment_path,
            "Created By" => &mut self.created_by,
            "Created At" => &mut self.created_at,
            _ => return false,
        };
        *slot = Some(value);
        true
    }

    /// `category` followed by the canonical fields, missing ones as "".
    pub fn column_values(&self) -> [&str; 9] {
        fn v(field: &Option<String>) -> &str {
            field.as_deref().unwrap_or("")
        }
        [
            v(&self.category),
            v(&self.ref_no),
            v(&self.candidate_countries),
            v(&self.election_body),
            v(&self.proposal_sent_by),
            v(&self.confirmation),
            v(&self.attachment_path),
            v(&self.created_by),
            v(&self.created_at),
        ]
    }
}

/// Browse-tab filter over the canonical records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordFilter {
    pub category: Option<String>,
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_form_fields_default_to_empty() {
        let mut rec = NewRecord::default();
        assert!(rec.set_field("category", "Asia".into()));
        assert!(rec.set_field("Ref #", "R-1".into()));
        assert!(!rec.set_field("Unknown", "x".into()));

        let values = rec.column_values();
        assert_eq!(values[0], "Asia");
        assert_eq!(values[1], "R-1");
        assert!(values[2..].iter().all(|v| v.is_empty()));
    }

    #[test]
    fn record_serializes_with_canonical_names() {
        let rec = Record {
            id: 3,
            category: Some("Asia".into()),
            ref_no: Some("R-9".into()),
            ..Default::default()
        };
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["Ref #"], "R-9");
        assert_eq!(json["category"], "Asia");
        assert!(json["Candidate Countries"].is_null());
    }
}
