//! Record attachments saved under the uploads directory.

use crate::error::{CmsError, Result};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};

pub const ALLOWED_EXTENSIONS: [&str; 6] = ["pdf", "doc", "docx", "png", "jpg", "jpeg"];

static UNSAFE_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9a-zA-Z_.-]+").unwrap());

/// Replaces each run of characters outside `[0-9A-Za-z_.-]` with `_`.
pub fn sanitize_file_name(name: &str) -> String {
    UNSAFE_CHARS.replace_all(name, "_").into_owned()
}

pub fn check_extension(name: &str) -> Result<()> {
    let ext = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    if ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        Ok(())
    } else {
        Err(CmsError::InvalidInput(format!(
            "attachment must be one of: {}",
            ALLOWED_EXTENSIONS.join(", ")
        )))
    }
}

/// `{YYYYmmddHHMMSS}_{sanitized name}`.
pub fn stored_file_name(original: &str, now: DateTime<Utc>) -> String {
    format!(
        "{}_{}",
        now.format("%Y%m%d%H%M%S"),
        sanitize_file_name(original)
    )
}

/// Writes the attachment and returns the path recorded on the record.
pub fn save_attachment(uploads_dir: &Path, original: &str, bytes: &[u8]) -> Result<PathBuf> {
    check_extension(original)?;
    std::fs::create_dir_all(uploads_dir)?;
    let dest = uploads_dir.join(stored_file_name(original, Utc::now()));
    std::fs::write(&dest, bytes)?;
    Ok(dest)
}

/// Creation stamp stored on new records, second precision with a `Z` suffix.
pub fn created_at_stamp(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn file_names_are_sanitized_and_stamped() {
        assert_eq!(sanitize_file_name("my report (v2).pdf"), "my_report_v2_.pdf");
        let now = Utc.with_ymd_and_hms(2024, 11, 8, 9, 5, 3).unwrap();
        assert_eq!(
            stored_file_name("TPN #12.pdf", now),
            "20241108090503_TPN_12.pdf"
        );
        assert_eq!(created_at_stamp(now), "2024-11-08T09:05:03Z");
    }

    #[test]
    fn only_document_and_image_types_are_accepted() {
        assert!(check_extension("scan.JPG").is_ok());
        assert!(check_extension("letter.docx").is_ok());
        assert!(check_extension("script.exe").is_err());
        assert!(check_extension("noext").is_err());
    }

    #[test]
    fn saves_under_uploads_dir() {
        let dir = tempfile::tempdir().unwrap();
        let uploads = dir.path().join("uploads");
        let path = save_attachment(&uploads, "note.pdf", b"%PDF").unwrap();
        assert!(path.starts_with(&uploads));
        assert!(path.file_name().unwrap().to_str().unwrap().ends_with("_note.pdf"));
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF");
    }
}
