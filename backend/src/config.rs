//! Service configuration.
//!
//! Read once at startup from the TOML file named by `CMS_CONFIG` (default
//! `cms.toml`). Every key is optional; a missing file means all defaults.

use crate::error::Result;
use log::{info, warn};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "CMS_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "cms.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// SQLite database file.
    pub db_path: PathBuf,
    /// Reference workbook whose sheet names define the category set.
    pub template_workbook: PathBuf,
    /// CSV with a `name` column listing selectable countries.
    pub countries_csv: PathBuf,
    /// Where record attachments are written.
    pub uploads_dir: PathBuf,
    /// YAML credentials file.
    pub users_file: PathBuf,
    pub open_browser: bool,
    pub max_upload_mb: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            db_path: PathBuf::from("candidature.db"),
            template_workbook: PathBuf::from("2024.11.08 - Candidature Matrix.xlsx"),
            countries_csv: PathBuf::from("countries.csv"),
            uploads_dir: PathBuf::from("uploads"),
            users_file: PathBuf::from("users.yaml"),
            open_browser: false,
            max_upload_mb: 10,
        }
    }
}

impl AppConfig {
    /// Loads the configuration from `CMS_CONFIG` or `cms.toml`.
    pub fn load() -> Result<AppConfig> {
        let path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::from_file(Path::new(&path))
    }

    pub fn from_file(path: &Path) -> Result<AppConfig> {
        if !path.exists() {
            warn!(
                "Config file {} not found, using defaults",
                path.display()
            );
            return Ok(AppConfig::default());
        }
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&text)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<AppConfig> {
        Ok(toml::from_str(text)?)
    }

    pub fn bind_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb * 1024 * 1024
    }
}
