//! The YAML credentials file:
//!
//! ```yaml
//! users:
//!   alice: { password_hash: "pbkdf2-sha256$...", role: admin }
//!   bob:   { password: "changeme", role: editor }
//! ```

use super::password::verify_password;
use crate::error::{CmsError, Result};
use common::model::auth::Role;
use log::warn;
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserEntry {
    /// Plaintext password. Numbers and other scalars compare by their text.
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub password: Option<String>,
    #[serde(default)]
    pub password_hash: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl UserEntry {
    pub fn role(&self) -> Role {
        self.role.as_deref().map(Role::from_name).unwrap_or(Role::Viewer)
    }

    /// A stored hash takes precedence over a plaintext password.
    pub fn password_matches(&self, password: &str) -> bool {
        match (&self.password_hash, &self.password) {
            (Some(hash), _) => verify_password(password, hash),
            (None, Some(plain)) => plain == password,
            (None, None) => false,
        }
    }
}

fn scalar_as_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_yaml::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_yaml::Value::String(s)) => Some(s),
        Some(serde_yaml::Value::Number(n)) => Some(n.to_string()),
        Some(serde_yaml::Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub users: HashMap<String, UserEntry>,
}

impl Credentials {
    pub fn from_yaml(text: &str) -> Result<Credentials> {
        if text.trim().is_empty() {
            return Ok(Credentials::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    /// Loads the credentials file. A missing file means no users.
    pub fn load(path: &Path) -> Result<Credentials> {
        if !path.exists() {
            warn!("Credentials file {} not found, nobody can sign in", path.display());
            return Ok(Credentials::default());
        }
        Self::from_yaml(&std::fs::read_to_string(path)?)
    }

    /// Resolves a username/password pair to a role.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<Role> {
        match self.users.get(username) {
            Some(entry) if entry.password_matches(password) => Ok(entry.role()),
            _ => Err(CmsError::InvalidCredentials),
        }
    }
}
