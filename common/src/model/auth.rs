use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Editor,
    Viewer,
}

impl Role {
    /// Parses a role name from the credentials file. Anything unknown is a viewer.
    pub fn from_name(name: &str) -> Role {
        match name.trim().to_ascii_lowercase().as_str() {
            "admin" => Role::Admin,
            "editor" => Role::Editor,
            _ => Role::Viewer,
        }
    }

    pub fn permissions(self) -> Permissions {
        match self {
            Role::Admin => Permissions {
                import: true,
                add: true,
                edit: true,
                export: true,
            },
            Role::Editor => Permissions {
                import: false,
                add: true,
                edit: true,
                export: true,
            },
            Role::Viewer => Permissions {
                import: false,
                add: false,
                edit: false,
                export: true,
            },
        }
    }

    pub fn permits(self, action: Action) -> bool {
        self.permissions().allows(action)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Editor => write!(f, "editor"),
            Role::Viewer => write!(f, "viewer"),
        }
    }
}

/// The four gated user actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Import,
    Add,
    Edit,
    Export,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Import => write!(f, "import"),
            Action::Add => write!(f, "add"),
            Action::Edit => write!(f, "edit"),
            Action::Export => write!(f, "export"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permissions {
    pub import: bool,
    pub add: bool,
    pub edit: bool,
    pub export: bool,
}

impl Permissions {
    pub fn allows(&self, action: Action) -> bool {
        match action {
            Action::Import => self.import,
            Action::Add => self.add,
            Action::Edit => self.edit,
            Action::Export => self.export,
        }
    }
}

/// What the client sees about its current session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInfo {
    pub user: Option<String>,
    pub role: Role,
    pub permissions: Permissions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub session: SessionInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewer_can_only_export() {
        let viewer = Role::Viewer;
        assert!(viewer.permits(Action::Export));
        assert!(!viewer.permits(Action::Add));
        assert!(!viewer.permits(Action::Import));
        assert!(!viewer.permits(Action::Edit));
    }

    #[test]
    fn editor_cannot_import() {
        let editor = Role::Editor;
        assert!(editor.permits(Action::Add));
        assert!(editor.permits(Action::Edit));
        assert!(editor.permits(Action::Export));
        assert!(!editor.permits(Action::Import));
    }

    #[test]
    fn admin_has_everything() {
        for action in [Action::Import, Action::Add, Action::Edit, Action::Export] {
            assert!(Role::Admin.permits(action));
        }
    }

    #[test]
    fn unknown_role_names_fall_back_to_viewer() {
        assert_eq!(Role::from_name("Admin"), Role::Admin);
        assert_eq!(Role::from_name("superuser"), Role::Viewer);
        assert_eq!(Role::from_name(""), Role::Viewer);
    }
}
