//! Identity and permission checks.

pub mod credentials;
pub mod password;

use crate::error::{CmsError, Result};
use common::model::auth::{Action, Role, SessionInfo};
use log::warn;

/// Who is acting. Anonymous sessions are viewers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: Option<String>,
    pub role: Role,
}

impl Session {
    pub fn anonymous() -> Session {
        Session {
            user: None,
            role: Role::Viewer,
        }
    }

    pub fn signed_in(user: &str, role: Role) -> Session {
        Session {
            user: Some(user.to_string()),
            role,
        }
    }

    pub fn info(&self) -> SessionInfo {
        SessionInfo {
            user: self.user.clone(),
            role: self.role,
            permissions: self.role.permissions(),
        }
    }
}

/// Fails with `Forbidden` unless the session's role permits `action`.
pub fn authorize(session: &Session, action: Action) -> Result<()> {
    if session.role.permits(action) {
        Ok(())
    } else {
        warn!(
            "Denied {} for {} ({})",
            action,
            session.user.as_deref().unwrap_or("anonymous"),
            session.role
        );
        Err(CmsError::Forbidden(action))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewer_is_blocked_from_changes() {
        let viewer = Session::signed_in("v", Role::Viewer);
        for action in [Action::Add, Action::Import, Action::Edit] {
            assert!(matches!(
                authorize(&viewer, action),
                Err(CmsError::Forbidden(a)) if a == action
            ));
        }
        assert!(authorize(&viewer, Action::Export).is_ok());
    }

    #[test]
    fn editor_can_do_all_but_import() {
        let editor = Session::signed_in("e", Role::Editor);
        assert!(authorize(&editor, Action::Add).is_ok());
        assert!(authorize(&editor, Action::Edit).is_ok());
        assert!(authorize(&editor, Action::Export).is_ok());
        assert!(authorize(&editor, Action::Import).is_err());
    }

    #[test]
    fn anonymous_session_is_a_viewer() {
        let anon = Session::anonymous();
        assert_eq!(anon.info().role, Role::Viewer);
        assert!(anon.info().permissions.export);
        assert!(!anon.info().permissions.add);
    }
}
