//! Holds the signed-in sessions of all clients.
//!
//! The main components are:
//! - `SessionsState`: A clonable, thread-safe map from bearer token to
//!   `Session`. It is injected into the Actix application state in `main.rs`.
//! - `session_for_request`: Resolves the `Authorization: Bearer <token>` header
//!   of a request to its session. Requests without the header act as an
//!   anonymous viewer.

use crate::access::Session;
use crate::error::{CmsError, Result};
use actix_web::http::header::AUTHORIZATION;
use actix_web::HttpRequest;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;
use uuid::Uuid;

/// A thread-safe, shareable container for every live session.
///
/// A session lives from sign-in until sign-out; there is no expiry.
#[derive(Clone, Default)]
pub struct SessionsState {
    pub sessions: Arc<RwLock<HashMap<String, Session>>>,
}

impl SessionsState {
    /// Stores `session` under a fresh token and returns the token.
    pub async fn open(&self, session: Session) -> String {
        let token = Uuid::new_v4().to_string();
        self.sessions.write().await.insert(token.clone(), session);
        token
    }

    /// Drops the session for `token`. Returns the session that was removed.
    pub async fn close(&self, token: &str) -> Option<Session> {
        self.sessions.write().await.remove(token)
    }

    pub async fn get(&self, token: &str) -> Option<Session> {
        self.sessions.read().await.get(token).cloned()
    }
}

/// Extracts the bearer token from the request, if any.
pub fn bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Resolves the session of a request. An unknown token is an error.
pub async fn session_for_request(req: &HttpRequest, state: &SessionsState) -> Result<Session> {
    match bearer_token(req) {
        None => Ok(Session::anonymous()),
        Some(token) => state.get(&token).await.ok_or(CmsError::UnknownSession),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use common::model::auth::Role;

    #[actix_web::test]
    async fn sessions_live_until_closed() {
        let state = SessionsState::default();
        let token = state.open(Session::signed_in("alice", Role::Admin)).await;

        let req = TestRequest::default()
            .insert_header((AUTHORIZATION, format!("Bearer {}", token)))
            .to_http_request();
        let session = session_for_request(&req, &state).await.unwrap();
        assert_eq!(session.user.as_deref(), Some("alice"));

        assert!(state.close(&token).await.is_some());
        assert!(matches!(
            session_for_request(&req, &state).await,
            Err(CmsError::UnknownSession)
        ));
    }

    #[actix_web::test]
    async fn missing_header_is_anonymous() {
        let state = SessionsState::default();
        let req = TestRequest::default().to_http_request();
        assert_eq!(
            session_for_request(&req, &state).await.unwrap(),
            Session::anonymous()
        );
    }
}
