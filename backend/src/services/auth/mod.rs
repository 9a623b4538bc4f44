//! Sign-in, sign-out and session inspection.
//!
//! The provided routes are:
//! - `POST /api/auth/login`: Checks a username/password pair against the
//!   credentials file and returns a bearer token with the session's role and
//!   permissions. Bad credentials answer `401` and change nothing.
//! - `POST /api/auth/logout`: Drops the session named by the bearer token.
//! - `GET /api/auth/me`: Returns the current session; anonymous callers are
//!   viewers.

use actix_web::web::{get, post, scope};
use actix_web::Scope;

mod login;
mod logout;
mod me;

const API_PATH: &str = "/api/auth";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/login", post().to(login::process))
        .route("/logout", post().to(logout::process))
        .route("/me", get().to(me::process))
}
