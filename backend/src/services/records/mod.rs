//! Canonical record endpoints.
//!
//! The provided routes are:
//! - `GET /api/records`: Every record ordered by id, optionally narrowed by
//!   `?category=` (exact) and `?search=` (case-insensitive, report columns).
//! - `POST /api/records`: Adds one record from a multipart/form-data body.
//!   Text parts are named after `category` and the canonical columns; an
//!   optional `attachment` part is stored under the uploads directory. Needs
//!   the add permission.
//! - `PUT /api/records`: Replaces the whole table with a `TableData` JSON body
//!   (edit-grid save). Needs the edit permission.

use actix_web::web::{get, post, put, scope};
use actix_web::Scope;

mod add;
mod list;
mod save;

const API_PATH: &str = "/api/records";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("", post().to(add::process))
        .route("", put().to(save::process))
}
