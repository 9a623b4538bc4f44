//! Raw per-sheet mirror tables for advanced editing.
//!
//! The provided routes are:
//! - `GET /api/tables`: Names of the mirror tables.
//! - `GET /api/tables/{name}`: The whole table as `TableData`, id included.
//! - `PUT /api/tables/{name}`: Overwrites the whole table with a `TableData`
//!   body. Needs the edit permission. Unknown table names answer `404`.

use actix_web::web::{get, put, scope};
use actix_web::Scope;

mod get;
mod list;
mod save;

const API_PATH: &str = "/api/tables";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("/{name}", get().to(get::process))
        .route("/{name}", put().to(save::process))
}
