//! Workbook import endpoints. Both require the import permission and replace
//! every canonical record with the workbook's contents.
//!
//! The provided routes are:
//! - `POST /api/import/template`: Imports the configured template workbook.
//! - `POST /api/import/upload`: Imports a workbook uploaded as the `file` part
//!   of a multipart/form-data body. The file must end with `.xlsx`.
//!
//! Both answer with an `ImportSummary` listing each sheet's header row, row
//! count and mirror table. The import runs on the blocking thread pool.

use actix_web::web::{post, scope};
use actix_web::Scope;

mod template;
mod upload;

const API_PATH: &str = "/api/import";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/template", post().to(template::process))
        .route("/upload", post().to(upload::process))
}
