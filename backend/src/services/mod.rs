pub mod auth;
pub mod db;
pub mod import;
pub mod records;
pub mod reference;
pub mod reports;
pub mod tables;

use crate::error::{CmsError, Result};
use actix_multipart::Field;
use actix_web::web;
use futures_util::StreamExt;

/// Registers every API scope.
pub fn register(cfg: &mut web::ServiceConfig) {
    cfg.service(auth::configure_routes())
        .service(db::configure_routes())
        .service(import::configure_routes())
        .service(records::configure_routes())
        .service(tables::configure_routes())
        .service(reports::configure_routes())
        .service(reference::configure_routes());
}

/// Reads one multipart part into memory, failing once it exceeds `limit` bytes.
pub(crate) async fn read_field(field: &mut Field, limit: usize) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.next().await {
        bytes.extend_from_slice(&chunk?);
        if bytes.len() > limit {
            return Err(CmsError::InvalidInput(format!(
                "upload exceeds the {} byte limit",
                limit
            )));
        }
    }
    Ok(bytes)
}
