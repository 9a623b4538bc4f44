//! `POST /api/db/init`: creates the canonical table, backfilling any missing
//! canonical columns. Safe to call repeatedly.

use crate::config::AppConfig;
use crate::error::Result;
use crate::store;
use crate::store::schema::ensure_records_table;
use actix_web::web::{post, scope};
use actix_web::{web, HttpResponse, Responder, ResponseError, Scope};
use log::info;

const API_PATH: &str = "/api/db";

pub fn configure_routes() -> Scope {
    scope(API_PATH).route("/init", post().to(process))
}

async fn process(config: web::Data<AppConfig>) -> impl Responder {
    match init_db(&config) {
        Ok(()) => HttpResponse::Ok().body("Tables ready."),
        Err(e) => e.error_response(),
    }
}

fn init_db(config: &AppConfig) -> Result<()> {
    let conn = store::open(&config.db_path)?;
    ensure_records_table(&conn)?;
    info!("Tables ready in {}", config.db_path.display());
    Ok(())
}
