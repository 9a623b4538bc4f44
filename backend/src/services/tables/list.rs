use crate::config::AppConfig;
use crate::error::Result;
use crate::store;
use crate::store::tables::list_tables;
use actix_web::{web, HttpResponse, Responder, ResponseError};

pub(crate) async fn process(config: web::Data<AppConfig>) -> impl Responder {
    match mirror_tables(&config) {
        Ok(names) => HttpResponse::Ok().json(names),
        Err(e) => e.error_response(),
    }
}

fn mirror_tables(config: &AppConfig) -> Result<Vec<String>> {
    let conn = store::open(&config.db_path)?;
    list_tables(&conn)
}
