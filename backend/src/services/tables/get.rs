use crate::config::AppConfig;
use crate::error::Result;
use crate::store;
use crate::store::tables::read_table;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::table::TableData;

pub(crate) async fn process(
    config: web::Data<AppConfig>,
    name: web::Path<String>,
) -> impl Responder {
    match get_table(&config, &name) {
        Ok(data) => HttpResponse::Ok().json(data),
        Err(e) => e.error_response(),
    }
}

fn get_table(config: &AppConfig, name: &str) -> Result<TableData> {
    let conn = store::open(&config.db_path)?;
    read_table(&conn, name)
}
