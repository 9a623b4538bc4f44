use crate::config::AppConfig;
use crate::error::Result;
use crate::store;
use crate::store::records::{filter_records, read_all};
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::record::{Record, RecordFilter};

pub(crate) async fn process(
    config: web::Data<AppConfig>,
    filter: web::Query<RecordFilter>,
) -> impl Responder {
    match list_records(&config, &filter) {
        Ok(records) => HttpResponse::Ok().json(records),
        Err(e) => e.error_response(),
    }
}

fn list_records(config: &AppConfig, filter: &RecordFilter) -> Result<Vec<Record>> {
    let conn = store::open(&config.db_path)?;
    Ok(filter_records(read_all(&conn)?, filter))
}
