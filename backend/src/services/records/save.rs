use crate::access::authorize;
use crate::config::AppConfig;
use crate::error::Result;
use crate::session_controller::state::{session_for_request, SessionsState};
use crate::store;
use crate::store::tables::replace_table;
use crate::store::RECORDS_TABLE;
use actix_web::{web, HttpRequest, HttpResponse, Responder, ResponseError};
use common::model::auth::Action;
use common::model::table::TableData;
use log::{error, info};
use serde_json::json;

pub(crate) async fn process(
    req: HttpRequest,
    config: web::Data<AppConfig>,
    state: web::Data<SessionsState>,
    payload: web::Json<TableData>,
) -> impl Responder {
    match save_records(&req, &config, &state, &payload).await {
        Ok(rows) => HttpResponse::Ok().json(json!({ "rows": rows })),
        Err(e) => {
            error!("Saving records failed: {}", e);
            e.error_response()
        }
    }
}

async fn save_records(
    req: &HttpRequest,
    config: &AppConfig,
    state: &SessionsState,
    data: &TableData,
) -> Result<usize> {
    let session = session_for_request(req, state).await?;
    authorize(&session, Action::Edit)?;

    let mut conn = store::open(&config.db_path)?;
    let rows = replace_table(&mut conn, RECORDS_TABLE, data)?;
    info!("Replaced {} with {} row(s)", RECORDS_TABLE, rows);
    Ok(rows)
}
