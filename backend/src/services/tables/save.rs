use crate::access::authorize;
use crate::config::AppConfig;
use crate::error::Result;
use crate::session_controller::state::{session_for_request, SessionsState};
use crate::store;
use crate::store::tables::replace_table;
use actix_web::{web, HttpRequest, HttpResponse, Responder, ResponseError};
use common::model::auth::Action;
use common::model::table::TableData;
use log::{error, info};
use serde_json::json;

pub(crate) async fn process(
    req: HttpRequest,
    config: web::Data<AppConfig>,
    state: web::Data<SessionsState>,
    name: web::Path<String>,
    payload: web::Json<TableData>,
) -> impl Responder {
    match save_table(&req, &config, &state, &name, &payload).await {
        Ok(rows) => HttpResponse::Ok().json(json!({ "rows": rows })),
        Err(e) => {
            error!("Saving table '{}' failed: {}", name, e);
            e.error_response()
        }
    }
}

async fn save_table(
    req: &HttpRequest,
    config: &AppConfig,
    state: &SessionsState,
    name: &str,
    data: &TableData,
) -> Result<usize> {
    let session = session_for_request(req, state).await?;
    authorize(&session, Action::Edit)?;

    let mut conn = store::open(&config.db_path)?;
    let rows = replace_table(&mut conn, name, data)?;
    info!("Replaced table {} with {} row(s)", name, rows);
    Ok(rows)
}
