//! `GET /api/reports/export`: Downloads the consolidated report workbook.
//!
//! Needs the export permission, which every role has. The
//! `include_template_categories` query flag (default `true`) adds a
//! header-only sheet for every template category without records.

use crate::access::authorize;
use crate::config::AppConfig;
use crate::error::Result;
use crate::report::export;
use crate::session_controller::state::{session_for_request, SessionsState};
use crate::store;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::web::{get, scope};
use actix_web::{web, HttpRequest, HttpResponse, Responder, ResponseError, Scope};
use common::model::auth::Action;
use common::requests::ExportQuery;
use log::error;

const API_PATH: &str = "/api/reports";
const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
const REPORT_FILE_NAME: &str = "candidature_report.xlsx";

pub fn configure_routes() -> Scope {
    scope(API_PATH).route("/export", get().to(process))
}

async fn process(
    req: HttpRequest,
    config: web::Data<AppConfig>,
    state: web::Data<SessionsState>,
    query: web::Query<ExportQuery>,
) -> impl Responder {
    match export_report(&req, &config, &state, &query).await {
        Ok(bytes) => HttpResponse::Ok()
            .content_type(XLSX_MIME)
            .insert_header(ContentDisposition {
                disposition: DispositionType::Attachment,
                parameters: vec![DispositionParam::Filename(REPORT_FILE_NAME.to_string())],
            })
            .body(bytes),
        Err(e) => {
            error!("Export failed: {}", e);
            e.error_response()
        }
    }
}

async fn export_report(
    req: &HttpRequest,
    config: &AppConfig,
    state: &SessionsState,
    query: &ExportQuery,
) -> Result<Vec<u8>> {
    let session = session_for_request(req, state).await?;
    authorize(&session, Action::Export)?;

    let conn = store::open(&config.db_path)?;
    export(
        &conn,
        &config.template_workbook,
        query.include_template_categories,
    )
}
