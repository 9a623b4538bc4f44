use crate::access::authorize;
use crate::config::AppConfig;
use crate::error::{CmsError, Result};
use crate::import::import_workbook;
use crate::session_controller::state::{session_for_request, SessionsState};
use crate::store;
use actix_web::{web, HttpRequest, HttpResponse, Responder, ResponseError};
use common::model::auth::Action;
use common::model::import::ImportSummary;
use log::error;

pub(crate) async fn process(
    req: HttpRequest,
    config: web::Data<AppConfig>,
    state: web::Data<SessionsState>,
) -> impl Responder {
    match import_template(&req, &config, &state).await {
        Ok(summary) => HttpResponse::Ok().json(summary),
        Err(e) => {
            error!("Template import failed: {}", e);
            e.error_response()
        }
    }
}

async fn import_template(
    req: &HttpRequest,
    config: &AppConfig,
    state: &SessionsState,
) -> Result<ImportSummary> {
    let session = session_for_request(req, state).await?;
    authorize(&session, Action::Import)?;

    let template = config.template_workbook.clone();
    if !template.exists() {
        return Err(CmsError::NotFound("Template workbook not found.".to_string()));
    }
    let db_path = config.db_path.clone();

    tokio::task::spawn_blocking(move || {
        let mut conn = store::open(&db_path)?;
        import_workbook(&mut conn, &template)
    })
    .await?
}
