use crate::access::authorize;
use crate::config::AppConfig;
use crate::error::{CmsError, Result};
use crate::import::import_workbook;
use crate::services::read_field;
use crate::session_controller::state::{session_for_request, SessionsState};
use crate::store;
use actix_multipart::Multipart;
use actix_web::{web, HttpRequest, HttpResponse, Responder, ResponseError};
use common::model::auth::Action;
use common::model::import::ImportSummary;
use futures_util::StreamExt;
use log::{error, info};
use std::io::Write;

pub(crate) async fn process(
    req: HttpRequest,
    config: web::Data<AppConfig>,
    state: web::Data<SessionsState>,
    payload: Multipart,
) -> impl Responder {
    match import_upload(&req, &config, &state, payload).await {
        Ok(summary) => HttpResponse::Ok().json(summary),
        Err(e) => {
            error!("Uploaded workbook import failed: {}", e);
            e.error_response()
        }
    }
}

/// Stages the uploaded workbook in a temporary file, imports it, and removes
/// the file afterwards.
async fn import_upload(
    req: &HttpRequest,
    config: &AppConfig,
    state: &SessionsState,
    mut payload: Multipart,
) -> Result<ImportSummary> {
    let session = session_for_request(req, state).await?;
    authorize(&session, Action::Import)?;

    let mut upload: Option<(String, Vec<u8>)> = None;
    while let Some(item) = payload.next().await {
        let mut field = item?;
        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));
        if name.as_deref() != Some("file") {
            continue;
        }
        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename().map(|f| f.to_string()))
            .unwrap_or_default();
        if !filename.to_ascii_lowercase().ends_with(".xlsx") {
            return Err(CmsError::InvalidInput("The file must end with .xlsx".into()));
        }
        let bytes = read_field(&mut field, config.max_upload_bytes()).await?;
        upload = Some((filename, bytes));
    }
    let (filename, bytes) = upload.ok_or_else(|| CmsError::InvalidInput("Missing file".into()))?;

    let mut staged = tempfile::Builder::new().suffix(".xlsx").tempfile()?;
    staged.write_all(&bytes)?;
    staged.flush()?;
    info!("Importing uploaded workbook {} ({} bytes)", filename, bytes.len());

    let db_path = config.db_path.clone();
    tokio::task::spawn_blocking(move || {
        let mut conn = store::open(&db_path)?;
        import_workbook(&mut conn, staged.path())
    })
    .await?
}
