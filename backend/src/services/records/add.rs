use crate::access::authorize;
use crate::attachments::{created_at_stamp, save_attachment};
use crate::config::AppConfig;
use crate::error::{CmsError, Result};
use crate::services::read_field;
use crate::session_controller::state::{session_for_request, SessionsState};
use crate::store;
use crate::store::records::insert_record;
use actix_multipart::Multipart;
use actix_web::{web, HttpRequest, HttpResponse, Responder, ResponseError};
use chrono::Utc;
use common::model::auth::Action;
use common::model::record::NewRecord;
use futures_util::StreamExt;
use log::{error, info, warn};
use serde_json::json;

const ATTACHMENT_FIELD: &str = "attachment";

pub(crate) async fn process(
    req: HttpRequest,
    config: web::Data<AppConfig>,
    state: web::Data<SessionsState>,
    payload: Multipart,
) -> impl Responder {
    match add_record(&req, &config, &state, payload).await {
        Ok(id) => HttpResponse::Ok().json(json!({ "id": id })),
        Err(e) => {
            error!("Adding record failed: {}", e);
            e.error_response()
        }
    }
}

async fn add_record(
    req: &HttpRequest,
    config: &AppConfig,
    state: &SessionsState,
    mut payload: Multipart,
) -> Result<i64> {
    let session = session_for_request(req, state).await?;
    authorize(&session, Action::Add)?;

    let mut record = NewRecord::default();
    let mut attachment: Option<(String, Vec<u8>)> = None;

    while let Some(item) = payload.next().await {
        let mut field = item?;
        let Some(name) = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()))
        else {
            continue;
        };
        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename().map(|f| f.to_string()));
        let bytes = read_field(&mut field, config.max_upload_bytes()).await?;

        if name == ATTACHMENT_FIELD {
            // Browsers send an empty part when no file was picked.
            if let Some(filename) = filename.filter(|f| !f.is_empty()) {
                attachment = Some((filename, bytes));
            }
            continue;
        }
        let value = String::from_utf8(bytes)
            .map_err(|_| CmsError::InvalidInput(format!("field '{}' is not valid UTF-8", name)))?;
        if !record.set_field(&name, value) {
            warn!("Ignoring unknown form field '{}'", name);
        }
    }

    record.attachment_path = match attachment {
        Some((filename, bytes)) => {
            let path = save_attachment(&config.uploads_dir, &filename, &bytes)?;
            Some(path.to_string_lossy().into_owned())
        }
        None => Some(String::new()),
    };
    record.created_by = Some(session.user.clone().unwrap_or_default());
    record.created_at = Some(created_at_stamp(Utc::now()));

    let conn = store::open(&config.db_path)?;
    let id = insert_record(&conn, &record)?;
    info!(
        "Record {} added to '{}' by {}",
        id,
        record.category.as_deref().unwrap_or(""),
        session.user.as_deref().unwrap_or("anonymous")
    );
    Ok(id)
}
