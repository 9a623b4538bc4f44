use crate::error::{CmsError, Result};
use crate::session_controller::state::{bearer_token, SessionsState};
use actix_web::{web, HttpRequest, HttpResponse, Responder, ResponseError};
use log::info;

pub(crate) async fn process(req: HttpRequest, state: web::Data<SessionsState>) -> impl Responder {
    match logout(&req, &state).await {
        Ok(()) => HttpResponse::Ok().body("Signed out"),
        Err(e) => e.error_response(),
    }
}

/// Without a token there is nothing to sign out of.
async fn logout(req: &HttpRequest, state: &SessionsState) -> Result<()> {
    let Some(token) = bearer_token(req) else {
        return Ok(());
    };
    let session = state.close(&token).await.ok_or(CmsError::UnknownSession)?;
    info!(
        "Signed out {}",
        session.user.as_deref().unwrap_or("anonymous")
    );
    Ok(())
}
