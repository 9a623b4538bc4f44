use crate::session_controller::state::{session_for_request, SessionsState};
use actix_web::{web, HttpRequest, HttpResponse, Responder, ResponseError};

pub(crate) async fn process(req: HttpRequest, state: web::Data<SessionsState>) -> impl Responder {
    match session_for_request(&req, &state).await {
        Ok(session) => HttpResponse::Ok().json(session.info()),
        Err(e) => e.error_response(),
    }
}
