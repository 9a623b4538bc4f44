use crate::access::credentials::Credentials;
use crate::access::Session;
use crate::config::AppConfig;
use crate::error::Result;
use crate::session_controller::state::SessionsState;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::auth::LoginResponse;
use common::requests::LoginRequest;
use log::{info, warn};

pub(crate) async fn process(
    config: web::Data<AppConfig>,
    state: web::Data<SessionsState>,
    payload: web::Json<LoginRequest>,
) -> impl Responder {
    match login(&config, &state, payload.into_inner()).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => e.error_response(),
    }
}

async fn login(
    config: &AppConfig,
    state: &SessionsState,
    req: LoginRequest,
) -> Result<LoginResponse> {
    let credentials = Credentials::load(&config.users_file)?;
    let role = match credentials.authenticate(&req.username, &req.password) {
        Ok(role) => role,
        Err(e) => {
            warn!("Rejected sign-in for '{}'", req.username);
            return Err(e);
        }
    };

    let session = Session::signed_in(&req.username, role);
    let info = session.info();
    let token = state.open(session).await;
    info!("Signed in as {} ({})", req.username, role);
    Ok(LoginResponse {
        token,
        session: info,
    })
}
