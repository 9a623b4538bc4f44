//! Lookup lists for the data-entry form.
//!
//! - `GET /api/reference/countries`: Country names from the countries file, or
//!   a short built-in list when the file is missing or unreadable.
//! - `GET /api/reference/categories`: Template sheet names, or `["General"]`.

use crate::config::AppConfig;
use crate::reference::{form_categories, load_countries};
use actix_web::web::{get, scope};
use actix_web::{web, HttpResponse, Responder, Scope};

const API_PATH: &str = "/api/reference";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/countries", get().to(countries))
        .route("/categories", get().to(categories))
}

async fn countries(config: web::Data<AppConfig>) -> impl Responder {
    HttpResponse::Ok().json(load_countries(&config.countries_csv))
}

async fn categories(config: web::Data<AppConfig>) -> impl Responder {
    HttpResponse::Ok().json(form_categories(&config.template_workbook))
}
