mod access;
mod attachments;
mod config;
mod error;
mod import;
mod reference;
mod report;
mod services;
mod session_controller;
mod store;

use crate::config::AppConfig;
use crate::session_controller::state::SessionsState;
use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::{error, info, warn};
use std::thread;
use std::time::Duration;

fn startup_error(e: impl std::fmt::Display) -> std::io::Error {
    error!("{}", e);
    std::io::Error::other(e.to_string())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    // `backend hash-password <password>` prints a line for the credentials file.
    let args: Vec<String> = std::env::args().collect();
    if let [_, command, password] = args.as_slice() {
        if command == "hash-password" {
            println!("{}", access::password::hash_password(password));
            return Ok(());
        }
    }

    let config = AppConfig::load().map_err(startup_error)?;
    store::open(&config.db_path).map_err(startup_error)?;
    std::fs::create_dir_all(&config.uploads_dir)?;

    if !config.template_workbook.exists() {
        warn!(
            "Template workbook {} not found; imports from it are disabled",
            config.template_workbook.display()
        );
    }

    let url = config.bind_url();
    if config.open_browser {
        let url_clone = url.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(500));
            let _ = webbrowser::open(&url_clone);
        });
    }

    let sessions = web::Data::new(SessionsState::default());
    let app_config = web::Data::new(config.clone());

    info!("Server running at {}", url);
    info!("Database: {}", config.db_path.display());

    let json_limit = config.max_upload_bytes();
    let uploads_dir = config.uploads_dir.clone();
    HttpServer::new(move || {
        App::new()
            .app_data(web::JsonConfig::default().limit(json_limit))
            .app_data(app_config.clone())
            .app_data(sessions.clone())
            .configure(services::register)
            .service(actix_files::Files::new("/uploads", uploads_dir.clone()))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
