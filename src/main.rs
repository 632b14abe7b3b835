//! Main entry point for the backend server.
//!
//! Reads configuration, builds the grid store over the configured JSON file,
//! and launches the HTTP server with the maze endpoints.

use actix_web::middleware::{DefaultHeaders, Logger};
use actix_web::{App, HttpServer, web};
use log::{info, warn};

use maze_grids::config::AppConfig;
use maze_grids::server::router;
use maze_grids::store::{FileSource, GridStore};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger from environment variable (default to info level).
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env();
    let store = web::Data::new(GridStore::with_policy(
        FileSource::new(&config.grids_path),
        config.reload,
    ));

    // The document is re-read per request, so a bad file at startup is not fatal.
    match store.get_all().await {
        Ok(document) => info!(
            "[MazeApi] {} difficulties / {} grids available from {}",
            document.grids.len(),
            document.grid_count(),
            store.source().path().display()
        ),
        Err(e) => warn!("[MazeApi] Grid document not loadable yet: {}", e),
    }

    info!(
        "[MazeApi] Listening on {}:{} (reload: {})",
        config.host,
        config.port,
        store.policy()
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(
                DefaultHeaders::new()
                    .add(("Access-Control-Allow-Origin", "*"))
                    .add(("Access-Control-Allow-Headers", "*")),
            )
            .app_data(store.clone())
            .configure(router::config::<FileSource>)
    })
    .client_request_timeout(config.request_timeout)
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
