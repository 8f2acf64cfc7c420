//! # Blog Server
//!
//! The main entry point for the Actix-web HTTP server.

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

use blog_server::observability::RequestIdMiddleware;
use blog_server::telemetry::{TelemetryConfig, init_telemetry};
use blog_server::{AppConfig, AppState, configure_routes};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();

    tracing::info!("Starting Blog Server on {}:{}", config.host, config.port);

    let state = AppState::new(&config).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to initialize application state");
        std::io::Error::other(e)
    })?;

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(RequestIdMiddleware)
            .app_data(web::Data::new(state.clone()))
            .configure(configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
