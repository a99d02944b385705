//! # Blogify API Server
//!
//! The main entry point for the Actix-web HTTP server.

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

mod config;
mod handlers;
mod middleware;
mod state;
mod telemetry;

use config::AppConfig;
use state::{AppState, Repositories};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    telemetry::init_telemetry(&config.telemetry);

    if config.jwt.uses_default_secret() {
        if config.is_production() {
            tracing::error!("JWT_SECRET must be set in production");
            return Err(std::io::Error::other("JWT_SECRET is not set"));
        }
        tracing::warn!("JWT_SECRET not set; using the development default");
    }

    tracing::info!(
        "Starting Blogify API Server on {}:{} ({})",
        config.host,
        config.port,
        config.environment
    );

    #[cfg(feature = "postgres")]
    let db = match &config.database {
        Some(db_config) => {
            let connections = blogify_infra::DatabaseConnections::init(db_config)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to connect to database: {}", e);
                    std::io::Error::other(e)
                })?;
            Some(connections)
        }
        None => {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            None
        }
    };

    #[cfg(feature = "postgres")]
    let repos = db
        .as_ref()
        .map(Repositories::postgres)
        .unwrap_or_else(Repositories::in_memory);

    #[cfg(not(feature = "postgres"))]
    let repos = {
        tracing::info!("Running without postgres feature - using in-memory repositories");
        Repositories::in_memory()
    };

    let state = AppState::build(&config, repos);
    let origins = config.cors_allowed_origins.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::cors::cors_policy(&origins))
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    tracing::info!("Server stopped");

    #[cfg(feature = "postgres")]
    close_database(db).await;

    Ok(())
}

#[cfg(feature = "postgres")]
async fn close_database(db: Option<blogify_infra::DatabaseConnections>) {
    if let Some(connections) = db {
        if let Err(e) = connections.close().await {
            tracing::warn!("Error closing database connections: {}", e);
        }
    }
}
