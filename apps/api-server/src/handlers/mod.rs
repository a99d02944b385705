//! HTTP handlers and route configuration.

mod auth;
mod comments;
mod health;
mod notifications;
mod posts;
mod upload;
mod views;


use actix_web::{error, web};

use crate::middleware::error::AppError;

/// Request bodies above this size are rejected.
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(path_config())
        .route("/", web::get().to(health::root))
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/auth")
                .route("/register", web::post().to(auth::register))
                .route("/login", web::post().to(auth::login))
                .route("/me", web::get().to(auth::me)),
        )
        .service(
            web::scope("/posts")
                .route("", web::get().to(posts::list_posts))
                .route("", web::post().to(posts::create_post))
                .route("/{id}", web::get().to(posts::get_post))
                .route("/{id}", web::put().to(posts::update_post))
                .route("/{id}", web::delete().to(posts::delete_post))
                .route("/{id}/comments", web::get().to(comments::list_comments))
                .route("/{id}/comments", web::post().to(comments::create_comment)),
        )
        .service(
            web::scope("/comments")
                .route("/{id}", web::put().to(comments::update_comment))
                .route("/{id}", web::delete().to(comments::delete_comment))
                .route("/{id}/like", web::post().to(comments::toggle_like)),
        )
        .service(
            web::scope("/notifications")
                .route("", web::get().to(notifications::list_notifications))
                .route("/read-all", web::post().to(notifications::mark_all_read))
                .route("/{id}/read", web::post().to(notifications::mark_read)),
        )
        .route("/upload", web::post().to(upload::upload_image))
        .default_service(web::to(health::not_found));
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(MAX_BODY_BYTES)
        .error_handler(|err, _req| {
            let app_err = match err {
                error::JsonPayloadError::Overflow { .. }
                | error::JsonPayloadError::OverflowKnownLength { .. } => {
                    AppError::PayloadTooLarge("Request body is too large".to_string())
                }
                other => AppError::BadRequest(other.to_string()),
            };
            app_err.into()
        })
}

fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|_err, _req| AppError::NotFound("Resource not found".to_string()).into())
}
