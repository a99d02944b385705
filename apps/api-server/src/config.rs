//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;

use blogify_infra::{CloudinaryConfig, DatabaseConfig, JwtConfig, NotificationQueueConfig};

use crate::telemetry::TelemetryConfig;

const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Reported by `/health`; `production` refuses the built-in JWT secret.
    pub environment: String,
    /// `None` runs the server on in-memory repositories.
    pub database: Option<DatabaseConfig>,
    pub jwt: JwtConfig,
    pub cors_allowed_origins: Vec<String>,
    pub cloudinary: Option<CloudinaryConfig>,
    pub upload_requires_auth: bool,
    pub notifications: NotificationQueueConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let database = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .map(|url| {
                let mut config = DatabaseConfig::new(url);
                config.max_connections = parsed(&lookup, "DB_MAX_CONNECTIONS").unwrap_or(20);
                config.min_connections = parsed(&lookup, "DB_MIN_CONNECTIONS").unwrap_or(2);
                config
            });

        let jwt_defaults = JwtConfig::default();
        let jwt = JwtConfig {
            secret: lookup("JWT_SECRET")
                .filter(|s| !s.is_empty())
                .unwrap_or(jwt_defaults.secret),
            expiration_hours: parsed(&lookup, "JWT_EXPIRATION_HOURS")
                .unwrap_or(jwt_defaults.expiration_hours),
            issuer: lookup("JWT_ISSUER").unwrap_or(jwt_defaults.issuer),
        };

        let cloudinary = match (
            lookup("CLOUDINARY_CLOUD_NAME"),
            lookup("CLOUDINARY_API_KEY"),
            lookup("CLOUDINARY_API_SECRET"),
        ) {
            (Some(cloud), Some(key), Some(secret)) => {
                let mut config = CloudinaryConfig::new(cloud, key, secret);
                if let Some(folder) = lookup("CLOUDINARY_FOLDER") {
                    config.folder = folder;
                }
                Some(config)
            }
            _ => None,
        };

        let queue_defaults = NotificationQueueConfig::default();
        let notifications = NotificationQueueConfig {
            capacity: parsed(&lookup, "NOTIFICATION_QUEUE_SIZE")
                .unwrap_or(queue_defaults.capacity),
            max_attempts: parsed(&lookup, "NOTIFICATION_MAX_ATTEMPTS")
                .unwrap_or(queue_defaults.max_attempts),
            ..queue_defaults
        };

        Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parsed(&lookup, "PORT").unwrap_or(5000),
            environment: lookup("APP_ENV").unwrap_or_else(|| "development".to_string()),
            database,
            jwt,
            cors_allowed_origins: split_origins(
                &lookup("CORS_ALLOWED_ORIGINS").unwrap_or_else(|| DEFAULT_CORS_ORIGINS.to_string()),
            ),
            cloudinary,
            upload_requires_auth: lookup("UPLOAD_REQUIRE_AUTH")
                .and_then(|v| parse_flag(&v))
                .unwrap_or(false),
            notifications,
            telemetry: TelemetryConfig {
                json_logs: lookup("LOG_FORMAT").is_some_and(|v| v.eq_ignore_ascii_case("json")),
                ..TelemetryConfig::default()
            },
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 5000);
        assert_eq!(config.environment, "development");
        assert!(config.database.is_none());
        assert!(config.cloudinary.is_none());
        assert!(!config.upload_requires_auth);
        assert!(config.jwt.uses_default_secret());
        assert_eq!(config.jwt.expiration_hours, 24);
        assert_eq!(
            config.cors_allowed_origins,
            vec!["http://localhost:3000", "http://localhost:5173"]
        );
        assert_eq!(config.notifications.capacity, 1000);
        assert_eq!(config.notifications.max_attempts, 3);
        assert!(!config.telemetry.json_logs);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "8081"),
            ("APP_ENV", "production"),
            ("DATABASE_URL", "postgres://blog@localhost/blog"),
            ("DB_MAX_CONNECTIONS", "5"),
            ("JWT_SECRET", "s3cret"),
            ("JWT_EXPIRATION_HOURS", "2"),
            ("CORS_ALLOWED_ORIGINS", " https://blog.example , *"),
            ("UPLOAD_REQUIRE_AUTH", "TRUE"),
            ("NOTIFICATION_QUEUE_SIZE", "16"),
            ("LOG_FORMAT", "json"),
        ]);

        assert_eq!(config.port, 8081);
        assert!(config.is_production());
        let database = config.database.unwrap();
        assert_eq!(database.max_connections, 5);
        assert_eq!(database.min_connections, 2);
        assert_eq!(config.jwt.secret, "s3cret");
        assert_eq!(config.jwt.expiration_hours, 2);
        assert_eq!(config.cors_allowed_origins, vec!["https://blog.example", "*"]);
        assert!(config.upload_requires_auth);
        assert_eq!(config.notifications.capacity, 16);
        assert!(config.telemetry.json_logs);
    }

    #[test]
    fn test_cloudinary_needs_all_credentials() {
        let partial = config_from(&[("CLOUDINARY_CLOUD_NAME", "demo")]);
        assert!(partial.cloudinary.is_none());

        let full = config_from(&[
            ("CLOUDINARY_CLOUD_NAME", "demo"),
            ("CLOUDINARY_API_KEY", "key"),
            ("CLOUDINARY_API_SECRET", "secret"),
            ("CLOUDINARY_FOLDER", "covers"),
        ]);
        let cloudinary = full.cloudinary.unwrap();
        assert_eq!(cloudinary.cloud_name, "demo");
        assert_eq!(cloudinary.folder, "covers");
    }

    #[test]
    fn test_unparsable_numbers_fall_back() {
        let config = config_from(&[("PORT", "eighty"), ("UPLOAD_REQUIRE_AUTH", "maybe")]);

        assert_eq!(config.port, 5000);
        assert!(!config.upload_requires_auth);
    }
}
