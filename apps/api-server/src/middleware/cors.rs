//! CORS policy for browser front ends.

use actix_cors::Cors;

/// Build the CORS middleware from the configured origin list. `*` allows any origin.
pub fn cors_policy(allowed_origins: &[String]) -> Cors {
    let mut cors = Cors::default();
    for origin in allowed_origins {
        if origin == "*" {
            cors = cors.allow_any_origin();
        } else {
            cors = cors.allowed_origin(origin);
        }
    }

    cors.allow_any_method().allow_any_header().max_age(3600)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::{Method, header};
    use actix_web::{App, HttpResponse, test, web};

    async fn preflight(origins: &[&str], origin: &str) -> Option<String> {
        let origins: Vec<String> = origins.iter().map(|o| o.to_string()).collect();
        let app = test::init_service(
            App::new()
                .wrap(cors_policy(&origins))
                .route("/posts", web::get().to(HttpResponse::Ok)),
        )
        .await;

        let req = test::TestRequest::default()
            .method(Method::OPTIONS)
            .uri("/posts")
            .insert_header((header::ORIGIN, origin))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "GET"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        resp.headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok())
            .map(String::from)
    }

    #[actix_web::test]
    async fn test_listed_origin_is_allowed() {
        let allowed = preflight(&["http://localhost:5173"], "http://localhost:5173").await;
        assert_eq!(allowed.as_deref(), Some("http://localhost:5173"));
    }

    #[actix_web::test]
    async fn test_unlisted_origin_is_refused() {
        let allowed = preflight(&["http://localhost:5173"], "http://evil.example").await;
        assert!(allowed.is_none());
    }

    #[actix_web::test]
    async fn test_wildcard_allows_any_origin() {
        let allowed = preflight(&["*"], "http://anything.example").await;
        assert!(allowed.is_some());
    }
}
