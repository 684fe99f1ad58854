//! CORS for the portal's browser front-end.
//!
//! Development answers any origin. Production answers only the exact origins in
//! `CORS_ALLOWED_ORIGINS`; with an empty list no cross-origin caller is allowed.
//! Credentials are never allowed: the petitioner token rides in `Authorization`.

use std::time::Duration;

use axum::Router;
use axum::http::{HeaderName, HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::Config;

const REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");
const PREFLIGHT_MAX_AGE: Duration = Duration::from_secs(600);

pub fn apply(router: Router, config: &Config) -> Router {
    router.layer(layer(config))
}

fn layer(config: &Config) -> CorsLayer {
    let origins = if config.app_env.is_production() {
        AllowOrigin::list(allowlist(&config.cors_allowed_origins))
    } else {
        AllowOrigin::from(Any)
    };

    CorsLayer::new()
        .allow_origin(origins)
        // the petitioner surface only reads and posts
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT, REQUEST_ID])
        .expose_headers([REQUEST_ID])
        .max_age(PREFLIGHT_MAX_AGE)
}

fn allowlist(origins: &[String]) -> Vec<HeaderValue> {
    origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) if origin != "*" => Some(value),
            _ => {
                tracing::warn!(origin = %origin, "ignoring unusable CORS_ALLOWED_ORIGINS entry");
                None
            }
        })
        .collect()
}
