/*
 * Responsibility
 * - Tracing init → Config load → dependency construction → Router assembly
 * - Middleware application (http layers / CORS / security headers / gate)
 * - axum::serve() with graceful shutdown
 */
use std::{panic, sync::Arc};

use anyhow::{Context, Result};
use axum::{Router, routing::get};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::{self, petitioner::handlers::health::health};
use crate::config::Config;
use crate::error::AppError;
use crate::middleware;
use crate::repos::{InMemoryUserStore, PgUserStore, UserStore};
use crate::services::auth::{build_token_issuer, build_token_verifier};
use crate::services::seed;
use crate::state::AppState;

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,vakalatnama_server=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // Surface panics through tracing; the HTTP panic boundary answers the
        // request and the process keeps serving.
        tracing::error!(%info, "panic");
        default_hook(info);
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env().context("failed to load configuration")?;
    init_panic_hook();

    tracing::info!(
        "starting petitioner API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config).await?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn build_state(config: &Config) -> Result<AppState> {
    let users: Arc<dyn UserStore> = match &config.database_url {
        Some(url) => {
            let pool = PgPoolOptions::new()
                .max_connections(10)
                .connect(url)
                .await
                .context("failed to connect to DATABASE_URL")?;
            if config.seed_petitioners.is_some() {
                tracing::warn!("SEED_PETITIONERS ignored: DATABASE_URL is set");
            }
            Arc::new(PgUserStore::new(pool))
        }
        None => Arc::new(in_memory_store(config).await?),
    };
    tracing::info!(backend = users.backend_name(), "user store ready");

    Ok(AppState::new(
        build_token_verifier(config),
        build_token_issuer(config),
        users,
    ))
}

async fn in_memory_store(config: &Config) -> Result<InMemoryUserStore> {
    let store = InMemoryUserStore::new();

    let Some(path) = &config.seed_petitioners else {
        tracing::warn!("DATABASE_URL not set; using an empty in-memory petitioner store");
        return Ok(store);
    };

    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read SEED_PETITIONERS file {}", path.display()))?;
    let count = seed::seed_store(&store, &raw)
        .with_context(|| format!("failed to seed petitioners from {}", path.display()))?;
    tracing::info!(count, path = %path.display(), "seeded in-memory petitioner store");

    Ok(store)
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    async fn not_found() -> AppError {
        AppError::NotFound("route")
    }

    let router = Router::new()
        .route("/health", get(health))
        .nest("/petitioner", api::petitioner::routes(state.clone()))
        .fallback(not_found)
        .with_state(state);

    let router = middleware::security_headers::apply(router);
    let router = middleware::cors::apply(router, config);
    middleware::http::apply(router)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        return;
    }
    tracing::info!("shutdown signal received");
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    use super::*;
    use crate::test_support;

    fn app() -> Router {
        build_router(test_support::state(), &test_support::config())
    }

    #[tokio::test]
    async fn health_is_public() {
        let response = app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["x-content-type-options"], "nosniff");
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let response = app()
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    fn config_with_seed(path: &std::path::Path) -> Config {
        let path = path.display().to_string();
        Config::from_lookup(|key| match key {
            "JWT_SECRET" => Some(test_support::TEST_SECRET.to_string()),
            "SEED_PETITIONERS" => Some(path.clone()),
            _ => None,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn development_store_is_seeded_from_file() {
        let path = std::env::temp_dir().join(format!("petitioners-{}.json", uuid::Uuid::new_v4()));
        tokio::fs::write(&path, r#"[{ "username": "dora", "password": "explorer" }]"#)
            .await
            .unwrap();

        let state = build_state(&config_with_seed(&path)).await.unwrap();
        tokio::fs::remove_file(&path).await.unwrap();

        assert_eq!(state.users.backend_name(), "memory");
        let identity = crate::services::credentials::verify_credentials(
            state.users.as_ref(),
            "dora",
            "explorer",
        )
        .await
        .unwrap();
        assert_eq!(identity.username, "dora");
    }

    #[tokio::test]
    async fn unreadable_seed_file_fails_startup() {
        let path = std::env::temp_dir().join(format!("missing-{}.json", uuid::Uuid::new_v4()));
        assert!(build_state(&config_with_seed(&path)).await.is_err());
    }

    #[tokio::test]
    async fn full_stack_gates_dashboard() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/petitioner/dashboard")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let token = test_support::token_for("alice");
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/petitioner/dashboard")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
    }
}
