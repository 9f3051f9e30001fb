//! HTTP API: routes, auth extractors, and error responses.

mod auth;
mod error;
pub mod extract;
mod generation;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::auth::AuthService;
use crate::config::AppConfig;
use crate::generation::ContentGenerator;
use crate::service::GenerationService;
use crate::store::MemoryStore;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub generations: GenerationService,
    pub auth: AuthService,
}

impl AppState {
    pub fn new(generations: GenerationService, auth: AuthService) -> Self {
        Self { generations, auth }
    }

    /// Wire configured providers and an in-memory store.
    pub fn from_config(config: &AppConfig) -> Self {
        let store = Arc::new(MemoryStore::new());
        let generator = ContentGenerator::from_config(&config.providers);
        tracing::info!(providers = ?generator.providers().ids(), "content generator ready");

        Self::new(
            GenerationService::new(generator, store.clone()),
            AuthService::from_config(store, &config.auth),
        )
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", generation::routes())
        .nest("/auth", auth::routes())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
