//! Assembles the Axum [`Router`] from all handler modules.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::{
    config::AdapterConfig,
    handlers::{config, oslc, AppState},
    source::Source,
};

/// Build the complete application router with shared state.
pub fn build_router(source: Arc<dyn Source>, config: AdapterConfig) -> Router {
    let state = AppState {
        source,
        urls: config.service_urls(),
        config,
    };

    Router::new()
        // OSLC Core
        .route("/api/oslc", get(oslc::service_provider))
        .route("/api/oslc/{item_type}", get(oslc::query_capability))
        .route("/api/oslc/{item_type}/resourceShape", get(oslc::resource_shape))
        .route("/api/oslc/{item_type}/{config_id}", get(oslc::item))
        // Configuration Management
        .route("/api/oslc/config/{item_type}/components", get(config::components))
        .route(
            "/api/oslc/config/{item_type}/component/{config_id}",
            get(config::component),
        )
        .route(
            "/api/oslc/config/{item_type}/component/{config_id}/configurations",
            get(config::configurations),
        )
        .route(
            "/api/oslc/config/{item_type}/component/{config_id}/stream/{stream_id}",
            get(config::stream),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
