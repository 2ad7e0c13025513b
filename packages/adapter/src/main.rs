//! `plm-oslc-adapter`: OSLC adapter over a PLM OData source.
//!
//! # Quick start
//!
//! ```sh
//! # Against a local PLM server on the default port:
//! plm-oslc-adapter
//!
//! # Custom source and public address:
//! SOURCE_BASE_API_URI=https://plm.example.com/InnovatorServer \
//! ADAPTER_PUBLIC_BASE=https://oslc.example.com plm-oslc-adapter
//! ```
//!
//! # Environment variables
//!
//! See [`plm_oslc_adapter::AdapterConfig`] for the full list.

use std::sync::Arc;

use plm_oslc_adapter::{build_router, AdapterConfig, HttpSource, Source};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "plm_oslc_adapter=info,tower_http=debug".into()
            }),
        )
        .init();

    let config = AdapterConfig::from_env().unwrap_or_else(|e| panic!("invalid configuration: {e}"));

    let source = HttpSource::new(&config.source_base_api_uri, config.source_timeout)
        .unwrap_or_else(|e| panic!("failed to set up the source client: {e}"));
    tracing::info!(
        "source: OData at {} (timeout = {}s)",
        source.odata_root(),
        config.source_timeout.as_secs()
    );
    let source: Arc<dyn Source> = Arc::new(source);

    let app = build_router(source, config.clone());

    tracing::info!(
        "listening on {}, serving {}",
        config.bind_addr,
        config.service_urls().service_provider()
    );
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {e}", config.bind_addr));

    axum::serve(listener, app)
        .await
        .unwrap_or_else(|e| panic!("server error: {e}"));
}
