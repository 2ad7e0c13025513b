//! Shared helpers for the adapter conformance test suite.
//!
//! Provides [`spawn_adapter`], which binds a `TcpListener` on an ephemeral
//! port and serves an in-process adapter backed by any [`Source`], and
//! [`spawn_router`] for standing up loopback stand-ins for the PLM server.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use plm_oslc_adapter::{build_router, AdapterConfig, Source};

/// Serve `router` on an OS-assigned port on `127.0.0.1`.
///
/// # Panics
///
/// Panics if the TCP listener cannot be bound.
pub async fn spawn_router(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("get local addr");
    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("conformance server error");
    });
    addr
}

/// Start an ephemeral in-process adapter over `source` and return its
/// public base URL, e.g. `http://127.0.0.1:51234`.
///
/// Every URL the adapter produces is rooted at the returned base, so tests
/// can follow links straight back into the adapter.
pub async fn spawn_adapter(source: impl Source) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("get local addr");
    let base_url = format!("http://{addr}");

    let config = AdapterConfig::from_lookup(|name| match name {
        "ADAPTER_BIND" => Some(addr.to_string()),
        "ADAPTER_PUBLIC_BASE" => Some(base_url.clone()),
        _ => None,
    })
    .expect("conformance adapter config");
    let router = build_router(Arc::new(source), config);

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("conformance adapter error");
    });

    base_url
}
