//! OSLC Configuration Management endpoints under `/api/oslc/config`.

use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    response::Response,
};

use plm_oslc::ItemTypeName;

use crate::{error::AppError, middleware::credential::RequireCredential};

use super::{paging_params, respond, AppState};

/// `GET /api/oslc/config/{item_type}/components`
pub async fn components(
    State(state): State<AppState>,
    Path(item_type): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    RequireCredential(credential): RequireCredential,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let item_type = ItemTypeName::from_url_segment(&item_type);
    let paging = paging_params(&query)?;
    let graph = state.session(&credential).components(&item_type, paging).await?;
    respond(graph, &headers)
}

/// `GET /api/oslc/config/{item_type}/component/{config_id}`
pub async fn component(
    State(state): State<AppState>,
    Path((item_type, config_id)): Path<(String, String)>,
    RequireCredential(credential): RequireCredential,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let item_type = ItemTypeName::from_url_segment(&item_type);
    let graph = state.session(&credential).component(&item_type, &config_id).await?;
    respond(graph, &headers)
}

/// `GET /api/oslc/config/{item_type}/component/{config_id}/configurations`
pub async fn configurations(
    State(state): State<AppState>,
    Path((item_type, config_id)): Path<(String, String)>,
    RequireCredential(credential): RequireCredential,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let item_type = ItemTypeName::from_url_segment(&item_type);
    let graph = state
        .session(&credential)
        .configurations(&item_type, &config_id)
        .await?;
    respond(graph, &headers)
}

/// `GET /api/oslc/config/{item_type}/component/{config_id}/stream/{stream_id}`
pub async fn stream(
    State(state): State<AppState>,
    Path((item_type, config_id, stream_id)): Path<(String, String, String)>,
    RequireCredential(credential): RequireCredential,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let item_type = ItemTypeName::from_url_segment(&item_type);
    let graph = state
        .session(&credential)
        .stream(&item_type, &config_id, &stream_id)
        .await?;
    respond(graph, &headers)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::handlers::test_support::build_app;
    use crate::source::memory::MemorySource;

    fn source() -> MemorySource {
        MemorySource::new()
            .with_item_type("Part", true)
            .with_property("Part", "id", "string", true)
            .with_item("Part", json!({"id": "X0", "config_id": {"id": "C1"}, "generation": "0", "keyed_name": "draft"}))
            .with_item("Part", json!({"id": "X1", "config_id": {"id": "C1"}, "generation": "1", "keyed_name": "P-100"}))
            .with_item("Part", json!({"id": "Z0", "config_id": {"id": "C3"}, "generation": "0", "keyed_name": "draft"}))
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .header("authorization", "Bearer tok")
            .header("accept", "application/json")
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn components_listing() {
        let resp = build_app(source())
            .oneshot(get("/api/oslc/config/Part/components"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        let doc: Value = serde_json::from_slice(&bytes).unwrap();
        let text = doc.to_string();
        assert!(text.contains("http://localhost/api/oslc/config/Part/component/C1"));
        assert!(text.contains("http://localhost/api/oslc/config/Part/component/C3"));
    }

    #[tokio::test]
    async fn component_and_stream() {
        let app = build_app(source());
        let resp = app
            .clone()
            .oneshot(get("/api/oslc/config/Part/component/C1"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = app
            .clone()
            .oneshot(get("/api/oslc/config/Part/component/C1/stream/X1"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        // Generation zero is not a stream.
        let resp = app
            .oneshot(get("/api/oslc/config/Part/component/C1/stream/X0"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn component_without_streams_has_no_configurations() {
        let resp = build_app(source())
            .oneshot(get("/api/oslc/config/Part/component/C3/configurations"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn unknown_component_returns_404() {
        let resp = build_app(source())
            .oneshot(get("/api/oslc/config/Part/component/C404/configurations"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
