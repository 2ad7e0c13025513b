//! OSLC Core endpoints: service provider, query capabilities, items and
//! resource shapes.

use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    response::Response,
};

use plm_oslc::{ItemTypeName, CONFIG_CONTEXT_PARAM};

use crate::{error::AppError, middleware::credential::RequireCredential};

use super::{paging_params, respond, AppState};

/// Request header carrying a configuration context.
pub const CONFIG_CONTEXT_HEADER: &str = "configuration-context";

/// `GET /api/oslc`
pub async fn service_provider(
    State(state): State<AppState>,
    RequireCredential(credential): RequireCredential,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let graph = state.session(&credential).service_provider().await?;
    respond(graph, &headers)
}

/// `GET /api/oslc/{item_type}`
pub async fn query_capability(
    State(state): State<AppState>,
    Path(item_type): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    RequireCredential(credential): RequireCredential,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let item_type = ItemTypeName::from_url_segment(&item_type);
    let paging = paging_params(&query)?;
    let graph = state
        .session(&credential)
        .query_capability(&item_type, paging)
        .await?;
    respond(graph, &headers)
}

/// `GET /api/oslc/{item_type}/resourceShape`
pub async fn resource_shape(
    State(state): State<AppState>,
    Path(item_type): Path<String>,
    RequireCredential(credential): RequireCredential,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let item_type = ItemTypeName::from_url_segment(&item_type);
    let graph = state.session(&credential).resource_shape(&item_type).await?;
    respond(graph, &headers)
}

/// `GET /api/oslc/{item_type}/{config_id}`
///
/// The configuration context comes from the `oslc_config.context` query
/// parameter, else the `Configuration-Context` header. Blank values count
/// as absent.
pub async fn item(
    State(state): State<AppState>,
    Path((item_type, config_id)): Path<(String, String)>,
    Query(query): Query<HashMap<String, String>>,
    RequireCredential(credential): RequireCredential,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let item_type = ItemTypeName::from_url_segment(&item_type);
    let context = query
        .get(CONFIG_CONTEXT_PARAM)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .or_else(|| {
            headers
                .get(CONFIG_CONTEXT_HEADER)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
        });
    let graph = state
        .session(&credential)
        .item(&item_type, &config_id, context)
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

    use crate::error::ErrorResponse;
    use crate::handlers::test_support::build_app;
    use crate::source::memory::MemorySource;

    fn source() -> MemorySource {
        MemorySource::new()
            .with_token("tok")
            .with_item_type("Part Document", true)
            .with_property("Part Document", "id", "string", true)
            .with_property("Part Document", "title", "string", false)
            .with_item(
                "Part Document",
                json!({"id": "D1", "config_id": {"id": "DC1"}, "keyed_name": "Doc", "title": "Spec sheet", "generation": "1"}),
            )
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .header("authorization", "Bearer tok")
            .body(Body::empty())
            .unwrap()
    }

    async fn body_bytes(resp: axum::response::Response) -> bytes::Bytes {
        resp.into_body().collect().await.unwrap().to_bytes()
    }

    #[tokio::test]
    async fn missing_credential_returns_401() {
        let app = build_app(source());
        let req = Request::builder().uri("/api/oslc").body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: ErrorResponse = serde_json::from_slice(&body_bytes(resp).await).unwrap();
        assert_eq!(body.code, "unauthorized");
    }

    #[tokio::test]
    async fn rejected_token_returns_401() {
        let app = build_app(source());
        let req = Request::builder()
            .uri("/api/oslc")
            .header("x-plm-access-token", "wrong")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn service_provider_defaults_to_json_ld() {
        let app = build_app(source());
        let resp = app.oneshot(get("/api/oslc")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let ct = resp.headers().get("content-type").unwrap().to_str().unwrap();
        assert_eq!(ct, "application/ld+json");
        let doc: Value = serde_json::from_slice(&body_bytes(resp).await).unwrap();
        assert!(doc["@graph"].is_array());
    }

    #[tokio::test]
    async fn turtle_is_negotiated() {
        let app = build_app(source());
        let mut req = get("/api/oslc/Part.Document/resourceShape");
        req.headers_mut().insert("accept", "text/turtle".parse().unwrap());
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers().get("content-type").unwrap(), "text/turtle");
        let text = String::from_utf8(body_bytes(resp).await.to_vec()).unwrap();
        assert!(text.contains("ResourceShape"));
    }

    #[tokio::test]
    async fn percent_encoded_type_names_resolve() {
        let app = build_app(source());
        let resp = app.oneshot(get("/api/oslc/Part%20Document/DC1")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unknown_type_returns_404() {
        let app = build_app(source());
        let resp = app.oneshot(get("/api/oslc/UnknownType")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: ErrorResponse = serde_json::from_slice(&body_bytes(resp).await).unwrap();
        assert_eq!(body.code, "not_found");
    }

    #[tokio::test]
    async fn empty_listing_returns_204() {
        let src = MemorySource::new()
            .with_item_type("Part", false)
            .with_property("Part", "id", "string", true);
        let resp = build_app(src).oneshot(get("/api/oslc/Part")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert!(body_bytes(resp).await.is_empty());
    }

    #[tokio::test]
    async fn context_query_parameter_beats_header() {
        let app = build_app(source());
        let mut req = get(
            "/api/oslc/Part.Document/DC1?oslc_config.context=\
             http%3A%2F%2Flocalhost%2Fapi%2Foslc%2Fconfig%2FPart.Document%2Fcomponent%2FDC1%2Fstream%2FD1",
        );
        req.headers_mut()
            .insert("configuration-context", "http://x/stream/NOPE".parse().unwrap());
        let resp = app.clone().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let mut req = get("/api/oslc/Part.Document/DC1");
        req.headers_mut()
            .insert("configuration-context", "http://x/stream/NOPE".parse().unwrap());
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn invalid_paging_returns_400() {
        let app = build_app(source());
        let resp = app
            .oneshot(get("/api/oslc/Part.Document?oslc.pageSize=lots"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
