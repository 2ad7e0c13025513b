//! HTTP request handlers for the OSLC endpoints.
//!
//! Each handler builds a [`Session`] for the caller's credential, runs one
//! engine operation and renders the resulting graph in the negotiated
//! format. An empty graph is answered with `204 No Content`.

pub mod config;
pub mod oslc;

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    http::{
        header::{ACCEPT, CONTENT_TYPE},
        HeaderMap, StatusCode,
    },
    response::{IntoResponse, Response},
};

use plm_oslc::{render, PagingParams, RdfFormat, ResourceGraph, ServiceUrls};

use crate::{config::AdapterConfig, engine::Session, error::AppError, source::Credential, source::Source};

/// Shared application state threaded through all Axum handlers via [`axum::extract::State`].
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn Source>,
    pub config: AdapterConfig,
    pub urls: ServiceUrls,
}

impl AppState {
    pub fn session<'a>(&'a self, credential: &'a Credential) -> Session<'a> {
        Session::new(self.source.as_ref(), credential, &self.urls)
    }
}

/// Render `graph` for the request's `Accept` header.
pub fn respond(graph: ResourceGraph, headers: &HeaderMap) -> Result<Response, AppError> {
    if graph.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }
    let format = RdfFormat::from_accept(headers.get(ACCEPT).and_then(|v| v.to_str().ok()));
    let body = render(&graph, format)?;
    Ok(([(CONTENT_TYPE, format.media_type())], body).into_response())
}

// ---------------------------------------------------------------------------
// Paging parameters
// ---------------------------------------------------------------------------

/// `oslc.paging`, `oslc.pageSize` and `oslc.pageNo`. The HTML-escaped
/// spellings (`amp;oslc.pageSize`) some clients send are accepted too.
pub fn paging_params(query: &HashMap<String, String>) -> Result<PagingParams, AppError> {
    let paging = match param(query, "oslc.paging") {
        Some(v) => parse_flag(v)
            .ok_or_else(|| AppError::BadRequest(format!("oslc.paging must be a boolean, got {v:?}")))?,
        None => false,
    };
    Ok(PagingParams {
        paging,
        page_size: number(query, "oslc.pageSize")?,
        page_no: number(query, "oslc.pageNo")?,
    })
}

fn param<'a>(query: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    query
        .get(name)
        .or_else(|| query.get(&format!("amp;{name}")))
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
}

fn number(query: &HashMap<String, String>, name: &str) -> Result<Option<u32>, AppError> {
    param(query, name)
        .map(|v| {
            v.parse::<u32>()
                .map_err(|_| AppError::BadRequest(format!("{name} must be a non-negative integer, got {v:?}")))
        })
        .transpose()
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
