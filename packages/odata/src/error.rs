//! Errors raised while reading source responses.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueryError {
    /// The body was not the JSON shape the query expects.
    #[error("malformed OData response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Decode a response body.
pub fn decode<T: serde::de::DeserializeOwned>(body: &[u8]) -> Result<T, QueryError> {
    Ok(serde_json::from_slice(body)?)
}
