//! Access to the PLM item source.
//!
//! The [`Source`] trait is the contract between the engine and the source.
//! Each method is one logical, read-only query; the engine decides what to
//! ask and in which order. Every call carries the caller's [`Credential`]:
//! the adapter holds no credential of its own.
//!
//! # Implementations
//!
//! | Type | When to use |
//! |------|-------------|
//! | [`HttpSource`] | Production; queries the OData endpoint over HTTP |
//! | [`MemorySource`] | Tests and the conformance suite |
//!
//! [`HttpSource`]: http::HttpSource
//! [`MemorySource`]: memory::MemorySource

pub mod http;
pub mod memory;

use std::fmt;

use async_trait::async_trait;
use plm_oslc::{ItemTypeName, Page};
use plm_oslc_odata::{ItemRow, ItemSelector, ItemTypeRow, PropertyRow, RelationshipRow};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Credential
// ---------------------------------------------------------------------------

/// The caller's access token, forwarded to the source as a bearer token.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn bearer(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn token(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

// ---------------------------------------------------------------------------
// SourceError
// ---------------------------------------------------------------------------

/// Failures talking to the source. None of them are retried.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The source could not be reached, or did not answer in time.
    #[error("source unavailable: {0}")]
    Unavailable(String),

    /// The source answered with a non-success status.
    #[error("source rejected the request with status {status}: {body}")]
    Rejected { status: u16, body: String },

    /// The source answered 2xx with a body we could not read.
    #[error("malformed source response: {0}")]
    Malformed(String),
}

impl From<plm_oslc_odata::QueryError> for SourceError {
    fn from(e: plm_oslc_odata::QueryError) -> Self {
        SourceError::Malformed(e.to_string())
    }
}

// ---------------------------------------------------------------------------
// Source trait
// ---------------------------------------------------------------------------

/// Read-only query surface of the item source.
///
/// Keyed lookups return `Ok(None)` when the source has no such entity.
/// Implementations must be `Send + Sync + 'static` so they can be held in an
/// `Arc<dyn Source>`.
#[async_trait]
pub trait Source: Send + Sync + 'static {
    /// Every item type the source knows.
    async fn list_item_types(&self, credential: &Credential) -> Result<Vec<ItemTypeRow>, SourceError>;

    /// One item type, with its versionability flag.
    async fn get_item_type(
        &self,
        credential: &Credential,
        item_type: &ItemTypeName,
    ) -> Result<Option<ItemTypeRow>, SourceError>;

    async fn list_properties(
        &self,
        credential: &Credential,
        item_type: &ItemTypeName,
    ) -> Result<Vec<PropertyRow>, SourceError>;

    async fn list_relationships(
        &self,
        credential: &Credential,
        item_type: &ItemTypeName,
    ) -> Result<Vec<RelationshipRow>, SourceError>;

    /// The current item of each configuration of a type, optionally
    /// limited to a page. Collection queries on the OData endpoint only
    /// return current generations.
    async fn list_items(
        &self,
        credential: &Credential,
        item_type: &ItemTypeName,
        page: Option<Page>,
    ) -> Result<Vec<ItemRow>, SourceError>;

    /// One item with `expansions` expanded inline.
    ///
    /// The raw body is returned: a bare entity for [`ItemSelector::ById`],
    /// a `{"value": [..]}` collection holding the configuration's current
    /// item for [`ItemSelector::ByConfigId`].
    async fn get_expanded_item(
        &self,
        credential: &Credential,
        item_type: &ItemTypeName,
        selector: &ItemSelector,
        expansions: &[&str],
    ) -> Result<Option<Value>, SourceError>;

    /// Items of `relationship` whose source item is `item_id`.
    async fn list_related(
        &self,
        credential: &Credential,
        relationship: &ItemTypeName,
        item_id: &str,
    ) -> Result<Vec<ItemRow>, SourceError>;

    /// Generations of a configuration with generation number above zero.
    async fn list_generations(
        &self,
        credential: &Credential,
        item_type: &ItemTypeName,
        config_id: &str,
    ) -> Result<Vec<ItemRow>, SourceError>;

    /// One item by id, with its config id.
    async fn get_item(
        &self,
        credential: &Credential,
        item_type: &ItemTypeName,
        item_id: &str,
    ) -> Result<Option<ItemRow>, SourceError>;

    /// Every item sharing a config id.
    async fn find_by_config_id(
        &self,
        credential: &Credential,
        item_type: &ItemTypeName,
        config_id: &str,
    ) -> Result<Vec<ItemRow>, SourceError>;
}
