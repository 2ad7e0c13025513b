//! Per-request translation engine.
//!
//! A [`Session`] bundles what one request needs: the source, the caller's
//! credential and the URL scheme. It is created by the handler, used for a
//! single operation, and dropped with the response; nothing it builds
//! outlives the request.
//!
//! | Module | Operations |
//! |--------|------------|
//! | [`discovery`] | `discover`, `shape`, `resource_shape`, `require_item_type` |
//! | [`validation`] | `validate_item_id`, `validate_config_id` |
//! | [`materialize`] | `item` |
//! | [`configuration`] | `components`, `component`, `configurations`, `stream` |
//! | [`query`] | `service_provider`, `query_capability` |
//!
//! Source calls are issued one after another; a failing call aborts the
//! operation and no partial graph is returned.

pub mod configuration;
pub mod discovery;
pub mod materialize;
pub mod query;
pub mod validation;

use plm_oslc::{GraphError, ItemTypeName, ServiceUrls};

use crate::source::{Credential, Source, SourceError};

// ---------------------------------------------------------------------------
// EngineError
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The item type is unknown, or the source listed no properties for it.
    #[error("item type not found: {0}")]
    SchemaNotFound(ItemTypeName),

    #[error("{item_type} item not found: {id}")]
    ItemNotFound { item_type: ItemTypeName, id: String },

    /// The configuration context resolves to a different component.
    #[error("configuration context resolves to config id {resolved}, not {requested}")]
    ConfigMismatch { requested: String, resolved: String },

    #[error("stream {stream_id} not found in component {config_id}")]
    StreamNotFound { config_id: String, stream_id: String },

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

impl EngineError {
    fn item_not_found(item_type: &ItemTypeName, id: impl Into<String>) -> Self {
        EngineError::ItemNotFound {
            item_type: item_type.clone(),
            id: id.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

pub struct Session<'a> {
    source: &'a dyn Source,
    credential: &'a Credential,
    urls: &'a ServiceUrls,
}

impl<'a> Session<'a> {
    pub fn new(source: &'a dyn Source, credential: &'a Credential, urls: &'a ServiceUrls) -> Self {
        Self {
            source,
            credential,
            urls,
        }
    }

    pub fn urls(&self) -> &ServiceUrls {
        self.urls
    }
}

// ---------------------------------------------------------------------------
// Test fixtures
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod fixtures {
    use serde_json::json;

    use plm_oslc::ServiceUrls;

    use crate::source::memory::MemorySource;
    use crate::source::Credential;

    pub fn urls() -> ServiceUrls {
        ServiceUrls::new("http://h/api/oslc", "http://h/ns/plm#")
    }

    pub fn cred() -> Credential {
        Credential::bearer("tok")
    }

    /// `Part` (versionable) with a `material` reference and a `Part BOM`
    /// relationship; `Material` (not versionable).
    pub fn catalogue() -> MemorySource {
        MemorySource::new()
            .with_item_type("Part", true)
            .with_item_type("Material", false)
            .with_item_type("Part BOM", false)
            .with_property("Part", "id", "item", true)
            .with_property("Part", "name", "string", false)
            .with_reference("Part", "material", "Material")
            .with_relationship("Part", "Part BOM")
            .with_property("Material", "id", "string", true)
            .with_property("Material", "name", "string", false)
            .with_property("Part BOM", "id", "string", true)
            .with_item(
                "Material",
                json!({"id": "M7", "config_id": {"id": "M7"}, "keyed_name": "Steel", "generation": "1"}),
            )
            .with_item(
                "Part",
                json!({
                    "id": "X1", "config_id": {"id": "C1"}, "generation": "1",
                    "keyed_name": "P-100", "name": "Bracket", "material": "M7"
                }),
            )
            .with_item(
                "Part",
                json!({
                    "id": "X2", "config_id": {"id": "C1"}, "generation": "2",
                    "keyed_name": "P-100 rev B", "name": "Bracket"
                }),
            )
            .with_item(
                "Part",
                json!({"id": "Y1", "config_id": {"id": "C2"}, "generation": "1", "keyed_name": "P-200"}),
            )
            .with_item(
                "Part BOM",
                json!({"id": "B1", "source_id": "X1", "config_id": {"id": "BC1"}}),
            )
            .with_item(
                "Part BOM",
                json!({"id": "B2", "source_id": "X1", "config_id": {"id": "BC2"}}),
            )
    }
}
