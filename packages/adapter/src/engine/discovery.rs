//! Schema discovery and resource shapes.

use tracing::debug;

use plm_oslc::{synthesize, ItemSchema, ItemTypeName, ResourceGraph, ResourceShape};
use plm_oslc_odata::{ItemTypeRow, PropertyRow, RelationshipRow};

use super::{EngineError, Session};

impl Session<'_> {
    /// Properties, relationships and versionability of an item type.
    ///
    /// Fails with [`EngineError::SchemaNotFound`] when the source lists no
    /// properties.
    pub async fn discover(&self, item_type: &ItemTypeName) -> Result<ItemSchema, EngineError> {
        let properties = self.source.list_properties(self.credential, item_type).await?;
        if properties.is_empty() {
            return Err(EngineError::SchemaNotFound(item_type.clone()));
        }
        let relationships = self
            .source
            .list_relationships(self.credential, item_type)
            .await?;
        let versionable = self
            .source
            .get_item_type(self.credential, item_type)
            .await?
            .is_some_and(|row| row.is_versionable);

        debug!(
            "discovery: {item_type}: {} properties, {} relationships, versionable={versionable}",
            properties.len(),
            relationships.len()
        );

        Ok(ItemSchema {
            item_type: item_type.clone(),
            properties: properties.iter().map(PropertyRow::to_descriptor).collect(),
            relationships: relationships.iter().map(RelationshipRow::to_descriptor).collect(),
            versionable,
        })
    }

    /// A freshly synthesized shape.
    pub async fn shape(&self, item_type: &ItemTypeName) -> Result<ResourceShape, EngineError> {
        Ok(synthesize(&self.discover(item_type).await?))
    }

    /// The resource shape document, rooted at the shape URL.
    pub async fn resource_shape(&self, item_type: &ItemTypeName) -> Result<ResourceGraph, EngineError> {
        let shape = self.shape(item_type).await?;
        Ok(shape.to_graph(self.urls)?)
    }

    /// The item type's row, or [`EngineError::SchemaNotFound`].
    pub async fn require_item_type(&self, item_type: &ItemTypeName) -> Result<ItemTypeRow, EngineError> {
        self.source
            .get_item_type(self.credential, item_type)
            .await?
            .ok_or_else(|| EngineError::SchemaNotFound(item_type.clone()))
    }
}
