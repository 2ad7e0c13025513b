//! Item materialisation.
//!
//! Resolves which item a request addresses, fetches its payload with every
//! single-valued reference expanded, lists related items one relationship
//! at a time, and projects the result onto the shape. Relationships are
//! followed exactly one hop.

use std::collections::HashMap;

use serde_json::{Map, Value};
use tracing::debug;

use plm_oslc::{
    config_context_item_id, is_reserved, project_item, ItemFacts, ItemTypeName, RelatedItem,
    ResourceGraph,
};
use plm_oslc_odata::ItemSelector;

use super::{EngineError, Session};
use crate::source::SourceError;

impl Session<'_> {
    /// The resource for item `config_id` of `item_type`.
    ///
    /// With a configuration `context`, the item id named by the context is
    /// looked up and must belong to `config_id`; that exact version is then
    /// materialised. Without one, the source picks the configuration's item.
    pub async fn item(
        &self,
        item_type: &ItemTypeName,
        config_id: &str,
        context: Option<&str>,
    ) -> Result<ResourceGraph, EngineError> {
        let selector = match context.and_then(config_context_item_id) {
            Some(context_item) => {
                let row = self.validate_item_id(item_type, context_item).await?;
                if row.config_id() != config_id {
                    return Err(EngineError::ConfigMismatch {
                        requested: config_id.to_string(),
                        resolved: row.config_id().to_string(),
                    });
                }
                ItemSelector::ById(row.id)
            }
            None => {
                self.validate_config_id(item_type, config_id).await?;
                ItemSelector::ByConfigId(config_id.to_string())
            }
        };

        let shape = self.shape(item_type).await?;
        let expansions = shape.expansions();
        let body = self
            .source
            .get_expanded_item(self.credential, item_type, &selector, &expansions)
            .await?
            .ok_or_else(|| EngineError::item_not_found(item_type, config_id))?;
        let payload = first_entity(body).ok_or_else(|| EngineError::item_not_found(item_type, config_id))?;
        let payload = match payload {
            Value::Object(map) => map,
            _ => {
                return Err(SourceError::Malformed(format!("{item_type} payload is not an object")).into());
            }
        };

        let item_id = match &selector {
            ItemSelector::ById(id) => id.clone(),
            ItemSelector::ByConfigId(_) => payload_id(&payload)
                .ok_or_else(|| SourceError::Malformed(format!("{item_type} payload has no id")))?,
        };

        let mut related = HashMap::new();
        for (name, target) in shape.relationships() {
            if is_reserved(name) {
                continue;
            }
            let rows = self.source.list_related(self.credential, target, &item_id).await?;
            let items: Vec<RelatedItem> = rows
                .iter()
                .map(|row| RelatedItem {
                    item_id: row.id.clone(),
                    config_id: row.config_id().to_string(),
                })
                .collect();
            related.insert(name.to_string(), items);
        }

        debug!(
            "materialize: {item_type} {config_id} resolved to item {item_id}, {} related sets",
            related.len()
        );

        let facts = ItemFacts {
            values: ItemFacts::normalize_payload(&shape, &payload),
            item_id,
            config_id: config_id.to_string(),
            item_url: self.urls.item(item_type, config_id),
            related,
        };
        Ok(project_item(&shape, &facts, self.urls)?)
    }
}

/// A bare entity, or the first element of a `{"value": [..]}` collection.
fn first_entity(body: Value) -> Option<Value> {
    match body {
        Value::Object(mut map) if map.get("value").is_some_and(Value::is_array) => {
            match map.remove("value") {
                Some(Value::Array(items)) => items.into_iter().next(),
                _ => None,
            }
        }
        other => Some(other),
    }
}

fn payload_id(payload: &Map<String, Value>) -> Option<String> {
    payload
        .get("id")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}
