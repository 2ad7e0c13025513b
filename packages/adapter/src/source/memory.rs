//! In-memory source.
//!
//! A fixed catalogue of item types, properties, relationships and item
//! payloads, assembled with a builder and never mutated afterwards. Use it
//! for tests and the conformance suite.
//!
//! Items are held as the JSON the OData endpoint would return:
//!
//! ```json
//! {"id": "V2", "keyed_name": "P-100", "generation": "2",
//!  "config_id": {"id": "C1"}, "material": "M7"}
//! ```
//!
//! Reference properties hold the referenced item's id and are replaced by
//! the referenced item's payload when expanded. Relationship items carry a
//! `source_id` naming the item they hang off.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::{json, Value};

use plm_oslc::{ItemTypeName, Page};
use plm_oslc_odata::{ItemRow, ItemSelector, ItemTypeRow, PropertyRow, RelationshipRow};

use super::{Credential, Source, SourceError};

// ---------------------------------------------------------------------------
// MemorySource
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    /// Accepted bearer token; any token is accepted when unset.
    token: Option<String>,
    item_types: Vec<ItemTypeRow>,
    properties: HashMap<String, Vec<PropertyRow>>,
    relationships: HashMap<String, Vec<RelationshipRow>>,
    items: HashMap<String, Vec<Value>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every credential except `token` with a 401.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_item_type(mut self, name: &str, versionable: bool) -> Self {
        self.item_types.push(ItemTypeRow {
            id: Some(format!("IT-{}", name.replace(' ', "_"))),
            name: name.to_string(),
            is_versionable: versionable,
        });
        self
    }

    pub fn with_property(mut self, item_type: &str, name: &str, data_type: &str, required: bool) -> Self {
        self.properties.entry(item_type.to_string()).or_default().push(PropertyRow {
            name: name.to_string(),
            data_type: Some(data_type.to_string()),
            data_source: None,
            is_required: required,
        });
        self
    }

    /// An `item` property of `item_type` pointing at items of `target`.
    pub fn with_reference(mut self, item_type: &str, name: &str, target: &str) -> Self {
        self.properties.entry(item_type.to_string()).or_default().push(PropertyRow {
            name: name.to_string(),
            data_type: Some("item".to_string()),
            data_source: Some(target.to_string()),
            is_required: false,
        });
        self
    }

    /// A relationship of `item_type`; the relationship name is also the
    /// item type of its related items.
    pub fn with_relationship(mut self, item_type: &str, relationship: &str) -> Self {
        self.relationships
            .entry(item_type.to_string())
            .or_default()
            .push(RelationshipRow {
                name: relationship.to_string(),
            });
        self
    }

    pub fn with_item(mut self, item_type: &str, payload: Value) -> Self {
        self.items.entry(item_type.to_string()).or_default().push(payload);
        self
    }

    // --- Internals ----------------------------------------------------------

    fn authorize(&self, credential: &Credential) -> Result<(), SourceError> {
        match &self.token {
            Some(token) if token != credential.token() => Err(SourceError::Rejected {
                status: 401,
                body: "invalid access token".to_string(),
            }),
            _ => Ok(()),
        }
    }

    fn items_of(&self, item_type: &ItemTypeName) -> &[Value] {
        self.items
            .get(item_type.source_name())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn find(&self, item_type: &ItemTypeName, item_id: &str) -> Option<&Value> {
        self.items_of(item_type)
            .iter()
            .find(|item| item.get("id").and_then(Value::as_str) == Some(item_id))
    }

    fn with_config_id<'a>(&'a self, item_type: &ItemTypeName, config_id: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        self.items_of(item_type)
            .iter()
            .filter(move |item| config_of(item) == Some(config_id))
    }

    /// The current item of every configuration of `item_type`, in order of
    /// first appearance: the one flagged `is_current`, else the highest
    /// generation.
    fn current_items(&self, item_type: &ItemTypeName) -> Vec<&Value> {
        let mut current: Vec<&Value> = Vec::new();
        for item in self.items_of(item_type) {
            let config = config_of(item);
            match current.iter_mut().find(|c| config_of(c) == config) {
                Some(slot) if rank(item) > rank(slot) => *slot = item,
                Some(_) => {}
                None => current.push(item),
            }
        }
        current
    }

    /// `item` with each named reference replaced by the referenced payload.
    fn expand(&self, item_type: &ItemTypeName, item: &Value, expansions: &[&str]) -> Value {
        let mut expanded = item.clone();
        let props = self
            .properties
            .get(item_type.source_name())
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        for name in expansions {
            let Some(target) = props
                .iter()
                .find(|p| p.name == *name)
                .and_then(|p| p.data_source.as_deref())
            else {
                continue;
            };
            let Some(id) = item.get(*name).and_then(Value::as_str) else {
                continue;
            };
            if let Some(related) = self.find(&ItemTypeName::from_source(target), id) {
                expanded[*name] = related.clone();
            }
        }
        expanded
    }
}

/// The config id of a payload, expanded or bare.
fn config_of(item: &Value) -> Option<&str> {
    match item.get("config_id")? {
        Value::String(s) => Some(s),
        other => other.get("id").and_then(Value::as_str),
    }
}

fn source_of(item: &Value) -> Option<&str> {
    match item.get("source_id")? {
        Value::String(s) => Some(s),
        other => other.get("id").and_then(Value::as_str),
    }
}

fn generation_of(item: &Value) -> i64 {
    match item.get("generation") {
        Some(Value::Number(n)) => n.as_i64().unwrap_or(0),
        Some(Value::String(s)) => s.parse().unwrap_or(0),
        _ => 0,
    }
}

/// Ordering key for picking a configuration's current item.
fn rank(item: &Value) -> (bool, i64) {
    let flagged = match item.get("is_current") {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s == "1" || s == "true",
        Some(Value::Number(n)) => n.as_i64() == Some(1),
        _ => false,
    };
    (flagged, generation_of(item))
}

fn to_row(item: &Value) -> Result<ItemRow, SourceError> {
    serde_json::from_value(item.clone()).map_err(|e| SourceError::Malformed(e.to_string()))
}

fn to_rows<'a>(items: impl Iterator<Item = &'a Value>) -> Result<Vec<ItemRow>, SourceError> {
    items.map(to_row).collect()
}

// ---------------------------------------------------------------------------
// Source impl
// ---------------------------------------------------------------------------

#[async_trait]
impl Source for MemorySource {
    async fn list_item_types(&self, credential: &Credential) -> Result<Vec<ItemTypeRow>, SourceError> {
        self.authorize(credential)?;
        Ok(self.item_types.clone())
    }

    async fn get_item_type(
        &self,
        credential: &Credential,
        item_type: &ItemTypeName,
    ) -> Result<Option<ItemTypeRow>, SourceError> {
        self.authorize(credential)?;
        Ok(self
            .item_types
            .iter()
            .find(|row| row.name == item_type.source_name())
            .cloned())
    }

    async fn list_properties(
        &self,
        credential: &Credential,
        item_type: &ItemTypeName,
    ) -> Result<Vec<PropertyRow>, SourceError> {
        self.authorize(credential)?;
        Ok(self
            .properties
            .get(item_type.source_name())
            .cloned()
            .unwrap_or_default())
    }

    async fn list_relationships(
        &self,
        credential: &Credential,
        item_type: &ItemTypeName,
    ) -> Result<Vec<RelationshipRow>, SourceError> {
        self.authorize(credential)?;
        Ok(self
            .relationships
            .get(item_type.source_name())
            .cloned()
            .unwrap_or_default())
    }

    async fn list_items(
        &self,
        credential: &Credential,
        item_type: &ItemTypeName,
        page: Option<Page>,
    ) -> Result<Vec<ItemRow>, SourceError> {
        self.authorize(credential)?;
        let items = self.current_items(item_type).into_iter();
        match page {
            Some(page) => {
                let skip = usize::try_from(page.skip()).unwrap_or(usize::MAX);
                to_rows(items.skip(skip).take(page.size() as usize))
            }
            None => to_rows(items),
        }
    }

    async fn get_expanded_item(
        &self,
        credential: &Credential,
        item_type: &ItemTypeName,
        selector: &ItemSelector,
        expansions: &[&str],
    ) -> Result<Option<Value>, SourceError> {
        self.authorize(credential)?;
        Ok(match selector {
            ItemSelector::ById(id) => self
                .find(item_type, id)
                .map(|item| self.expand(item_type, item, expansions)),
            ItemSelector::ByConfigId(config_id) => {
                let value: Vec<Value> = self
                    .current_items(item_type)
                    .into_iter()
                    .filter(|item| config_of(item) == Some(config_id.as_str()))
                    .map(|item| self.expand(item_type, item, expansions))
                    .collect();
                Some(json!({ "value": value }))
            }
        })
    }

    async fn list_related(
        &self,
        credential: &Credential,
        relationship: &ItemTypeName,
        item_id: &str,
    ) -> Result<Vec<ItemRow>, SourceError> {
        self.authorize(credential)?;
        to_rows(
            self.items_of(relationship)
                .iter()
                .filter(|item| source_of(item) == Some(item_id)),
        )
    }

    async fn list_generations(
        &self,
        credential: &Credential,
        item_type: &ItemTypeName,
        config_id: &str,
    ) -> Result<Vec<ItemRow>, SourceError> {
        self.authorize(credential)?;
        to_rows(
            self.with_config_id(item_type, config_id)
                .filter(|item| generation_of(item) > 0),
        )
    }

    async fn get_item(
        &self,
        credential: &Credential,
        item_type: &ItemTypeName,
        item_id: &str,
    ) -> Result<Option<ItemRow>, SourceError> {
        self.authorize(credential)?;
        self.find(item_type, item_id).map(to_row).transpose()
    }

    async fn find_by_config_id(
        &self,
        credential: &Credential,
        item_type: &ItemTypeName,
        config_id: &str,
    ) -> Result<Vec<ItemRow>, SourceError> {
        self.authorize(credential)?;
        to_rows(self.with_config_id(item_type, config_id))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use plm_oslc::PagingParams;

    use super::*;

    fn part() -> ItemTypeName {
        ItemTypeName::from_source("Part")
    }

    fn cred() -> Credential {
        Credential::bearer("tok")
    }

    fn source() -> MemorySource {
        MemorySource::new()
            .with_token("tok")
            .with_item_type("Part", true)
            .with_item_type("Material", false)
            .with_property("Part", "name", "string", true)
            .with_reference("Part", "material", "Material")
            .with_relationship("Part", "Part BOM")
            .with_item("Material", json!({"id": "M7", "config_id": {"id": "M7"}, "keyed_name": "Steel"}))
            .with_item(
                "Part",
                json!({"id": "V1", "config_id": {"id": "C1"}, "generation": "1", "keyed_name": "P-100", "material": "M7"}),
            )
            .with_item(
                "Part",
                json!({"id": "V2", "config_id": {"id": "C1"}, "generation": "2", "keyed_name": "P-100"}),
            )
            .with_item(
                "Part",
                json!({"id": "V9", "config_id": {"id": "C9"}, "generation": "0", "keyed_name": "P-900"}),
            )
            .with_item("Part BOM", json!({"id": "R1", "source_id": "V1", "config_id": {"id": "RC1"}}))
    }

    #[tokio::test]
    async fn wrong_token_is_rejected() {
        let err = source()
            .list_item_types(&Credential::bearer("nope"))
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::Rejected { status: 401, .. }));
    }

    #[tokio::test]
    async fn schema_lookups() {
        let src = source();
        let row = src.get_item_type(&cred(), &part()).await.unwrap().unwrap();
        assert!(row.is_versionable);
        assert!(src
            .get_item_type(&cred(), &ItemTypeName::from_source("Ghost"))
            .await
            .unwrap()
            .is_none());
        assert_eq!(src.list_properties(&cred(), &part()).await.unwrap().len(), 2);
        assert_eq!(src.list_relationships(&cred(), &part()).await.unwrap()[0].name, "Part BOM");
    }

    #[tokio::test]
    async fn pages_are_sliced() {
        let src = source();
        let page = PagingParams { page_size: Some(1), page_no: Some(2), ..Default::default() }
            .effective()
            .unwrap();
        let rows = src.list_items(&cred(), &part(), Some(page)).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "V9");
    }

    #[tokio::test]
    async fn listing_has_one_current_row_per_config() {
        let rows = source().list_items(&cred(), &part(), None).await.unwrap();
        let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["V2", "V9"]);
    }

    #[tokio::test]
    async fn current_flag_beats_generation() {
        let src = MemorySource::new()
            .with_item("Part", json!({"id": "A1", "config_id": {"id": "C1"}, "generation": "1", "is_current": "1"}))
            .with_item("Part", json!({"id": "A2", "config_id": {"id": "C1"}, "generation": "2", "is_current": "0"}));
        let rows = src.list_items(&cred(), &part(), None).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "A1");
    }

    #[tokio::test]
    async fn references_expand_to_payloads() {
        let src = source();
        let body = src
            .get_expanded_item(&cred(), &part(), &ItemSelector::ById("V1".into()), &["material"])
            .await
            .unwrap()
            .unwrap();
        assert_eq!(body["material"]["config_id"]["id"], "M7");

        let unexpanded = src
            .get_expanded_item(&cred(), &part(), &ItemSelector::ById("V1".into()), &[])
            .await
            .unwrap()
            .unwrap();
        assert_eq!(unexpanded["material"], "M7");
    }

    #[tokio::test]
    async fn config_lookups() {
        let src = source();
        let body = src
            .get_expanded_item(&cred(), &part(), &ItemSelector::ByConfigId("C1".into()), &[])
            .await
            .unwrap()
            .unwrap();
        let value = body["value"].as_array().unwrap();
        assert_eq!(value.len(), 1);
        assert_eq!(value[0]["id"], "V2");

        assert_eq!(src.find_by_config_id(&cred(), &part(), "C1").await.unwrap().len(), 2);
        assert_eq!(src.list_generations(&cred(), &part(), "C1").await.unwrap().len(), 2);
        assert!(src.list_generations(&cred(), &part(), "C9").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn related_items_follow_source_id() {
        let src = source();
        let rows = src
            .list_related(&cred(), &ItemTypeName::from_source("Part BOM"), "V1")
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].config_id(), "RC1");
        assert!(src
            .list_related(&cred(), &ItemTypeName::from_source("Part BOM"), "V2")
            .await
            .unwrap()
            .is_empty());
    }
}
