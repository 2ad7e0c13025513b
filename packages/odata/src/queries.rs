//! The concrete queries the adapter issues against the source.
//!
//! Each function returns an [`ODataQuery`] relative to the OData service
//! root; the caller turns it into a URL with [`ODataQuery::to_url`].

use plm_oslc::{ItemTypeName, Page};

use crate::query::{Expand, Filter, ODataQuery};

/// How a single item is addressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemSelector {
    /// One generation, by item id. Answered with a bare entity.
    ById(String),
    /// The configuration's items, by config id. Answered with a collection.
    ByConfigId(String),
}

/// All item types with their versionability.
pub fn item_types() -> ODataQuery {
    ODataQuery::entity("ItemType").select(["name", "is_versionable"])
}

/// One item type by name.
pub fn item_type(item_type: &ItemTypeName) -> ODataQuery {
    item_types().filter(Filter::eq("name", item_type.source_name()))
}

pub fn properties(item_type: &ItemTypeName) -> ODataQuery {
    ODataQuery::entity("Property").filter(Filter::eq("source_id/name", item_type.source_name()))
}

pub fn relationships(item_type: &ItemTypeName) -> ODataQuery {
    ODataQuery::entity("RelationshipType").filter(Filter::eq("source_id/name", item_type.source_name()))
}

/// Items of a type, one row per generation, optionally paged.
pub fn instances(item_type: &ItemTypeName, page: Option<Page>) -> ODataQuery {
    let q = ODataQuery::item_type(item_type)
        .select(["keyed_name", "id"])
        .expand(Expand::property("config_id"));
    match page {
        Some(page) => q.top(u64::from(page.size())).skip(page.skip()),
        None => q,
    }
}

/// One item with the named reference properties expanded inline, each
/// carrying its own `config_id`.
pub fn expanded_item(item_type: &ItemTypeName, selector: &ItemSelector, expansions: &[&str]) -> ODataQuery {
    let mut q = ODataQuery::item_type(item_type);
    if let ItemSelector::ById(id) = selector {
        q = q.key(id.as_str());
    }
    for name in expansions {
        q = q.expand(Expand::with_config_id(*name));
    }
    if let ItemSelector::ByConfigId(config_id) = selector {
        q = q.filter(Filter::eq("config_id", config_id.as_str()));
    }
    q
}

/// Items of `relationship` whose source is `item_id`.
pub fn related(relationship: &ItemTypeName, item_id: &str) -> ODataQuery {
    ODataQuery::item_type(relationship)
        .expand(Expand::property("config_id"))
        .filter(Filter::eq("source_id/id", item_id))
}

/// The generations of a configuration, excluding generation zero.
pub fn generations(item_type: &ItemTypeName, config_id: &str) -> ODataQuery {
    ODataQuery::item_type(item_type)
        .select(["keyed_name", "id", "generation"])
        .expand(Expand::property("config_id"))
        .filter(Filter::eq("config_id", config_id).and(Filter::gt("generation", "0")))
}

/// One item by id, with its configuration.
pub fn item_by_id(item_type: &ItemTypeName, item_id: &str) -> ODataQuery {
    ODataQuery::item_type(item_type)
        .key(item_id)
        .select(["id", "keyed_name"])
        .expand(Expand::property("config_id"))
}

/// Every item of a configuration.
pub fn items_by_config_id(item_type: &ItemTypeName, config_id: &str) -> ODataQuery {
    ODataQuery::item_type(item_type)
        .select(["id", "keyed_name"])
        .expand(Expand::property("config_id"))
        .filter(Filter::eq("config_id", config_id))
}
