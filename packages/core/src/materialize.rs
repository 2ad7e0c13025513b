//! Projection of one item into an OSLC resource node.
//!
//! The adapter fetches the item payload and its related items, normalises
//! the payload against the shape with [`PayloadValue::from_json`], and hands
//! the result to [`project_item`]. Projection itself does no I/O.
//!
//! Triples are inserted in a fixed order: type, component, instance shape,
//! versioning (if any), literal and reference properties in shape order,
//! then relationships.

use std::collections::HashMap;

use oxrdf::vocab::xsd;
use oxrdf::{Literal, NamedNodeRef};
use serde_json::Value;

use crate::graph::{iri, GraphError, ResourceGraph};
use crate::naming::ItemTypeName;
use crate::shape::{is_reserved, PropertyKind, ResourceShape};
use crate::urls::ServiceUrls;
use crate::vocab::{dcterms, oslc, oslc_config};

/// A normalised payload value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadValue {
    /// A scalar in its lexical form.
    Literal(String),
    /// A link to another item. `version_id` is the linked item's own id
    /// when the source expanded it.
    Reference {
        config_id: String,
        version_id: Option<String>,
    },
}

impl PayloadValue {
    /// Normalise a raw payload value for a property of the given kind.
    ///
    /// Returns `None` for values that produce no triple: `null`, empty
    /// strings, arrays, and references without a `config_id`.
    pub fn from_json(value: &Value, kind: &PropertyKind) -> Option<Self> {
        match kind {
            PropertyKind::Reference(_) => {
                let config_id = nested_config_id(value)?;
                let version_id = value.get("id").and_then(Value::as_str).map(str::to_string);
                Some(PayloadValue::Reference {
                    config_id,
                    version_id,
                })
            }
            PropertyKind::Literal(_) => match value {
                Value::String(s) if s.is_empty() => None,
                Value::String(s) => Some(PayloadValue::Literal(s.clone())),
                Value::Number(n) => Some(PayloadValue::Literal(n.to_string())),
                Value::Bool(b) => Some(PayloadValue::Literal(b.to_string())),
                // An unresolved item link typed as a literal keeps its id.
                Value::Object(_) => nested_config_id(value).map(PayloadValue::Literal),
                Value::Null | Value::Array(_) => None,
            },
            _ => None,
        }
    }
}

/// `config_id.id` of an expanded item object, or a bare `config_id` string.
fn nested_config_id(value: &Value) -> Option<String> {
    match value.get("config_id")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Object(inner) => inner
            .get("id")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        _ => None,
    }
}

/// One item reached through a relationship.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedItem {
    pub item_id: String,
    pub config_id: String,
}

/// Everything known about one item after the source round trips.
#[derive(Debug, Clone, Default)]
pub struct ItemFacts {
    pub item_id: String,
    pub config_id: String,
    /// The item URL being materialised.
    pub item_url: String,
    /// Normalised single-valued properties by name.
    pub values: HashMap<String, PayloadValue>,
    /// Related items by relationship property name.
    pub related: HashMap<String, Vec<RelatedItem>>,
}

impl ItemFacts {
    /// Normalise every single-valued shape property present in `payload`.
    pub fn normalize_payload(
        shape: &ResourceShape,
        payload: &serde_json::Map<String, Value>,
    ) -> HashMap<String, PayloadValue> {
        shape
            .single_valued()
            .filter(|p| !is_reserved(&p.name))
            .filter_map(|p| {
                let raw = payload.get(&p.name)?;
                PayloadValue::from_json(raw, &p.kind).map(|v| (p.name.clone(), v))
            })
            .collect()
    }
}

/// `plm_{Type}`, restricted to characters valid in a Turtle or XML prefix.
/// Anything else becomes `_`, as does a trailing dot.
fn prefix_label(item_type: &ItemTypeName) -> String {
    let mut label: String = format!("plm_{}", item_type.url_name())
        .chars()
        .map(|c| match c {
            'A'..='Z' | 'a'..='z' | '0'..='9' | '_' | '-' | '.' => c,
            _ => '_',
        })
        .collect();
    if label.ends_with('.') {
        label.pop();
        label.push('_');
    }
    label
}

/// Build the resource node for one item.
pub fn project_item(
    shape: &ResourceShape,
    facts: &ItemFacts,
    urls: &ServiceUrls,
) -> Result<ResourceGraph, GraphError> {
    let item_type = &shape.item_type;
    let mut graph = ResourceGraph::new();
    graph.bind(prefix_label(item_type), format!("{}#", urls.shape(item_type)));
    let node = iri(facts.item_url.as_str())?;

    graph.insert_type(node.clone(), iri(urls.resource_type(item_type))?.as_ref());
    graph.insert(
        node.clone(),
        NamedNodeRef::new_unchecked(oslc_config::COMPONENT_PROP),
        iri(urls.component(item_type, &facts.config_id))?,
    );
    graph.insert(
        node.clone(),
        NamedNodeRef::new_unchecked(oslc::INSTANCE_SHAPE),
        iri(urls.shape(item_type))?,
    );

    if shape.versionable {
        graph.insert_type(node.clone(), NamedNodeRef::new_unchecked(oslc_config::VERSION_RESOURCE));
        graph.insert(
            node.clone(),
            NamedNodeRef::new_unchecked(oslc_config::VERSION_ID),
            Literal::new_typed_literal(facts.item_id.as_str(), xsd::STRING),
        );
        graph.insert(
            node.clone(),
            NamedNodeRef::new_unchecked(dcterms::IS_VERSION_OF),
            node.clone(),
        );
    }

    for prop in shape.single_valued() {
        let Some(value) = facts.values.get(&prop.name) else {
            continue;
        };
        let predicate = iri(urls.property(item_type, &prop.name))?;
        match (&prop.kind, value) {
            (PropertyKind::Literal(vt), PayloadValue::Literal(lexical)) => {
                graph.insert(
                    node.clone(),
                    predicate,
                    Literal::new_typed_literal(lexical.as_str(), vt.iri()),
                );
            }
            (
                PropertyKind::Reference(target),
                PayloadValue::Reference {
                    config_id,
                    version_id,
                },
            ) => {
                let stream = version_id.as_deref().unwrap_or(config_id);
                graph.insert(node.clone(), predicate, linked(urls, target, config_id, stream)?);
            }
            _ => {}
        }
    }

    for (name, target) in shape.relationships() {
        if is_reserved(name) {
            continue;
        }
        let Some(items) = facts.related.get(name) else {
            continue;
        };
        let predicate = iri(urls.property(item_type, name))?;
        for related in items {
            graph.insert(
                node.clone(),
                predicate.clone(),
                linked(urls, target, &related.config_id, &related.item_id)?,
            );
        }
    }

    Ok(graph)
}

fn linked(
    urls: &ServiceUrls,
    target: &ItemTypeName,
    config_id: &str,
    stream_id: &str,
) -> Result<oxrdf::NamedNode, GraphError> {
    iri(urls.linked_item(target, config_id, stream_id))
}

// --- tests -------------------------------------------------------------------
