//! RDF output.
//!
//! Turtle and RDF/XML go through `oxrdfio`. JSON-LD is written directly as
//! a compacted `{"@context": .., "@graph": [..]}` document: one node object
//! per subject in first-seen order, `rdf:type` as `@type`, predicates and
//! types compacted against the graph's prefixes.

use std::collections::HashMap;

use oxrdf::vocab::{rdf, xsd};
use oxrdf::{Subject, Term};
use serde_json::{json, Map, Value};
use thiserror::Error;

use crate::graph::ResourceGraph;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("serialisation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid prefix binding: {0}")]
    Prefix(String),

    #[error("JSON-LD encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Output representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RdfFormat {
    RdfXml,
    Turtle,
    JsonLd,
}

impl RdfFormat {
    /// Pick a format from an `Accept` header.
    ///
    /// The whole header is matched first; otherwise the first recognised
    /// media range wins. Anything unrecognised, or no header, is JSON-LD.
    pub fn from_accept(accept: Option<&str>) -> Self {
        let Some(accept) = accept else {
            return RdfFormat::JsonLd;
        };
        if let Some(format) = Self::from_media_type(accept.trim()) {
            return format;
        }
        accept
            .split(',')
            .filter_map(|range| range.split(';').next())
            .find_map(|media| Self::from_media_type(media.trim()))
            .unwrap_or(RdfFormat::JsonLd)
    }

    fn from_media_type(media: &str) -> Option<Self> {
        match media {
            "application/json" | "application/ld+json" | "application/json+ld" => Some(RdfFormat::JsonLd),
            "text/turtle" => Some(RdfFormat::Turtle),
            "*/*" | "application/xml" | "application/rdf+xml" => Some(RdfFormat::RdfXml),
            _ => None,
        }
    }

    pub fn media_type(self) -> &'static str {
        match self {
            RdfFormat::RdfXml => "application/rdf+xml",
            RdfFormat::Turtle => "text/turtle",
            RdfFormat::JsonLd => "application/ld+json",
        }
    }
}

/// Serialise `graph`.
pub fn render(graph: &ResourceGraph, format: RdfFormat) -> Result<Vec<u8>, RenderError> {
    match format {
        RdfFormat::Turtle => serialize(graph, oxrdfio::RdfFormat::Turtle),
        RdfFormat::RdfXml => serialize(graph, oxrdfio::RdfFormat::RdfXml),
        RdfFormat::JsonLd => Ok(serde_json::to_vec_pretty(&json_ld(graph))?),
    }
}

fn serialize(graph: &ResourceGraph, format: oxrdfio::RdfFormat) -> Result<Vec<u8>, RenderError> {
    let mut serializer = oxrdfio::RdfSerializer::from_format(format);
    for (prefix, namespace) in graph.prefixes() {
        // RDF/XML always declares rdf itself.
        if format == oxrdfio::RdfFormat::RdfXml && prefix == "rdf" {
            continue;
        }
        serializer = serializer
            .with_prefix(prefix.as_str(), namespace.as_str())
            .map_err(|e| RenderError::Prefix(format!("{prefix}: {e}")))?;
    }
    let mut writer = serializer.for_writer(Vec::new());
    for triple in graph.triples() {
        writer.serialize_triple(triple)?;
    }
    Ok(writer.finish()?)
}

// --- JSON-LD -----------------------------------------------------------------

fn json_ld(graph: &ResourceGraph) -> Value {
    let compactor = Compactor::new(graph.prefixes());

    let mut context = Map::new();
    for (prefix, namespace) in graph.prefixes() {
        context.insert(prefix.clone(), Value::String(namespace.clone()));
    }

    let mut order: Vec<&Subject> = Vec::new();
    let mut nodes: HashMap<&Subject, Map<String, Value>> = HashMap::new();
    for triple in graph.triples() {
        let node = nodes.entry(&triple.subject).or_insert_with(|| {
            order.push(&triple.subject);
            let mut node = Map::new();
            node.insert("@id".into(), Value::String(subject_id(&triple.subject)));
            node
        });

        let (key, value) = if triple.predicate.as_ref() == rdf::TYPE {
            let value = match &triple.object {
                Term::NamedNode(n) => Value::String(compactor.compact(n.as_str())),
                other => term_value(other, &compactor),
            };
            ("@type".to_string(), value)
        } else {
            (
                compactor.compact(triple.predicate.as_str()),
                term_value(&triple.object, &compactor),
            )
        };
        push_value(node, key, value);
    }

    let graph_nodes: Vec<Value> = order
        .into_iter()
        .filter_map(|s| nodes.remove(s))
        .map(Value::Object)
        .collect();

    json!({
        "@context": Value::Object(context),
        "@graph": graph_nodes,
    })
}

/// Single values stay scalar; repeated predicates become arrays.
fn push_value(node: &mut Map<String, Value>, key: String, value: Value) {
    match node.get_mut(&key) {
        None => {
            node.insert(key, value);
        }
        Some(Value::Array(values)) => values.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
    }
}

fn subject_id(subject: &Subject) -> String {
    match subject {
        Subject::NamedNode(n) => n.as_str().to_string(),
        Subject::BlankNode(b) => format!("_:{}", b.as_str()),
        #[allow(unreachable_patterns)]
        other => other.to_string(),
    }
}

fn term_value(term: &Term, compactor: &Compactor) -> Value {
    match term {
        Term::NamedNode(n) => json!({ "@id": n.as_str() }),
        Term::BlankNode(b) => json!({ "@id": format!("_:{}", b.as_str()) }),
        Term::Literal(l) => {
            if let Some(language) = l.language() {
                json!({ "@value": l.value(), "@language": language })
            } else if l.datatype() == xsd::STRING {
                json!({ "@value": l.value() })
            } else {
                json!({ "@value": l.value(), "@type": compactor.compact(l.datatype().as_str()) })
            }
        }
        #[allow(unreachable_patterns)]
        other => Value::String(other.to_string()),
    }
}

/// Longest-namespace-first prefix compaction.
struct Compactor<'a> {
    prefixes: Vec<&'a (String, String)>,
}

impl<'a> Compactor<'a> {
    fn new(prefixes: &'a [(String, String)]) -> Self {
        let mut prefixes: Vec<_> = prefixes.iter().collect();
        prefixes.sort_by(|a, b| b.1.len().cmp(&a.1.len()));
        Self { prefixes }
    }

    fn compact(&self, iri: &str) -> String {
        for (prefix, namespace) in &self.prefixes {
            if let Some(local) = iri.strip_prefix(namespace.as_str()) {
                if !local.is_empty() && !local.contains(&['/', '#', '?'][..]) {
                    return format!("{prefix}:{local}");
                }
            }
        }
        iri.to_string()
    }
}

// --- tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::{dcterms, oslc};
    use oxrdf::{Literal, NamedNode, NamedNodeRef};

    fn sample() -> ResourceGraph {
        let mut g = ResourceGraph::new();
        let s = NamedNode::new_unchecked("http://h/api/oslc/Part/C1");
        g.insert_type(s.clone(), NamedNodeRef::new_unchecked(oslc::RESOURCE_SHAPE));
        g.insert_literal(s.clone(), NamedNodeRef::new_unchecked(dcterms::TITLE), "Part");
        g.insert(
            s.clone(),
            NamedNodeRef::new_unchecked(oslc::PROPERTY_PROP),
            NamedNode::new_unchecked("http://h/api/oslc/Part/resourceShape#a"),
        );
        g.insert(
            s,
            NamedNodeRef::new_unchecked(oslc::PROPERTY_PROP),
            NamedNode::new_unchecked("http://h/api/oslc/Part/resourceShape#b"),
        );
        g
    }

    #[test]
    fn accept_mapping() {
        assert_eq!(RdfFormat::from_accept(None), RdfFormat::JsonLd);
        assert_eq!(RdfFormat::from_accept(Some("text/turtle")), RdfFormat::Turtle);
        assert_eq!(RdfFormat::from_accept(Some("*/*")), RdfFormat::RdfXml);
        assert_eq!(RdfFormat::from_accept(Some("application/rdf+xml")), RdfFormat::RdfXml);
        assert_eq!(RdfFormat::from_accept(Some("application/json")), RdfFormat::JsonLd);
        assert_eq!(RdfFormat::from_accept(Some("text/html")), RdfFormat::JsonLd);
        assert_eq!(
            RdfFormat::from_accept(Some("text/html, text/turtle;q=0.9")),
            RdfFormat::Turtle
        );
    }

    #[test]
    fn json_ld_groups_by_subject() {
        let doc: Value = serde_json::from_slice(&render(&sample(), RdfFormat::JsonLd).unwrap()).unwrap();
        assert_eq!(doc["@context"]["oslc"], oslc::NS);
        let nodes = doc["@graph"].as_array().unwrap();
        assert_eq!(nodes.len(), 1);
        let node = &nodes[0];
        assert_eq!(node["@id"], "http://h/api/oslc/Part/C1");
        assert_eq!(node["@type"], "oslc:ResourceShape");
        assert_eq!(node["dcterms:title"]["@value"], "Part");
        assert_eq!(node["oslc:property"].as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn json_ld_typed_literal() {
        let mut g = ResourceGraph::new();
        g.insert(
            NamedNode::new_unchecked("http://h/x"),
            NamedNode::new_unchecked("http://h/p"),
            Literal::new_typed_literal("2", xsd::INTEGER),
        );
        let doc = json_ld(&g);
        assert_eq!(doc["@graph"][0]["http://h/p"]["@type"], "xsd:integer");
    }

    #[test]
    fn turtle_uses_prefixes() {
        let out = String::from_utf8(render(&sample(), RdfFormat::Turtle).unwrap()).unwrap();
        assert!(out.contains("@prefix oslc: <http://open-services.net/ns/core#>"));
        assert!(out.contains("ResourceShape"));
        assert!(out.contains("\"Part\""));
    }

    #[test]
    fn rdf_xml_is_produced() {
        let out = String::from_utf8(render(&sample(), RdfFormat::RdfXml).unwrap()).unwrap();
        assert!(out.contains("rdf:RDF"));
        assert!(out.contains("http://h/api/oslc/Part/C1"));
    }
}
