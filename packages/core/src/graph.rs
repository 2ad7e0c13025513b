use std::collections::HashSet;

use oxrdf::{BlankNode, Literal, NamedNode, NamedNodeRef, Subject, Term, Triple};
use thiserror::Error;

use crate::vocab::PREFIXES;

/// Errors raised while building a graph.
#[derive(Debug, Error, PartialEq)]
pub enum GraphError {
    #[error("not a valid IRI: {0:?}")]
    InvalidIri(String),
}

/// Parse an IRI, mapping failures to [`GraphError::InvalidIri`].
///
/// Produced URLs embed source identifiers, so they are checked rather than
/// trusted.
pub fn iri(value: impl Into<String>) -> Result<NamedNode, GraphError> {
    let value = value.into();
    NamedNode::new(value.as_str()).map_err(|_| GraphError::InvalidIri(value))
}

/// An in-memory set of triples describing one response.
///
/// The graph is not a store: it is built for a single response, rendered,
/// and dropped. Triples keep the order they were inserted in, so renderers
/// emit typing triples before property triples. Inserting a triple that is
/// already present is a no-op.
#[derive(Debug, Clone)]
pub struct ResourceGraph {
    prefixes: Vec<(String, String)>,
    triples: Vec<Triple>,
    seen: HashSet<Triple>,
}

impl Default for ResourceGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceGraph {
    /// Create an empty graph with the standard prefixes bound.
    pub fn new() -> Self {
        Self {
            prefixes: PREFIXES
                .iter()
                .map(|(p, ns)| (p.to_string(), ns.to_string()))
                .collect(),
            triples: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Bind an extra prefix. Rebinding an existing prefix replaces it.
    pub fn bind(&mut self, prefix: impl Into<String>, namespace: impl Into<String>) {
        let prefix = prefix.into();
        let namespace = namespace.into();
        match self.prefixes.iter_mut().find(|(p, _)| *p == prefix) {
            Some(entry) => entry.1 = namespace,
            None => self.prefixes.push((prefix, namespace)),
        }
    }

    pub fn prefixes(&self) -> &[(String, String)] {
        &self.prefixes
    }

    /// Insert a triple. Returns `false` if it was already present.
    pub fn insert(
        &mut self,
        subject: impl Into<Subject>,
        predicate: impl Into<NamedNode>,
        object: impl Into<Term>,
    ) -> bool {
        let triple = Triple::new(subject, predicate, object);
        if self.seen.contains(&triple) {
            return false;
        }
        self.seen.insert(triple.clone());
        self.triples.push(triple);
        true
    }

    /// Insert `subject rdf:type class`.
    pub fn insert_type(&mut self, subject: impl Into<Subject>, class: NamedNodeRef<'_>) -> bool {
        self.insert(subject, oxrdf::vocab::rdf::TYPE, class.into_owned())
    }

    /// Insert a plain (`xsd:string`) literal.
    pub fn insert_literal(
        &mut self,
        subject: impl Into<Subject>,
        predicate: NamedNodeRef<'_>,
        value: impl Into<String>,
    ) -> bool {
        self.insert(subject, predicate.into_owned(), Literal::new_simple_literal(value))
    }

    /// A fresh blank node for anonymous resources (services, capabilities).
    pub fn blank_node(&self) -> BlankNode {
        BlankNode::default()
    }

    /// Triples in insertion order.
    pub fn triples(&self) -> &[Triple] {
        &self.triples
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    pub fn contains(&self, triple: &Triple) -> bool {
        self.seen.contains(triple)
    }

    /// All objects of `subject predicate ?o`, in insertion order.
    pub fn objects<'a>(&'a self, subject: &Subject, predicate: &NamedNode) -> impl Iterator<Item = &'a Term> + 'a {
        let subject = subject.clone();
        let predicate = predicate.clone();
        self.triples
            .iter()
            .filter(move |t| t.subject == subject && t.predicate == predicate)
            .map(|t| &t.object)
    }

    /// All subjects with `?s rdf:type class`, in insertion order.
    pub fn subjects_of_type<'a>(&'a self, class: NamedNodeRef<'a>) -> impl Iterator<Item = &'a Subject> + 'a {
        self.triples
            .iter()
            .filter(move |t| t.predicate.as_ref() == oxrdf::vocab::rdf::TYPE && t.object == Term::from(class.into_owned()))
            .map(|t| &t.subject)
    }
}

// --- tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::dcterms;

    fn node(s: &str) -> NamedNode {
        NamedNode::new_unchecked(s)
    }

    #[test]
    fn insert_keeps_order_and_dedupes() {
        let mut g = ResourceGraph::new();
        let s = node("http://example.com/a");
        let title = NamedNodeRef::new_unchecked(dcterms::TITLE);

        assert!(g.insert_type(s.clone(), NamedNodeRef::new_unchecked("http://example.com/T")));
        assert!(g.insert_literal(s.clone(), title, "A"));
        assert!(!g.insert_literal(s.clone(), title, "A"));
        assert!(g.insert_literal(s.clone(), title, "B"));

        assert_eq!(g.len(), 3);
        assert_eq!(g.triples()[0].predicate.as_ref(), oxrdf::vocab::rdf::TYPE);
        let values: Vec<_> = g
            .objects(&Subject::from(s), &title.into_owned())
            .map(|o| o.to_string())
            .collect();
        assert_eq!(values, vec!["\"A\"", "\"B\""]);
    }

    fn titles<'g>(g: &'g ResourceGraph, s: &NamedNode) -> impl Iterator<Item = &'g Term> + 'g {
        g.objects(&Subject::from(s.clone()), &node(dcterms::TITLE))
    }

    #[test]
    fn objects_outlive_their_lookup_keys() {
        let mut g = ResourceGraph::new();
        let s = node("http://example.com/a");
        g.insert_literal(s.clone(), NamedNodeRef::new_unchecked(dcterms::TITLE), "A");
        let found: Vec<_> = titles(&g, &s).map(ToString::to_string).collect();
        assert_eq!(found, vec!["\"A\""]);
    }

    #[test]
    fn invalid_iri_is_rejected() {
        assert!(iri("http://example.com/ok").is_ok());
        assert_eq!(
            iri("not an iri"),
            Err(GraphError::InvalidIri("not an iri".into()))
        );
    }

    #[test]
    fn subjects_of_type_filters_by_class() {
        let mut g = ResourceGraph::new();
        let class = NamedNodeRef::new_unchecked("http://example.com/T");
        g.insert_type(node("http://example.com/a"), class);
        g.insert_type(node("http://example.com/b"), NamedNodeRef::new_unchecked("http://example.com/U"));
        g.insert_type(node("http://example.com/c"), class);
        let subjects: Vec<_> = g.subjects_of_type(class).map(|s| s.to_string()).collect();
        assert_eq!(subjects, vec!["<http://example.com/a>", "<http://example.com/c>"]);
    }

    #[test]
    fn bind_replaces_existing_prefix() {
        let mut g = ResourceGraph::new();
        g.bind("plm", "http://example.com/ns#");
        g.bind("plm", "http://example.org/ns#");
        let bound: Vec<_> = g.prefixes().iter().filter(|(p, _)| p == "plm").collect();
        assert_eq!(bound.len(), 1);
        assert_eq!(bound[0].1, "http://example.org/ns#");
    }
}
