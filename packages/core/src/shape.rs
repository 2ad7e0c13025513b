//! Resource Shape synthesis.
//!
//! A [`ResourceShape`] is derived from one [`ItemSchema`] and describes the
//! item type in OSLC terms. Property order is fixed:
//!
//! 1. `oslc_component` (always)
//! 2. `oslc_version_id`, `dcterms_is_version_of` (versionable types only)
//! 3. schema properties, in discovery order
//! 4. relationships, in discovery order
//!
//! The same shape drives both the `resourceShape` document and item
//! materialisation, so the two always agree on which properties exist.

use oxrdf::vocab::xsd;
use oxrdf::NamedNodeRef;

use crate::graph::{iri, GraphError, ResourceGraph};
use crate::naming::ItemTypeName;
use crate::types::{ItemSchema, Occurrence, ValueType};
use crate::urls::ServiceUrls;
use crate::vocab::{dcterms, oslc, oslc_config};

/// Names of the synthetic configuration properties. Source properties with
/// these names are never exposed, neither in shapes nor as item literals.
pub const RESERVED_PROPERTY_NAMES: [&str; 3] =
    ["oslc_component", "oslc_version_id", "dcterms_is_version_of"];

pub fn is_reserved(name: &str) -> bool {
    RESERVED_PROPERTY_NAMES.contains(&name)
}

/// What a property shape points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyKind {
    /// `oslc_component`: the item's configuration component.
    Component,
    /// `oslc_version_id`: the item id of this version.
    VersionId,
    /// `dcterms_is_version_of`: the version-independent item URL.
    IsVersionOf,
    /// A literal of the given type.
    Literal(ValueType),
    /// A single-valued link to an item of another type.
    Reference(ItemTypeName),
    /// A to-many relationship to items of another type.
    Relationship(ItemTypeName),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyShape {
    pub name: String,
    pub occurs: Occurrence,
    pub kind: PropertyKind,
}

impl PropertyShape {
    fn new(name: impl Into<String>, occurs: Occurrence, kind: PropertyKind) -> Self {
        Self {
            name: name.into(),
            occurs,
            kind,
        }
    }

    /// `true` for the three configuration properties.
    pub fn is_synthetic(&self) -> bool {
        matches!(
            self.kind,
            PropertyKind::Component | PropertyKind::VersionId | PropertyKind::IsVersionOf
        )
    }

    /// The related item type for references and relationships.
    pub fn target(&self) -> Option<&ItemTypeName> {
        match &self.kind {
            PropertyKind::Reference(t) | PropertyKind::Relationship(t) => Some(t),
            _ => None,
        }
    }
}

/// The synthesised shape of one item type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceShape {
    pub item_type: ItemTypeName,
    pub versionable: bool,
    pub properties: Vec<PropertyShape>,
}

impl ResourceShape {
    pub fn get(&self, name: &str) -> Option<&PropertyShape> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Single-valued schema properties (literals and references), in order.
    pub fn single_valued(&self) -> impl Iterator<Item = &PropertyShape> {
        self.properties
            .iter()
            .filter(|p| !p.is_synthetic() && p.occurs.is_single())
    }

    /// Names of single-valued references the source must expand inline.
    pub fn expansions(&self) -> Vec<&str> {
        self.single_valued()
            .filter(|p| matches!(p.kind, PropertyKind::Reference(_)))
            .map(|p| p.name.as_str())
            .collect()
    }

    /// To-many relationships as `(property name, related type)`.
    pub fn relationships(&self) -> impl Iterator<Item = (&str, &ItemTypeName)> {
        self.properties.iter().filter_map(|p| match &p.kind {
            PropertyKind::Relationship(t) => Some((p.name.as_str(), t)),
            _ => None,
        })
    }

    /// Render the shape document, rooted at the shape URL.
    pub fn to_graph(&self, urls: &ServiceUrls) -> Result<ResourceGraph, GraphError> {
        let mut graph = ResourceGraph::new();
        let root = iri(urls.shape(&self.item_type))?;

        graph.insert_type(root.clone(), NamedNodeRef::new_unchecked(oslc::RESOURCE_SHAPE));
        graph.insert_literal(
            root.clone(),
            NamedNodeRef::new_unchecked(dcterms::TITLE),
            self.item_type.source_name(),
        );
        graph.insert(
            root.clone(),
            NamedNodeRef::new_unchecked(oslc::DESCRIBES),
            iri(urls.resource_type(&self.item_type))?,
        );

        for prop in &self.properties {
            let node = iri(urls.property(&self.item_type, &prop.name))?;
            graph.insert_type(node.clone(), NamedNodeRef::new_unchecked(oslc::PROPERTY));
            graph.insert_literal(node.clone(), NamedNodeRef::new_unchecked(oslc::NAME), prop.name.as_str());
            graph.insert(
                node.clone(),
                NamedNodeRef::new_unchecked(oslc::OCCURS),
                prop.occurs.iri().into_owned(),
            );

            let definition = NamedNodeRef::new_unchecked(oslc::PROPERTY_DEFINITION);
            let value_type = NamedNodeRef::new_unchecked(oslc::VALUE_TYPE);
            match &prop.kind {
                PropertyKind::Component => {
                    let component = NamedNodeRef::new_unchecked(oslc_config::COMPONENT_PROP);
                    graph.insert(node.clone(), NamedNodeRef::new_unchecked(oslc::RANGE), component.into_owned());
                    graph.insert(node.clone(), definition, component.into_owned());
                }
                PropertyKind::VersionId => {
                    graph.insert(
                        node.clone(),
                        definition,
                        NamedNodeRef::new_unchecked(oslc_config::VERSION_ID).into_owned(),
                    );
                    graph.insert(node.clone(), value_type, xsd::STRING.into_owned());
                }
                PropertyKind::IsVersionOf => {
                    graph.insert(
                        node.clone(),
                        definition,
                        NamedNodeRef::new_unchecked(dcterms::IS_VERSION_OF).into_owned(),
                    );
                    graph.insert(node.clone(), value_type, ValueType::Resource.iri().into_owned());
                }
                PropertyKind::Literal(vt) => {
                    graph.insert(node.clone(), value_type, vt.iri().into_owned());
                }
                PropertyKind::Reference(target) | PropertyKind::Relationship(target) => {
                    graph.insert(node.clone(), definition, iri(urls.shape(target))?);
                }
            }

            graph.insert(root.clone(), NamedNodeRef::new_unchecked(oslc::PROPERTY_PROP), node);
        }

        Ok(graph)
    }
}

/// Build the shape of `schema`.
///
/// Required properties occur exactly once, optional ones at most once;
/// item-typed properties with a known target become references, everything
/// else a literal of the mapped value type. Relationships are to-many
/// references to the related type's shape. Schema properties that collide
/// with a reserved name are dropped.
pub fn synthesize(schema: &ItemSchema) -> ResourceShape {
    let mut properties = Vec::with_capacity(schema.properties.len() + schema.relationships.len() + 3);

    properties.push(PropertyShape::new(
        "oslc_component",
        Occurrence::ZeroOrOne,
        PropertyKind::Component,
    ));
    if schema.versionable {
        properties.push(PropertyShape::new(
            "oslc_version_id",
            Occurrence::ZeroOrMany,
            PropertyKind::VersionId,
        ));
        properties.push(PropertyShape::new(
            "dcterms_is_version_of",
            Occurrence::ExactlyOne,
            PropertyKind::IsVersionOf,
        ));
    }

    for descriptor in schema.properties.iter().filter(|p| !is_reserved(&p.name)) {
        let occurs = if descriptor.required {
            Occurrence::ExactlyOne
        } else {
            Occurrence::ZeroOrOne
        };
        let kind = match descriptor.reference_target() {
            Some(target) => PropertyKind::Reference(target.clone()),
            None => PropertyKind::Literal(descriptor.data_type.value_type()),
        };
        properties.push(PropertyShape::new(descriptor.name.clone(), occurs, kind));
    }

    for rel in &schema.relationships {
        properties.push(PropertyShape::new(
            rel.name.source_name(),
            Occurrence::ZeroOrMany,
            PropertyKind::Relationship(rel.name.clone()),
        ));
    }

    ResourceShape {
        item_type: schema.item_type.clone(),
        versionable: schema.versionable,
        properties,
    }
}

// --- tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DataType, PropertyDescriptor, RelationshipDescriptor};
    use oxrdf::{Literal, NamedNode, Subject, Term};

    fn urls() -> ServiceUrls {
        ServiceUrls::new("http://localhost:5000/api/oslc", "http://localhost:5000/ns/plm#")
    }

    fn part_schema(versionable: bool) -> ItemSchema {
        ItemSchema {
            item_type: ItemTypeName::from_source("Part"),
            properties: vec![
                PropertyDescriptor::new("id", DataType::Item, true, None),
                PropertyDescriptor::new("name", DataType::String, false, None),
                PropertyDescriptor::new(
                    "material",
                    DataType::Item,
                    false,
                    Some(ItemTypeName::from_source("Material")),
                ),
                PropertyDescriptor::new("weight", DataType::parse("md5"), false, None),
            ],
            relationships: vec![RelationshipDescriptor {
                name: ItemTypeName::from_source("Part BOM"),
            }],
            versionable,
        }
    }

    #[test]
    fn versionable_shape_order() {
        let shape = synthesize(&part_schema(true));
        let names: Vec<_> = shape.properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "oslc_component",
                "oslc_version_id",
                "dcterms_is_version_of",
                "id",
                "name",
                "material",
                "weight",
                "Part BOM"
            ]
        );
        assert_eq!(shape.get("oslc_version_id").map(|p| p.occurs), Some(Occurrence::ZeroOrMany));
        assert_eq!(shape.get("dcterms_is_version_of").map(|p| p.occurs), Some(Occurrence::ExactlyOne));
    }

    #[test]
    fn non_versionable_shape_has_only_component() {
        let shape = synthesize(&part_schema(false));
        let synthetic: Vec<_> = shape.properties.iter().filter(|p| p.is_synthetic()).collect();
        assert_eq!(synthetic.len(), 1);
        assert_eq!(synthetic[0].kind, PropertyKind::Component);
        assert_eq!(synthetic[0].occurs, Occurrence::ZeroOrOne);
    }

    #[test]
    fn property_count_matches_schema() {
        for versionable in [true, false] {
            let schema = part_schema(versionable);
            let shape = synthesize(&schema);
            let expected_synthetic = if versionable { 3 } else { 1 };
            assert_eq!(
                shape.properties.len(),
                schema.properties.len() + schema.relationships.len() + expected_synthetic
            );
            assert_eq!(shape.single_valued().count(), schema.properties.len());
        }
    }

    #[test]
    fn property_kinds() {
        let shape = synthesize(&part_schema(true));
        assert_eq!(
            shape.get("id").map(|p| (&p.kind, p.occurs)),
            Some((&PropertyKind::Literal(ValueType::String), Occurrence::ExactlyOne))
        );
        assert_eq!(
            shape.get("material").map(|p| &p.kind),
            Some(&PropertyKind::Reference(ItemTypeName::from_source("Material")))
        );
        assert_eq!(
            shape.get("weight").map(|p| &p.kind),
            Some(&PropertyKind::Literal(ValueType::String))
        );
        assert_eq!(shape.expansions(), vec!["material"]);
        let rels: Vec<_> = shape.relationships().map(|(n, t)| (n, t.url_name())).collect();
        assert_eq!(rels, vec![("Part BOM", "Part.BOM".to_string())]);
    }

    #[test]
    fn reserved_names_are_dropped() {
        let mut schema = part_schema(false);
        schema
            .properties
            .push(PropertyDescriptor::new("oslc_component", DataType::String, false, None));
        let shape = synthesize(&schema);
        let count = shape.properties.iter().filter(|p| p.name == "oslc_component").count();
        assert_eq!(count, 1);
        assert!(is_reserved("dcterms_is_version_of"));
        assert!(!is_reserved("name"));
    }

    #[test]
    fn shape_graph_describes_properties() {
        let u = urls();
        let shape = synthesize(&part_schema(true));
        let graph = shape.to_graph(&u).unwrap();

        let root = Subject::from(NamedNode::new_unchecked(
            "http://localhost:5000/api/oslc/Part/resourceShape",
        ));
        let props: Vec<_> = graph
            .objects(&root, &NamedNode::new_unchecked(oslc::PROPERTY_PROP))
            .collect();
        assert_eq!(props.len(), shape.properties.len());

        let material = Subject::from(NamedNode::new_unchecked(
            "http://localhost:5000/api/oslc/Part/resourceShape#material",
        ));
        let defs: Vec<_> = graph
            .objects(&material, &NamedNode::new_unchecked(oslc::PROPERTY_DEFINITION))
            .cloned()
            .collect();
        assert_eq!(
            defs,
            vec![Term::from(NamedNode::new_unchecked(
                "http://localhost:5000/api/oslc/Material/resourceShape"
            ))]
        );

        let bom = Subject::from(NamedNode::new_unchecked(
            "http://localhost:5000/api/oslc/Part/resourceShape#Part.BOM",
        ));
        let occurs: Vec<_> = graph
            .objects(&bom, &NamedNode::new_unchecked(oslc::OCCURS))
            .cloned()
            .collect();
        assert_eq!(occurs, vec![Term::from(NamedNode::new_unchecked(oslc::ZERO_OR_MANY))]);

        let title = graph
            .objects(&root, &NamedNode::new_unchecked(dcterms::TITLE))
            .next()
            .cloned();
        assert_eq!(title, Some(Term::from(Literal::new_simple_literal("Part"))));
    }
}
