//! OSLC Configuration Management resources.
//!
//! A component is the version-independent identity of an item (its config
//! id); its streams are the item's generations. These builders only shape
//! already-validated data into graphs.

use oxrdf::NamedNodeRef;

use crate::graph::{iri, GraphError, ResourceGraph};
use crate::naming::ItemTypeName;
use crate::urls::ServiceUrls;
use crate::vocab::{dcterms, ldp, oslc_config, rdfs};

/// A configuration component: `configId` plus a display title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationComponent {
    pub config_id: String,
    pub title: Option<String>,
}

/// One generation of a component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationStream {
    pub stream_id: String,
    pub title: Option<String>,
}

impl ConfigurationComponent {
    /// The component resource with a link to its configurations.
    pub fn to_graph(
        &self,
        item_type: &ItemTypeName,
        urls: &ServiceUrls,
    ) -> Result<ResourceGraph, GraphError> {
        let mut graph = ResourceGraph::new();
        let node = iri(urls.component(item_type, &self.config_id))?;
        graph.insert_type(node.clone(), NamedNodeRef::new_unchecked(oslc_config::COMPONENT));
        if let Some(title) = &self.title {
            graph.insert_literal(node.clone(), NamedNodeRef::new_unchecked(dcterms::TITLE), title.as_str());
        }
        graph.insert(
            node,
            NamedNodeRef::new_unchecked(oslc_config::CONFIGURATIONS),
            iri(urls.configurations(item_type, &self.config_id))?,
        );
        Ok(graph)
    }
}

impl ConfigurationStream {
    /// The stream resource. `config_id` is the owning component.
    pub fn to_graph(
        &self,
        item_type: &ItemTypeName,
        config_id: &str,
        urls: &ServiceUrls,
    ) -> Result<ResourceGraph, GraphError> {
        let mut graph = ResourceGraph::new();
        let node = iri(urls.stream(item_type, config_id, &self.stream_id))?;
        graph.insert_type(node.clone(), NamedNodeRef::new_unchecked(oslc_config::STREAM));
        graph.insert_literal(
            node.clone(),
            NamedNodeRef::new_unchecked(dcterms::IDENTIFIER),
            self.stream_id.as_str(),
        );
        if let Some(title) = &self.title {
            graph.insert_literal(node, NamedNodeRef::new_unchecked(dcterms::TITLE), title.as_str());
        }
        Ok(graph)
    }
}

/// The components container: an `ldp:BasicContainer` at the components URL
/// whose `ldp:contains` members are typed, titled component resources.
///
/// Members are addressed by their component URL so every link resolves.
pub fn components_graph(
    item_type: &ItemTypeName,
    components: &[ConfigurationComponent],
    urls: &ServiceUrls,
) -> Result<ResourceGraph, GraphError> {
    let mut graph = ResourceGraph::new();
    let container = iri(urls.components(item_type))?;
    graph.insert_type(container.clone(), NamedNodeRef::new_unchecked(ldp::BASIC_CONTAINER));

    for component in components {
        let member = iri(urls.component(item_type, &component.config_id))?;
        graph.insert_type(member.clone(), NamedNodeRef::new_unchecked(oslc_config::COMPONENT));
        if let Some(title) = &component.title {
            graph.insert_literal(member.clone(), NamedNodeRef::new_unchecked(dcterms::TITLE), title.as_str());
        }
        graph.insert(container.clone(), NamedNodeRef::new_unchecked(ldp::CONTAINS), member);
    }
    Ok(graph)
}

/// The configurations of one component: one `rdfs:member` stream link per
/// generation. No streams yields an empty graph.
pub fn configurations_graph(
    item_type: &ItemTypeName,
    config_id: &str,
    streams: &[ConfigurationStream],
    urls: &ServiceUrls,
) -> Result<ResourceGraph, GraphError> {
    let mut graph = ResourceGraph::new();
    let container = iri(urls.configurations(item_type, config_id))?;
    for stream in streams {
        graph.insert(
            container.clone(),
            NamedNodeRef::new_unchecked(rdfs::MEMBER),
            iri(urls.stream(item_type, config_id, &stream.stream_id))?,
        );
    }
    Ok(graph)
}
