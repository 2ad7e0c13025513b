//! Service provider and query capabilities.

use oxrdf::NamedNodeRef;
use tracing::debug;

use plm_oslc::vocab::{dcterms, oslc, rdfs};
use plm_oslc::{iri, ItemTypeName, PagingParams, ResourceGraph};

use super::{EngineError, Session};

impl Session<'_> {
    /// The service provider with one query capability per item type.
    ///
    /// A source with no item types yields an empty graph.
    pub async fn service_provider(&self) -> Result<ResourceGraph, EngineError> {
        let item_types = self.source.list_item_types(self.credential).await?;
        let mut graph = ResourceGraph::new();
        if item_types.is_empty() {
            return Ok(graph);
        }

        let provider = iri(self.urls.service_provider())?;
        let service = graph.blank_node();
        graph.insert_type(provider.clone(), NamedNodeRef::new_unchecked(oslc::SERVICE_PROVIDER));
        graph.insert(provider, NamedNodeRef::new_unchecked(oslc::SERVICE_PROP), service.clone());
        graph.insert_type(service.clone(), NamedNodeRef::new_unchecked(oslc::SERVICE));
        graph.insert(
            service.clone(),
            NamedNodeRef::new_unchecked(oslc::DOMAIN),
            iri(self.urls.vocab_ns())?,
        );

        for row in &item_types {
            let item_type = row.item_type();
            let capability = graph.blank_node();
            graph.insert_type(capability.clone(), NamedNodeRef::new_unchecked(oslc::QUERY_CAPABILITY));
            graph.insert_literal(
                capability.clone(),
                NamedNodeRef::new_unchecked(dcterms::TITLE),
                format!("Query Capability for ItemType: {}", item_type.source_name()),
            );
            graph.insert(
                capability.clone(),
                NamedNodeRef::new_unchecked(oslc::QUERY_BASE),
                iri(self.urls.query_base(&item_type))?,
            );
            graph.insert(
                capability.clone(),
                NamedNodeRef::new_unchecked(oslc::RESOURCE_TYPE),
                iri(self.urls.resource_type(&item_type))?,
            );
            graph.insert(
                capability.clone(),
                NamedNodeRef::new_unchecked(oslc::RESOURCE_SHAPE_PROP),
                iri(self.urls.shape(&item_type))?,
            );
            graph.insert(
                service.clone(),
                NamedNodeRef::new_unchecked(oslc::QUERY_CAPABILITY_PROP),
                capability,
            );
        }
        debug!("query: service provider lists {} item types", item_types.len());
        Ok(graph)
    }

    /// Members of an item type, one per config id, with an
    /// `oslc:ResponseInfo` when paging is active.
    pub async fn query_capability(
        &self,
        item_type: &ItemTypeName,
        paging: PagingParams,
    ) -> Result<ResourceGraph, EngineError> {
        self.require_item_type(item_type).await?;
        let page = paging.effective();
        let rows = self.source.list_items(self.credential, item_type, page).await?;

        let mut graph = ResourceGraph::new();
        let base_url = self.urls.query_base(item_type);
        let base = iri(base_url.as_str())?;
        for row in &rows {
            graph.insert(
                base.clone(),
                NamedNodeRef::new_unchecked(rdfs::MEMBER),
                iri(self.urls.item(item_type, row.config_id()))?,
            );
        }
        if let Some(page) = page {
            page.add_response_info(&mut graph, &base_url, item_type)?;
        }
        debug!("query: {item_type} lists {} rows, page {page:?}", rows.len());
        Ok(graph)
    }
}
