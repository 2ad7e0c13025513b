//! OSLC Configuration Management views: components and their streams.

use plm_oslc::{
    components_graph, configurations_graph, ConfigurationComponent, ConfigurationStream, ItemTypeName,
    PagingParams, ResourceGraph,
};
use plm_oslc_odata::ItemRow;

use super::{EngineError, Session};

impl Session<'_> {
    /// Components of an item type, one per config id, optionally paged.
    pub async fn components(
        &self,
        item_type: &ItemTypeName,
        paging: PagingParams,
    ) -> Result<ResourceGraph, EngineError> {
        self.require_item_type(item_type).await?;
        let page = paging.effective();
        let rows = self.source.list_items(self.credential, item_type, page).await?;

        let mut components: Vec<ConfigurationComponent> = Vec::new();
        for row in &rows {
            if components.iter().any(|c| c.config_id == row.config_id()) {
                continue;
            }
            components.push(ConfigurationComponent {
                config_id: row.config_id().to_string(),
                title: row.keyed_name.clone(),
            });
        }

        let mut graph = components_graph(item_type, &components, self.urls)?;
        if let Some(page) = page {
            page.add_response_info(&mut graph, &self.urls.components(item_type), item_type)?;
        }
        Ok(graph)
    }

    /// One component. Its title is the keyed name of the configuration's
    /// last listed item.
    pub async fn component(&self, item_type: &ItemTypeName, config_id: &str) -> Result<ResourceGraph, EngineError> {
        let rows = self.validate_config_id(item_type, config_id).await?;
        let component = ConfigurationComponent {
            config_id: config_id.to_string(),
            title: rows.last().and_then(|row| row.keyed_name.clone()),
        };
        Ok(component.to_graph(item_type, self.urls)?)
    }

    /// Stream links for every generation above zero. No generations gives
    /// an empty graph.
    pub async fn configurations(
        &self,
        item_type: &ItemTypeName,
        config_id: &str,
    ) -> Result<ResourceGraph, EngineError> {
        let streams = self.streams(item_type, config_id).await?;
        Ok(configurations_graph(item_type, config_id, &streams, self.urls)?)
    }

    pub async fn stream(
        &self,
        item_type: &ItemTypeName,
        config_id: &str,
        stream_id: &str,
    ) -> Result<ResourceGraph, EngineError> {
        let stream = self
            .streams(item_type, config_id)
            .await?
            .into_iter()
            .find(|s| s.stream_id == stream_id)
            .ok_or_else(|| EngineError::StreamNotFound {
                config_id: config_id.to_string(),
                stream_id: stream_id.to_string(),
            })?;
        Ok(stream.to_graph(item_type, config_id, self.urls)?)
    }

    async fn streams(
        &self,
        item_type: &ItemTypeName,
        config_id: &str,
    ) -> Result<Vec<ConfigurationStream>, EngineError> {
        self.validate_config_id(item_type, config_id).await?;
        let rows = self
            .source
            .list_generations(self.credential, item_type, config_id)
            .await?;
        Ok(rows.into_iter().map(to_stream).collect())
    }
}

fn to_stream(row: ItemRow) -> ConfigurationStream {
    ConfigurationStream {
        stream_id: row.id,
        title: row.keyed_name,
    }
}
