//! [`Source`] over the PLM server's OData endpoint.
//!
//! Every call is a single GET with the caller's bearer token. A 404 on a
//! keyed lookup means "no such entity"; on a collection it means "no rows".
//! Transport errors and timeouts are [`SourceError::Unavailable`], other
//! non-2xx answers [`SourceError::Rejected`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::ACCEPT, Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use plm_oslc::{ItemTypeName, Page};
use plm_oslc_odata::{
    decode, queries, ItemRow, ItemSelector, ItemTypeRow, ODataCollection, ODataQuery, PropertyRow,
    RelationshipRow,
};

use super::{Credential, Source, SourceError};

pub struct HttpSource {
    client: Client,
    odata_root: String,
}

impl HttpSource {
    /// Source for the server at `base_api_uri`; the OData root is
    /// `{base_api_uri}/server/odata/`.
    pub fn new(base_api_uri: &str, timeout: Duration) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::Unavailable(format!("failed to build HTTP client: {e}")))?;
        Ok(Self::with_client(
            client,
            format!("{}/server/odata/", base_api_uri.trim_end_matches('/')),
        ))
    }

    /// Source over an explicit OData root, e.g. a test server.
    pub fn with_client(client: Client, odata_root: impl Into<String>) -> Self {
        Self {
            client,
            odata_root: odata_root.into(),
        }
    }

    pub fn odata_root(&self) -> &str {
        &self.odata_root
    }

    /// GET one query. `Ok(None)` on 404.
    async fn fetch(&self, credential: &Credential, query: &ODataQuery) -> Result<Option<Vec<u8>>, SourceError> {
        let url = query.to_url(&self.odata_root);
        debug!(query = %query, "source request");

        let response = self
            .client
            .get(&url)
            .bearer_auth(credential.token())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| SourceError::Unavailable(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!(query = %query, "source returned 404");
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| SourceError::Unavailable(e.to_string()))?;
        Ok(Some(body.to_vec()))
    }

    async fn collection<T: DeserializeOwned>(
        &self,
        credential: &Credential,
        query: &ODataQuery,
    ) -> Result<Vec<T>, SourceError> {
        match self.fetch(credential, query).await? {
            Some(body) => Ok(decode::<ODataCollection<T>>(&body)?.value),
            None => Ok(Vec::new()),
        }
    }

    async fn entity<T: DeserializeOwned>(
        &self,
        credential: &Credential,
        query: &ODataQuery,
    ) -> Result<Option<T>, SourceError> {
        match self.fetch(credential, query).await? {
            Some(body) => Ok(Some(decode::<T>(&body)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl Source for HttpSource {
    async fn list_item_types(&self, credential: &Credential) -> Result<Vec<ItemTypeRow>, SourceError> {
        self.collection(credential, &queries::item_types()).await
    }

    async fn get_item_type(
        &self,
        credential: &Credential,
        item_type: &ItemTypeName,
    ) -> Result<Option<ItemTypeRow>, SourceError> {
        let rows: Vec<ItemTypeRow> = self.collection(credential, &queries::item_type(item_type)).await?;
        Ok(rows.into_iter().next())
    }

    async fn list_properties(
        &self,
        credential: &Credential,
        item_type: &ItemTypeName,
    ) -> Result<Vec<PropertyRow>, SourceError> {
        self.collection(credential, &queries::properties(item_type)).await
    }

    async fn list_relationships(
        &self,
        credential: &Credential,
        item_type: &ItemTypeName,
    ) -> Result<Vec<RelationshipRow>, SourceError> {
        self.collection(credential, &queries::relationships(item_type)).await
    }

    async fn list_items(
        &self,
        credential: &Credential,
        item_type: &ItemTypeName,
        page: Option<Page>,
    ) -> Result<Vec<ItemRow>, SourceError> {
        self.collection(credential, &queries::instances(item_type, page)).await
    }

    async fn get_expanded_item(
        &self,
        credential: &Credential,
        item_type: &ItemTypeName,
        selector: &ItemSelector,
        expansions: &[&str],
    ) -> Result<Option<Value>, SourceError> {
        let query = queries::expanded_item(item_type, selector, expansions);
        self.entity(credential, &query).await
    }

    async fn list_related(
        &self,
        credential: &Credential,
        relationship: &ItemTypeName,
        item_id: &str,
    ) -> Result<Vec<ItemRow>, SourceError> {
        self.collection(credential, &queries::related(relationship, item_id)).await
    }

    async fn list_generations(
        &self,
        credential: &Credential,
        item_type: &ItemTypeName,
        config_id: &str,
    ) -> Result<Vec<ItemRow>, SourceError> {
        self.collection(credential, &queries::generations(item_type, config_id)).await
    }

    async fn get_item(
        &self,
        credential: &Credential,
        item_type: &ItemTypeName,
        item_id: &str,
    ) -> Result<Option<ItemRow>, SourceError> {
        self.entity(credential, &queries::item_by_id(item_type, item_id)).await
    }

    async fn find_by_config_id(
        &self,
        credential: &Credential,
        item_type: &ItemTypeName,
        config_id: &str,
    ) -> Result<Vec<ItemRow>, SourceError> {
        self.collection(credential, &queries::items_by_config_id(item_type, config_id))
            .await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
