// src/services/odata.rs

//! OData service client.
//!
//! Issues the two requests a sync needs: a `$metadata` request whose body is
//! discarded, then the entity-set request whose `value` array becomes the
//! dataset.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::{Dataset, ServiceConfig};
use crate::utils::http;
use crate::utils::url::{normalize_base, service_url};

/// Resource name of the service metadata document.
pub const METADATA_RESOURCE: &str = "$metadata";

/// A remote source of datasets.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Request the service metadata. Only the status matters.
    async fn fetch_metadata(&self) -> Result<()>;

    /// Fetch the records of an entity set.
    async fn fetch_entity_set(&self, entity_set: &str) -> Result<Dataset>;
}

/// reqwest-backed OData client.
#[derive(Debug, Clone)]
pub struct ODataClient {
    client: Client,
    base_url: String,
}

impl ODataClient {
    /// Create a client from service settings.
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let client = http::create_client(config)?;
        Ok(Self::with_client(client, &config.base_url))
    }

    /// Wrap an existing HTTP client.
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: normalize_base(base_url),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET a resource and fail on any non-success status.
    async fn get(&self, resource: &str) -> Result<reqwest::Response> {
        let url = service_url(&self.base_url, resource)?;
        log::debug!("GET {}", url);

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Transport {
                url: url.to_string(),
                status,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl DatasetSource for ODataClient {
    async fn fetch_metadata(&self) -> Result<()> {
        let response = self.get(METADATA_RESOURCE).await?;
        let body = response.bytes().await?;
        log::debug!("Metadata request ok ({} bytes discarded)", body.len());
        Ok(())
    }

    async fn fetch_entity_set(&self, entity_set: &str) -> Result<Dataset> {
        let response = self.get(entity_set).await?;
        let body = response.bytes().await?;
        let records = extract_records(&body)?;
        log::info!("Fetched {} records from {}", records.len(), entity_set);
        Ok(records)
    }
}

/// Pull the records out of an OData JSON response body.
///
/// The body must be a JSON object whose `value` key holds a non-empty array
/// of objects. Anything else is reported as an empty payload.
pub fn extract_records(body: &[u8]) -> Result<Dataset> {
    let parsed: Value = serde_json::from_slice(body).map_err(|e| {
        log::warn!("Response body is not valid JSON: {}", e);
        AppError::empty_payload()
    })?;

    let items = match parsed {
        Value::Object(mut root) => match root.remove("value") {
            Some(Value::Array(items)) => items,
            _ => return Err(AppError::empty_payload()),
        },
        _ => return Err(AppError::empty_payload()),
    };

    if items.is_empty() {
        return Err(AppError::empty_payload());
    }

    items
        .into_iter()
        .map(|item| match item {
            Value::Object(record) => Ok(record),
            other => {
                log::warn!("Non-object entry in value array: {}", other);
                Err(AppError::empty_payload())
            }
        })
        .collect()
}
