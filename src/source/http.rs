//! REST collection source over HTTP.

use super::traits::{CollectionSource, RecordId};
use crate::error::{ConsoleError, Result};
use reqwest::blocking::{Client, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::time::Duration;

/// HTTP source configuration.
#[derive(Debug, Clone)]
pub struct HttpSourceConfig {
    /// Base URL of the REST API
    pub base_url: String,
    /// Collection path segment, e.g. `posts`
    pub resource: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for HttpSourceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://jsonplaceholder.typicode.com".to_string(),
            resource: "posts".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl HttpSourceConfig {
    /// URL of the whole collection.
    #[must_use]
    pub fn collection_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.resource.trim_matches('/')
        )
    }

    /// URL of one item.
    #[must_use]
    pub fn item_url(&self, id: &RecordId) -> String {
        format!("{}/{id}", self.collection_url())
    }
}

/// JSON REST collection: `GET`/`POST` on the collection, `PUT`/`DELETE` on
/// items.
pub struct HttpSource<T> {
    client: Client,
    config: HttpSourceConfig,
    _item: PhantomData<fn() -> T>,
}

/// Helper to convert reqwest send errors into transport errors
fn transport_error(context: &str, err: &reqwest::Error) -> ConsoleError {
    ConsoleError::transport(context, err.to_string())
}

/// Fail with a status error unless the response is 2xx.
fn check_status(context: &str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let reason = status
        .canonical_reason()
        .map_or_else(|| response.text().unwrap_or_default(), str::to_string);
    Err(ConsoleError::status(context, status.as_u16(), reason))
}

fn decode<T: DeserializeOwned>(context: &str, response: Response) -> Result<T> {
    response
        .json()
        .map_err(|e| ConsoleError::invalid_response(context, e.to_string()))
}

impl<T> HttpSource<T> {
    /// Create a new HTTP source.
    pub fn new(config: HttpSourceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| transport_error("Failed to create HTTP client", &e))?;

        Ok(Self {
            client,
            config,
            _item: PhantomData,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &HttpSourceConfig {
        &self.config
    }
}

impl<T> CollectionSource<T> for HttpSource<T>
where
    T: Serialize + DeserializeOwned,
{
    fn list(&self) -> Result<Vec<T>> {
        let url = self.config.collection_url();
        tracing::debug!(%url, "GET collection");
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| transport_error("Failed to fetch collection", &e))?;
        let items: Vec<T> = decode("parsing collection", check_status("listing", response)?)?;
        tracing::info!(count = items.len(), "Fetched collection");
        Ok(items)
    }

    fn create(&self, item: &T) -> Result<T> {
        let url = self.config.collection_url();
        tracing::debug!(%url, "POST item");
        let response = self
            .client
            .post(&url)
            .json(item)
            .send()
            .map_err(|e| transport_error("Failed to send create request", &e))?;
        decode("parsing created item", check_status("creating", response)?)
    }

    fn update(&self, id: &RecordId, item: &T) -> Result<T> {
        let url = self.config.item_url(id);
        tracing::debug!(%url, "PUT item");
        let response = self
            .client
            .put(&url)
            .json(item)
            .send()
            .map_err(|e| transport_error("Failed to send update request", &e))?;
        decode("parsing updated item", check_status("updating", response)?)
    }

    fn delete(&self, id: &RecordId) -> Result<()> {
        let url = self.config.item_url(id);
        tracing::debug!(%url, "DELETE item");
        let response = self
            .client
            .delete(&url)
            .send()
            .map_err(|e| transport_error("Failed to send delete request", &e))?;
        check_status("deleting", response)?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

impl<T> std::fmt::Debug for HttpSource<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpSource")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
