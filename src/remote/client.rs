use std::time::Instant;

use hyper::ext::ReasonPhrase;
use reqwest::{Client, Method, Response, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::ClientConfig;
use crate::model::{Record, RecordId, RecordRequest};
use crate::remote::api::RecordsApi;
use crate::remote::error::RemoteError;
use crate::remote::timeout::TimeoutConfig;

/// Collection path, relative to the base URL.
pub const RECORDS_PATH: &str = "records/";

/// HTTP client for the records service.
///
/// Owns its own `reqwest::Client`; construct one per service address.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    client: Client,
    base_url: Url,
}

impl RemoteClient {
    pub fn new(base_url: &str, timeouts: TimeoutConfig) -> Result<Self, RemoteError> {
        let base_url = normalize_base_url(base_url)?;

        let client = Client::builder()
            .connect_timeout(timeouts.connect)
            .read_timeout(timeouts.read)
            .timeout(timeouts.total())
            .build()
            .map_err(RemoteError::Build)?;

        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, RemoteError> {
        Self::new(&config.base_url, TimeoutConfig::from(&config.timeouts))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn collection_url(&self) -> Result<Url, RemoteError> {
        self.join(RECORDS_PATH)
    }

    fn item_url(&self, id: RecordId) -> Result<Url, RemoteError> {
        self.join(&format!("{}{}", RECORDS_PATH, id))
    }

    fn join(&self, path: &str) -> Result<Url, RemoteError> {
        self.base_url
            .join(path)
            .map_err(|e| RemoteError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                message: e.to_string(),
            })
    }

    async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<&RecordRequest>,
    ) -> Result<Response, RemoteError> {
        let started = Instant::now();
        debug!(%method, %url, "Sending request");

        let mut builder = self.client.request(method.clone(), url.clone());
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            debug!(%method, %url, error = %e, "Request failed before a response arrived");
            RemoteError::Transport(e)
        })?;

        let status = response.status();
        debug!(
            %method,
            %url,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Received response"
        );

        if !status.is_success() {
            return Err(RemoteError::Status {
                status: status.as_u16(),
                reason: reason_phrase(&response),
            });
        }

        Ok(response)
    }
}

impl RecordsApi for RemoteClient {
    async fn list(&self, skip: u32, limit: u32) -> Result<Vec<Record>, RemoteError> {
        let mut url = self.collection_url()?;
        url.query_pairs_mut()
            .append_pair("skip", &skip.to_string())
            .append_pair("limit", &limit.to_string());

        let response = self.send(Method::GET, url, None).await?;
        read_json(response).await
    }

    async fn get_one(&self, id: RecordId) -> Result<Record, RemoteError> {
        let url = self.item_url(id)?;
        let response = self.send(Method::GET, url, None).await?;
        read_json(response).await
    }

    async fn create(&self, request: &RecordRequest) -> Result<Record, RemoteError> {
        let url = self.collection_url()?;
        let response = self.send(Method::POST, url, Some(request)).await?;
        read_json(response).await
    }

    async fn update(&self, id: RecordId, request: &RecordRequest) -> Result<Record, RemoteError> {
        let url = self.item_url(id)?;
        let response = self.send(Method::PUT, url, Some(request)).await?;
        read_json(response).await
    }

    async fn delete(&self, id: RecordId) -> Result<(), RemoteError> {
        let url = self.item_url(id)?;
        self.send(Method::DELETE, url, None).await?;
        Ok(())
    }
}

/// Status text as sent by the server. hyper only records the phrase when it
/// differs from the standard one, so fall back to that.
fn reason_phrase(response: &Response) -> String {
    match response.extensions().get::<ReasonPhrase>() {
        Some(reason) => String::from_utf8_lossy(reason.as_bytes()).into_owned(),
        None => response
            .status()
            .canonical_reason()
            .unwrap_or("Unknown")
            .to_string(),
    }
}

/// Parse a 2xx payload. A blank or `null` body is [`RemoteError::EmptyBody`].
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, RemoteError> {
    let bytes = response.bytes().await.map_err(RemoteError::Transport)?;
    let trimmed = bytes.trim_ascii();
    if trimmed.is_empty() || trimmed == b"null" {
        return Err(RemoteError::EmptyBody);
    }
    serde_json::from_slice(trimmed).map_err(RemoteError::Decode)
}

/// Parse the base address and make sure it ends in `/`, so joining
/// `records/` keeps any path prefix the service is mounted under.
fn normalize_base_url(raw: &str) -> Result<Url, RemoteError> {
    let with_slash = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{}/", raw)
    };

    let url = Url::parse(&with_slash).map_err(|e| RemoteError::InvalidBaseUrl {
        url: raw.to_string(),
        message: e.to_string(),
    })?;

    if url.cannot_be_a_base() {
        return Err(RemoteError::InvalidBaseUrl {
            url: raw.to_string(),
            message: "URL cannot be used as a base".to_string(),
        });
    }

    Ok(url)
}
