use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::{
    api::*,
    error::{Error, Result},
    Config, Locale,
};

/// A [`RagApi`] that talks to the service over HTTP. Clones share the connection pool.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    http: Client,
    base: String,
    locale: Locale,
}

impl RemoteClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .context("failed to build http client")?;

        Ok(Self {
            http,
            base: config.api_url.trim_end_matches('/').to_string(),
            locale: config.locale,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    /// Sends the request and returns the body of a successful response.
    ///
    /// Failures become [`Error::RequestFailed`] carrying the server's message, or
    /// `fallback` when the server didn't supply one.
    async fn execute(&self, request: RequestBuilder, fallback: &str) -> Result<String> {
        let resp = request.send().await.map_err(|e| {
            warn!("request failed to send: {e}");
            Error::RequestFailed(fallback.into())
        })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            warn!("failed to read response body: {e}");
            Error::RequestFailed(fallback.into())
        })?;

        if !status.is_success() {
            debug!(%status, %body, "service returned an error");
            return Err(Error::RequestFailed(
                error_message(&body).unwrap_or_else(|| fallback.into()),
            ));
        }

        Ok(body)
    }
}

/// Decodes a successful response body, mapping malformed bodies to `fallback`.
fn decode<T: DeserializeOwned>(body: &str, fallback: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| {
        warn!("malformed response body: {e}");
        Error::RequestFailed(fallback.into())
    })
}

/// Decodes an acknowledgement. Bodies that aren't the expected object still count as success.
fn decode_ack<T: DeserializeOwned + Default>(body: &str) -> T {
    serde_json::from_str(body).unwrap_or_default()
}

/// Extracts a human-readable message from an error body.
///
/// Prefers `message`, then a string `detail`, then the `msg` fields of a `detail` list.
pub fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;

    let non_empty = |s: &str| (!s.trim().is_empty()).then(|| s.to_string());

    if let Some(m) = value.get("message").and_then(Value::as_str).and_then(non_empty) {
        return Some(m);
    }

    match value.get("detail")? {
        Value::String(s) => non_empty(s),
        Value::Array(items) => {
            let msgs = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect::<Vec<_>>();
            non_empty(&msgs.join("; "))
        }
        _ => None,
    }
}

#[async_trait]
impl RagApi for RemoteClient {
    #[instrument(skip_all)]
    async fn health_check(&self) -> Result<HealthStatus> {
        let resp = self
            .http
            .get(self.url("/health"))
            .send()
            .await
            .map_err(|e| Error::ServiceUnavailable(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::ServiceUnavailable(format!(
                "{} ({status})",
                self.locale.health_failed()
            )));
        }

        resp.json()
            .await
            .map_err(|e| Error::ServiceUnavailable(e.to_string()))
    }

    #[instrument(skip_all)]
    async fn upload_document(&self, request: UploadRequest) -> Result<UploadAck> {
        let body = self
            .execute(
                self.http.post(self.url("/documents/upload")).json(&request),
                self.locale.upload_failed(),
            )
            .await?;
        Ok(decode_ack(&body))
    }

    #[instrument(skip_all, fields(top_k = request.top_k))]
    async fn query(&self, request: QueryRequest) -> Result<QueryResponse> {
        let fallback = self.locale.query_failed();
        let body = self
            .execute(self.http.post(self.url("/query")).json(&request), fallback)
            .await?;
        decode(&body, fallback)
    }

    #[instrument(skip_all)]
    async fn delete_collection(&self) -> Result<DeleteAck> {
        let body = self
            .execute(
                self.http.delete(self.url("/collection")),
                self.locale.delete_failed(),
            )
            .await?;
        Ok(decode_ack(&body))
    }
}
