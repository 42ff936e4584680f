use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;

/// Liveness and version reported by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
}

/// A document to index.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UploadRequest {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

impl UploadRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            metadata: None,
        }
    }
}

/// Acknowledgement of an indexed document. Every field is optional on the wire.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UploadAck {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub document_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// A natural-language question and the number of passages to retrieve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub query: String,
    pub top_k: i64,
}

/// A retrieved passage cited by an answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourcePassage {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: Map<String, Value>,
}

/// A generated answer with its sources, in the service's relevance order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub answer: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sources: Vec<SourcePassage>,
}

/// Treats an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Acknowledgement of a collection deletion.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DeleteAck {
    #[serde(default)]
    pub message: Option<String>,
}

/// The remote RAG service as seen by the front end.
///
/// Implementations perform no input validation; callers are expected to reject
/// blank text before calling.
#[async_trait]
pub trait RagApi: Send + Sync + 'static {
    /// Probes the service. Fails with [`Error::ServiceUnavailable`](crate::Error::ServiceUnavailable).
    async fn health_check(&self) -> Result<HealthStatus>;

    /// Indexes a document.
    async fn upload_document(&self, request: UploadRequest) -> Result<UploadAck>;

    /// Retrieves passages for the query and generates an answer from them.
    async fn query(&self, request: QueryRequest) -> Result<QueryResponse>;

    /// Deletes every indexed document. Irreversible.
    async fn delete_collection(&self) -> Result<DeleteAck>;
}
