use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex,
};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::{api::*, error::Result, Error};

/// Scripted [`RagApi`] that counts calls and can hold requests in flight.
#[derive(Default)]
pub struct FakeApi {
    pub health: Mutex<Option<Result<HealthStatus>>>,
    pub uploads: Mutex<Vec<Result<UploadAck>>>,
    pub queries: Mutex<Vec<Result<QueryResponse>>>,
    pub deletes: Mutex<Vec<Result<DeleteAck>>>,
    pub upload_requests: Mutex<Vec<UploadRequest>>,
    pub query_requests: Mutex<Vec<QueryRequest>>,
    pub health_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
    gate: Option<Notify>,
}

impl FakeApi {
    /// Requests wait for [`FakeApi::release`] before resolving.
    pub fn gated() -> Self {
        Self {
            gate: Some(Notify::new()),
            ..Default::default()
        }
    }

    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    pub fn upload_calls(&self) -> usize {
        self.upload_requests.lock().unwrap().len()
    }

    pub fn query_calls(&self) -> usize {
        self.query_requests.lock().unwrap().len()
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }

    async fn wait(&self) {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
    }
}

fn next<T: Default>(queue: &Mutex<Vec<Result<T>>>) -> Result<T> {
    let mut queue = queue.lock().unwrap();
    if queue.is_empty() {
        Ok(T::default())
    } else {
        queue.remove(0)
    }
}

#[async_trait]
impl RagApi for FakeApi {
    async fn health_check(&self) -> Result<HealthStatus> {
        self.health_calls.fetch_add(1, Ordering::SeqCst);
        self.wait().await;
        self.health
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Err(Error::ServiceUnavailable("connection refused".into())))
    }

    async fn upload_document(&self, request: UploadRequest) -> Result<UploadAck> {
        self.upload_requests.lock().unwrap().push(request);
        self.wait().await;
        next(&self.uploads)
    }

    async fn query(&self, request: QueryRequest) -> Result<QueryResponse> {
        self.query_requests.lock().unwrap().push(request);
        self.wait().await;
        let mut queue = self.queries.lock().unwrap();
        if queue.is_empty() {
            Ok(QueryResponse {
                answer: String::new(),
                sources: vec![],
            })
        } else {
            queue.remove(0)
        }
    }

    async fn delete_collection(&self) -> Result<DeleteAck> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        self.wait().await;
        next(&self.deletes)
    }
}
