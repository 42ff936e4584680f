use std::sync::Arc;

use tokio::{sync::watch, task::JoinHandle};
use tracing::warn;

use crate::api::{HealthStatus, RagApi};

/// The status indicator. Probes the service once when mounted and never reports
/// a failure to the user.
pub struct HealthProbe {
    rx: watch::Receiver<Option<HealthStatus>>,
    task: JoinHandle<()>,
}

impl HealthProbe {
    /// Starts the probe in the background.
    pub fn mount(api: Arc<dyn RagApi>) -> Self {
        let (tx, rx) = watch::channel(None);
        let task = tokio::spawn(async move {
            if let Some(status) = Self::check(api.as_ref()).await {
                let _ = tx.send(Some(status));
            }
        });
        Self { rx, task }
    }

    /// Runs a single probe, logging and swallowing any failure.
    pub async fn check(api: &dyn RagApi) -> Option<HealthStatus> {
        match api.health_check().await {
            Ok(status) => Some(status),
            Err(e) => {
                warn!("health check failed: {e}");
                None
            }
        }
    }

    /// The status, once a probe has succeeded.
    pub fn status(&self) -> Option<HealthStatus> {
        self.rx.borrow().clone()
    }

    /// Waits for the probe to finish. `None` means it failed and no status
    /// will ever be shown.
    pub async fn settled(&mut self) -> Option<HealthStatus> {
        self.rx.changed().await.ok()?;
        self.rx.borrow_and_update().clone()
    }
}

impl Drop for HealthProbe {
    fn drop(&mut self) {
        self.task.abort();
    }
}
