use std::{sync::Arc, time::Duration};

use serde_json::{Map, Value};
use tokio::{sync::Mutex, time::Instant};
use tracing::debug;

use super::Submission;
use crate::{
    api::{RagApi, UploadRequest},
    Config, Error, Locale,
};

/// Presentation state of the upload panel.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadState {
    Idle,
    /// Held only while the input is checked.
    Validating,
    Submitting,
    /// The confirmation is shown until `until`, then the panel returns to idle.
    Success { until: Instant },
    Failed(Error),
}

#[derive(Debug)]
struct Panel {
    text: String,
    metadata: Option<Map<String, Value>>,
    state: UploadState,
}

impl Panel {
    fn expire(&mut self) {
        if let UploadState::Success { until } = self.state {
            if Instant::now() >= until {
                self.state = UploadState::Idle;
            }
        }
    }
}

/// Document upload: validate, submit, confirm for a fixed window.
pub struct UploadFlow {
    api: Arc<dyn RagApi>,
    locale: Locale,
    window: Duration,
    panel: Mutex<Panel>,
}

impl UploadFlow {
    pub fn new(api: Arc<dyn RagApi>, config: &Config) -> Self {
        Self {
            api,
            locale: config.locale,
            window: config.success_window,
            panel: Mutex::new(Panel {
                text: String::new(),
                metadata: None,
                state: UploadState::Idle,
            }),
        }
    }

    pub async fn set_text(&self, text: impl Into<String>) {
        self.panel.lock().await.text = text.into();
    }

    pub async fn text(&self) -> String {
        self.panel.lock().await.text.clone()
    }

    /// Metadata attached to every subsequent upload.
    pub async fn set_metadata(&self, metadata: Option<Map<String, Value>>) {
        self.panel.lock().await.metadata = metadata;
    }

    pub async fn state(&self) -> UploadState {
        let mut panel = self.panel.lock().await;
        panel.expire();
        panel.state.clone()
    }

    /// Whether the submit control is enabled.
    pub async fn can_submit(&self) -> bool {
        let panel = self.panel.lock().await;
        panel.state != UploadState::Submitting && !panel.text.trim().is_empty()
    }

    /// Uploads the current text. Blank text fails validation without a request.
    pub async fn submit(&self) -> Submission {
        let request = {
            let mut panel = self.panel.lock().await;
            if panel.state == UploadState::Submitting {
                return Submission::Busy;
            }

            panel.state = UploadState::Validating;
            if panel.text.trim().is_empty() {
                panel.state = UploadState::Failed(Error::Validation(
                    self.locale.empty_document().into(),
                ));
                return Submission::Invalid;
            }

            panel.state = UploadState::Submitting;
            UploadRequest {
                text: panel.text.clone(),
                metadata: panel.metadata.clone(),
            }
        };

        let result = self.api.upload_document(request).await;

        let mut panel = self.panel.lock().await;
        panel.state = match result {
            Ok(ack) => {
                debug!(document_id = ?ack.document_id, "document uploaded");
                panel.text.clear();
                UploadState::Success {
                    until: Instant::now() + self.window,
                }
            }
            Err(e) => UploadState::Failed(e),
        };

        Submission::Sent
    }
}
