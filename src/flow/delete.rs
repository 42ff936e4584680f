use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{info, warn};

use super::Submission;
use crate::{api::RagApi, Config, Locale};

/// Blocking dialogs: the user must answer before the flow continues.
#[async_trait]
pub trait Prompter: Send + Sync {
    /// Asks a yes/no question. Anything but an explicit yes is a no.
    async fn confirm(&self, prompt: &str) -> bool;

    /// Shows a message and waits for the user to acknowledge it.
    async fn alert(&self, message: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteState {
    Idle,
    Confirming,
    Deleting,
}

/// Collection deletion. Results are reported through [`Prompter::alert`], not inline.
pub struct DeleteFlow {
    api: Arc<dyn RagApi>,
    locale: Locale,
    state: Mutex<DeleteState>,
}

impl DeleteFlow {
    pub fn new(api: Arc<dyn RagApi>, config: &Config) -> Self {
        Self {
            api,
            locale: config.locale,
            state: Mutex::new(DeleteState::Idle),
        }
    }

    pub async fn state(&self) -> DeleteState {
        *self.state.lock().await
    }

    /// Whether the delete control is enabled.
    pub async fn can_trigger(&self) -> bool {
        self.state().await == DeleteState::Idle
    }

    /// Confirms with the user, deletes the collection and alerts the outcome.
    pub async fn trigger(&self, prompter: &dyn Prompter) -> Submission {
        {
            let mut state = self.state.lock().await;
            if *state != DeleteState::Idle {
                return Submission::Busy;
            }
            *state = DeleteState::Confirming;
        }

        if !prompter.confirm(self.locale.delete_confirm()).await {
            *self.state.lock().await = DeleteState::Idle;
            return Submission::Declined;
        }

        *self.state.lock().await = DeleteState::Deleting;

        match self.api.delete_collection().await {
            Ok(ack) => {
                info!(message = ?ack.message, "collection deleted");
                prompter.alert(self.locale.delete_succeeded()).await;
            }
            Err(e) => {
                warn!("collection deletion failed: {e}");
                prompter.alert(e.message()).await;
            }
        }

        *self.state.lock().await = DeleteState::Idle;
        Submission::Sent
    }
}
