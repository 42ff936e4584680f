use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use super::Submission;
use crate::{
    api::{QueryRequest, QueryResponse, RagApi},
    config::DEFAULT_TOP_K,
    Config, Error, Locale,
};

/// Presentation state of the query panel.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryState {
    Idle,
    /// Held only while the input is checked.
    Validating,
    Searching,
    Answered(QueryResponse),
    Failed(Error),
}

impl QueryState {
    /// The answer currently on screen, if any.
    pub fn answer(&self) -> Option<&QueryResponse> {
        match self {
            QueryState::Answered(resp) => Some(resp),
            _ => None,
        }
    }
}

/// Keyboard input to the single-line query field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPress {
    Char(char),
    Backspace,
    /// Submits; never inserted into the text.
    Enter,
    /// Inserts a line break without submitting.
    ShiftEnter,
}

#[derive(Debug)]
struct Panel {
    query: String,
    top_k: i64,
    state: QueryState,
}

/// Question answering: validate, search, show the latest answer only.
pub struct QueryFlow {
    api: Arc<dyn RagApi>,
    locale: Locale,
    panel: Mutex<Panel>,
}

impl QueryFlow {
    pub fn new(api: Arc<dyn RagApi>, config: &Config) -> Self {
        Self {
            api,
            locale: config.locale,
            panel: Mutex::new(Panel {
                query: String::new(),
                top_k: DEFAULT_TOP_K,
                state: QueryState::Idle,
            }),
        }
    }

    pub async fn set_query(&self, query: impl Into<String>) {
        self.panel.lock().await.query = query.into();
    }

    pub async fn query(&self) -> String {
        self.panel.lock().await.query.clone()
    }

    /// Sets the number of passages to request. Sent to the service as entered.
    pub async fn set_top_k(&self, top_k: i64) {
        self.panel.lock().await.top_k = top_k;
    }

    pub async fn top_k(&self) -> i64 {
        self.panel.lock().await.top_k
    }

    pub async fn state(&self) -> QueryState {
        self.panel.lock().await.state.clone()
    }

    /// Whether the submit control is enabled.
    pub async fn can_submit(&self) -> bool {
        let panel = self.panel.lock().await;
        panel.state != QueryState::Searching && !panel.query.trim().is_empty()
    }

    /// Applies a key press to the query field, submitting on a plain Enter.
    pub async fn handle_key(&self, key: KeyPress) -> Option<Submission> {
        {
            let mut panel = self.panel.lock().await;
            match key {
                KeyPress::Char(c) => panel.query.push(c),
                KeyPress::Backspace => {
                    panel.query.pop();
                }
                KeyPress::ShiftEnter => panel.query.push('\n'),
                KeyPress::Enter => {}
            }
        }

        match key {
            KeyPress::Enter => Some(self.submit().await),
            _ => None,
        }
    }

    /// Asks the current question. Any previous answer is cleared as soon as the
    /// request is issued.
    pub async fn submit(&self) -> Submission {
        let request = {
            let mut panel = self.panel.lock().await;
            if panel.state == QueryState::Searching {
                return Submission::Busy;
            }

            panel.state = QueryState::Validating;
            if panel.query.trim().is_empty() {
                panel.state =
                    QueryState::Failed(Error::Validation(self.locale.empty_query().into()));
                return Submission::Invalid;
            }

            panel.state = QueryState::Searching;
            QueryRequest {
                query: panel.query.clone(),
                top_k: panel.top_k,
            }
        };

        let result = self.api.query(request).await;

        let mut panel = self.panel.lock().await;
        panel.state = match result {
            Ok(resp) => {
                debug!(sources = resp.sources.len(), "query answered");
                QueryState::Answered(resp)
            }
            Err(e) => QueryState::Failed(e),
        };

        Submission::Sent
    }
}
