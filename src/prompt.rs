use async_trait::async_trait;
use dialoguer::{Confirm, Input};
use tracing::warn;

use crate::flow::Prompter;

/// Dialogs on the controlling terminal. A prompt that can't be shown counts as "no".
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalPrompter;

#[async_trait]
impl Prompter for TerminalPrompter {
    async fn confirm(&self, prompt: &str) -> bool {
        let prompt = prompt.to_string();
        let answer = tokio::task::spawn_blocking(move || {
            Confirm::new().with_prompt(prompt).default(false).interact()
        })
        .await;

        match answer {
            Ok(Ok(yes)) => yes,
            Ok(Err(e)) => {
                warn!("confirmation prompt failed: {e}");
                false
            }
            Err(e) => {
                warn!("confirmation prompt panicked: {e}");
                false
            }
        }
    }

    async fn alert(&self, message: &str) {
        let prompt = format!("{message} [Enter]");
        let ack = tokio::task::spawn_blocking(move || {
            Input::<String>::new()
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text()
        })
        .await;

        // no terminal to block on
        if !matches!(ack, Ok(Ok(_))) {
            println!("{message}");
        }
    }
}

/// Answers every confirmation with yes and prints alerts without waiting.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

#[async_trait]
impl Prompter for AssumeYes {
    async fn confirm(&self, _prompt: &str) -> bool {
        true
    }

    async fn alert(&self, message: &str) {
        println!("{message}");
    }
}
