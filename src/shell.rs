//! Interactive session: the terminal counterpart of the single-page front end.

use std::{io::Write, sync::Arc};

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use crate::{
    api::RagApi,
    flow::{
        DeleteFlow, HealthProbe, KeyPress, Prompter, QueryFlow, Submission, UploadFlow,
        UploadState,
    },
    view, Config,
};

/// The mounted page: one probe, one instance of each flow.
pub struct Session {
    config: Config,
    probe: HealthProbe,
    upload: UploadFlow,
    query: QueryFlow,
    delete: DeleteFlow,
    /// The previous query line ended in a line break.
    continuing: bool,
}

impl Session {
    /// Mounts the session, starting the health probe in the background.
    pub fn mount(api: Arc<dyn RagApi>, config: Config) -> Self {
        Self {
            probe: HealthProbe::mount(api.clone()),
            upload: UploadFlow::new(api.clone(), &config),
            query: QueryFlow::new(api.clone(), &config),
            delete: DeleteFlow::new(api, &config),
            config,
            continuing: false,
        }
    }

    /// Runs until `:quit` or end of input.
    pub async fn run<R>(mut self, input: R, prompter: &dyn Prompter) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        let mut probe_settled = false;

        println!("{}", self.config.locale.shell_help());

        loop {
            self.print_prompt().await?;

            tokio::select! {
                status = self.probe.settled(), if !probe_settled => {
                    probe_settled = true;
                    if let Some(status) = status {
                        println!("\n{}", view::status_card(&status, self.config.locale));
                    }
                }
                line = lines.next_line() => {
                    let Some(line) = line.context("failed to read input")? else {
                        break;
                    };
                    if !self.handle_line(&line, &mut lines, prompter).await? {
                        break;
                    }
                }
            }
        }

        Ok(())
    }

    async fn print_prompt(&self) -> Result<()> {
        let uploaded = matches!(self.upload.state().await, UploadState::Success { .. });
        let marker = if uploaded { " +" } else { "" };
        let lead = if self.continuing { "..." } else { "rag" };
        print!(
            "{lead}[{}={}{marker}]> ",
            self.config.locale.top_k_label(),
            self.query.top_k().await
        );
        std::io::stdout().flush().context("failed to flush stdout")
    }

    /// Handles one line of input. Returns `false` when the session should end.
    async fn handle_line<R>(
        &mut self,
        line: &str,
        lines: &mut Lines<R>,
        prompter: &dyn Prompter,
    ) -> Result<bool>
    where
        R: AsyncBufRead + Unpin,
    {
        let locale = self.config.locale;

        if !self.continuing {
            if let Some(command) = line.trim().strip_prefix(':') {
                let mut parts = command.split_whitespace();
                match (parts.next().unwrap_or_default(), parts.next()) {
                    ("quit" | "q", _) => return Ok(false),
                    ("help", _) => println!("{}", locale.shell_help()),
                    ("health", _) => {
                        if let Some(status) = self.probe.status() {
                            println!("{}", view::status_card(&status, locale));
                        }
                    }
                    ("k", Some(n)) => match n.parse::<i64>() {
                        Ok(top_k) => self.query.set_top_k(top_k).await,
                        Err(_) => println!("{}", locale.top_k_usage()),
                    },
                    ("upload", _) => self.upload_document(lines).await?,
                    ("delete", _) => {
                        self.delete.trigger(prompter).await;
                    }
                    _ => println!("{}", locale.unknown_command()),
                }
                return Ok(true);
            }

            self.query.set_query("").await;
        }

        for c in line.chars() {
            self.query.handle_key(KeyPress::Char(c)).await;
        }

        if line.ends_with('\\') {
            self.query.handle_key(KeyPress::Backspace).await;
            self.query.handle_key(KeyPress::ShiftEnter).await;
            self.continuing = true;
            return Ok(true);
        }

        self.continuing = false;
        if let Some(Submission::Sent | Submission::Invalid) =
            self.query.handle_key(KeyPress::Enter).await
        {
            if let Some(out) = view::query_output(&self.query.state().await, locale) {
                println!("{out}");
            }
        }

        Ok(true)
    }

    async fn upload_document<R>(&self, lines: &mut Lines<R>) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut text = String::new();
        while let Some(line) = lines.next_line().await.context("failed to read input")? {
            if line == "." {
                break;
            }
            text.push_str(&line);
            text.push('\n');
        }

        self.upload.set_text(text).await;
        self.upload.submit().await;

        if let Some(notice) = view::upload_notice(&self.upload.state().await, self.config.locale) {
            println!("{notice}");
        }
        Ok(())
    }
}
