use std::{io::read_to_string, path::PathBuf, process::ExitCode, sync::Arc};

use anyhow::{Context, Result};
use clap::*;
use rag_frontend::{
    api::RagApi,
    config::DEFAULT_TOP_K,
    flow::*,
    prompt::{AssumeYes, TerminalPrompter},
    shell::Session,
    view, Config, Locale, RemoteClient,
};
use serde_json::Value;
use tokio::io::BufReader;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Base URL of the RAG API, overrides API_URL
    #[arg(long, global = true)]
    api_url: Option<String>,
    /// Language of messages (en, ko), overrides RAG_LOCALE
    #[arg(long, global = true)]
    locale: Option<Locale>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the server status and version
    Health {},
    /// Upload a document from a file or stdin to be indexed
    Upload {
        file: Option<PathBuf>,
        /// Metadata attached to the document, as key=value
        #[arg(long = "meta", value_parser = parse_meta)]
        meta: Vec<(String, String)>,
    },
    /// Ask a question about the indexed documents
    Query {
        query: Option<String>,
        /// Number of source passages to retrieve
        #[arg(short = 'k', long, default_value_t = DEFAULT_TOP_K, allow_negative_numbers = true)]
        top_k: i64,
    },
    /// Delete every indexed document
    Delete {
        /// Don't ask for confirmation
        #[arg(long)]
        yes: bool,
    },
    /// Runs an interactive session
    Shell {},
}

fn parse_meta(s: &str) -> Result<(String, String)> {
    let (key, value) = s
        .split_once('=')
        .with_context(|| format!("expected key=value, got `{s}`"))?;
    Ok((key.trim().to_string(), value.trim().to_string()))
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if dotenv::dotenv().is_err() {
        warn!("didn't load a .env file")
    }

    let args = Cli::parse();

    let mut config = Config::from_env().context("failed to load configuration")?;
    if let Some(url) = args.api_url {
        config.api_url = url;
    }
    if let Some(locale) = args.locale {
        config.locale = locale;
    }
    let locale = config.locale;

    let api: Arc<dyn RagApi> =
        Arc::new(RemoteClient::new(&config).context("failed to create client")?);

    match args.command {
        Commands::Health {} => {
            if let Some(status) = HealthProbe::check(api.as_ref()).await {
                println!("{}", view::status_card(&status, locale));
            }
        }
        Commands::Upload { file, meta } => {
            let text = match file {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read {}", path.display()))?,
                None => {
                    println!("{}", locale.document_prompt());
                    read_to_string(std::io::stdin()).context("failed to read stdin")?
                }
            };

            let flow = UploadFlow::new(api, &config);
            if !meta.is_empty() {
                let metadata = meta
                    .into_iter()
                    .map(|(k, v)| (k, Value::String(v)))
                    .collect();
                flow.set_metadata(Some(metadata)).await;
            }
            flow.set_text(text).await;
            flow.submit().await;

            let state = flow.state().await;
            if let Some(notice) = view::upload_notice(&state, locale) {
                println!("{notice}");
            }
            if matches!(state, UploadState::Failed(_)) {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Query { query, top_k } => {
            let query = match query {
                Some(query) => query,
                None => {
                    println!("{}", locale.question_prompt());
                    read_to_string(std::io::stdin()).context("failed to read stdin")?
                }
            };

            let flow = QueryFlow::new(api, &config);
            flow.set_query(query).await;
            flow.set_top_k(top_k).await;
            flow.submit().await;

            let state = flow.state().await;
            if let Some(out) = view::query_output(&state, locale) {
                println!("{out}");
            }
            if matches!(state, QueryState::Failed(_)) {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Delete { yes } => {
            let flow = DeleteFlow::new(api, &config);
            let prompter: &dyn Prompter = if yes { &AssumeYes } else { &TerminalPrompter };
            flow.trigger(prompter).await;
        }
        Commands::Shell {} => {
            Session::mount(api, config)
                .run(BufReader::new(tokio::io::stdin()), &TerminalPrompter)
                .await?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
