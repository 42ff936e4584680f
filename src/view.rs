//! Plain-text rendering of flow state for the terminal.

use serde_json::Value;

use crate::{
    api::{HealthStatus, QueryResponse, SourcePassage},
    flow::{QueryState, UploadState},
    Locale,
};

pub fn status_card(health: &HealthStatus, locale: Locale) -> String {
    format!(
        "{}: {}\n{}: {}",
        locale.server_status(),
        health.status,
        locale.version(),
        health.version
    )
}

/// Formats a relevance score in [0, 1] as a percentage with one decimal.
pub fn score_percent(score: f64) -> String {
    format!("{:.1}%", score * 100.0)
}

fn metadata_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn source_block(index: usize, source: &SourcePassage, locale: Locale) -> String {
    let mut block = format!("[{} {}]", locale.source(), index + 1);
    if let Some(score) = source.score {
        block.push_str(&format!("  {}: {}", locale.similarity(), score_percent(score)));
    }
    block.push('\n');
    block.push_str(&source.text);
    block.push('\n');
    for (key, value) in &source.metadata {
        block.push_str(&format!("  {key}: {}\n", metadata_value(value)));
    }
    block
}

/// The answer followed by its sources, in the order the service ranked them.
pub fn answer_card(resp: &QueryResponse, locale: Locale) -> String {
    let mut out = format!("{}\n{}\n", locale.answer(), resp.answer);

    if !resp.sources.is_empty() {
        out.push_str(&format!("\n{} ({})\n", locale.sources(), locale.sources_hint()));
        for (index, source) in resp.sources.iter().enumerate() {
            out.push('\n');
            out.push_str(&source_block(index, source, locale));
        }
    }

    out
}

/// The inline message under the upload panel, if any.
pub fn upload_notice(state: &UploadState, locale: Locale) -> Option<String> {
    match state {
        UploadState::Failed(e) => Some(e.message().to_string()),
        UploadState::Success { .. } => Some(locale.upload_succeeded().to_string()),
        _ => None,
    }
}

/// Everything the query panel shows below the input.
pub fn query_output(state: &QueryState, locale: Locale) -> Option<String> {
    match state {
        QueryState::Failed(e) => Some(e.message().to_string()),
        QueryState::Answered(resp) => Some(answer_card(resp, locale)),
        _ => None,
    }
}
