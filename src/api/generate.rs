use serde_json::Value;
use tracing::{debug, trace, warn};

use super::structures::GenerateRequest;
use crate::constants::{GENERATE_PATH, MAX_STREAM_LINE_BYTES};
use crate::error::AiError;
use crate::market::classify;

pub fn build_prompt(description: &str) -> String {
    let steps = classify(description).investigation_steps();
    format!("Bug: {description} How to investigate? Key checks: {steps}")
}

/// Text of a `response` field. Non-string scalars use their JSON form.
fn fragment_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Whether a `done` field marks the end of the stream.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => s.trim() == "true",
        _ => false,
    }
}

/// Accumulates the text fragments of a line-delimited JSON stream.
#[derive(Debug, Default)]
pub struct StreamAggregator {
    answer: String,
    done: bool,
}

impl StreamAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one line of the stream. Lines received after completion are ignored.
    pub fn push_line(&mut self, line: &str) {
        if self.done {
            return;
        }
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            return;
        }
        trace!("Raw generation line: {}", line);

        let chunk: Value = match serde_json::from_str(line) {
            Ok(chunk) => chunk,
            Err(e) => {
                warn!("Skipping malformed generation line {:?}: {}", line, e);
                return;
            }
        };

        if let Some(fragment) = chunk.get("response").and_then(fragment_text) {
            self.answer.push_str(&fragment);
            if !fragment.ends_with(char::is_whitespace) {
                self.answer.push(' ');
            }
        }
        if chunk.get("done").is_some_and(is_truthy) {
            self.done = true;
        }
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn finish(self) -> String {
        self.answer
    }
}

/// Sends the prompt for `description` to the generation endpoint and
/// aggregates the streamed answer.
///
/// The body is consumed chunk by chunk and reading stops as soon as a line
/// carries `"done": true`. A line longer than [`MAX_STREAM_LINE_BYTES`] fails
/// the request.
pub async fn generate(
    client: &reqwest::Client,
    base_url: &str,
    model: &str,
    description: &str,
) -> Result<String, AiError> {
    let url = format!("{base_url}{GENERATE_PATH}");
    let prompt = build_prompt(description);
    debug!("Requesting generation from {} with model {}", url, model);

    let mut response = client
        .post(&url)
        .json(&GenerateRequest {
            model,
            prompt: &prompt,
        })
        .send()
        .await?
        .error_for_status()?;

    let mut aggregator = StreamAggregator::new();
    let mut buffer: Vec<u8> = Vec::new();

    while let Some(bytes) = response.chunk().await? {
        buffer.extend_from_slice(&bytes);
        while let Some(end) = buffer.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = buffer.drain(..=end).collect();
            aggregator.push_line(&String::from_utf8_lossy(&line[..end]));
            if aggregator.is_done() {
                return Ok(aggregator.finish());
            }
        }
        if buffer.len() > MAX_STREAM_LINE_BYTES {
            return Err(AiError::LineTooLong(buffer.len()));
        }
    }
    if !buffer.is_empty() {
        aggregator.push_line(&String::from_utf8_lossy(&buffer));
    }

    Ok(aggregator.finish())
}
