use tracing::debug;

use super::structures::SearchRequest;
use crate::constants::SEARCH_PATH;
use crate::error::AiError;

/// Queries the semantic search endpoint and returns its raw body.
///
/// Any non-success status, transport error or empty body is an error, and
/// means the caller should fall back to generation. An empty body carries no
/// related issues, so a generated answer is the more useful resolution.
pub async fn search_related(
    client: &reqwest::Client,
    base_url: &str,
    description: &str,
) -> Result<String, AiError> {
    let url = format!("{base_url}{SEARCH_PATH}");
    debug!("Querying semantic search at {}", url);

    let body = client
        .post(&url)
        .json(&SearchRequest { query: description })
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    if body.is_empty() {
        Err(AiError::EmptySearch)
    } else {
        Ok(body)
    }
}
