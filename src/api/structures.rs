//! Payloads exchanged with the semantic search and generation endpoints.

use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct SearchRequest<'a> {
    pub query: &'a str,
}

#[derive(Serialize, Debug)]
pub struct GenerateRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
}
