//! Clients for the external AI services and the resolution pipeline built on them.
//!
//! [`Resolver::resolve`] first asks the semantic search service for related
//! issues. When that is unavailable it prompts the generation service with the
//! bug description and the checklist of the inferred market. It never fails:
//! a broken generation call yields [`AI_UNAVAILABLE`].

pub mod generate;
pub mod search;
pub mod structures;

use tracing::{info, warn};

use crate::config::AiConfig;
use crate::constants::{AI_UNAVAILABLE, SEARCH_PREFIX};

#[derive(Debug, Clone)]
pub struct Resolver {
    client: reqwest::Client,
    search_url: String,
    generate_url: String,
    model: String,
}

impl Resolver {
    pub fn new(client: reqwest::Client, config: &AiConfig) -> Self {
        Self {
            client,
            search_url: config.search_url.clone(),
            generate_url: config.generate_url.clone(),
            model: config.model.clone(),
        }
    }

    pub async fn resolve(&self, description: &str) -> String {
        match search::search_related(&self.client, &self.search_url, description).await {
            Ok(related) => {
                info!("Semantic search returned related issues");
                return format!("{SEARCH_PREFIX}{related}");
            }
            Err(e) => warn!("Semantic search unavailable, falling back to generation: {}", e),
        }

        match generate::generate(&self.client, &self.generate_url, &self.model, description).await
        {
            Ok(answer) => {
                info!("Generated a resolution of {} bytes", answer.len());
                answer
            }
            Err(e) => {
                warn!("Generation failed: {}", e);
                AI_UNAVAILABLE.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MAX_STREAM_LINE_BYTES;
    use crate::testing::{dead_url, resolver, resolver_with_timeout, serve};
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    const STREAM: &str = concat!(
        "{\"response\":\"Check \"}\n",
        "{\"response\":\"logs\",\"done\":true}\n",
        "{\"response\":\"ignored\"}\n",
    );

    async fn generation_server(body: &'static str, calls: Arc<AtomicUsize>) -> String {
        serve(Router::new().route(
            "/api/generate",
            post(move |Json(request): Json<serde_json::Value>| async move {
                assert_eq!(request["model"], "mistral");
                assert!(request["prompt"].as_str().unwrap().starts_with("Bug: "));
                calls.fetch_add(1, Ordering::SeqCst);
                body
            }),
        ))
        .await
    }

    #[tokio::test]
    async fn search_hit_short_circuits() {
        let search = serve(Router::new().route(
            "/search",
            post(|Json(request): Json<serde_json::Value>| async move {
                format!("related to {}", request["query"].as_str().unwrap())
            }),
        ))
        .await;
        let calls = Arc::new(AtomicUsize::new(0));
        let generate = generation_server(STREAM, calls.clone()).await;

        let answer = resolver(&search, &generate).resolve("FRR outage").await;
        assert!(answer.starts_with(SEARCH_PREFIX));
        assert!(answer.ends_with("related to FRR outage"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn search_refused_falls_back_to_generation() {
        let calls = Arc::new(AtomicUsize::new(0));
        let generate = generation_server(STREAM, calls.clone()).await;

        let answer = resolver(&dead_url(), &generate).resolve("DBMCP crash").await;
        assert_eq!(answer, "Check logs ");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn search_error_status_falls_back() {
        let search = serve(Router::new().route(
            "/search",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "index not loaded") }),
        ))
        .await;
        let calls = Arc::new(AtomicUsize::new(0));
        let generate = generation_server(STREAM, calls.clone()).await;

        let answer = resolver(&search, &generate).resolve("").await;
        assert_eq!(answer, "Check logs ");
    }

    #[tokio::test]
    async fn both_services_down() {
        let answer = resolver(&dead_url(), &dead_url()).resolve("SBB").await;
        assert_eq!(answer, "AI resolution not available");
    }

    #[tokio::test]
    async fn generation_error_status_is_sentinel() {
        let generate = serve(Router::new().route(
            "/api/generate",
            post(|| async { (StatusCode::NOT_FOUND, "model not found") }),
        ))
        .await;

        let answer = resolver(&dead_url(), &generate).resolve("FRR").await;
        assert_eq!(answer, AI_UNAVAILABLE);
    }

    #[tokio::test]
    async fn empty_generation_is_not_a_failure() {
        let calls = Arc::new(AtomicUsize::new(0));
        let generate = generation_server("", calls.clone()).await;

        let answer = resolver(&dead_url(), &generate).resolve("anything").await;
        assert_eq!(answer, "");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unterminated_last_line_is_read() {
        let calls = Arc::new(AtomicUsize::new(0));
        let generate = generation_server(
            "{\"response\":\"Look\"}\nnot json\n{\"response\":\"closer\"}",
            calls,
        )
        .await;

        let answer = resolver(&dead_url(), &generate).resolve("anything").await;
        assert_eq!(answer, "Look closer ");
    }

    #[tokio::test]
    async fn slow_search_falls_back() {
        let search = serve(Router::new().route(
            "/search",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                "too late"
            }),
        ))
        .await;
        let calls = Arc::new(AtomicUsize::new(0));
        let generate = generation_server(STREAM, calls.clone()).await;

        let answer = resolver_with_timeout(&search, &generate, Duration::from_secs(1))
            .resolve("FRR")
            .await;
        assert_eq!(answer, "Check logs ");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn dropped_stream_is_sentinel() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let generate = format!("http://{}", listener.local_addr().unwrap());
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            while !request.ends_with(b"}") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            socket
                .write_all(
                    b"HTTP/1.1 200 OK\r\ncontent-type: application/x-ndjson\r\ncontent-length: 4096\r\n\r\n{\"response\":\"partial\"}\n",
                )
                .await
                .unwrap();
            socket.flush().await.unwrap();
        });

        let answer = resolver(&dead_url(), &generate).resolve("SBB").await;
        assert_eq!(answer, AI_UNAVAILABLE);
    }

    #[tokio::test]
    async fn oversized_line_is_sentinel() {
        let generate = serve(Router::new().route(
            "/api/generate",
            post(|| async { "x".repeat(MAX_STREAM_LINE_BYTES + 1) }),
        ))
        .await;

        let answer = resolver(&dead_url(), &generate).resolve("DBMCP").await;
        assert_eq!(answer, AI_UNAVAILABLE);
    }
}
