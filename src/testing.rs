//! Helpers shared by the async tests.

use std::time::Duration;

use crate::api::Resolver;
use crate::config::AiConfig;

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn serve(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// Base URL of a port nothing listens on.
pub fn dead_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

pub fn resolver(search_url: &str, generate_url: &str) -> Resolver {
    resolver_with_timeout(search_url, generate_url, Duration::from_secs(5))
}

pub fn resolver_with_timeout(search_url: &str, generate_url: &str, timeout: Duration) -> Resolver {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap();
    Resolver::new(
        client,
        &AiConfig {
            search_url: search_url.to_string(),
            generate_url: generate_url.to_string(),
            model: "mistral".to_string(),
            timeout,
        },
    )
}
