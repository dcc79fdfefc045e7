//! HTTP surface consumed by the frontend.

pub mod bug_reports;

use std::sync::Arc;

use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::api::Resolver;
use crate::database::BugStore;
use crate::error::{ApiError, ConfigError};

pub struct AppState {
    pub store: Arc<dyn BugStore>,
    pub resolver: Resolver,
}

pub fn router(state: Arc<AppState>, cors_origin: &str) -> Result<Router, ConfigError> {
    let origin = HeaderValue::from_str(cors_origin).map_err(|_| ConfigError::Invalid {
        var: "CORS_ORIGIN",
        value: cors_origin.to_string(),
    })?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([header::CONTENT_TYPE]);

    Ok(Router::new()
        .route("/api/bugs", get(bug_reports::list_bugs))
        .route("/api/bugs/report", post(bug_reports::report_bug))
        .route("/api/bugs/{id}", get(bug_reports::get_bug))
        .route("/api/bugs/{id}/resolve", put(bug_reports::resolve_bug))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Store(e) => {
                error!("Store failure: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
