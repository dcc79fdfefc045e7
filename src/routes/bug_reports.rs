use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use tracing::info;

use super::AppState;
use crate::database::{BugReport, NewBugReport};
use crate::error::ApiError;

#[derive(Deserialize, Debug)]
pub struct ReportRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

pub async fn report_bug(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ReportRequest>,
) -> Result<Json<BugReport>, ApiError> {
    let resolution = state
        .resolver
        .resolve(request.description.as_deref().unwrap_or_default())
        .await;

    let bug = state
        .store
        .create(NewBugReport::new(
            request.title,
            request.description,
            &resolution,
        ))
        .await?;
    info!("Created bug report {}", bug.id);

    Ok(Json(bug))
}

pub async fn resolve_bug(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<BugReport>, ApiError> {
    let mut bug = state
        .store
        .find_by_id(id)
        .await?
        .ok_or(ApiError::NotFound(id))?;

    let resolution = state
        .resolver
        .resolve(bug.description.as_deref().unwrap_or_default())
        .await;
    bug.set_resolution(&resolution);

    let bug = state.store.save(&bug).await?;
    info!("Regenerated resolution of bug report {}", bug.id);

    Ok(Json(bug))
}

pub async fn list_bugs(State(state): State<Arc<AppState>>) -> Result<Json<Vec<BugReport>>, ApiError> {
    Ok(Json(state.store.find_all().await?))
}

pub async fn get_bug(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<BugReport>, ApiError> {
    state
        .store
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound(id))
}
