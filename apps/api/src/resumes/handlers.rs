//! Axum route handlers for resume records.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::Actor;
use crate::errors::AppError;
use crate::models::resume::ResumeRow;
use crate::resumes::store;
use crate::state::AppState;
use crate::storage::public_object_url;

#[derive(Debug, Deserialize)]
pub struct CreateResumeRequest {
    pub original_file_path: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateResumeRequest {
    pub original_file_path: String,
}

#[derive(Debug, Serialize)]
pub struct DownloadResponse {
    pub path: String,
    pub download_url: String,
}

/// POST /api/v1/resumes
///
/// Creates a pending optimization job for the calling user.
pub async fn handle_create_resume(
    State(state): State<AppState>,
    actor: Actor,
    Json(request): Json<CreateResumeRequest>,
) -> Result<Json<ResumeRow>, AppError> {
    let user_id = actor.require_user()?;
    let path = request.original_file_path.trim();
    if path.is_empty() {
        return Err(AppError::Validation(
            "original_file_path cannot be empty".to_string(),
        ));
    }

    let row = store::create_resume(&state.db, user_id, path).await?;
    Ok(Json(row))
}

/// GET /api/v1/resumes
pub async fn handle_list_resumes(
    State(state): State<AppState>,
    actor: Actor,
) -> Result<Json<Vec<ResumeRow>>, AppError> {
    let user_id = actor.require_user()?;
    Ok(Json(store::list_resumes(&state.db, user_id).await?))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    actor: Actor,
) -> Result<Json<ResumeRow>, AppError> {
    let row = store::get_resume(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;
    if !actor.can_read(row.user_id) {
        return Err(AppError::Forbidden);
    }
    Ok(Json(row))
}

/// PATCH /api/v1/resumes/:id
///
/// Owner edit of the source path. The store re-normalizes on this write path
/// exactly as it does on the gateway's.
pub async fn handle_update_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    actor: Actor,
    Json(request): Json<UpdateResumeRequest>,
) -> Result<Json<ResumeRow>, AppError> {
    let path = request.original_file_path.trim();
    if path.is_empty() {
        return Err(AppError::Validation(
            "original_file_path cannot be empty".to_string(),
        ));
    }

    let existing = store::get_resume(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;
    if !actor.can_write(existing.user_id) {
        return Err(AppError::Forbidden);
    }

    let row = store::update_original_path(&state.db, id, path)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;
    Ok(Json(row))
}

/// GET /api/v1/resumes/:id/download
///
/// Public URL of the optimized PDF, falling back to the original upload while
/// processing is still in flight.
pub async fn handle_download_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    actor: Actor,
) -> Result<Json<DownloadResponse>, AppError> {
    let row = store::get_resume(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;
    if !actor.can_read(row.user_id) {
        return Err(AppError::Forbidden);
    }

    let path = download_path(&row);
    Ok(Json(DownloadResponse {
        path: path.to_string(),
        download_url: public_object_url(&state.config.s3_endpoint, &state.config.s3_bucket, path),
    }))
}

fn download_path(row: &ResumeRow) -> &str {
    row.optimized_file_path
        .as_deref()
        .unwrap_or(&row.original_file_path)
}
