//! Axum route handlers for cover letter records.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::Actor;
use crate::cover_letters::store::{self, NewCoverLetter};
use crate::errors::AppError;
use crate::models::cover_letter::CoverLetterRow;
use crate::state::AppState;
use crate::storage::public_object_url;

#[derive(Debug, Deserialize)]
pub struct CreateCoverLetterRequest {
    pub resume_file_path: String,
    pub job_url: String,
    pub original_filename: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCoverLetterRequest {
    pub resume_file_path: String,
}

#[derive(Debug, Serialize)]
pub struct DownloadResponse {
    pub path: String,
    pub download_url: String,
}

/// POST /api/v1/cover-letters
///
/// Creates a pending generation job for the calling user.
pub async fn handle_create_cover_letter(
    State(state): State<AppState>,
    actor: Actor,
    Json(request): Json<CreateCoverLetterRequest>,
) -> Result<Json<CoverLetterRow>, AppError> {
    let user_id = actor.require_user()?;
    let resume_file_path = request.resume_file_path.trim();
    if resume_file_path.is_empty() {
        return Err(AppError::Validation(
            "resume_file_path cannot be empty".to_string(),
        ));
    }
    let job_url = request.job_url.trim();
    if job_url.is_empty() {
        return Err(AppError::Validation("job_url cannot be empty".to_string()));
    }

    let row = store::create_cover_letter(
        &state.db,
        NewCoverLetter {
            user_id,
            resume_file_path,
            job_url,
            original_filename: request.original_filename.as_deref(),
        },
    )
    .await?;
    Ok(Json(row))
}

/// GET /api/v1/cover-letters
pub async fn handle_list_cover_letters(
    State(state): State<AppState>,
    actor: Actor,
) -> Result<Json<Vec<CoverLetterRow>>, AppError> {
    let user_id = actor.require_user()?;
    Ok(Json(store::list_cover_letters(&state.db, user_id).await?))
}

/// GET /api/v1/cover-letters/:id
pub async fn handle_get_cover_letter(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    actor: Actor,
) -> Result<Json<CoverLetterRow>, AppError> {
    let row = store::get_cover_letter(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Cover letter {id} not found")))?;
    if !actor.can_read(row.user_id) {
        return Err(AppError::Forbidden);
    }
    Ok(Json(row))
}

/// PATCH /api/v1/cover-letters/:id
pub async fn handle_update_cover_letter(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    actor: Actor,
    Json(request): Json<UpdateCoverLetterRequest>,
) -> Result<Json<CoverLetterRow>, AppError> {
    let resume_file_path = request.resume_file_path.trim();
    if resume_file_path.is_empty() {
        return Err(AppError::Validation(
            "resume_file_path cannot be empty".to_string(),
        ));
    }

    let existing = store::get_cover_letter(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Cover letter {id} not found")))?;
    if !actor.can_write(existing.user_id) {
        return Err(AppError::Forbidden);
    }

    let row = store::update_resume_path(&state.db, id, resume_file_path)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Cover letter {id} not found")))?;
    Ok(Json(row))
}

/// GET /api/v1/cover-letters/:id/download
///
/// Public URL of the generated letter. 404 until the worker has reported a
/// generated file.
pub async fn handle_download_cover_letter(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    actor: Actor,
) -> Result<Json<DownloadResponse>, AppError> {
    let row = store::get_cover_letter(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Cover letter {id} not found")))?;
    if !actor.can_read(row.user_id) {
        return Err(AppError::Forbidden);
    }

    let path = generated_path(&row)
        .ok_or_else(|| AppError::NotFound(format!("Cover letter {id} has no generated file")))?;
    Ok(Json(DownloadResponse {
        path: path.to_string(),
        download_url: public_object_url(&state.config.s3_endpoint, &state.config.s3_bucket, path),
    }))
}

fn generated_path(row: &CoverLetterRow) -> Option<&str> {
    row.generated_file_path.as_deref()
}
