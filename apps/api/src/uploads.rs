//! Direct-to-storage upload allocation.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::auth::Actor;
use crate::errors::AppError;
use crate::state::AppState;
use crate::storage::{allocate_upload_path, presign_upload};

#[derive(Debug, Deserialize)]
pub struct CreateUploadRequest {
    pub file_name: String,
}

#[derive(Debug, Serialize)]
pub struct CreateUploadResponse {
    pub path: String,
    pub upload_url: String,
}

/// POST /api/v1/uploads
///
/// Allocates a normalized object path under the caller's prefix and returns a
/// presigned PUT URL. The client uploads straight to storage; bytes never
/// pass through this service.
pub async fn handle_create_upload(
    State(state): State<AppState>,
    actor: Actor,
    Json(request): Json<CreateUploadRequest>,
) -> Result<Json<CreateUploadResponse>, AppError> {
    let user_id = actor.require_user()?;
    let file_name = request.file_name.trim();
    if file_name.is_empty() {
        return Err(AppError::Validation("file_name cannot be empty".to_string()));
    }

    let path = allocate_upload_path(user_id, file_name);
    let upload_url = presign_upload(&state.s3, &state.config.s3_bucket, &path).await?;

    Ok(Json(CreateUploadResponse { path, upload_url }))
}
