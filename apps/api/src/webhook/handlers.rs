//! Inbound webhook endpoints for the processing worker.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::auth::Actor;
use crate::errors::AppError;
use crate::models::cover_letter::CoverLetterRow;
use crate::models::resume::ResumeRow;
use crate::models::status::JobStatus;
use crate::state::AppState;
use crate::webhook::gateway;

#[derive(Debug, Deserialize)]
pub struct ResumeWebhookRequest {
    pub status: String,
    pub optimized_file_path: Option<String>,
    pub payload: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct CoverLetterWebhookRequest {
    pub status: String,
    pub generated_file_path: Option<String>,
    pub generated_filename: Option<String>,
    pub payload: Option<Value>,
}

fn parse_status(raw: &str) -> Result<JobStatus, AppError> {
    JobStatus::parse(raw).ok_or_else(|| AppError::InvalidStatus(raw.to_string()))
}

/// POST /api/v1/webhooks/resumes/:id
///
/// Trusted-service only. The worker may redeliver the same report; every
/// accepted delivery carrying a payload counts one attempt.
pub async fn handle_resume_webhook(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    actor: Actor,
    Json(request): Json<ResumeWebhookRequest>,
) -> Result<Json<ResumeRow>, AppError> {
    if !actor.is_trusted_service() {
        return Err(AppError::Forbidden);
    }
    let status = parse_status(&request.status)?;

    let row = gateway::apply_resume_update(
        &state.db,
        id,
        status,
        request.optimized_file_path.as_deref(),
        request.payload,
    )
    .await?;
    Ok(Json(row))
}

/// POST /api/v1/webhooks/cover-letters/:id
pub async fn handle_cover_letter_webhook(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    actor: Actor,
    Json(request): Json<CoverLetterWebhookRequest>,
) -> Result<Json<CoverLetterRow>, AppError> {
    if !actor.is_trusted_service() {
        return Err(AppError::Forbidden);
    }
    let status = parse_status(&request.status)?;

    let row = gateway::apply_cover_letter_update(
        &state.db,
        id,
        status,
        request.generated_file_path.as_deref(),
        request.generated_filename.as_deref(),
        request.payload,
    )
    .await?;
    Ok(Json(row))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status_accepts_lifecycle_values() {
        assert_eq!(parse_status("completed").unwrap(), JobStatus::Completed);
        assert_eq!(parse_status("failed").unwrap(), JobStatus::Failed);
    }

    #[test]
    fn test_parse_status_rejects_unknown_before_mutation() {
        let err = parse_status("finished").unwrap_err();
        assert!(matches!(err, AppError::InvalidStatus(v) if v == "finished"));
    }

    #[test]
    fn test_resume_request_optional_fields_default_to_none() {
        let request: ResumeWebhookRequest =
            serde_json::from_str(r#"{"status":"processing"}"#).unwrap();
        assert_eq!(request.status, "processing");
        assert!(request.optimized_file_path.is_none());
        assert!(request.payload.is_none());
    }

    #[test]
    fn test_resume_request_full_body() {
        let request: ResumeWebhookRequest = serde_json::from_str(
            r#"{"status":"completed","optimized_file_path":"out.pdf.pdf","payload":{"ok":true}}"#,
        )
        .unwrap();
        assert_eq!(request.optimized_file_path.as_deref(), Some("out.pdf.pdf"));
        assert_eq!(request.payload, Some(serde_json::json!({"ok": true})));
    }

    #[test]
    fn test_cover_letter_request_full_body() {
        let request: CoverLetterWebhookRequest = serde_json::from_str(
            r#"{"status":"completed","generated_file_path":"letters/u/out.pdf","generated_filename":"Cover Letter.pdf","payload":{"tokens":812}}"#,
        )
        .unwrap();
        assert_eq!(
            request.generated_file_path.as_deref(),
            Some("letters/u/out.pdf")
        );
        assert_eq!(
            request.generated_filename.as_deref(),
            Some("Cover Letter.pdf")
        );
    }
}
