//! Privileged status/result reporting from the processing worker.
//!
//! Each report lands as one single-row `UPDATE ... RETURNING`: the status
//! change, the normalized result path, the payload swap and the attempt
//! increment all apply together or not at all, and concurrent redeliveries
//! for the same record serialize on the row, so no attempt increment is ever
//! lost. A payload parameter being present is the caller's signal that
//! `webhook_response` changed; deliveries without a payload touch neither the
//! response timestamps nor the attempt counter.

use serde_json::Value;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::cover_letter::CoverLetterRow;
use crate::models::resume::ResumeRow;
use crate::models::status::JobStatus;
use crate::paths::normalize_pdf_path;

/// Applies a worker report to a resume record.
pub async fn apply_resume_update(
    pool: &PgPool,
    id: Uuid,
    status: JobStatus,
    result_path: Option<&str>,
    payload: Option<Value>,
) -> Result<ResumeRow, AppError> {
    let result_path = result_path.map(normalize_pdf_path);

    let row = sqlx::query_as::<_, ResumeRow>(
        r#"
        UPDATE resumes
        SET status = $2,
            optimized_file_path = COALESCE($3, optimized_file_path),
            webhook_response = COALESCE($4, webhook_response),
            webhook_response_at = CASE WHEN $4::jsonb IS NOT NULL THEN now()
                                       ELSE webhook_response_at END,
            webhook_last_attempt_at = CASE WHEN $4::jsonb IS NOT NULL THEN now()
                                           ELSE webhook_last_attempt_at END,
            webhook_attempts = webhook_attempts
                + CASE WHEN $4::jsonb IS NOT NULL THEN 1 ELSE 0 END,
            updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(status.as_str())
    .bind(result_path)
    .bind(payload)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;

    info!(
        resume_id = %id,
        status = %row.status,
        attempts = row.webhook_attempts,
        "Applied resume webhook update"
    );
    Ok(row)
}

/// Applies a worker report to a cover letter record. The worker may also
/// supply the display filename of the generated letter.
pub async fn apply_cover_letter_update(
    pool: &PgPool,
    id: Uuid,
    status: JobStatus,
    result_path: Option<&str>,
    generated_filename: Option<&str>,
    payload: Option<Value>,
) -> Result<CoverLetterRow, AppError> {
    let result_path = result_path.map(normalize_pdf_path);

    let row = sqlx::query_as::<_, CoverLetterRow>(
        r#"
        UPDATE cover_letters
        SET status = $2,
            generated_file_path = COALESCE($3, generated_file_path),
            generated_filename = COALESCE($4, generated_filename),
            webhook_response = COALESCE($5, webhook_response),
            webhook_response_at = CASE WHEN $5::jsonb IS NOT NULL THEN now()
                                       ELSE webhook_response_at END,
            webhook_last_attempt_at = CASE WHEN $5::jsonb IS NOT NULL THEN now()
                                           ELSE webhook_last_attempt_at END,
            webhook_attempts = webhook_attempts
                + CASE WHEN $5::jsonb IS NOT NULL THEN 1 ELSE 0 END,
            updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(status.as_str())
    .bind(result_path)
    .bind(generated_filename)
    .bind(payload)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Cover letter {id} not found")))?;

    info!(
        cover_letter_id = %id,
        status = %row.status,
        attempts = row.webhook_attempts,
        "Applied cover letter webhook update"
    );
    Ok(row)
}
