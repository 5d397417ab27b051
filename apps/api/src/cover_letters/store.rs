//! Persistence for cover letter generation records.
//!
//! Path normalization lives here in the store, mirroring the resume store;
//! status changes arrive only through the webhook gateway.

use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::cover_letter::CoverLetterRow;
use crate::models::status::JobStatus;
use crate::paths::normalize_pdf_path;

pub struct NewCoverLetter<'a> {
    pub user_id: Uuid,
    pub resume_file_path: &'a str,
    pub job_url: &'a str,
    pub original_filename: Option<&'a str>,
}

/// Inserts a new record in `pending` state with zero webhook attempts.
pub async fn create_cover_letter(
    pool: &PgPool,
    new: NewCoverLetter<'_>,
) -> Result<CoverLetterRow, AppError> {
    let row = sqlx::query_as::<_, CoverLetterRow>(
        r#"
        INSERT INTO cover_letters (id, user_id, resume_file_path, job_url, original_filename, status)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(new.user_id)
    .bind(normalize_pdf_path(new.resume_file_path))
    .bind(new.job_url)
    .bind(new.original_filename)
    .bind(JobStatus::Pending.as_str())
    .fetch_one(pool)
    .await?;

    Ok(row)
}

pub async fn get_cover_letter(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<CoverLetterRow>, AppError> {
    Ok(
        sqlx::query_as::<_, CoverLetterRow>("SELECT * FROM cover_letters WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?,
    )
}

pub async fn list_cover_letters(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<CoverLetterRow>, AppError> {
    Ok(sqlx::query_as::<_, CoverLetterRow>(
        "SELECT * FROM cover_letters WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?)
}

/// Owner edit of the source resume path.
pub async fn update_resume_path(
    pool: &PgPool,
    id: Uuid,
    resume_file_path: &str,
) -> Result<Option<CoverLetterRow>, AppError> {
    Ok(sqlx::query_as::<_, CoverLetterRow>(
        r#"
        UPDATE cover_letters
        SET resume_file_path = $2,
            updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(normalize_pdf_path(resume_file_path))
    .fetch_optional(pool)
    .await?)
}
