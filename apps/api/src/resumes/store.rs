//! Persistence for resume optimization records.
//!
//! Every path-bearing write runs through [`normalize_pdf_path`] here, in the
//! store, so the invariant holds no matter which caller reaches it. Status is
//! never changed by these functions; that is the webhook gateway's job.

use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::ResumeRow;
use crate::models::status::JobStatus;
use crate::paths::normalize_pdf_path;

/// Inserts a new record in `pending` state with zero webhook attempts.
pub async fn create_resume(
    pool: &PgPool,
    user_id: Uuid,
    original_file_path: &str,
) -> Result<ResumeRow, AppError> {
    let row = sqlx::query_as::<_, ResumeRow>(
        r#"
        INSERT INTO resumes (id, user_id, original_file_path, status)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(normalize_pdf_path(original_file_path))
    .bind(JobStatus::Pending.as_str())
    .fetch_one(pool)
    .await?;

    Ok(row)
}

pub async fn get_resume(pool: &PgPool, id: Uuid) -> Result<Option<ResumeRow>, AppError> {
    Ok(
        sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?,
    )
}

pub async fn list_resumes(pool: &PgPool, user_id: Uuid) -> Result<Vec<ResumeRow>, AppError> {
    Ok(sqlx::query_as::<_, ResumeRow>(
        "SELECT * FROM resumes WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?)
}

/// Owner edit of the source path.
pub async fn update_original_path(
    pool: &PgPool,
    id: Uuid,
    original_file_path: &str,
) -> Result<Option<ResumeRow>, AppError> {
    Ok(sqlx::query_as::<_, ResumeRow>(
        r#"
        UPDATE resumes
        SET original_file_path = $2,
            updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(normalize_pdf_path(original_file_path))
    .fetch_optional(pool)
    .await?)
}
