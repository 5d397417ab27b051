use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// One cover letter generation job. Same lifecycle and webhook bookkeeping
/// as [`super::resume::ResumeRow`].
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CoverLetterRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub resume_file_path: String,
    pub job_url: String,
    pub generated_file_path: Option<String>,
    pub original_filename: Option<String>,
    pub generated_filename: Option<String>,
    pub status: String,
    pub webhook_response: Option<Value>,
    pub webhook_response_at: Option<DateTime<Utc>>,
    pub webhook_last_attempt_at: Option<DateTime<Utc>>,
    pub webhook_attempts: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
