use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// One resume optimization job. `user_id` is set at creation and never
/// reassigned; both path columns always carry exactly one `.pdf` suffix.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub original_file_path: String,
    pub optimized_file_path: Option<String>,
    pub status: String,
    pub webhook_response: Option<Value>,
    pub webhook_response_at: Option<DateTime<Utc>>,
    pub webhook_last_attempt_at: Option<DateTime<Utc>>,
    pub webhook_attempts: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
