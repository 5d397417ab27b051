pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::cover_letters::handlers as cover_letters;
use crate::resumes::handlers as resumes;
use crate::state::AppState;
use crate::uploads;
use crate::webhook::handlers as webhooks;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume records
        .route(
            "/api/v1/resumes",
            post(resumes::handle_create_resume).get(resumes::handle_list_resumes),
        )
        .route(
            "/api/v1/resumes/:id",
            get(resumes::handle_get_resume).patch(resumes::handle_update_resume),
        )
        .route(
            "/api/v1/resumes/:id/download",
            get(resumes::handle_download_resume),
        )
        // Cover letter records
        .route(
            "/api/v1/cover-letters",
            post(cover_letters::handle_create_cover_letter)
                .get(cover_letters::handle_list_cover_letters),
        )
        .route(
            "/api/v1/cover-letters/:id",
            get(cover_letters::handle_get_cover_letter)
                .patch(cover_letters::handle_update_cover_letter),
        )
        .route(
            "/api/v1/cover-letters/:id/download",
            get(cover_letters::handle_download_cover_letter),
        )
        // Direct-to-storage uploads
        .route("/api/v1/uploads", post(uploads::handle_create_upload))
        // Worker reporting (trusted service only)
        .route(
            "/api/v1/webhooks/resumes/:id",
            post(webhooks::handle_resume_webhook),
        )
        .route(
            "/api/v1/webhooks/cover-letters/:id",
            post(webhooks::handle_cover_letter_webhook),
        )
        .with_state(state)
}
