pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};

use crate::applications::handlers;
use crate::matching::handlers::handle_skill_match;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.max_upload_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        // Applications API
        .route(
            "/api/v1/applications",
            post(handlers::handle_create_application),
        )
        .route(
            "/api/v1/applications/candidate",
            get(handlers::handle_list_candidate_applications),
        )
        .route(
            "/api/v1/applications/employer",
            get(handlers::handle_list_employer_applications),
        )
        .route(
            "/api/v1/applications/:id",
            get(handlers::handle_get_application)
                .patch(handlers::handle_update_application)
                .delete(handlers::handle_delete_application),
        )
        .route(
            "/api/v1/applications/:id/interview-dates",
            put(handlers::handle_set_interview_dates),
        )
        .route(
            "/api/v1/applications/:id/schedule",
            put(handlers::handle_schedule_interview),
        )
        .route(
            "/api/v1/applications/:id/confirm",
            put(handlers::handle_confirm_interview),
        )
        .route(
            "/api/v1/applications/:id/reject",
            put(handlers::handle_reject_application),
        )
        .route(
            "/api/v1/applications/:id/approve",
            put(handlers::handle_approve_application),
        )
        // Skill match
        .route("/api/v1/skill-match", get(handle_skill_match))
        .layer(body_limit)
        .with_state(state)
}
