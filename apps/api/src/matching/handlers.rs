use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::Principal;
use crate::matching::skill_match::SkillMatchResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SkillMatchQuery {
    pub candidate_id: Uuid,
    pub job_id: Uuid,
}

/// GET /api/v1/skill-match?candidate_id=..&job_id=..
///
/// Always 200: lookup misses and store faults are reported in the body as `{ "error": .. }`.
pub async fn handle_skill_match(
    State(state): State<AppState>,
    _principal: Principal,
    Query(params): Query<SkillMatchQuery>,
) -> Json<SkillMatchResult> {
    Json(
        state
            .skill_match
            .evaluate(params.candidate_id, params.job_id)
            .await,
    )
}
