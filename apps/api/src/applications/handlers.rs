//! Axum route handlers for the Applications API.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{info, warn};
use uuid::Uuid;

use crate::applications::upload::read_application_form;
use crate::auth::Principal;
use crate::documents::document_key;
use crate::errors::AppError;
use crate::matching::skill_match::SkillMatchResult;
use crate::models::application::{
    ApplicationChanges, ApplicationDetail, ApplicationRow, ApplicationStatus,
    CandidateApplicationView, EmployerApplicationView, NewApplication,
};
use crate::state::AppState;

const APPLICATION_NOT_FOUND: &str = "Job Application not found";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Generic update. Only the fields present in the body are changed.
#[derive(Debug, Deserialize)]
pub struct UpdateApplicationRequest {
    pub status: Option<ApplicationStatus>,
    pub interview_dates: Option<Vec<DateTime<Utc>>>,
}

#[derive(Debug, Deserialize)]
pub struct InterviewDatesRequest {
    pub interview_dates: Vec<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct ScheduleInterviewRequest {
    pub interview_dates: Vec<DateTime<Utc>>,
    pub interview_details: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EmployerApplicationResponse {
    #[serde(flatten)]
    pub application: EmployerApplicationView,
    pub skill_match: SkillMatchResult,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/applications
///
/// Multipart: `job_id`, `first_name`, `last_name`, `email`, `phone_number` and the
/// `resume`, `cover_letter`, `portfolio` files. The job is resolved before anything is uploaded.
pub async fn handle_create_application(
    State(state): State<AppState>,
    principal: Principal,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ApplicationRow>), AppError> {
    let form = read_application_form(multipart).await?.validate()?;

    let job = state
        .jobs
        .find_job(form.job_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found".to_string()))?;

    let submission_id = Uuid::new_v4();
    let mut keys: [String; 3] = Default::default();
    for (idx, (kind, file)) in form.documents.into_iter().enumerate() {
        keys[idx] = document_key(principal.user_id, submission_id, kind, &file.file_name);
        if let Err(e) = state
            .documents
            .put(&keys[idx], file.bytes, &file.content_type)
            .await
        {
            discard_documents(&state, &keys[..idx]).await;
            return Err(e);
        }
    }

    let inserted = state
        .applications
        .insert_application(NewApplication {
            job_id: job.id,
            job_title: job.title,
            user_id: principal.user_id,
            company_id: job.company_id,
            first_name: form.first_name,
            last_name: form.last_name,
            email: form.email,
            phone_number: form.phone_number,
            resume: keys[0].clone(),
            cover_letter: keys[1].clone(),
            portfolio: keys[2].clone(),
            modified_date: Utc::now(),
        })
        .await;

    match inserted {
        Ok(application) => Ok((StatusCode::CREATED, Json(application))),
        Err(e) => {
            discard_documents(&state, &keys).await;
            Err(e)
        }
    }
}

/// Removes documents written for a submission that was not recorded.
/// Failures are logged and otherwise ignored.
async fn discard_documents(state: &AppState, keys: &[String]) {
    for key in keys {
        if let Err(e) = state.documents.delete(key).await {
            warn!(key = %key, error = %e, "failed to discard orphaned document");
        }
    }
}

/// GET /api/v1/applications/candidate
///
/// Every application submitted by the caller, newest first.
pub async fn handle_list_candidate_applications(
    State(state): State<AppState>,
    principal: Principal,
) -> Result<Json<Vec<CandidateApplicationView>>, AppError> {
    let applications = state
        .applications
        .list_for_candidate(principal.user_id)
        .await?;
    Ok(Json(applications))
}

/// GET /api/v1/applications/employer
///
/// Every application received by the caller's company, each with a skill match.
/// A failed match is reported inline for that entry; it never fails the listing.
pub async fn handle_list_employer_applications(
    State(state): State<AppState>,
    principal: Principal,
) -> Result<Json<Vec<EmployerApplicationResponse>>, AppError> {
    let applications = state
        .applications
        .list_for_employer(principal.user_id)
        .await?;

    if applications.is_empty() {
        return Err(AppError::NotFound("No Job Applications found".to_string()));
    }

    let pairs: Vec<(Uuid, Uuid)> = applications
        .iter()
        .map(|a| (a.application.user_id, a.application.job_id))
        .collect();
    let skill_matches = state.skill_match.evaluate_batch(&pairs).await;

    Ok(Json(
        applications
            .into_iter()
            .zip(skill_matches)
            .map(|(application, skill_match)| EmployerApplicationResponse {
                application,
                skill_match,
            })
            .collect(),
    ))
}

/// GET /api/v1/applications/:id
pub async fn handle_get_application(
    State(state): State<AppState>,
    _principal: Principal,
    Path(id): Path<Uuid>,
) -> Result<Json<ApplicationDetail>, AppError> {
    state
        .applications
        .find_application(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(APPLICATION_NOT_FOUND.to_string()))
}

/// PATCH /api/v1/applications/:id
pub async fn handle_update_application(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateApplicationRequest>,
) -> Result<Json<ApplicationRow>, AppError> {
    let changes = ApplicationChanges {
        status: request.status,
        interview_dates: request.interview_dates,
        interview_details: None,
    };
    if changes.is_empty() {
        return Err(AppError::Validation(
            "Provide at least one of status or interview_dates".to_string(),
        ));
    }
    apply_changes(&state, principal, id, changes).await
}

/// PUT /api/v1/applications/:id/interview-dates
pub async fn handle_set_interview_dates(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
    Json(request): Json<InterviewDatesRequest>,
) -> Result<Json<ApplicationRow>, AppError> {
    let changes = ApplicationChanges {
        status: Some(ApplicationStatus::InterviewScheduled),
        interview_dates: Some(request.interview_dates),
        interview_details: None,
    };
    apply_changes(&state, principal, id, changes).await
}

/// PUT /api/v1/applications/:id/schedule
pub async fn handle_schedule_interview(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
    Json(request): Json<ScheduleInterviewRequest>,
) -> Result<Json<ApplicationRow>, AppError> {
    let changes = ApplicationChanges {
        status: Some(ApplicationStatus::InterviewScheduled),
        interview_dates: Some(request.interview_dates),
        interview_details: request.interview_details,
    };
    apply_changes(&state, principal, id, changes).await
}

/// PUT /api/v1/applications/:id/confirm
pub async fn handle_confirm_interview(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
    Json(request): Json<InterviewDatesRequest>,
) -> Result<Json<ApplicationRow>, AppError> {
    let changes = ApplicationChanges {
        status: Some(ApplicationStatus::InterviewConfirmed),
        interview_dates: Some(request.interview_dates),
        interview_details: None,
    };
    apply_changes(&state, principal, id, changes).await
}

/// PUT /api/v1/applications/:id/reject
pub async fn handle_reject_application(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> Result<Json<ApplicationRow>, AppError> {
    let changes = ApplicationChanges {
        status: Some(ApplicationStatus::Rejected),
        ..Default::default()
    };
    apply_changes(&state, principal, id, changes).await
}

/// PUT /api/v1/applications/:id/approve
pub async fn handle_approve_application(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> Result<Json<ApplicationRow>, AppError> {
    let changes = ApplicationChanges {
        status: Some(ApplicationStatus::Approved),
        ..Default::default()
    };
    apply_changes(&state, principal, id, changes).await
}

/// DELETE /api/v1/applications/:id
pub async fn handle_delete_application(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    if !state.applications.delete_application(id).await? {
        return Err(AppError::NotFound(APPLICATION_NOT_FOUND.to_string()));
    }

    info!("User {} deleted job application {id}", principal.user_id);
    Ok(Json(json!({ "message": "Job Application deleted successfully" })))
}

async fn apply_changes(
    state: &AppState,
    principal: Principal,
    id: Uuid,
    changes: ApplicationChanges,
) -> Result<Json<ApplicationRow>, AppError> {
    let updated = state
        .applications
        .update_application(id, &changes)
        .await?
        .ok_or_else(|| AppError::NotFound(APPLICATION_NOT_FOUND.to_string()))?;

    info!(
        "User {} updated job application {id} (status: {})",
        principal.user_id, updated.status
    );
    Ok(Json(updated))
}
