use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Lifecycle of an application. Persisted as the display string.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum ApplicationStatus {
    #[default]
    Pending,
    #[serde(rename = "Interview Scheduled")]
    InterviewScheduled,
    #[serde(rename = "Interview Confirmed")]
    InterviewConfirmed,
    Rejected,
    Approved,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "Pending",
            ApplicationStatus::InterviewScheduled => "Interview Scheduled",
            ApplicationStatus::InterviewConfirmed => "Interview Confirmed",
            ApplicationStatus::Rejected => "Rejected",
            ApplicationStatus::Approved => "Approved",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicationRow {
    pub id: Uuid,
    pub job_id: Uuid,
    pub job_title: String,
    pub user_id: Uuid,
    pub company_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    /// Object-storage keys of the uploaded documents.
    pub resume: String,
    pub cover_letter: String,
    pub portfolio: String,
    pub status: String,
    pub interview_dates: Vec<DateTime<Utc>>,
    pub interview_details: Option<String>,
    pub modified_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Everything needed to insert a new application. `status` is left to the store default.
#[derive(Debug, Clone)]
pub struct NewApplication {
    pub job_id: Uuid,
    pub job_title: String,
    pub user_id: Uuid,
    pub company_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub resume: String,
    pub cover_letter: String,
    pub portfolio: String,
    pub modified_date: DateTime<Utc>,
}

/// The complete set of fields a single request may change.
/// `None` leaves the stored value untouched. `modified_date` is always bumped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicationChanges {
    pub status: Option<ApplicationStatus>,
    pub interview_dates: Option<Vec<DateTime<Utc>>>,
    pub interview_details: Option<String>,
}

impl ApplicationChanges {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.interview_dates.is_none() && self.interview_details.is_none()
    }

    /// Applies the change set to an in-memory row.
    pub fn apply_to(&self, row: &mut ApplicationRow, now: DateTime<Utc>) {
        if let Some(status) = self.status {
            row.status = status.as_str().to_string();
        }
        if let Some(dates) = &self.interview_dates {
            row.interview_dates = dates.clone();
        }
        if let Some(details) = &self.interview_details {
            row.interview_details = Some(details.clone());
        }
        row.modified_date = now;
    }
}

/// Candidate listing entry: the application joined with its job's display fields.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateApplicationView {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub application: ApplicationRow,
    pub job_role: Option<String>,
    pub job_location: Option<String>,
}

/// Employer listing entry: the application joined with job role and candidate name.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EmployerApplicationView {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub application: ApplicationRow,
    pub job_role: Option<String>,
    pub candidate_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicationDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub application: ApplicationRow,
    pub job_role: Option<String>,
    pub job_location: Option<String>,
    pub job_description: Option<String>,
    pub job_skills: Option<Vec<String>>,
    pub job_requirements: Option<Vec<String>>,
    pub company_name: Option<String>,
    pub candidate_name: Option<String>,
}
