use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A job posting. Owned by the job board; this service only reads it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    /// Employer (company account) that posted the job.
    pub company_id: Uuid,
    pub title: String,
    pub role: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    /// Required skill names.
    pub skills: Vec<String>,
    pub requirements: Vec<String>,
    pub created_at: DateTime<Utc>,
}
