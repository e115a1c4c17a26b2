use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Candidate profile. `skills` is free text, comma-separated, exactly as the candidate typed it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProfileRow {
    pub user_id: Uuid,
    pub skills: String,
    pub updated_at: DateTime<Utc>,
}
