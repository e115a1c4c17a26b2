use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::application::{
    ApplicationChanges, ApplicationDetail, ApplicationRow, CandidateApplicationView,
    EmployerApplicationView, NewApplication,
};
use crate::models::job::JobRow;
use crate::models::profile::ProfileRow;
use crate::store::{ApplicationStore, JobStore, ProfileStore};

/// PostgreSQL-backed store for jobs, profiles and applications.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool and wraps it.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        info!("Connecting to PostgreSQL...");

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        info!("PostgreSQL connection pool established ({max_connections} max connections)");
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl JobStore for PgStore {
    async fn find_job(&self, job_id: Uuid) -> Result<Option<JobRow>, AppError> {
        Ok(
            sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = $1")
                .bind(job_id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }
}

#[async_trait]
impl ProfileStore for PgStore {
    async fn find_profile(&self, user_id: Uuid) -> Result<Option<ProfileRow>, AppError> {
        Ok(
            sqlx::query_as::<_, ProfileRow>("SELECT * FROM user_profiles WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }
}

#[async_trait]
impl ApplicationStore for PgStore {
    async fn insert_application(&self, new: NewApplication) -> Result<ApplicationRow, AppError> {
        let id = Uuid::new_v4();

        // status and interview columns take their table defaults
        let row = sqlx::query_as::<_, ApplicationRow>(
            r#"
            INSERT INTO job_applications
                (id, job_id, job_title, user_id, company_id, first_name, last_name,
                 email, phone_number, resume, cover_letter, portfolio, modified_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(new.job_id)
        .bind(&new.job_title)
        .bind(new.user_id)
        .bind(new.company_id)
        .bind(&new.first_name)
        .bind(&new.last_name)
        .bind(&new.email)
        .bind(&new.phone_number)
        .bind(&new.resume)
        .bind(&new.cover_letter)
        .bind(&new.portfolio)
        .bind(new.modified_date)
        .fetch_one(&self.pool)
        .await?;

        info!(
            "Inserted job application {id} for job {} by user {}",
            new.job_id, new.user_id
        );
        Ok(row)
    }

    async fn find_application(&self, id: Uuid) -> Result<Option<ApplicationDetail>, AppError> {
        Ok(sqlx::query_as::<_, ApplicationDetail>(
            r#"
            SELECT a.*,
                   j.role         AS job_role,
                   j.location     AS job_location,
                   j.description  AS job_description,
                   j.skills       AS job_skills,
                   j.requirements AS job_requirements,
                   c.name         AS company_name,
                   u.name         AS candidate_name
            FROM job_applications a
            LEFT JOIN jobs  j ON j.id = a.job_id
            LEFT JOIN users c ON c.id = a.company_id
            LEFT JOIN users u ON u.id = a.user_id
            WHERE a.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn list_for_candidate(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<CandidateApplicationView>, AppError> {
        Ok(sqlx::query_as::<_, CandidateApplicationView>(
            r#"
            SELECT a.*, j.role AS job_role, j.location AS job_location
            FROM job_applications a
            LEFT JOIN jobs j ON j.id = a.job_id
            WHERE a.user_id = $1
            ORDER BY a.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn list_for_employer(
        &self,
        company_id: Uuid,
    ) -> Result<Vec<EmployerApplicationView>, AppError> {
        Ok(sqlx::query_as::<_, EmployerApplicationView>(
            r#"
            SELECT a.*, j.role AS job_role, u.name AS candidate_name
            FROM job_applications a
            LEFT JOIN jobs  j ON j.id = a.job_id
            LEFT JOIN users u ON u.id = a.user_id
            WHERE a.company_id = $1
            ORDER BY a.created_at DESC
            "#,
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn update_application(
        &self,
        id: Uuid,
        changes: &ApplicationChanges,
    ) -> Result<Option<ApplicationRow>, AppError> {
        let mut tx = self.pool.begin().await?;

        let existing: Option<ApplicationRow> =
            sqlx::query_as("SELECT * FROM job_applications WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

        // dropping the transaction rolls it back
        let Some(mut row) = existing else {
            return Ok(None);
        };

        changes.apply_to(&mut row, Utc::now());

        let updated = sqlx::query_as::<_, ApplicationRow>(
            r#"
            UPDATE job_applications
            SET status = $2,
                interview_dates = $3,
                interview_details = $4,
                modified_date = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&row.status)
        .bind(&row.interview_dates)
        .bind(&row.interview_details)
        .bind(row.modified_date)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        debug!("Updated job application {id} (status: {})", updated.status);
        Ok(Some(updated))
    }

    async fn delete_application(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM job_applications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
