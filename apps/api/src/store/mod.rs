//! Persistence seams.
//!
//! Handlers and the skill matcher only see these traits. `AppState` carries each one as an
//! `Arc<dyn _>`; production wires all three to the same [`PgStore`].

pub mod postgres;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::application::{
    ApplicationChanges, ApplicationDetail, ApplicationRow, CandidateApplicationView,
    EmployerApplicationView, NewApplication,
};
use crate::models::job::JobRow;
use crate::models::profile::ProfileRow;

pub use postgres::PgStore;

#[async_trait]
pub trait JobStore: Send + Sync {
    async fn find_job(&self, job_id: Uuid) -> Result<Option<JobRow>, AppError>;
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn find_profile(&self, user_id: Uuid) -> Result<Option<ProfileRow>, AppError>;
}

#[async_trait]
pub trait ApplicationStore: Send + Sync {
    async fn insert_application(&self, new: NewApplication) -> Result<ApplicationRow, AppError>;

    async fn find_application(&self, id: Uuid) -> Result<Option<ApplicationDetail>, AppError>;

    async fn list_for_candidate(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<CandidateApplicationView>, AppError>;

    async fn list_for_employer(
        &self,
        company_id: Uuid,
    ) -> Result<Vec<EmployerApplicationView>, AppError>;

    /// Applies `changes` and bumps `modified_date` in one step.
    /// Returns `None` when no application has this id.
    async fn update_application(
        &self,
        id: Uuid,
        changes: &ApplicationChanges,
    ) -> Result<Option<ApplicationRow>, AppError>;

    /// Returns `false` when no application has this id.
    async fn delete_application(&self, id: Uuid) -> Result<bool, AppError>;
}
