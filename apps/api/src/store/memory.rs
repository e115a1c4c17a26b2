//! In-memory store used by handler and matcher tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::application::{
    ApplicationChanges, ApplicationDetail, ApplicationRow, ApplicationStatus,
    CandidateApplicationView, EmployerApplicationView, NewApplication,
};
use crate::models::job::JobRow;
use crate::models::profile::ProfileRow;
use crate::store::{ApplicationStore, JobStore, ProfileStore};

#[derive(Default)]
struct Tables {
    /// Display names, for the join columns.
    users: HashMap<Uuid, String>,
    profiles: HashMap<Uuid, ProfileRow>,
    jobs: HashMap<Uuid, JobRow>,
    applications: Vec<ApplicationRow>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    job_lookups: AtomicUsize,
    failing: AtomicBool,
    failing_inserts: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail with a database error.
    pub fn fail_all(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    /// Makes only `insert_application` fail; lookups keep working.
    pub fn fail_inserts(&self) {
        self.failing_inserts.store(true, Ordering::SeqCst);
    }

    pub fn job_lookups(&self) -> usize {
        self.job_lookups.load(Ordering::SeqCst)
    }

    pub fn add_user(&self, name: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.tables().users.insert(id, name.to_string());
        id
    }

    pub fn add_profile(&self, user_id: Uuid, skills: &str) {
        self.tables().profiles.insert(
            user_id,
            ProfileRow {
                user_id,
                skills: skills.to_string(),
                updated_at: Utc::now(),
            },
        );
    }

    pub fn add_job(&self, company_id: Uuid, title: &str, skills: &[&str]) -> Uuid {
        let id = Uuid::new_v4();
        self.tables().jobs.insert(
            id,
            JobRow {
                id,
                company_id,
                title: title.to_string(),
                role: Some("Engineering".to_string()),
                location: Some("Remote".to_string()),
                description: Some(format!("{title} wanted")),
                skills: skills.iter().map(|s| s.to_string()).collect(),
                requirements: vec![],
                created_at: Utc::now(),
            },
        );
        id
    }

    pub fn application(&self, id: Uuid) -> Option<ApplicationRow> {
        self.tables().applications.iter().find(|a| a.id == id).cloned()
    }

    pub fn application_count(&self) -> usize {
        self.tables().applications.len()
    }

    fn tables(&self) -> std::sync::MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn check(&self) -> Result<(), AppError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl JobStore for MemoryStore {
    async fn find_job(&self, job_id: Uuid) -> Result<Option<JobRow>, AppError> {
        self.job_lookups.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.tables().jobs.get(&job_id).cloned())
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn find_profile(&self, user_id: Uuid) -> Result<Option<ProfileRow>, AppError> {
        self.check()?;
        Ok(self.tables().profiles.get(&user_id).cloned())
    }
}

#[async_trait]
impl ApplicationStore for MemoryStore {
    async fn insert_application(&self, new: NewApplication) -> Result<ApplicationRow, AppError> {
        self.check()?;
        if self.failing_inserts.load(Ordering::SeqCst) {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        let mut tables = self.tables();
        // keep created_at strictly increasing so newest-first ordering is stable
        let created_at = Utc::now() + Duration::microseconds(tables.applications.len() as i64);
        let row = ApplicationRow {
            id: Uuid::new_v4(),
            job_id: new.job_id,
            job_title: new.job_title,
            user_id: new.user_id,
            company_id: new.company_id,
            first_name: new.first_name,
            last_name: new.last_name,
            email: new.email,
            phone_number: new.phone_number,
            resume: new.resume,
            cover_letter: new.cover_letter,
            portfolio: new.portfolio,
            status: ApplicationStatus::default().as_str().to_string(),
            interview_dates: vec![],
            interview_details: None,
            modified_date: new.modified_date,
            created_at,
        };
        tables.applications.push(row.clone());
        Ok(row)
    }

    async fn find_application(&self, id: Uuid) -> Result<Option<ApplicationDetail>, AppError> {
        self.check()?;
        let tables = self.tables();
        let Some(application) = tables.applications.iter().find(|a| a.id == id).cloned() else {
            return Ok(None);
        };
        let job = tables.jobs.get(&application.job_id);
        Ok(Some(ApplicationDetail {
            job_role: job.and_then(|j| j.role.clone()),
            job_location: job.and_then(|j| j.location.clone()),
            job_description: job.and_then(|j| j.description.clone()),
            job_skills: job.map(|j| j.skills.clone()),
            job_requirements: job.map(|j| j.requirements.clone()),
            company_name: tables.users.get(&application.company_id).cloned(),
            candidate_name: tables.users.get(&application.user_id).cloned(),
            application,
        }))
    }

    async fn list_for_candidate(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<CandidateApplicationView>, AppError> {
        self.check()?;
        let tables = self.tables();
        let mut rows: Vec<_> = tables
            .applications
            .iter()
            .filter(|a| a.user_id == user_id)
            .map(|a| {
                let job = tables.jobs.get(&a.job_id);
                CandidateApplicationView {
                    application: a.clone(),
                    job_role: job.and_then(|j| j.role.clone()),
                    job_location: job.and_then(|j| j.location.clone()),
                }
            })
            .collect();
        rows.sort_by(|a, b| b.application.created_at.cmp(&a.application.created_at));
        Ok(rows)
    }

    async fn list_for_employer(
        &self,
        company_id: Uuid,
    ) -> Result<Vec<EmployerApplicationView>, AppError> {
        self.check()?;
        let tables = self.tables();
        let mut rows: Vec<_> = tables
            .applications
            .iter()
            .filter(|a| a.company_id == company_id)
            .map(|a| EmployerApplicationView {
                application: a.clone(),
                job_role: tables.jobs.get(&a.job_id).and_then(|j| j.role.clone()),
                candidate_name: tables.users.get(&a.user_id).cloned(),
            })
            .collect();
        rows.sort_by(|a, b| b.application.created_at.cmp(&a.application.created_at));
        Ok(rows)
    }

    async fn update_application(
        &self,
        id: Uuid,
        changes: &ApplicationChanges,
    ) -> Result<Option<ApplicationRow>, AppError> {
        self.check()?;
        let mut tables = self.tables();
        let Some(row) = tables.applications.iter_mut().find(|a| a.id == id) else {
            return Ok(None);
        };
        changes.apply_to(row, Utc::now());
        Ok(Some(row.clone()))
    }

    async fn delete_application(&self, id: Uuid) -> Result<bool, AppError> {
        self.check()?;
        let mut tables = self.tables();
        let before = tables.applications.len();
        tables.applications.retain(|a| a.id != id);
        Ok(tables.applications.len() < before)
    }
}
