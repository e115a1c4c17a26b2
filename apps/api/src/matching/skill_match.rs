//! Skill Match: scores a candidate's profile skills against a job posting's required skills.
//!
//! Skills are compared as trimmed, case-sensitive strings. No dedup, no synonyms.
//! A job with no required skills scores 0 ("Not Fit") instead of dividing by zero.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{debug, error};
use uuid::Uuid;

use crate::store::{JobStore, ProfileStore};

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FitCategory {
    #[serde(rename = "Not Fit")]
    NotFit,
    #[serde(rename = "Average Fit")]
    AverageFit,
    #[serde(rename = "Perfect Fit")]
    PerfectFit,
}

impl FitCategory {
    /// `<= 50` → Not Fit, `<= 70` → Average Fit, above → Perfect Fit.
    pub fn from_percentage(match_percentage: f64) -> Self {
        if match_percentage <= 50.0 {
            FitCategory::NotFit
        } else if match_percentage <= 70.0 {
            FitCategory::AverageFit
        } else {
            FitCategory::PerfectFit
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SkillMatch {
    pub match_percentage: f64,
    pub fit_category: FitCategory,
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum SkillMatchError {
    #[error("Candidate not found")]
    CandidateNotFound,

    #[error("Job not found")]
    JobNotFound,

    #[error("Server error")]
    Server,
}

/// What callers receive: either a score or `{ "error": "<reason>" }`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum SkillMatchResult {
    Scored(SkillMatch),
    Unavailable { error: String },
}

impl From<SkillMatchError> for SkillMatchResult {
    fn from(err: SkillMatchError) -> Self {
        SkillMatchResult::Unavailable {
            error: err.to_string(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Pure scoring
// ────────────────────────────────────────────────────────────────────────────

/// Scores a comma-separated candidate skill string against a job's required skills.
///
/// Every candidate token found in the job list counts, repeats included; the
/// percentage is capped at 100 so repeated candidate skills cannot push it past a full match.
pub fn score_skills(candidate_skills: &str, job_skills: &[String]) -> SkillMatch {
    let candidate: Vec<&str> = candidate_skills.split(',').map(str::trim).collect();
    let required: Vec<&str> = job_skills.iter().map(|s| s.trim()).collect();

    let matched = candidate
        .iter()
        .filter(|skill| required.contains(*skill))
        .count();

    let match_percentage = if required.is_empty() {
        0.0
    } else {
        (matched as f64 / required.len() as f64 * 100.0).min(100.0)
    };

    SkillMatch {
        match_percentage,
        fit_category: FitCategory::from_percentage(match_percentage),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Evaluator (lookups + scoring)
// ────────────────────────────────────────────────────────────────────────────

/// Loads a candidate profile and a job posting and scores them.
/// Read-only; cheap to clone into spawned tasks.
#[derive(Clone)]
pub struct SkillMatchEvaluator {
    profiles: Arc<dyn ProfileStore>,
    jobs: Arc<dyn JobStore>,
}

impl SkillMatchEvaluator {
    pub fn new(profiles: Arc<dyn ProfileStore>, jobs: Arc<dyn JobStore>) -> Self {
        Self { profiles, jobs }
    }

    /// Never fails: missing records and store faults come back as `Unavailable`.
    pub async fn evaluate(&self, candidate_id: Uuid, job_id: Uuid) -> SkillMatchResult {
        match self.try_evaluate(candidate_id, job_id).await {
            Ok(skill_match) => SkillMatchResult::Scored(skill_match),
            Err(err) => err.into(),
        }
    }

    /// Evaluates every `(candidate_id, job_id)` pair concurrently.
    /// Results come back in input order.
    pub async fn evaluate_batch(&self, pairs: &[(Uuid, Uuid)]) -> Vec<SkillMatchResult> {
        let mut set = JoinSet::new();

        for (idx, &(candidate_id, job_id)) in pairs.iter().enumerate() {
            let evaluator = self.clone();
            set.spawn(async move { (idx, evaluator.evaluate(candidate_id, job_id).await) });
        }

        let mut results = vec![SkillMatchResult::from(SkillMatchError::Server); pairs.len()];
        while let Some(res) = set.join_next().await {
            match res {
                Ok((idx, result)) => results[idx] = result,
                Err(e) => error!(%e, "skill match task failed"),
            }
        }
        results
    }

    async fn try_evaluate(
        &self,
        candidate_id: Uuid,
        job_id: Uuid,
    ) -> Result<SkillMatch, SkillMatchError> {
        debug!("Evaluating skill match for candidate {candidate_id} against job {job_id}");

        let profile = self
            .profiles
            .find_profile(candidate_id)
            .await
            .map_err(|e| {
                error!("Error calculating skill match: {e}");
                SkillMatchError::Server
            })?
            .ok_or_else(|| {
                debug!("Candidate not found with ID: {candidate_id}");
                SkillMatchError::CandidateNotFound
            })?;

        let job = self
            .jobs
            .find_job(job_id)
            .await
            .map_err(|e| {
                error!("Error calculating skill match: {e}");
                SkillMatchError::Server
            })?
            .ok_or_else(|| {
                debug!("Job not found with ID: {job_id}");
                SkillMatchError::JobNotFound
            })?;

        let skill_match = score_skills(&profile.skills, &job.skills);
        debug!(
            "Skill match for candidate {candidate_id} / job {job_id}: {:.2}% ({:?})",
            skill_match.match_percentage, skill_match.fit_category
        );
        Ok(skill_match)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
