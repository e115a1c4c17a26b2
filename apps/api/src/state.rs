use std::sync::Arc;

use crate::documents::DocumentStorage;
use crate::matching::skill_match::SkillMatchEvaluator;
use crate::store::{ApplicationStore, JobStore, ProfileStore};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub applications: Arc<dyn ApplicationStore>,
    pub jobs: Arc<dyn JobStore>,
    /// Skill matcher over the same profile/job stores. Employer listings fan out through it.
    pub skill_match: SkillMatchEvaluator,
    /// Where uploaded resumes, cover letters and portfolios land.
    pub documents: Arc<dyn DocumentStorage>,
    pub max_upload_bytes: usize,
}

impl AppState {
    /// Wires every store seam to one backing store.
    pub fn new<S>(store: Arc<S>, documents: Arc<dyn DocumentStorage>, max_upload_bytes: usize) -> Self
    where
        S: ApplicationStore + JobStore + ProfileStore + 'static,
    {
        Self {
            applications: store.clone(),
            jobs: store.clone(),
            skill_match: SkillMatchEvaluator::new(store.clone(), store),
            documents,
            max_upload_bytes,
        }
    }
}
