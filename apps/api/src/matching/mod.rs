// Skill matching between candidate profiles and job postings.

pub mod handlers;
pub mod skill_match;
