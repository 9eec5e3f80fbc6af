//! Keyword scoring — the one deterministic, order-independent function the
//! rest of the service is built around.
//!
//! A user keyword matches a job when the lowercased concatenation of the
//! job's title, description, and own tags contains the lowercased keyword as
//! a substring. Partial matches count ("React" matches "Reactive"); this is
//! a deliberate recall tradeoff and must not be tightened to word boundaries.

use serde::Serialize;

use crate::models::job::{Job, ProcessedJob};

/// Result of scoring one job against the user keyword set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    /// Subset of the user keywords found in the job text, in keyword-list
    /// order, with the user's original casing.
    pub matched_keywords: Vec<String>,
    /// `round(matched / total * 100)`, an integer 0–100. Zero when the user
    /// keyword set is empty.
    pub match_score: u32,
}

impl MatchResult {
    pub fn empty() -> Self {
        Self {
            matched_keywords: Vec::new(),
            match_score: 0,
        }
    }
}

/// Scores a single job against the user keyword set.
pub fn match_job(job: &Job, user_keywords: &[String]) -> MatchResult {
    if user_keywords.is_empty() {
        return MatchResult::empty();
    }

    let haystack = format!(
        "{} {} {}",
        job.title,
        job.description,
        job.keywords.join(" ")
    )
    .to_lowercase();

    let matched_keywords: Vec<String> = user_keywords
        .iter()
        .filter(|kw| haystack.contains(&kw.to_lowercase()))
        .cloned()
        .collect();

    let match_score =
        ((matched_keywords.len() as f64 / user_keywords.len() as f64) * 100.0).round() as u32;

    MatchResult {
        matched_keywords,
        match_score,
    }
}

/// Scores the whole collection. Called once per (jobs, keywords) mutation by
/// the repository; readers consume the cached output.
pub fn process_jobs(jobs: &[Job], user_keywords: &[String]) -> Vec<ProcessedJob> {
    jobs.iter()
        .map(|job| {
            let result = match_job(job, user_keywords);
            ProcessedJob {
                job: job.clone(),
                matched_keywords: result.matched_keywords,
                match_score: result.match_score,
            }
        })
        .collect()
}
