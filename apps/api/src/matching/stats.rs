//! Derived dashboard statistics over the processed job collection.
//!
//! Recomputed from the repository's current processed set on every read;
//! the expensive part (scoring) is already cached upstream, so this is a
//! single pass over the collection.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::job::ProcessedJob;

/// Deadlines within this many calendar days of today count as urgent
/// (0 = due today, inclusive on both ends).
pub const URGENT_WINDOW_DAYS: i64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_jobs: usize,
    /// Jobs with a match score above zero.
    pub matched_jobs: usize,
    /// Integer average over all jobs; 0 for an empty collection.
    pub avg_match_score: u32,
    pub urgent_jobs: usize,
}

/// True when the job's deadline falls within `[0, URGENT_WINDOW_DAYS]`
/// calendar days of `today`. No deadline, or a deadline already passed,
/// is not urgent.
pub fn is_urgent(job: &ProcessedJob, today: NaiveDate) -> bool {
    match job.job.deadline {
        Some(deadline) => {
            let days_left = (deadline - today).num_days();
            (0..=URGENT_WINDOW_DAYS).contains(&days_left)
        }
        None => false,
    }
}

/// The urgent subset, in collection order.
pub fn urgent_jobs<'a>(jobs: &'a [ProcessedJob], today: NaiveDate) -> Vec<&'a ProcessedJob> {
    jobs.iter().filter(|job| is_urgent(job, today)).collect()
}

pub fn compute_stats(jobs: &[ProcessedJob], today: NaiveDate) -> DashboardStats {
    let avg_match_score = if jobs.is_empty() {
        0
    } else {
        let sum: u64 = jobs.iter().map(|j| j.match_score as u64).sum();
        (sum as f64 / jobs.len() as f64).round() as u32
    };

    DashboardStats {
        total_jobs: jobs.len(),
        matched_jobs: jobs.iter().filter(|j| j.match_score > 0).count(),
        avg_match_score,
        urgent_jobs: jobs.iter().filter(|j| is_urgent(j, today)).count(),
    }
}
