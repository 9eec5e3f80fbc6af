//! Filter/sort pipeline — turns the processed collection into the list a
//! client actually renders. Pure: the input slice is never mutated, and the
//! same inputs produce the same output on every call.

use std::cmp::Ordering;

use serde::Deserialize;

use crate::models::job::ProcessedJob;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    MatchScore,
    PostedDate,
    Deadline,
    Salary,
}

/// Query parameters of the matches endpoint. Only `min_score` and `sort`
/// are core; the rest are the optional refinements the original UI offered.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobFilter {
    /// Keep jobs with `match_score >= min_score`. Any integer is accepted;
    /// the UI happens to offer 0/25/50/75.
    #[serde(default)]
    pub min_score: i64,
    #[serde(default)]
    pub sort: SortKey,
    /// Case-insensitive substring filter on the job location.
    pub location: Option<String>,
    #[serde(default)]
    pub remote_only: bool,
    /// Keep jobs whose advertised minimum salary is at least this.
    pub salary_min: Option<i64>,
    /// Free-text search over title, description, and listing tags.
    pub q: Option<String>,
}

fn passes(job: &ProcessedJob, filter: &JobFilter) -> bool {
    if (job.match_score as i64) < filter.min_score {
        return false;
    }
    if let Some(location) = &filter.location {
        if !job
            .job
            .location
            .to_lowercase()
            .contains(&location.to_lowercase())
        {
            return false;
        }
    }
    if filter.remote_only && !job.job.remote_available {
        return false;
    }
    if let Some(salary_min) = filter.salary_min {
        if job.job.salary_min < salary_min {
            return false;
        }
    }
    if let Some(q) = &filter.q {
        let q = q.to_lowercase();
        let hit = job.job.title.to_lowercase().contains(&q)
            || job.job.description.to_lowercase().contains(&q)
            || job
                .job
                .keywords
                .iter()
                .any(|tag| tag.to_lowercase().contains(&q));
        if !hit {
            return false;
        }
    }
    true
}

fn compare(a: &ProcessedJob, b: &ProcessedJob, key: SortKey) -> Ordering {
    match key {
        // Highest score first; ties keep prior relative order (stable sort).
        SortKey::MatchScore => b.match_score.cmp(&a.match_score),
        // Newest first.
        SortKey::PostedDate => b.job.posted_date.cmp(&a.job.posted_date),
        // Soonest first; jobs without a deadline sort after all dated jobs.
        SortKey::Deadline => match (a.job.deadline, b.job.deadline) {
            (Some(da), Some(db)) => da.cmp(&db),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
        // Highest ceiling first; 0 ("negotiable") sorts last.
        SortKey::Salary => b.job.salary_max.cmp(&a.job.salary_max),
    }
}

/// Applies the filter, then a stable sort by the chosen key.
pub fn filter_and_sort(jobs: &[ProcessedJob], filter: &JobFilter) -> Vec<ProcessedJob> {
    let mut out: Vec<ProcessedJob> = jobs
        .iter()
        .filter(|job| passes(job, filter))
        .cloned()
        .collect();
    out.sort_by(|a, b| compare(a, b, filter.sort));
    out
}
