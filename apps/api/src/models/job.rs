use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Structured company details attached to a listing.
/// Everything beyond the name is optional in practice — the provider often
/// only supplies a name, so the rest defaults to empty strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanyInfo {
    pub name: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub employee_count: String,
    #[serde(default)]
    pub founded: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub description: String,
}

/// A job listing. Created by the data source (provider or fixture) at load
/// time, replaced wholesale on refresh, never mutated by the user.
///
/// `id` is immutable for the session. `deadline` is compared at calendar-day
/// granularity only. `salary_min`/`salary_max` share one currency unit;
/// both zero means "negotiable".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: u64,
    pub title: String,
    pub company: CompanyInfo,
    pub location: String,
    pub posted_date: NaiveDate,
    pub deadline: Option<NaiveDate>,
    pub description: String,
    pub url: String,
    /// The listing's own tags — distinct from the user's interest keywords.
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub salary_min: i64,
    #[serde(default)]
    pub salary_max: i64,
    pub employment_type: String,
    #[serde(default)]
    pub remote_available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benefits: Option<Vec<String>>,
}

/// A job augmented with its computed match result. Derived, never persisted —
/// recomputed whenever the job list or the user keyword set changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedJob {
    #[serde(flatten)]
    pub job: Job,
    pub matched_keywords: Vec<String>,
    pub match_score: u32,
}

/// Parses a provider-supplied date at calendar-day granularity.
/// Accepts plain `YYYY-MM-DD` as well as RFC 3339 timestamps (the time-of-day
/// part is dropped).
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .ok()
}
