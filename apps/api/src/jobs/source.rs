//! Job data source — the seam between the service and wherever listings
//! come from. `HttpJobSource` proxies the external job-search provider and
//! reshapes its response into the internal `Job` shape; the fixture source
//! in `jobs::fixtures` stands in when no API key is configured.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::models::job::{parse_calendar_date, CompanyInfo, Job};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider returned status {status}")]
    Status { status: u16 },

    #[error("provider payload could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Fetches the job list for a search keyword. Held in `AppState` as
/// `Arc<dyn JobSource>`; swapped at startup depending on configuration.
#[async_trait]
pub trait JobSource: Send + Sync {
    async fn fetch(&self, keyword: &str) -> Result<Vec<Job>, SourceError>;
}

/// HTTP client for the external job-search provider.
pub struct HttpJobSource {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HttpJobSource {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(15))
                .build()
                .expect("Failed to build HTTP client"),
            base_url,
            api_key,
        }
    }
}

#[async_trait]
impl JobSource for HttpJobSource {
    async fn fetch(&self, keyword: &str) -> Result<Vec<Job>, SourceError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("keywords", keyword), ("access-key", &self.api_key)])
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let payload: ProviderResponse = serde_json::from_str(&body)?;
        Ok(reshape_all(payload))
    }
}

// ── provider wire shapes ────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ProviderResponse {
    jobs: ProviderJobList,
}

#[derive(Debug, Deserialize)]
struct ProviderJobList {
    #[serde(default)]
    job: Vec<ProviderJob>,
}

#[derive(Debug, Deserialize)]
struct ProviderJob {
    id: String,
    position: ProviderPosition,
    company: ProviderCompany,
    #[serde(default)]
    posting_date: String,
    #[serde(default)]
    expiration_date: String,
    #[serde(default)]
    url: String,
    salary: Option<ProviderSalary>,
}

#[derive(Debug, Deserialize)]
struct ProviderPosition {
    title: String,
    #[serde(default)]
    location: ProviderName,
    job_type: ProviderName,
    required_education_level: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ProviderName {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct ProviderCompany {
    detail: ProviderName,
}

#[derive(Debug, Deserialize)]
struct ProviderSalary {
    min: Option<String>,
    max: Option<String>,
}

fn reshape_all(payload: ProviderResponse) -> Vec<Job> {
    payload
        .jobs
        .job
        .into_iter()
        .filter_map(|job| {
            let id = job.id.clone();
            let reshaped = reshape(job);
            if reshaped.is_none() {
                warn!("skipping provider record '{id}': unusable id or posting date");
            }
            reshaped
        })
        .collect()
}

/// Maps one provider record into the internal shape. Field renames plus
/// derived defaults: `remote_available` is false (the provider has no such
/// field), unparseable salaries become 0, a missing education level means
/// no tags. Records whose id or posting date cannot be read are dropped.
fn reshape(job: ProviderJob) -> Option<Job> {
    let id = job.id.parse::<u64>().ok()?;
    let posted_date = parse_calendar_date(&job.posting_date)?;

    let salary = |raw: &Option<String>| {
        raw.as_deref()
            .and_then(|s| s.parse::<i64>().ok())
            .unwrap_or(0)
    };
    let (salary_min, salary_max) = match &job.salary {
        Some(s) => (salary(&s.min), salary(&s.max)),
        None => (0, 0),
    };

    Some(Job {
        id,
        title: job.position.title,
        company: CompanyInfo {
            name: job.company.detail.name,
            ..CompanyInfo::default()
        },
        location: job.position.location.name,
        posted_date,
        deadline: parse_calendar_date(&job.expiration_date),
        description: job.position.job_type.name.clone(),
        url: job.url,
        keywords: job
            .position
            .required_education_level
            .map(|level| vec![level])
            .unwrap_or_default(),
        salary_min,
        salary_max,
        employment_type: job.position.job_type.name,
        remote_available: false,
        requirements: None,
        benefits: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const PROVIDER_PAYLOAD: &str = r#"{
        "jobs": {
            "job": [
                {
                    "id": "101",
                    "position": {
                        "title": "Frontend Developer - React/Next.js",
                        "location": {"name": "Seoul"},
                        "job_type": {"name": "full-time"},
                        "required_education_level": "Bachelor"
                    },
                    "company": {"detail": {"name": "TechCorp Inc."}},
                    "posting_date": "2024-07-29",
                    "expiration_date": "2024-08-05",
                    "url": "https://example.com/job101",
                    "salary": {"min": "4000", "max": "6000"}
                },
                {
                    "id": "102",
                    "position": {
                        "title": "UX Designer",
                        "job_type": {"name": "contract"}
                    },
                    "company": {"detail": {"name": "DesignLab"}},
                    "posting_date": "2024-07-28",
                    "expiration_date": "not a date",
                    "url": "https://example.com/job102"
                }
            ]
        }
    }"#;

    #[test]
    fn test_reshape_renames_and_derives_fields() {
        let payload: ProviderResponse = serde_json::from_str(PROVIDER_PAYLOAD).unwrap();
        let jobs = reshape_all(payload);
        assert_eq!(jobs.len(), 2);

        let first = &jobs[0];
        assert_eq!(first.id, 101);
        assert_eq!(first.title, "Frontend Developer - React/Next.js");
        assert_eq!(first.company.name, "TechCorp Inc.");
        assert_eq!(first.location, "Seoul");
        assert_eq!(
            first.posted_date,
            NaiveDate::from_ymd_opt(2024, 7, 29).unwrap()
        );
        assert_eq!(first.deadline, NaiveDate::from_ymd_opt(2024, 8, 5));
        assert_eq!(first.keywords, vec!["Bachelor".to_string()]);
        assert_eq!(first.salary_min, 4000);
        assert_eq!(first.salary_max, 6000);
        assert!(!first.remote_available);
    }

    #[test]
    fn test_missing_optionals_default() {
        let payload: ProviderResponse = serde_json::from_str(PROVIDER_PAYLOAD).unwrap();
        let jobs = reshape_all(payload);

        let second = &jobs[1];
        assert_eq!(second.location, "");
        assert!(second.deadline.is_none()); // unparseable expiration date
        assert!(second.keywords.is_empty());
        assert_eq!(second.salary_min, 0);
        assert_eq!(second.salary_max, 0);
    }

    #[test]
    fn test_record_with_non_numeric_id_is_dropped() {
        let payload = r#"{
            "jobs": {"job": [{
                "id": "abc",
                "position": {"title": "T", "job_type": {"name": "x"}},
                "company": {"detail": {"name": "C"}},
                "posting_date": "2024-07-29"
            }]}
        }"#;
        let payload: ProviderResponse = serde_json::from_str(payload).unwrap();
        assert!(reshape_all(payload).is_empty());
    }

    #[test]
    fn test_garbage_payload_is_a_parse_error() {
        let err = serde_json::from_str::<ProviderResponse>("{\"unexpected\": true}");
        assert!(err.is_err());
    }

    #[test]
    fn test_empty_job_array_is_fine() {
        let payload: ProviderResponse = serde_json::from_str(r#"{"jobs": {}}"#).unwrap();
        assert!(reshape_all(payload).is_empty());
    }
}
