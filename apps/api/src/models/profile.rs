use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle of a submitted application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Applied,
    Interview,
    Rejected,
    Offered,
    Accepted,
}

/// One logical application per job id. Created when the user applies, status
/// mutated by later actions, removed only by an explicit remove.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub job_id: u64,
    pub applied_at: DateTime<Utc>,
    pub status: ApplicationStatus,
    #[serde(default)]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_id: Option<Uuid>,
}

/// A stored resume. `file_url` is an opaque resource handle — upload and
/// storage of the actual file are out of scope.
///
/// Invariant: at most one resume in a collection has `is_default = true`,
/// enforced by the mutation functions in `profile::applications`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resume {
    pub id: Uuid,
    pub name: String,
    pub upload_date: DateTime<Utc>,
    pub file_url: String,
    pub is_default: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ApplicationStatus::Interview).unwrap(),
            r#""interview""#
        );
        let status: ApplicationStatus = serde_json::from_str(r#""offered""#).unwrap();
        assert_eq!(status, ApplicationStatus::Offered);
    }

    #[test]
    fn test_record_tolerates_missing_optional_fields() {
        let json = r#"{
            "job_id": 5,
            "applied_at": "2024-07-29T10:00:00Z",
            "status": "applied"
        }"#;
        let record: ApplicationRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.job_id, 5);
        assert!(record.notes.is_empty());
        assert!(record.resume_id.is_none());
    }
}
