//! Application history and resume management.
//!
//! Two invariants are enforced by construction here, never checked after
//! the fact:
//!   - one logical application per job id (applying again replaces the
//!     existing record in place);
//!   - at most one default resume, and exactly one while any resumes exist.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::profile::{ApplicationRecord, ApplicationStatus, Resume};
use crate::persist::debounce::PersistHandle;
use crate::persist::{KEY_APPLICATIONS, KEY_RESUMES};

/// Counts per status for the insights view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ApplicationStats {
    pub total: usize,
    pub applied: usize,
    pub interview: usize,
    pub rejected: usize,
    pub offered: usize,
    pub accepted: usize,
}

pub struct ApplicationStore {
    history: Vec<ApplicationRecord>,
    resumes: Vec<Resume>,
    persist: PersistHandle,
}

impl ApplicationStore {
    pub fn new(
        history: Vec<ApplicationRecord>,
        resumes: Vec<Resume>,
        persist: PersistHandle,
    ) -> Self {
        Self {
            history,
            resumes,
            persist,
        }
    }

    // ── applications ────────────────────────────────────────────────────

    pub fn history(&self) -> &[ApplicationRecord] {
        &self.history
    }

    pub fn application_for(&self, job_id: u64) -> Option<&ApplicationRecord> {
        self.history.iter().find(|app| app.job_id == job_id)
    }

    pub fn has_applied(&self, job_id: u64) -> bool {
        self.application_for(job_id).is_some()
    }

    pub fn by_status(&self, status: ApplicationStatus) -> Vec<&ApplicationRecord> {
        self.history.iter().filter(|a| a.status == status).collect()
    }

    /// Records an application. Applying to an already-applied job replaces
    /// the existing record in place (same position in the history).
    pub fn upsert_application(&mut self, record: ApplicationRecord) -> ApplicationRecord {
        match self
            .history
            .iter()
            .position(|app| app.job_id == record.job_id)
        {
            Some(index) => self.history[index] = record.clone(),
            None => self.history.push(record.clone()),
        }
        self.persist.write_json(KEY_APPLICATIONS, &self.history);
        record
    }

    /// Updates the status (and optionally notes) of an existing application.
    pub fn update_status(
        &mut self,
        job_id: u64,
        status: ApplicationStatus,
        notes: Option<String>,
    ) -> Option<ApplicationRecord> {
        let app = self.history.iter_mut().find(|app| app.job_id == job_id)?;
        app.status = status;
        if let Some(notes) = notes {
            app.notes = notes;
        }
        let updated = app.clone();
        self.persist.write_json(KEY_APPLICATIONS, &self.history);
        Some(updated)
    }

    pub fn remove_application(&mut self, job_id: u64) -> bool {
        let before = self.history.len();
        self.history.retain(|app| app.job_id != job_id);
        if self.history.len() == before {
            return false;
        }
        self.persist.write_json(KEY_APPLICATIONS, &self.history);
        true
    }

    pub fn stats(&self) -> ApplicationStats {
        let count = |status: ApplicationStatus| self.by_status(status).len();
        ApplicationStats {
            total: self.history.len(),
            applied: count(ApplicationStatus::Applied),
            interview: count(ApplicationStatus::Interview),
            rejected: count(ApplicationStatus::Rejected),
            offered: count(ApplicationStatus::Offered),
            accepted: count(ApplicationStatus::Accepted),
        }
    }

    // ── resumes ─────────────────────────────────────────────────────────

    pub fn resumes(&self) -> &[Resume] {
        &self.resumes
    }

    pub fn resume(&self, id: Uuid) -> Option<&Resume> {
        self.resumes.iter().find(|r| r.id == id)
    }

    pub fn default_resume(&self) -> Option<&Resume> {
        self.resumes.iter().find(|r| r.is_default)
    }

    /// Adds a resume. The first resume, or one explicitly added as default,
    /// becomes the single default.
    pub fn add_resume(
        &mut self,
        name: String,
        file_url: String,
        make_default: bool,
        now: DateTime<Utc>,
    ) -> Resume {
        let make_default = make_default || self.resumes.is_empty();
        if make_default {
            for resume in &mut self.resumes {
                resume.is_default = false;
            }
        }
        let resume = Resume {
            id: Uuid::new_v4(),
            name,
            upload_date: now,
            file_url,
            is_default: make_default,
        };
        self.resumes.push(resume.clone());
        self.persist.write_json(KEY_RESUMES, &self.resumes);
        resume
    }

    pub fn rename_resume(&mut self, id: Uuid, name: String) -> Option<Resume> {
        let resume = self.resumes.iter_mut().find(|r| r.id == id)?;
        resume.name = name;
        let updated = resume.clone();
        self.persist.write_json(KEY_RESUMES, &self.resumes);
        Some(updated)
    }

    /// Makes `id` the default, unsetting the previous one. A no-op returning
    /// `None` when the id is unknown — the collection never ends up with
    /// zero defaults while non-empty.
    pub fn set_default_resume(&mut self, id: Uuid) -> Option<Resume> {
        if !self.resumes.iter().any(|r| r.id == id) {
            return None;
        }
        for resume in &mut self.resumes {
            resume.is_default = resume.id == id;
        }
        let updated = self.resume(id).cloned();
        self.persist.write_json(KEY_RESUMES, &self.resumes);
        updated
    }

    /// Removes a resume; deleting the default promotes the first remaining
    /// resume, if any.
    pub fn remove_resume(&mut self, id: Uuid) -> bool {
        let Some(index) = self.resumes.iter().position(|r| r.id == id) else {
            return false;
        };
        let was_default = self.resumes[index].is_default;
        self.resumes.remove(index);
        if was_default {
            if let Some(first) = self.resumes.first_mut() {
                first.is_default = true;
            }
        }
        self.persist.write_json(KEY_RESUMES, &self.resumes);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 8, 1, 12, 0, 0).unwrap()
    }

    fn store() -> (
        ApplicationStore,
        tokio::sync::mpsc::UnboundedReceiver<(String, String)>,
    ) {
        let (persist, rx) = PersistHandle::test_pair();
        (ApplicationStore::new(Vec::new(), Vec::new(), persist), rx)
    }

    fn record(job_id: u64, status: ApplicationStatus) -> ApplicationRecord {
        ApplicationRecord {
            job_id,
            applied_at: now(),
            status,
            notes: String::new(),
            resume_id: None,
        }
    }

    #[test]
    fn test_applying_twice_keeps_one_record_per_job() {
        let (mut store, _rx) = store();
        store.upsert_application(record(5, ApplicationStatus::Applied));
        store.upsert_application(record(5, ApplicationStatus::Interview));

        assert_eq!(store.history().len(), 1);
        assert_eq!(
            store.application_for(5).unwrap().status,
            ApplicationStatus::Interview
        );
    }

    #[test]
    fn test_replacement_preserves_history_position() {
        let (mut store, _rx) = store();
        store.upsert_application(record(1, ApplicationStatus::Applied));
        store.upsert_application(record(2, ApplicationStatus::Applied));
        store.upsert_application(record(1, ApplicationStatus::Rejected));

        let ids: Vec<u64> = store.history().iter().map(|a| a.job_id).collect();
        assert_eq!(ids, [1, 2]);
    }

    #[test]
    fn test_update_status_on_missing_application_is_none() {
        let (mut store, _rx) = store();
        assert!(store
            .update_status(99, ApplicationStatus::Offered, None)
            .is_none());
    }

    #[test]
    fn test_stats_count_by_status() {
        let (mut store, _rx) = store();
        store.upsert_application(record(1, ApplicationStatus::Applied));
        store.upsert_application(record(2, ApplicationStatus::Interview));
        store.upsert_application(record(3, ApplicationStatus::Interview));
        store.upsert_application(record(4, ApplicationStatus::Accepted));

        let stats = store.stats();
        assert_eq!(stats.total, 4);
        assert_eq!(stats.applied, 1);
        assert_eq!(stats.interview, 2);
        assert_eq!(stats.rejected, 0);
        assert_eq!(stats.accepted, 1);
    }

    #[test]
    fn test_first_resume_becomes_default() {
        let (mut store, _rx) = store();
        let resume = store.add_resume("CV".into(), "file://cv.pdf".into(), false, now());
        assert!(resume.is_default);
        assert_eq!(store.default_resume().unwrap().id, resume.id);
    }

    #[test]
    fn test_set_default_unsets_previous() {
        let (mut store, _rx) = store();
        let first = store.add_resume("A".into(), "file://a".into(), false, now());
        let second = store.add_resume("B".into(), "file://b".into(), false, now());
        assert!(!second.is_default);

        store.set_default_resume(second.id).unwrap();
        assert!(!store.resume(first.id).unwrap().is_default);
        assert!(store.resume(second.id).unwrap().is_default);
    }

    #[test]
    fn test_set_default_with_unknown_id_changes_nothing() {
        let (mut store, _rx) = store();
        let only = store.add_resume("A".into(), "file://a".into(), false, now());
        assert!(store.set_default_resume(Uuid::new_v4()).is_none());
        assert!(store.resume(only.id).unwrap().is_default);
    }

    #[test]
    fn test_removing_default_promotes_first_remaining() {
        let (mut store, _rx) = store();
        let first = store.add_resume("A".into(), "file://a".into(), false, now());
        let second = store.add_resume("B".into(), "file://b".into(), false, now());

        assert!(store.remove_resume(first.id));
        assert!(store.resume(second.id).unwrap().is_default);
    }

    #[test]
    fn test_default_invariant_across_mutation_sequence() {
        let (mut store, _rx) = store();
        let a = store.add_resume("A".into(), "file://a".into(), false, now());
        let b = store.add_resume("B".into(), "file://b".into(), true, now());
        let c = store.add_resume("C".into(), "file://c".into(), false, now());

        store.set_default_resume(c.id).unwrap();
        store.remove_resume(c.id);
        store.set_default_resume(b.id).unwrap();
        store.remove_resume(a.id);

        let defaults = store.resumes().iter().filter(|r| r.is_default).count();
        assert_eq!(defaults, 1);
        assert_eq!(store.default_resume().unwrap().id, b.id);
    }

    #[test]
    fn test_mutations_schedule_persistence() {
        let (mut store, mut rx) = store();
        store.upsert_application(record(1, ApplicationStatus::Applied));
        store.add_resume("A".into(), "file://a".into(), false, now());

        let keys: Vec<String> = std::iter::from_fn(|| rx.try_recv().ok())
            .map(|(key, _)| key)
            .collect();
        assert_eq!(keys, [KEY_APPLICATIONS, KEY_RESUMES]);
    }
}
