//! Job repository — the single owner of the job collection and the user
//! keyword set. All three downstream consumers (statistics, filter/sort,
//! detail views) read its cached processed output; only the mutation entry
//! points here may write.
//!
//! Scoring runs once per mutation, inside the mutation, so a caller never
//! observes stale scores after `set_jobs`/`set_user_keywords` return.

use crate::matching::highlight::Highlighter;
use crate::matching::score::process_jobs;
use crate::models::job::{Job, ProcessedJob};
use crate::persist::debounce::PersistHandle;
use crate::persist::KEY_KEYWORDS;

pub struct JobRepository {
    jobs: Vec<Job>,
    user_keywords: Vec<String>,
    processed: Vec<ProcessedJob>,
    highlighter: Highlighter,
    /// Message of the most recent failed fetch; cleared by the next
    /// successful one. The job list itself survives failures.
    error: Option<String>,
    /// Generation counter guarding against late, stale fetch results.
    issued_gen: u64,
    persist: PersistHandle,
}

impl JobRepository {
    pub fn new(user_keywords: Vec<String>, persist: PersistHandle) -> Self {
        let highlighter = Highlighter::new(&user_keywords);
        Self {
            jobs: Vec::new(),
            user_keywords,
            processed: Vec::new(),
            highlighter,
            error: None,
            issued_gen: 0,
            persist,
        }
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn processed(&self) -> &[ProcessedJob] {
        &self.processed
    }

    pub fn user_keywords(&self) -> &[String] {
        &self.user_keywords
    }

    pub fn highlighter(&self) -> &Highlighter {
        &self.highlighter
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn job_by_id(&self, id: u64) -> Option<&ProcessedJob> {
        self.processed.iter().find(|p| p.job.id == id)
    }

    /// Replaces the job collection wholesale. Last write wins; no dedup.
    pub fn set_jobs(&mut self, jobs: Vec<Job>) {
        self.jobs = jobs;
        self.error = None;
        self.reprocess();
    }

    /// Issues a generation token for a fetch about to start. The matching
    /// `commit_fetch` applies only while no newer fetch has been issued.
    pub fn begin_fetch(&mut self) -> u64 {
        self.issued_gen += 1;
        self.issued_gen
    }

    /// Commits a finished fetch. A result from a superseded generation is
    /// discarded entirely — neither its jobs nor its error are applied.
    /// A current-generation failure records the error and leaves the
    /// last-known job list intact.
    ///
    /// Returns whether the result was applied.
    pub fn commit_fetch(&mut self, gen: u64, result: Result<Vec<Job>, String>) -> bool {
        if gen != self.issued_gen {
            tracing::debug!("discarding stale fetch result (gen {gen} < {})", self.issued_gen);
            return false;
        }
        match result {
            Ok(jobs) => self.set_jobs(jobs),
            Err(message) => self.error = Some(message),
        }
        true
    }

    /// Replaces the keyword list wholesale and rescores synchronously.
    pub fn set_user_keywords(&mut self, keywords: Vec<String>) {
        self.user_keywords = keywords;
        self.reprocess();
        self.persist.write_json(KEY_KEYWORDS, &self.user_keywords);
    }

    /// Appends one keyword unless it is already present (exact match).
    /// Returns whether the list changed.
    pub fn add_keyword(&mut self, keyword: String) -> bool {
        if self.user_keywords.contains(&keyword) {
            return false;
        }
        self.user_keywords.push(keyword);
        self.reprocess();
        self.persist.write_json(KEY_KEYWORDS, &self.user_keywords);
        true
    }

    /// Removes one keyword (exact match). Returns whether the list changed.
    pub fn remove_keyword(&mut self, keyword: &str) -> bool {
        let before = self.user_keywords.len();
        self.user_keywords.retain(|k| k != keyword);
        if self.user_keywords.len() == before {
            return false;
        }
        self.reprocess();
        self.persist.write_json(KEY_KEYWORDS, &self.user_keywords);
        true
    }

    fn reprocess(&mut self) {
        self.processed = process_jobs(&self.jobs, &self.user_keywords);
        self.highlighter = Highlighter::new(&self.user_keywords);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::CompanyInfo;
    use chrono::NaiveDate;

    fn make_job(id: u64, title: &str, description: &str) -> Job {
        Job {
            id,
            title: title.to_string(),
            company: CompanyInfo::default(),
            location: "Seoul".to_string(),
            posted_date: NaiveDate::from_ymd_opt(2024, 7, 29).unwrap(),
            deadline: None,
            description: description.to_string(),
            url: String::new(),
            keywords: vec![],
            salary_min: 0,
            salary_max: 0,
            employment_type: "full-time".to_string(),
            remote_available: false,
            requirements: None,
            benefits: None,
        }
    }

    fn repo_with(
        keywords: &[&str],
    ) -> (
        JobRepository,
        tokio::sync::mpsc::UnboundedReceiver<(String, String)>,
    ) {
        let (persist, rx) = PersistHandle::test_pair();
        let repo = JobRepository::new(keywords.iter().map(|k| k.to_string()).collect(), persist);
        (repo, rx)
    }

    #[test]
    fn test_set_jobs_rescores_immediately() {
        let (mut repo, _rx) = repo_with(&["React"]);
        repo.set_jobs(vec![make_job(1, "React Developer", ""), make_job(2, "Chef", "")]);

        assert_eq!(repo.processed().len(), 2);
        assert_eq!(repo.processed()[0].match_score, 100);
        assert_eq!(repo.processed()[1].match_score, 0);
    }

    #[test]
    fn test_keyword_mutation_rescores_synchronously() {
        let (mut repo, _rx) = repo_with(&[]);
        repo.set_jobs(vec![make_job(1, "React Developer", "")]);
        assert_eq!(repo.processed()[0].match_score, 0);

        repo.add_keyword("React".to_string());
        assert_eq!(repo.processed()[0].match_score, 100);

        repo.remove_keyword("React");
        assert_eq!(repo.processed()[0].match_score, 0);
    }

    #[test]
    fn test_add_keyword_deduplicates_exact_matches() {
        let (mut repo, _rx) = repo_with(&["React"]);
        assert!(!repo.add_keyword("React".to_string()));
        assert_eq!(repo.user_keywords(), ["React"]);
    }

    #[test]
    fn test_failed_fetch_keeps_last_known_jobs() {
        let (mut repo, _rx) = repo_with(&[]);
        let gen = repo.begin_fetch();
        assert!(repo.commit_fetch(gen, Ok(vec![make_job(1, "A", "")])));

        let gen = repo.begin_fetch();
        assert!(repo.commit_fetch(gen, Err("provider down".to_string())));
        assert_eq!(repo.jobs().len(), 1);
        assert_eq!(repo.error(), Some("provider down"));

        // Next success clears the error.
        let gen = repo.begin_fetch();
        assert!(repo.commit_fetch(gen, Ok(vec![make_job(2, "B", "")])));
        assert!(repo.error().is_none());
    }

    #[test]
    fn test_stale_fetch_result_is_discarded() {
        let (mut repo, _rx) = repo_with(&[]);
        let first = repo.begin_fetch();
        let second = repo.begin_fetch();

        // The newer fetch lands first.
        assert!(repo.commit_fetch(second, Ok(vec![make_job(2, "new", "")])));
        // The older one arrives late and must not overwrite it.
        assert!(!repo.commit_fetch(first, Ok(vec![make_job(1, "old", "")])));

        assert_eq!(repo.jobs().len(), 1);
        assert_eq!(repo.jobs()[0].id, 2);
    }

    #[test]
    fn test_stale_fetch_error_is_discarded_too() {
        let (mut repo, _rx) = repo_with(&[]);
        let first = repo.begin_fetch();
        let second = repo.begin_fetch();

        assert!(repo.commit_fetch(second, Ok(vec![make_job(2, "new", "")])));
        assert!(!repo.commit_fetch(first, Err("too late".to_string())));
        assert!(repo.error().is_none());
    }

    #[test]
    fn test_keyword_mutations_schedule_persistence() {
        let (persist, mut rx) = PersistHandle::test_pair();
        let mut repo = JobRepository::new(vec![], persist);

        repo.add_keyword("React".to_string());
        repo.set_user_keywords(vec!["Rust".to_string()]);

        let (key, first) = rx.try_recv().unwrap();
        assert_eq!(key, KEY_KEYWORDS);
        assert_eq!(first, r#"["React"]"#);
        let (_, second) = rx.try_recv().unwrap();
        assert_eq!(second, r#"["Rust"]"#);
    }
}
