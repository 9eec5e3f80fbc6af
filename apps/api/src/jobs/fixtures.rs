//! Bundled mock listings, served when no provider API key is configured so
//! the whole flow works offline. Deadlines are derived from the injected
//! clock so the urgency window stays visible in a live demo.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Days;

use crate::matching::clock::Clock;
use crate::models::job::{CompanyInfo, Job};

use super::source::{JobSource, SourceError};

pub struct FixtureJobSource {
    clock: Arc<dyn Clock>,
}

impl FixtureJobSource {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

#[async_trait]
impl JobSource for FixtureJobSource {
    async fn fetch(&self, _keyword: &str) -> Result<Vec<Job>, SourceError> {
        Ok(mock_jobs(self.clock.as_ref()))
    }
}

pub fn mock_jobs(clock: &dyn Clock) -> Vec<Job> {
    let today = clock.today();
    let plus = |days: u64| today.checked_add_days(Days::new(days));

    vec![
        Job {
            id: 1,
            title: "Frontend Developer - React/Next.js".to_string(),
            company: CompanyInfo {
                name: "TechCorp Inc.".to_string(),
                industry: "IT services".to_string(),
                location: "Gangnam, Seoul".to_string(),
                employee_count: "100-500".to_string(),
                founded: "2015".to_string(),
                website: "https://techcorp.example.com".to_string(),
                description: "Software company building innovative technology solutions \
                              for a global market."
                    .to_string(),
            },
            location: "Seoul, South Korea".to_string(),
            posted_date: today.checked_sub_days(Days::new(2)).unwrap_or(today),
            deadline: plus(2),
            description: "We are looking for a skilled Frontend Developer with expertise in \
                          React, Next.js, TypeScript, and modern web technologies. Join our \
                          team to build cutting-edge user interfaces and deliver exceptional \
                          user experiences."
                .to_string(),
            url: "https://example.com/job1".to_string(),
            keywords: vec![
                "React".to_string(),
                "Next.js".to_string(),
                "TypeScript".to_string(),
                "JavaScript".to_string(),
                "Frontend".to_string(),
                "UI/UX".to_string(),
            ],
            salary_min: 4000,
            salary_max: 6000,
            employment_type: "full-time".to_string(),
            remote_available: true,
            requirements: Some(vec![
                "3+ years of hands-on React and Next.js experience".to_string(),
                "Proficiency with TypeScript".to_string(),
                "Responsive web development experience".to_string(),
                "Collaboration with Git".to_string(),
                "RESTful API integration experience".to_string(),
            ]),
            benefits: Some(vec![
                "Flexible working hours".to_string(),
                "No salary ceiling".to_string(),
                "Education budget".to_string(),
                "Annual health checkup".to_string(),
                "Lunch provided".to_string(),
            ]),
        },
        Job {
            id: 2,
            title: "UX Designer - Product Design".to_string(),
            company: CompanyInfo {
                name: "DesignLab".to_string(),
                industry: "Design services".to_string(),
                location: "Seongsu, Seoul".to_string(),
                employee_count: "50-100".to_string(),
                founded: "2018".to_string(),
                website: "https://designlab.example.com".to_string(),
                description: "A design studio crafting innovative products through \
                              user-centered design."
                    .to_string(),
            },
            location: "Seoul, South Korea".to_string(),
            posted_date: today.checked_sub_days(Days::new(3)).unwrap_or(today),
            deadline: plus(9),
            description: "We're seeking a talented UX Designer to join our product team. \
                          You'll be responsible for creating intuitive and engaging user \
                          experiences across our digital products."
                .to_string(),
            url: "https://example.com/job2".to_string(),
            keywords: vec![
                "UX Designer".to_string(),
                "Product Design".to_string(),
                "Figma".to_string(),
                "Prototyping".to_string(),
                "User Research".to_string(),
            ],
            salary_min: 3500,
            salary_max: 5500,
            employment_type: "full-time".to_string(),
            remote_available: false,
            requirements: Some(vec![
                "3+ years of UX/UI design experience".to_string(),
                "Fluency in Figma and Sketch".to_string(),
                "User research experience".to_string(),
                "Prototyping skills".to_string(),
                "Design system experience".to_string(),
            ]),
            benefits: Some(vec![
                "Flexible start times".to_string(),
                "Design tool stipend".to_string(),
                "Conference budget".to_string(),
                "Lunch provided".to_string(),
            ]),
        },
        Job {
            id: 3,
            title: "Backend Engineer - Rust".to_string(),
            company: CompanyInfo {
                name: "Ferrous Systems Korea".to_string(),
                industry: "Infrastructure software".to_string(),
                location: "Pangyo".to_string(),
                ..CompanyInfo::default()
            },
            location: "Pangyo, South Korea".to_string(),
            posted_date: today.checked_sub_days(Days::new(1)).unwrap_or(today),
            deadline: None,
            description: "Build and operate high-throughput services in Rust. Experience \
                          with async runtimes, observability, and storage engines is a plus."
                .to_string(),
            url: "https://example.com/job3".to_string(),
            keywords: vec![
                "Rust".to_string(),
                "Backend".to_string(),
                "Tokio".to_string(),
                "PostgreSQL".to_string(),
            ],
            salary_min: 0,
            salary_max: 0, // negotiable
            employment_type: "full-time".to_string(),
            remote_available: true,
            requirements: None,
            benefits: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::clock::FixedClock;
    use chrono::NaiveDate;

    #[test]
    fn test_fixture_deadlines_track_the_clock() {
        let clock = FixedClock::at(NaiveDate::from_ymd_opt(2024, 8, 1).unwrap());
        let jobs = mock_jobs(&clock);

        assert_eq!(jobs[0].deadline, NaiveDate::from_ymd_opt(2024, 8, 3));
        assert_eq!(jobs[1].deadline, NaiveDate::from_ymd_opt(2024, 8, 10));
        assert!(jobs[2].deadline.is_none());
    }

    #[test]
    fn test_fixture_ids_are_unique() {
        let clock = FixedClock::at(NaiveDate::from_ymd_opt(2024, 8, 1).unwrap());
        let jobs = mock_jobs(&clock);
        let mut ids: Vec<u64> = jobs.iter().map(|j| j.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), jobs.len());
    }

    #[tokio::test]
    async fn test_fixture_source_ignores_keyword() {
        let clock = Arc::new(FixedClock::at(NaiveDate::from_ymd_opt(2024, 8, 1).unwrap()));
        let source = FixtureJobSource::new(clock);
        let jobs = source.fetch("anything").await.unwrap();
        assert_eq!(jobs.len(), 3);
    }
}
