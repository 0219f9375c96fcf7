//! View-models for job listings.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::Job;

/// Outcome of looking a job up by id.
#[derive(Debug, Clone, PartialEq)]
pub enum JobLookup {
    Found(Job),
    NotFound,
}

/// Client route of the job details page.
pub fn details_route(job_id: &str) -> String {
    format!("/description/{job_id}")
}

/// Days since posting, as shown on a card.
pub fn posted_ago(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    match (now - created_at).num_days().max(0) {
        0 => "Today".to_string(),
        1 => "1 day ago".to_string(),
        n => format!("{n} days ago"),
    }
}

fn format_salary(salary: f64) -> String {
    if salary.fract() == 0.0 {
        format!("{salary:.0}LPA")
    } else {
        format!("{salary}LPA")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct JobCard {
    pub job_id: Uuid,
    pub company_name: String,
    pub company_location: String,
    pub title: String,
    pub description: String,
    pub badges: Vec<String>,
    pub posted: String,
}

impl JobCard {
    pub fn new(job: &Job, now: DateTime<Utc>) -> Self {
        let (company_name, company_location) = match &job.company {
            Some(company) => (
                company.name.clone(),
                company.location.clone().unwrap_or_else(|| job.location.clone()),
            ),
            None => (String::new(), job.location.clone()),
        };

        Self {
            job_id: job.id,
            company_name,
            company_location,
            title: job.title.clone(),
            description: job.description.clone(),
            badges: vec![
                format!("{} Positions", job.positions),
                job.job_type.clone(),
                format_salary(job.salary),
            ],
            posted: posted_ago(job.created_at, now),
        }
    }

    pub fn details_route(&self) -> String {
        details_route(&self.job_id.to_string())
    }
}

/// Jobs bookmarked for later. Lives only as long as the client does.
#[derive(Debug, Clone, Default)]
pub struct SavedJobs {
    ids: HashSet<Uuid>,
}

impl SavedJobs {
    /// Returns whether the job is saved after the toggle.
    pub fn toggle(&mut self, job_id: Uuid) -> bool {
        if self.ids.remove(&job_id) {
            false
        } else {
            self.ids.insert(job_id);
            true
        }
    }

    pub fn contains(&self, job_id: &Uuid) -> bool {
        self.ids.contains(job_id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
