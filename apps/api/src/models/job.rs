use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::company::Company;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub requirements: Vec<String>,
    /// Annual salary in lakhs per annum.
    pub salary: f64,
    pub location: String,
    pub job_type: String,
    pub experience_level: i32,
    pub positions: i32,
    pub company_id: Uuid,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Job {
    pub fn new(created_by: Uuid, req: PostJobRequest) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: req.title.trim().to_string(),
            description: req.description.trim().to_string(),
            requirements: clean_list(req.requirements),
            salary: req.salary,
            location: req.location.trim().to_string(),
            job_type: req.job_type.trim().to_string(),
            experience_level: req.experience_level,
            positions: req.positions,
            company_id: req.company_id,
            created_by,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply_update(&mut self, req: UpdateJobRequest) {
        if let Some(title) = req.title {
            self.title = title.trim().to_string();
        }
        if let Some(description) = req.description {
            self.description = description.trim().to_string();
        }
        if let Some(requirements) = req.requirements {
            self.requirements = clean_list(requirements);
        }
        if let Some(salary) = req.salary {
            self.salary = salary;
        }
        if let Some(location) = req.location {
            self.location = location.trim().to_string();
        }
        if let Some(job_type) = req.job_type {
            self.job_type = job_type.trim().to_string();
        }
        if let Some(level) = req.experience_level {
            self.experience_level = level;
        }
        if let Some(positions) = req.positions {
            self.positions = positions;
        }
        self.updated_at = Utc::now();
    }

    /// Case-insensitive keyword match over title and description.
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        let keyword = keyword.trim().to_lowercase();
        keyword.is_empty()
            || self.title.to_lowercase().contains(&keyword)
            || self.description.to_lowercase().contains(&keyword)
    }
}

fn clean_list(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// A job with its owning company attached, as returned to clients.
#[derive(Debug, Clone, Serialize)]
pub struct JobView {
    #[serde(flatten)]
    pub job: Job,
    pub company: Option<Company>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostJobRequest {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    pub salary: f64,
    pub location: String,
    pub job_type: String,
    #[serde(default)]
    pub experience_level: i32,
    pub positions: i32,
    pub company_id: Uuid,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateJobRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<Vec<String>>,
    pub salary: Option<f64>,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub experience_level: Option<i32>,
    pub positions: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobQuery {
    #[serde(default)]
    pub keyword: Option<String>,
}

#[cfg(test)]
pub(crate) fn sample_post(company_id: Uuid) -> PostJobRequest {
    PostJobRequest {
        title: "Backend Engineer".to_string(),
        description: "Build REST services in Rust".to_string(),
        requirements: vec![" Rust ".to_string(), "".to_string(), "SQL".to_string()],
        salary: 24.0,
        location: "India".to_string(),
        job_type: "Part Time".to_string(),
        experience_level: 2,
        positions: 12,
        company_id,
    }
}
