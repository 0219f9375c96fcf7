use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{JobBoardStore, StoreError, StoreResult};
use crate::models::application::{Application, ApplicationStatus};
use crate::models::company::Company;
use crate::models::job::Job;
use crate::models::user::User;

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    companies: HashMap<Uuid, Company>,
    jobs: HashMap<Uuid, Job>,
    applications: HashMap<Uuid, Application>,
}

/// Process-local store. Enforces the same uniqueness rules as the SQL schema.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first<T>(mut items: Vec<T>, created_at: impl Fn(&T) -> DateTime<Utc>) -> Vec<T> {
    items.sort_by_key(|item| std::cmp::Reverse(created_at(item)));
    items
}

#[async_trait]
impl JobBoardStore for MemoryStore {
    async fn insert_user(&self, user: &User) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(StoreError::Duplicate("users_email_key".to_string()));
        }
        tables.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn find_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn update_user(&self, user: &User) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        if tables
            .users
            .values()
            .any(|u| u.id != user.id && u.email == user.email)
        {
            return Err(StoreError::Duplicate("users_email_key".to_string()));
        }
        if let Some(existing) = tables.users.get_mut(&user.id) {
            *existing = user.clone();
        }
        Ok(())
    }

    async fn insert_company(&self, company: &Company) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        if tables.companies.values().any(|c| c.name == company.name) {
            return Err(StoreError::Duplicate("companies_name_key".to_string()));
        }
        tables.companies.insert(company.id, company.clone());
        Ok(())
    }

    async fn find_company(&self, id: Uuid) -> StoreResult<Option<Company>> {
        Ok(self.tables.read().await.companies.get(&id).cloned())
    }

    async fn find_company_by_name(&self, name: &str) -> StoreResult<Option<Company>> {
        let tables = self.tables.read().await;
        Ok(tables.companies.values().find(|c| c.name == name).cloned())
    }

    async fn list_companies_by_owner(&self, owner_id: Uuid) -> StoreResult<Vec<Company>> {
        let tables = self.tables.read().await;
        let companies = tables
            .companies
            .values()
            .filter(|c| c.owner_id == owner_id)
            .cloned()
            .collect();
        Ok(newest_first(companies, |c| c.created_at))
    }

    async fn update_company(&self, company: &Company) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        if tables
            .companies
            .values()
            .any(|c| c.id != company.id && c.name == company.name)
        {
            return Err(StoreError::Duplicate("companies_name_key".to_string()));
        }
        if let Some(existing) = tables.companies.get_mut(&company.id) {
            *existing = company.clone();
        }
        Ok(())
    }

    async fn insert_job(&self, job: &Job) -> StoreResult<()> {
        self.tables.write().await.jobs.insert(job.id, job.clone());
        Ok(())
    }

    async fn find_job(&self, id: Uuid) -> StoreResult<Option<Job>> {
        Ok(self.tables.read().await.jobs.get(&id).cloned())
    }

    async fn list_jobs(&self, keyword: Option<&str>) -> StoreResult<Vec<Job>> {
        let tables = self.tables.read().await;
        let jobs = tables
            .jobs
            .values()
            .filter(|j| keyword.map_or(true, |k| j.matches_keyword(k)))
            .cloned()
            .collect();
        Ok(newest_first(jobs, |j| j.created_at))
    }

    async fn list_jobs_by_creator(&self, created_by: Uuid) -> StoreResult<Vec<Job>> {
        let tables = self.tables.read().await;
        let jobs = tables
            .jobs
            .values()
            .filter(|j| j.created_by == created_by)
            .cloned()
            .collect();
        Ok(newest_first(jobs, |j| j.created_at))
    }

    async fn update_job(&self, job: &Job) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        if let Some(existing) = tables.jobs.get_mut(&job.id) {
            *existing = job.clone();
        }
        Ok(())
    }

    async fn delete_job(&self, id: Uuid) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        let removed = tables.jobs.remove(&id).is_some();
        if removed {
            tables.applications.retain(|_, a| a.job_id != id);
        }
        Ok(removed)
    }

    async fn insert_application(&self, application: &Application) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        if tables.applications.values().any(|a| {
            a.job_id == application.job_id && a.applicant_id == application.applicant_id
        }) {
            return Err(StoreError::Duplicate(
                "applications_job_id_applicant_id_key".to_string(),
            ));
        }
        tables
            .applications
            .insert(application.id, application.clone());
        Ok(())
    }

    async fn find_application(&self, id: Uuid) -> StoreResult<Option<Application>> {
        Ok(self.tables.read().await.applications.get(&id).cloned())
    }

    async fn find_application_for(
        &self,
        job_id: Uuid,
        applicant_id: Uuid,
    ) -> StoreResult<Option<Application>> {
        let tables = self.tables.read().await;
        Ok(tables
            .applications
            .values()
            .find(|a| a.job_id == job_id && a.applicant_id == applicant_id)
            .cloned())
    }

    async fn list_applications_by_applicant(
        &self,
        applicant_id: Uuid,
    ) -> StoreResult<Vec<Application>> {
        let tables = self.tables.read().await;
        let apps = tables
            .applications
            .values()
            .filter(|a| a.applicant_id == applicant_id)
            .cloned()
            .collect();
        Ok(newest_first(apps, |a| a.created_at))
    }

    async fn list_applications_for_job(&self, job_id: Uuid) -> StoreResult<Vec<Application>> {
        let tables = self.tables.read().await;
        let apps = tables
            .applications
            .values()
            .filter(|a| a.job_id == job_id)
            .cloned()
            .collect();
        Ok(newest_first(apps, |a| a.created_at))
    }

    async fn set_application_status(
        &self,
        id: Uuid,
        expected: ApplicationStatus,
        status: ApplicationStatus,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<Option<Application>> {
        let mut tables = self.tables.write().await;
        Ok(tables
            .applications
            .get_mut(&id)
            .filter(|app| app.status == expected)
            .map(|app| {
                app.status = status;
                app.updated_at = updated_at;
                app.clone()
            }))
    }

    async fn delete_application(&self, id: Uuid) -> StoreResult<bool> {
        Ok(self.tables.write().await.applications.remove(&id).is_some())
    }
}
