//! Persistence boundary for the job board.
//!
//! `AppState` carries an `Arc<dyn JobBoardStore>`: `PgStore` in production,
//! `MemoryStore` for local runs and tests. Stores do not check references
//! between records; the service layer does that before every write.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::models::application::{Application, ApplicationStatus};
use crate::models::company::Company;
use crate::models::job::Job;
use crate::models::user::User;

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("duplicate record: {0}")]
    Duplicate(String),

    #[error("corrupt record: {0}")]
    Corrupt(String),

    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            if db.is_unique_violation() {
                let constraint = db.constraint().unwrap_or("unique constraint").to_string();
                return StoreError::Duplicate(constraint);
            }
        }
        StoreError::Database(err)
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait JobBoardStore: Send + Sync {
    async fn insert_user(&self, user: &User) -> StoreResult<()>;
    async fn find_user(&self, id: Uuid) -> StoreResult<Option<User>>;
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;
    async fn update_user(&self, user: &User) -> StoreResult<()>;

    async fn insert_company(&self, company: &Company) -> StoreResult<()>;
    async fn find_company(&self, id: Uuid) -> StoreResult<Option<Company>>;
    async fn find_company_by_name(&self, name: &str) -> StoreResult<Option<Company>>;
    async fn list_companies_by_owner(&self, owner_id: Uuid) -> StoreResult<Vec<Company>>;
    async fn update_company(&self, company: &Company) -> StoreResult<()>;

    async fn insert_job(&self, job: &Job) -> StoreResult<()>;
    async fn find_job(&self, id: Uuid) -> StoreResult<Option<Job>>;
    /// Newest first, filtered by a case-insensitive keyword over title and description.
    async fn list_jobs(&self, keyword: Option<&str>) -> StoreResult<Vec<Job>>;
    async fn list_jobs_by_creator(&self, created_by: Uuid) -> StoreResult<Vec<Job>>;
    async fn update_job(&self, job: &Job) -> StoreResult<()>;
    /// Deletes the job and every application that references it.
    async fn delete_job(&self, id: Uuid) -> StoreResult<bool>;

    async fn insert_application(&self, application: &Application) -> StoreResult<()>;
    async fn find_application(&self, id: Uuid) -> StoreResult<Option<Application>>;
    async fn find_application_for(
        &self,
        job_id: Uuid,
        applicant_id: Uuid,
    ) -> StoreResult<Option<Application>>;
    async fn list_applications_by_applicant(
        &self,
        applicant_id: Uuid,
    ) -> StoreResult<Vec<Application>>;
    async fn list_applications_for_job(&self, job_id: Uuid) -> StoreResult<Vec<Application>>;
    /// Writes `status` only while the stored status is still `expected`.
    /// `None` when the row is gone or its status has moved on.
    async fn set_application_status(
        &self,
        id: Uuid,
        expected: ApplicationStatus,
        status: ApplicationStatus,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<Option<Application>>;
    async fn delete_application(&self, id: Uuid) -> StoreResult<bool>;
}
