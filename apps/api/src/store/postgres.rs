use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use super::{JobBoardStore, StoreResult};
use crate::models::application::{Application, ApplicationRow, ApplicationStatus};
use crate::models::company::Company;
use crate::models::job::Job;
use crate::models::user::{User, UserRow};

/// PostgreSQL-backed store. Reference columns carry no foreign keys.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn into_applications(rows: Vec<ApplicationRow>) -> StoreResult<Vec<Application>> {
    rows.into_iter().map(Application::try_from).collect()
}

/// Escapes LIKE wildcards so a keyword is matched literally.
fn like_pattern(keyword: &str) -> String {
    let escaped = keyword
        .trim()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[async_trait]
impl JobBoardStore for PgStore {
    async fn insert_user(&self, user: &User) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users
                (id, fullname, email, phone_number, role, profile, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(user.id)
        .bind(&user.fullname)
        .bind(&user.email)
        .bind(&user.phone_number)
        .bind(user.role.as_str())
        .bind(Json(&user.profile))
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(User::try_from).transpose()
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        row.map(User::try_from).transpose()
    }

    async fn update_user(&self, user: &User) -> StoreResult<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET fullname = $2, email = $3, phone_number = $4, role = $5,
                profile = $6, updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(user.id)
        .bind(&user.fullname)
        .bind(&user.email)
        .bind(&user.phone_number)
        .bind(user.role.as_str())
        .bind(Json(&user.profile))
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn insert_company(&self, company: &Company) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO companies
                (id, name, description, website, location, logo, owner_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(company.id)
        .bind(&company.name)
        .bind(&company.description)
        .bind(&company.website)
        .bind(&company.location)
        .bind(&company.logo)
        .bind(company.owner_id)
        .bind(company.created_at)
        .bind(company.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_company(&self, id: Uuid) -> StoreResult<Option<Company>> {
        Ok(sqlx::query_as("SELECT * FROM companies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn find_company_by_name(&self, name: &str) -> StoreResult<Option<Company>> {
        Ok(sqlx::query_as("SELECT * FROM companies WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn list_companies_by_owner(&self, owner_id: Uuid) -> StoreResult<Vec<Company>> {
        Ok(sqlx::query_as(
            "SELECT * FROM companies WHERE owner_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn update_company(&self, company: &Company) -> StoreResult<()> {
        sqlx::query(
            r#"
            UPDATE companies
            SET name = $2, description = $3, website = $4, location = $5,
                logo = $6, updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(company.id)
        .bind(&company.name)
        .bind(&company.description)
        .bind(&company.website)
        .bind(&company.location)
        .bind(&company.logo)
        .bind(company.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn insert_job(&self, job: &Job) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO jobs
                (id, title, description, requirements, salary, location, job_type,
                 experience_level, positions, company_id, created_by, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(job.id)
        .bind(&job.title)
        .bind(&job.description)
        .bind(&job.requirements)
        .bind(job.salary)
        .bind(&job.location)
        .bind(&job.job_type)
        .bind(job.experience_level)
        .bind(job.positions)
        .bind(job.company_id)
        .bind(job.created_by)
        .bind(job.created_at)
        .bind(job.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_job(&self, id: Uuid) -> StoreResult<Option<Job>> {
        Ok(sqlx::query_as("SELECT * FROM jobs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn list_jobs(&self, keyword: Option<&str>) -> StoreResult<Vec<Job>> {
        let jobs = match keyword.map(str::trim).filter(|k| !k.is_empty()) {
            Some(keyword) => {
                debug!("Searching jobs for keyword '{keyword}'");
                sqlx::query_as(
                    r#"
                    SELECT * FROM jobs
                    WHERE title ILIKE $1 OR description ILIKE $1
                    ORDER BY created_at DESC
                    "#,
                )
                .bind(like_pattern(keyword))
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as("SELECT * FROM jobs ORDER BY created_at DESC")
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        Ok(jobs)
    }

    async fn list_jobs_by_creator(&self, created_by: Uuid) -> StoreResult<Vec<Job>> {
        Ok(
            sqlx::query_as("SELECT * FROM jobs WHERE created_by = $1 ORDER BY created_at DESC")
                .bind(created_by)
                .fetch_all(&self.pool)
                .await?,
        )
    }

    async fn update_job(&self, job: &Job) -> StoreResult<()> {
        sqlx::query(
            r#"
            UPDATE jobs
            SET title = $2, description = $3, requirements = $4, salary = $5,
                location = $6, job_type = $7, experience_level = $8,
                positions = $9, updated_at = $10
            WHERE id = $1
            "#,
        )
        .bind(job.id)
        .bind(&job.title)
        .bind(&job.description)
        .bind(&job.requirements)
        .bind(job.salary)
        .bind(&job.location)
        .bind(&job.job_type)
        .bind(job.experience_level)
        .bind(job.positions)
        .bind(job.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_job(&self, id: Uuid) -> StoreResult<bool> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM applications WHERE job_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    async fn insert_application(&self, application: &Application) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO applications (id, job_id, applicant_id, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(application.id)
        .bind(application.job_id)
        .bind(application.applicant_id)
        .bind(application.status.as_str())
        .bind(application.created_at)
        .bind(application.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_application(&self, id: Uuid) -> StoreResult<Option<Application>> {
        let row: Option<ApplicationRow> =
            sqlx::query_as("SELECT * FROM applications WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        row.map(Application::try_from).transpose()
    }

    async fn find_application_for(
        &self,
        job_id: Uuid,
        applicant_id: Uuid,
    ) -> StoreResult<Option<Application>> {
        let row: Option<ApplicationRow> = sqlx::query_as(
            "SELECT * FROM applications WHERE job_id = $1 AND applicant_id = $2",
        )
        .bind(job_id)
        .bind(applicant_id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Application::try_from).transpose()
    }

    async fn list_applications_by_applicant(
        &self,
        applicant_id: Uuid,
    ) -> StoreResult<Vec<Application>> {
        let rows: Vec<ApplicationRow> = sqlx::query_as(
            "SELECT * FROM applications WHERE applicant_id = $1 ORDER BY created_at DESC",
        )
        .bind(applicant_id)
        .fetch_all(&self.pool)
        .await?;
        into_applications(rows)
    }

    async fn list_applications_for_job(&self, job_id: Uuid) -> StoreResult<Vec<Application>> {
        let rows: Vec<ApplicationRow> = sqlx::query_as(
            "SELECT * FROM applications WHERE job_id = $1 ORDER BY created_at DESC",
        )
        .bind(job_id)
        .fetch_all(&self.pool)
        .await?;
        into_applications(rows)
    }

    async fn set_application_status(
        &self,
        id: Uuid,
        expected: ApplicationStatus,
        status: ApplicationStatus,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<Option<Application>> {
        let row: Option<ApplicationRow> = sqlx::query_as(
            "UPDATE applications SET status = $2, updated_at = $3 \
             WHERE id = $1 AND status = $4 RETURNING *",
        )
        .bind(id)
        .bind(status.as_str())
        .bind(updated_at)
        .bind(expected.as_str())
        .fetch_optional(&self.pool)
        .await?;
        row.map(Application::try_from).transpose()
    }

    async fn delete_application(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM applications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
