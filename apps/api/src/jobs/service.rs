use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job::{Job, JobView, PostJobRequest, UpdateJobRequest};
use crate::store::JobBoardStore;
use crate::validation::{validate_job_posting, validate_job_update};

async fn with_company(store: &dyn JobBoardStore, job: Job) -> Result<JobView, AppError> {
    let company = store.find_company(job.company_id).await?;
    Ok(JobView { job, company })
}

async fn with_companies(
    store: &dyn JobBoardStore,
    jobs: Vec<Job>,
) -> Result<Vec<JobView>, AppError> {
    let mut views = Vec::with_capacity(jobs.len());
    for job in jobs {
        views.push(with_company(store, job).await?);
    }
    Ok(views)
}

async fn owned_job(store: &dyn JobBoardStore, caller: Uuid, id: Uuid) -> Result<Job, AppError> {
    let job = store
        .find_job(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))?;
    if job.created_by != caller {
        return Err(AppError::Forbidden);
    }
    Ok(job)
}

/// Posts a job under an existing company owned by the caller.
pub async fn post(
    store: &dyn JobBoardStore,
    caller: Uuid,
    req: PostJobRequest,
) -> Result<JobView, AppError> {
    validate_job_posting(&req)?;
    let company = store
        .find_company(req.company_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Company {} not found", req.company_id)))?;
    if company.owner_id != caller {
        return Err(AppError::Forbidden);
    }

    let job = Job::new(caller, req);
    store.insert_job(&job).await?;
    info!("Posted job {} '{}' for company {}", job.id, job.title, company.id);

    Ok(JobView {
        job,
        company: Some(company),
    })
}

pub async fn list(store: &dyn JobBoardStore, keyword: Option<&str>) -> Result<Vec<JobView>, AppError> {
    let jobs = store.list_jobs(keyword).await?;
    with_companies(store, jobs).await
}

pub async fn get(store: &dyn JobBoardStore, id: Uuid) -> Result<JobView, AppError> {
    let job = store
        .find_job(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))?;
    with_company(store, job).await
}

pub async fn list_posted(store: &dyn JobBoardStore, caller: Uuid) -> Result<Vec<JobView>, AppError> {
    let jobs = store.list_jobs_by_creator(caller).await?;
    with_companies(store, jobs).await
}

pub async fn update(
    store: &dyn JobBoardStore,
    caller: Uuid,
    id: Uuid,
    req: UpdateJobRequest,
) -> Result<JobView, AppError> {
    validate_job_update(&req)?;
    let mut job = owned_job(store, caller, id).await?;
    job.apply_update(req);
    store.update_job(&job).await?;
    info!("Updated job {id}");
    with_company(store, job).await
}

/// Removes the job together with its applications.
pub async fn delete(store: &dyn JobBoardStore, caller: Uuid, id: Uuid) -> Result<(), AppError> {
    owned_job(store, caller, id).await?;
    store.delete_job(id).await?;
    info!("Deleted job {id}");
    Ok(())
}
