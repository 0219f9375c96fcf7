use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::applications::transitions::TransitionPolicy;
use crate::errors::AppError;
use crate::models::application::{Application, ApplicationStatus, AppliedJob, JobApplicant};
use crate::models::job::Job;
use crate::store::{JobBoardStore, StoreError};

/// Confirms both ends of an application exist. The store accepts dangling
/// references, so this runs before every insert.
pub async fn ensure_references(
    store: &dyn JobBoardStore,
    job_id: Uuid,
    applicant_id: Uuid,
) -> Result<Job, AppError> {
    let job = store
        .find_job(job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;
    store
        .find_user(applicant_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {applicant_id} not found")))?;
    Ok(job)
}

pub async fn apply(
    store: &dyn JobBoardStore,
    applicant_id: Uuid,
    job_id: Uuid,
) -> Result<Application, AppError> {
    ensure_references(store, job_id, applicant_id).await?;

    if store
        .find_application_for(job_id, applicant_id)
        .await?
        .is_some()
    {
        warn!("User {applicant_id} already applied to job {job_id}");
        return Err(AppError::Conflict(
            "You have already applied for this job".to_string(),
        ));
    }

    let application = Application::new(job_id, applicant_id);
    store
        .insert_application(&application)
        .await
        .map_err(|e| match e {
            StoreError::Duplicate(_) => {
                AppError::Conflict("You have already applied for this job".to_string())
            }
            other => other.into(),
        })?;

    info!(
        "Application {} created for job {job_id} by user {applicant_id}",
        application.id
    );
    Ok(application)
}

async fn load(store: &dyn JobBoardStore, id: Uuid) -> Result<Application, AppError> {
    store
        .find_application(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Application {id} not found")))
}

/// Applicants see their own applications; recruiters see those on their jobs.
async fn authorize(
    store: &dyn JobBoardStore,
    caller: Uuid,
    application: &Application,
) -> Result<(), AppError> {
    if application.applicant_id == caller {
        return Ok(());
    }
    match store.find_job(application.job_id).await? {
        Some(job) if job.created_by == caller => Ok(()),
        _ => Err(AppError::Forbidden),
    }
}

async fn recruiter_job(
    store: &dyn JobBoardStore,
    caller: Uuid,
    job_id: Uuid,
) -> Result<Job, AppError> {
    let job = store
        .find_job(job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;
    if job.created_by != caller {
        return Err(AppError::Forbidden);
    }
    Ok(job)
}

pub async fn get(
    store: &dyn JobBoardStore,
    caller: Uuid,
    id: Uuid,
) -> Result<Application, AppError> {
    let application = load(store, id).await?;
    authorize(store, caller, &application).await?;
    Ok(application)
}

pub async fn list_for_applicant(
    store: &dyn JobBoardStore,
    applicant_id: Uuid,
) -> Result<Vec<AppliedJob>, AppError> {
    let applications = store.list_applications_by_applicant(applicant_id).await?;
    let mut applied = Vec::with_capacity(applications.len());
    for application in applications {
        let job_details = store.find_job(application.job_id).await?;
        applied.push(AppliedJob {
            application,
            job_details,
        });
    }
    Ok(applied)
}

pub async fn list_for_job(
    store: &dyn JobBoardStore,
    caller: Uuid,
    job_id: Uuid,
) -> Result<Vec<JobApplicant>, AppError> {
    recruiter_job(store, caller, job_id).await?;
    let applications = store.list_applications_for_job(job_id).await?;
    let mut applicants = Vec::with_capacity(applications.len());
    for application in applications {
        let applicant_details = store.find_user(application.applicant_id).await?;
        applicants.push(JobApplicant {
            application,
            applicant_details,
        });
    }
    Ok(applicants)
}

const STATUS_WRITE_ATTEMPTS: usize = 3;

/// Sets an application's status. Only the recruiter who posted the job may
/// decide; `policy` decides which changes are allowed.
pub async fn update_status(
    store: &dyn JobBoardStore,
    policy: TransitionPolicy,
    caller: Uuid,
    id: Uuid,
    raw_status: &str,
) -> Result<Application, AppError> {
    if raw_status.trim().is_empty() {
        return Err(AppError::BadRequest("Status is required".to_string()));
    }
    let status: ApplicationStatus = raw_status.parse().map_err(AppError::BadRequest)?;

    let mut application = load(store, id).await?;
    recruiter_job(store, caller, application.job_id).await?;

    for _ in 0..STATUS_WRITE_ATTEMPTS {
        if let Err(e) = policy.check(application.status, status) {
            warn!("Rejected status change on application {id}: {e}");
            return Err(e.into());
        }

        let previous = application.status;
        if let Some(updated) = store
            .set_application_status(id, previous, status, Utc::now())
            .await?
        {
            info!("Application {id} status {previous} -> {}", updated.status);
            return Ok(updated);
        }

        // Another decision landed between the read and the write.
        application = load(store, id).await?;
    }

    warn!("Gave up on status change for application {id} after concurrent updates");
    Err(AppError::Conflict(
        "Application status changed while updating, please retry".to_string(),
    ))
}

/// Withdrawn by the applicant or removed by the job's recruiter.
pub async fn delete(store: &dyn JobBoardStore, caller: Uuid, id: Uuid) -> Result<(), AppError> {
    let application = load(store, id).await?;
    authorize(store, caller, &application).await?;
    store.delete_application(id).await?;
    info!("Application {id} deleted by user {caller}");
    Ok(())
}
