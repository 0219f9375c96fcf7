use tracing::{info, warn};
use uuid::Uuid;

use crate::blobs::BlobStore;
use crate::errors::AppError;
use crate::models::user::{normalize_email, ProfileUpdate, RegisterUserRequest, User};
use crate::store::{JobBoardStore, StoreError};
use crate::validation::{validate_profile_update, validate_registration};

fn email_taken(email: &str) -> AppError {
    AppError::Conflict(format!("User already exists with email {email}"))
}

pub async fn register(
    store: &dyn JobBoardStore,
    req: RegisterUserRequest,
) -> Result<User, AppError> {
    validate_registration(&req)?;

    let email = normalize_email(&req.email);
    if store.find_user_by_email(&email).await?.is_some() {
        return Err(email_taken(&email));
    }

    let user = User::new(req);
    store.insert_user(&user).await.map_err(|e| match e {
        StoreError::Duplicate(_) => email_taken(&user.email),
        other => other.into(),
    })?;

    info!("Registered user {} ({})", user.id, user.role);
    Ok(user)
}

pub async fn current_user(store: &dyn JobBoardStore, user_id: Uuid) -> Result<User, AppError> {
    store
        .find_user(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))
}

pub fn resume_key(user_id: Uuid) -> String {
    format!("resumes/{user_id}/{}.pdf", Uuid::new_v4())
}

/// Removes a freshly uploaded resume when the write that would reference it
/// failed, then hands the result back unchanged.
async fn discard_on_error<T>(
    blobs: &dyn BlobStore,
    key: Option<&str>,
    result: Result<T, AppError>,
) -> Result<T, AppError> {
    if let (Err(_), Some(key)) = (&result, key) {
        if let Err(e) = blobs.delete(key).await {
            warn!("Could not remove orphaned resume: {e}");
        }
    }
    result
}

/// Validates and applies a profile update, uploading the resume first when one
/// is attached. Returns the stored user.
pub async fn update_profile(
    store: &dyn JobBoardStore,
    blobs: &dyn BlobStore,
    max_resume_bytes: usize,
    user_id: Uuid,
    update: ProfileUpdate,
) -> Result<User, AppError> {
    let mut user = current_user(store, user_id).await?;
    validate_profile_update(&update, max_resume_bytes)?;

    if let Some(email) = &update.email {
        let email = normalize_email(email);
        if let Some(other) = store.find_user_by_email(&email).await? {
            if other.id != user_id {
                return Err(email_taken(&email));
            }
        }
    }

    let resume_key = match &update.resume {
        Some(resume) => {
            let key = resume_key(user_id);
            blobs
                .put(&key, resume.bytes.clone(), "application/pdf")
                .await?;
            Some(key)
        }
        None => None,
    };

    user.apply_profile_update(&update, resume_key.clone());
    let saved = store.update_user(&user).await.map_err(|e| match e {
        StoreError::Duplicate(_) => email_taken(&user.email),
        other => other.into(),
    });
    discard_on_error(blobs, resume_key.as_deref(), saved).await?;

    info!("Updated profile for user {user_id}");
    Ok(user)
}
