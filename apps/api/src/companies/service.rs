use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::company::{Company, RegisterCompanyRequest, UpdateCompanyRequest};
use crate::store::{JobBoardStore, StoreError};
use crate::validation::{validate_company, validate_company_update};

fn name_taken(name: &str) -> AppError {
    AppError::Conflict(format!("A company named '{name}' is already registered"))
}

fn map_duplicate(name: &str) -> impl FnOnce(StoreError) -> AppError + '_ {
    move |e| match e {
        StoreError::Duplicate(_) => name_taken(name),
        other => other.into(),
    }
}

pub async fn register(
    store: &dyn JobBoardStore,
    owner_id: Uuid,
    req: RegisterCompanyRequest,
) -> Result<Company, AppError> {
    validate_company(&req)?;
    store
        .find_user(owner_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {owner_id} not found")))?;

    let company = Company::new(owner_id, req);
    if store.find_company_by_name(&company.name).await?.is_some() {
        return Err(name_taken(&company.name));
    }
    store
        .insert_company(&company)
        .await
        .map_err(map_duplicate(&company.name))?;

    info!("Registered company {} ({})", company.name, company.id);
    Ok(company)
}

pub async fn get(store: &dyn JobBoardStore, id: Uuid) -> Result<Company, AppError> {
    store
        .find_company(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Company {id} not found")))
}

pub async fn list_owned(store: &dyn JobBoardStore, owner_id: Uuid) -> Result<Vec<Company>, AppError> {
    Ok(store.list_companies_by_owner(owner_id).await?)
}

pub async fn update(
    store: &dyn JobBoardStore,
    caller: Uuid,
    id: Uuid,
    req: UpdateCompanyRequest,
) -> Result<Company, AppError> {
    validate_company_update(&req)?;
    let mut company = get(store, id).await?;
    if company.owner_id != caller {
        return Err(AppError::Forbidden);
    }

    company.apply_update(req);
    if let Some(existing) = store.find_company_by_name(&company.name).await? {
        if existing.id != company.id {
            return Err(name_taken(&company.name));
        }
    }
    store
        .update_company(&company)
        .await
        .map_err(map_duplicate(&company.name))?;

    info!("Updated company {id}");
    Ok(company)
}
