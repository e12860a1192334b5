use contracts::domain::constraint::{ConstraintInstance, ConstraintSignature};
use contracts::shared::page::Page;

use super::repository;
use crate::shared::data::db::get_connection;
use crate::shared::error::ApiError;

pub async fn get_signatures(
    page: u64,
    page_size: u64,
    search: Option<String>,
) -> Result<Page<ConstraintSignature>, ApiError> {
    let (items, total) =
        repository::list_signatures(get_connection(), search.as_deref(), page, page_size).await?;
    Ok(Page::new(items, total, page, page_size))
}

pub async fn get_signature_by_id(id: &str) -> Result<ConstraintSignature, ApiError> {
    repository::find_signature_by_id(get_connection(), id)
        .await?
        .ok_or_else(|| ApiError::not_found("Could not find a constraint with this id"))
}

pub async fn get_instances(signature_id: &str) -> Result<Vec<ConstraintInstance>, ApiError> {
    let db = get_connection();
    if repository::find_signature_by_id(db, signature_id).await?.is_none() {
        return Err(ApiError::not_found("Could not find a constraint with this id"));
    }
    Ok(repository::list_instances_for_signature(db, signature_id).await?)
}
