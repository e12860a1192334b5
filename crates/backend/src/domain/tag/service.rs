use contracts::domain::tag::{Tag, TagRequest};
use contracts::shared::page::Page;
use uuid::Uuid;

use super::repository;
use crate::shared::data::db::get_connection;
use crate::shared::error::ApiError;
use crate::usecases::cascade_delete;

pub async fn get(page: u64, page_size: u64, search: Option<String>) -> Result<Page<Tag>, ApiError> {
    let (items, total) =
        repository::list(get_connection(), search.as_deref(), page, page_size).await?;
    Ok(Page::new(items, total, page, page_size))
}

pub async fn get_by_id(id: &str) -> Result<Tag, ApiError> {
    repository::find_by_id(get_connection(), id)
        .await?
        .ok_or_else(|| ApiError::not_found("Could not find a tag with this id"))
}

pub async fn create(request: TagRequest) -> Result<Tag, ApiError> {
    request.validate().map_err(ApiError::Validation)?;
    let record = Tag {
        id: Uuid::new_v4().to_string(),
        name: request.name,
    };
    repository::insert(get_connection(), &record).await?;
    Ok(record)
}

pub async fn update(id: &str, request: TagRequest) -> Result<Tag, ApiError> {
    request.validate().map_err(ApiError::Validation)?;
    let db = get_connection();
    if repository::find_by_id(db, id).await?.is_none() {
        return Err(ApiError::not_found("Could not find a tag with this id"));
    }
    let record = Tag {
        id: id.to_string(),
        name: request.name,
    };
    repository::update(db, &record).await?;
    Ok(record)
}

pub async fn delete(id: String) -> Result<(), ApiError> {
    delete_many(vec![id]).await
}

pub async fn delete_many(ids: Vec<String>) -> Result<(), ApiError> {
    cascade_delete::tags::execute(get_connection(), &ids).await
}
