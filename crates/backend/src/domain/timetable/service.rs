use contracts::domain::timetable::{Timetable, TimetableRequest};
use contracts::shared::page::Page;
use uuid::Uuid;

use super::repository;
use crate::shared::data::db::get_connection;
use crate::shared::error::ApiError;

pub async fn get(page: u64, page_size: u64) -> Result<Page<Timetable>, ApiError> {
    let (items, total) = repository::list(get_connection(), page, page_size).await?;
    Ok(Page::new(items, total, page, page_size))
}

pub async fn get_by_id(id: &str) -> Result<Timetable, ApiError> {
    repository::find_by_id(get_connection(), id)
        .await?
        .ok_or_else(|| ApiError::not_found("Could not find a timetable with this id"))
}

pub async fn create(request: TimetableRequest) -> Result<Timetable, ApiError> {
    request.validate().map_err(ApiError::Validation)?;
    let record = Timetable {
        id: Uuid::new_v4().to_string(),
        name: request.name,
    };
    repository::insert(get_connection(), &record).await?;
    Ok(record)
}

/// Deletes the timetable and detaches its lessons. The lessons themselves
/// stay, they merely become unplaced.
pub async fn delete(id: &str) -> Result<(), ApiError> {
    let db = get_connection();
    if repository::find_by_id(db, id).await?.is_none() {
        return Err(ApiError::not_found("Could not find a timetable with this id"));
    }
    repository::delete_by_id(db, id).await?;
    Ok(())
}
