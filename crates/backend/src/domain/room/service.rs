use contracts::domain::lesson::Lesson;
use contracts::domain::room::{Room, RoomRequest};
use contracts::shared::page::Page;
use uuid::Uuid;

use super::repository::{self, RoomFilter};
use crate::domain::lesson::repository as lesson_repository;
use crate::domain::tag::repository as tag_repository;
use crate::shared::data::db::get_connection;
use crate::shared::error::ApiError;
use crate::usecases::cascade_delete;

pub async fn get(
    page: u64,
    page_size: u64,
    filter: RoomFilter,
) -> Result<Page<Room>, ApiError> {
    let (items, total) = repository::list(get_connection(), &filter, page, page_size).await?;
    Ok(Page::new(items, total, page, page_size))
}

pub async fn get_by_id(id: &str) -> Result<Room, ApiError> {
    repository::find_by_id(get_connection(), id)
        .await?
        .ok_or_else(|| ApiError::not_found("Could not find a room with this id"))
}

/// Lessons scheduled in the room for the given year.
pub async fn get_lessons(id: &str, year: i32) -> Result<Vec<Lesson>, ApiError> {
    let db = get_connection();
    if repository::find_by_id(db, id).await?.is_none() {
        return Err(ApiError::not_found("Could not find a room with this id"));
    }
    Ok(lesson_repository::find_by_room_and_year(db, id, year).await?)
}

pub async fn create(request: RoomRequest) -> Result<Room, ApiError> {
    request.validate().map_err(ApiError::Validation)?;
    let db = get_connection();
    let tags = resolve_tags(&request.tag_ids).await?;
    let record = Room {
        id: Uuid::new_v4().to_string(),
        name: request.name,
        building_name: request.building_name,
        capacity: request.capacity,
        tags,
    };
    repository::insert(db, &record).await?;
    Ok(record)
}

pub async fn update(id: &str, request: RoomRequest) -> Result<Room, ApiError> {
    request.validate().map_err(ApiError::Validation)?;
    let db = get_connection();
    if repository::find_by_id(db, id).await?.is_none() {
        return Err(ApiError::not_found("Could not find a room with this id"));
    }
    let tags = resolve_tags(&request.tag_ids).await?;
    let record = Room {
        id: id.to_string(),
        name: request.name,
        building_name: request.building_name,
        capacity: request.capacity,
        tags,
    };
    repository::update(db, &record).await?;
    Ok(record)
}

pub async fn delete(id: String) -> Result<(), ApiError> {
    delete_many(vec![id]).await
}

pub async fn delete_many(ids: Vec<String>) -> Result<(), ApiError> {
    cascade_delete::rooms::execute(get_connection(), &ids).await
}

async fn resolve_tags(tag_ids: &[String]) -> Result<Vec<contracts::domain::tag::Tag>, ApiError> {
    let tags = tag_repository::find_by_ids(get_connection(), tag_ids).await?;
    if tags.len() != tag_ids.len() {
        return Err(ApiError::not_found("Could not find a tag with this id"));
    }
    Ok(tags)
}
