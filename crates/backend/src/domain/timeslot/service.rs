use contracts::domain::lesson::Lesson;
use contracts::domain::timeslot::{Timeslot, TimeslotRequest};
use contracts::shared::page::Page;
use uuid::Uuid;

use super::repository::{self, TimeslotFilter};
use crate::domain::lesson::repository as lesson_repository;
use crate::domain::tag::repository as tag_repository;
use crate::shared::data::db::get_connection;
use crate::shared::error::ApiError;
use crate::usecases::cascade_delete;

pub async fn get(
    page: u64,
    page_size: u64,
    filter: TimeslotFilter,
) -> Result<Page<Timeslot>, ApiError> {
    let (items, total) = repository::list(get_connection(), &filter, page, page_size).await?;
    Ok(Page::new(items, total, page, page_size))
}

pub async fn get_by_id(id: &str) -> Result<Timeslot, ApiError> {
    repository::find_by_id(get_connection(), id)
        .await?
        .ok_or_else(|| ApiError::not_found("Could not find a timeslot with this id"))
}

/// Lessons scheduled in the timeslot for the given year.
pub async fn get_lessons(id: &str, year: i32) -> Result<Vec<Lesson>, ApiError> {
    let db = get_connection();
    if repository::find_by_id(db, id).await?.is_none() {
        return Err(ApiError::not_found("Could not find a timeslot with this id"));
    }
    Ok(lesson_repository::find_by_timeslot_and_year(db, id, year).await?)
}

pub async fn create(request: TimeslotRequest) -> Result<Timeslot, ApiError> {
    request.validate().map_err(ApiError::Validation)?;
    let tags = resolve_tags(&request.tag_ids).await?;
    let record = Timeslot {
        id: Uuid::new_v4().to_string(),
        day: request.day,
        slot: request.slot,
        tags,
    };
    repository::insert(get_connection(), &record).await?;
    Ok(record)
}

pub async fn update(id: &str, request: TimeslotRequest) -> Result<Timeslot, ApiError> {
    request.validate().map_err(ApiError::Validation)?;
    let db = get_connection();
    if repository::find_by_id(db, id).await?.is_none() {
        return Err(ApiError::not_found("Could not find a timeslot with this id"));
    }
    let tags = resolve_tags(&request.tag_ids).await?;
    let record = Timeslot {
        id: id.to_string(),
        day: request.day,
        slot: request.slot,
        tags,
    };
    repository::update(db, &record).await?;
    Ok(record)
}

pub async fn delete(id: String) -> Result<(), ApiError> {
    delete_many(vec![id]).await
}

pub async fn delete_many(ids: Vec<String>) -> Result<(), ApiError> {
    cascade_delete::timeslots::execute(get_connection(), &ids).await
}

async fn resolve_tags(tag_ids: &[String]) -> Result<Vec<contracts::domain::tag::Tag>, ApiError> {
    let tags = tag_repository::find_by_ids(get_connection(), tag_ids).await?;
    if tags.len() != tag_ids.len() {
        return Err(ApiError::not_found("Could not find a tag with this id"));
    }
    Ok(tags)
}
