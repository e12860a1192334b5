use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use contracts::domain::lesson::Lesson;
use contracts::domain::timeslot::{Timeslot, TimeslotRequest};
use contracts::enums::day::Day;
use contracts::shared::page::Page;

use super::{page_or_default, page_size_or_default, split_csv};
use crate::domain::server::service as server_service;
use crate::domain::timeslot::repository::TimeslotFilter;
use crate::domain::timeslot::service;
use crate::shared::error::ApiError;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeslotListParams {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    /// Storage code of the day, e.g. `MONDAY`.
    pub day: Option<String>,
    pub tags: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeslotLessonsParams {
    pub year: Option<i32>,
}

#[derive(Deserialize)]
pub struct BatchDeleteRequest {
    pub ids: Vec<String>,
}

/// GET /api/timeslots
pub async fn list(
    Query(params): Query<TimeslotListParams>,
) -> Result<Json<Page<Timeslot>>, ApiError> {
    let day = match params.day.as_deref() {
        Some(code) => Some(
            Day::from_code(code)
                .ok_or_else(|| ApiError::validation("Unknown day of the week"))?,
        ),
        None => None,
    };
    let filter = TimeslotFilter {
        day,
        tag_ids: split_csv(params.tags.as_deref()),
    };
    let page = service::get(
        page_or_default(params.page),
        page_size_or_default(params.page_size),
        filter,
    )
    .await?;
    Ok(Json(page))
}

/// GET /api/timeslots/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Timeslot>, ApiError> {
    Ok(Json(service::get_by_id(&id).await?))
}

/// GET /api/timeslots/:id/lessons
pub async fn get_lessons(
    Path(id): Path<String>,
    Query(params): Query<TimeslotLessonsParams>,
) -> Result<Json<Vec<Lesson>>, ApiError> {
    let year = match params.year {
        Some(year) => year,
        None => server_service::get_current_year().await?.current_year,
    };
    Ok(Json(service::get_lessons(&id, year).await?))
}

/// POST /api/timeslots
pub async fn create(
    Json(request): Json<TimeslotRequest>,
) -> Result<(StatusCode, Json<Timeslot>), ApiError> {
    let timeslot = service::create(request).await?;
    Ok((StatusCode::CREATED, Json(timeslot)))
}

/// PUT /api/timeslots/:id
pub async fn update(
    Path(id): Path<String>,
    Json(request): Json<TimeslotRequest>,
) -> Result<Json<Timeslot>, ApiError> {
    Ok(Json(service::update(&id, request).await?))
}

/// DELETE /api/timeslots/:id
pub async fn delete(Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    service::delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/timeslots/delete
pub async fn delete_many(Json(request): Json<BatchDeleteRequest>) -> Result<StatusCode, ApiError> {
    service::delete_many(request.ids).await?;
    Ok(StatusCode::NO_CONTENT)
}
