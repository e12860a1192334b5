use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use contracts::domain::lesson::{Lesson, LessonRequest};
use contracts::shared::page::Page;

use super::{page_or_default, page_size_or_default};
use crate::domain::lesson::repository::LessonFilter;
use crate::domain::lesson::service;
use crate::shared::error::ApiError;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonListParams {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    pub year: Option<i32>,
    pub room_id: Option<String>,
    pub timeslot_id: Option<String>,
}

/// GET /api/lessons
pub async fn list(Query(params): Query<LessonListParams>) -> Result<Json<Page<Lesson>>, ApiError> {
    let filter = LessonFilter {
        year: params.year,
        room_id: params.room_id,
        timeslot_id: params.timeslot_id,
    };
    let page = service::get(
        page_or_default(params.page),
        page_size_or_default(params.page_size),
        filter,
    )
    .await?;
    Ok(Json(page))
}

/// GET /api/lessons/:id
pub async fn get_by_id(Path(id): Path<i64>) -> Result<Json<Lesson>, ApiError> {
    Ok(Json(service::get_by_id(id).await?))
}

/// POST /api/lessons
pub async fn create(
    Json(request): Json<LessonRequest>,
) -> Result<(StatusCode, Json<Lesson>), ApiError> {
    let lesson = service::create(request).await?;
    Ok((StatusCode::CREATED, Json(lesson)))
}

/// PUT /api/lessons/:id
pub async fn update(
    Path(id): Path<i64>,
    Json(request): Json<LessonRequest>,
) -> Result<Json<Lesson>, ApiError> {
    Ok(Json(service::update(id, request).await?))
}

/// DELETE /api/lessons/:id
pub async fn delete(Path(id): Path<i64>) -> Result<StatusCode, ApiError> {
    service::delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
