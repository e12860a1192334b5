use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use contracts::domain::lesson::Lesson;
use contracts::domain::room::{Room, RoomRequest};
use contracts::shared::page::Page;

use super::{page_or_default, page_size_or_default, split_csv};
use crate::domain::room::repository::RoomFilter;
use crate::domain::room::service;
use crate::domain::server::service as server_service;
use crate::shared::error::ApiError;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomListParams {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    pub search: Option<String>,
    pub min_capacity: Option<i32>,
    /// Comma-separated tag ids; a room matches if it carries any of them.
    pub tags: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomLessonsParams {
    pub year: Option<i32>,
}

#[derive(Deserialize)]
pub struct BatchDeleteRequest {
    pub ids: Vec<String>,
}

/// GET /api/rooms
pub async fn list(Query(params): Query<RoomListParams>) -> Result<Json<Page<Room>>, ApiError> {
    let filter = RoomFilter {
        search: params.search,
        min_capacity: params.min_capacity,
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

/// GET /api/rooms/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Room>, ApiError> {
    Ok(Json(service::get_by_id(&id).await?))
}

/// GET /api/rooms/:id/lessons
pub async fn get_lessons(
    Path(id): Path<String>,
    Query(params): Query<RoomLessonsParams>,
) -> Result<Json<Vec<Lesson>>, ApiError> {
    let year = match params.year {
        Some(year) => year,
        None => server_service::get_current_year().await?.current_year,
    };
    Ok(Json(service::get_lessons(&id, year).await?))
}

/// POST /api/rooms
pub async fn create(Json(request): Json<RoomRequest>) -> Result<(StatusCode, Json<Room>), ApiError> {
    let room = service::create(request).await?;
    Ok((StatusCode::CREATED, Json(room)))
}

/// PUT /api/rooms/:id
pub async fn update(
    Path(id): Path<String>,
    Json(request): Json<RoomRequest>,
) -> Result<Json<Room>, ApiError> {
    Ok(Json(service::update(&id, request).await?))
}

/// DELETE /api/rooms/:id
pub async fn delete(Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    service::delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/rooms/delete
pub async fn delete_many(Json(request): Json<BatchDeleteRequest>) -> Result<StatusCode, ApiError> {
    service::delete_many(request.ids).await?;
    Ok(StatusCode::NO_CONTENT)
}
