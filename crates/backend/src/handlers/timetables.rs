use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use contracts::domain::timetable::{Timetable, TimetableRequest};
use contracts::shared::page::Page;

use super::{page_or_default, page_size_or_default};
use crate::domain::timetable::service;
use crate::shared::error::ApiError;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableListParams {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

/// GET /api/timetables
pub async fn list(
    Query(params): Query<TimetableListParams>,
) -> Result<Json<Page<Timetable>>, ApiError> {
    let page = service::get(
        page_or_default(params.page),
        page_size_or_default(params.page_size),
    )
    .await?;
    Ok(Json(page))
}

/// GET /api/timetables/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Timetable>, ApiError> {
    Ok(Json(service::get_by_id(&id).await?))
}

/// POST /api/timetables
pub async fn create(
    Json(request): Json<TimetableRequest>,
) -> Result<(StatusCode, Json<Timetable>), ApiError> {
    let timetable = service::create(request).await?;
    Ok((StatusCode::CREATED, Json(timetable)))
}

/// DELETE /api/timetables/:id
pub async fn delete(Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    service::delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
