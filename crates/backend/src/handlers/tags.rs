use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use contracts::domain::tag::{Tag, TagRequest};
use contracts::shared::page::Page;

use super::{page_or_default, page_size_or_default};
use crate::domain::tag::service;
use crate::shared::error::ApiError;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagListParams {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    pub search: Option<String>,
}

#[derive(Deserialize)]
pub struct BatchDeleteRequest {
    pub ids: Vec<String>,
}

/// GET /api/tags
pub async fn list(Query(params): Query<TagListParams>) -> Result<Json<Page<Tag>>, ApiError> {
    let page = service::get(
        page_or_default(params.page),
        page_size_or_default(params.page_size),
        params.search,
    )
    .await?;
    Ok(Json(page))
}

/// GET /api/tags/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Tag>, ApiError> {
    Ok(Json(service::get_by_id(&id).await?))
}

/// POST /api/tags
pub async fn create(Json(request): Json<TagRequest>) -> Result<(StatusCode, Json<Tag>), ApiError> {
    let tag = service::create(request).await?;
    Ok((StatusCode::CREATED, Json(tag)))
}

/// PUT /api/tags/:id
pub async fn update(
    Path(id): Path<String>,
    Json(request): Json<TagRequest>,
) -> Result<Json<Tag>, ApiError> {
    Ok(Json(service::update(&id, request).await?))
}

/// DELETE /api/tags/:id
pub async fn delete(Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    service::delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/tags/delete
pub async fn delete_many(Json(request): Json<BatchDeleteRequest>) -> Result<StatusCode, ApiError> {
    service::delete_many(request.ids).await?;
    Ok(StatusCode::NO_CONTENT)
}
