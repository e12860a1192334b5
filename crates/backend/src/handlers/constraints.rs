use axum::extract::{Path, Query};
use axum::Json;
use serde::Deserialize;

use contracts::domain::constraint::{ConstraintInstance, ConstraintSignature};
use contracts::shared::page::Page;

use super::{page_or_default, page_size_or_default};
use crate::domain::constraint::service;
use crate::shared::error::ApiError;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintListParams {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    pub search: Option<String>,
}

/// GET /api/constraints
pub async fn list(
    Query(params): Query<ConstraintListParams>,
) -> Result<Json<Page<ConstraintSignature>>, ApiError> {
    let page = service::get_signatures(
        page_or_default(params.page),
        page_size_or_default(params.page_size),
        params.search,
    )
    .await?;
    Ok(Json(page))
}

/// GET /api/constraints/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<ConstraintSignature>, ApiError> {
    Ok(Json(service::get_signature_by_id(&id).await?))
}

/// GET /api/constraints/:id/instances
pub async fn get_instances(
    Path(id): Path<String>,
) -> Result<Json<Vec<ConstraintInstance>>, ApiError> {
    Ok(Json(service::get_instances(&id).await?))
}
