use axum::Json;

use contracts::domain::server::{CurrentYearRequest, ServerSettings};

use crate::domain::server::service;
use crate::shared::error::ApiError;

/// GET /api/server/current-year
pub async fn get_current_year() -> Result<Json<ServerSettings>, ApiError> {
    Ok(Json(service::get_current_year().await?))
}

/// PUT /api/server/current-year
pub async fn set_current_year(
    Json(request): Json<CurrentYearRequest>,
) -> Result<Json<ServerSettings>, ApiError> {
    Ok(Json(service::set_current_year(request).await?))
}
