use contracts::domain::server::{CurrentYearRequest, ServerSettings};

use super::repository;
use crate::shared::data::db::get_connection;
use crate::shared::error::ApiError;

pub async fn get_current_year() -> Result<ServerSettings, ApiError> {
    let current_year = repository::get_current_year(get_connection()).await?;
    Ok(ServerSettings { current_year })
}

pub async fn set_current_year(request: CurrentYearRequest) -> Result<ServerSettings, ApiError> {
    request.validate().map_err(ApiError::Validation)?;
    repository::set_current_year(get_connection(), request.current_year).await?;
    Ok(ServerSettings {
        current_year: request.current_year,
    })
}
