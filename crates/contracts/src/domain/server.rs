use serde::{Deserialize, Serialize};

/// Process-wide settings; a single persisted row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerSettings {
    pub current_year: i32,
}

/// Payload for changing the active scheduling year.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentYearRequest {
    pub current_year: i32,
}

impl CurrentYearRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.current_year <= 0 {
            return Err("The current year must be positive".into());
        }
        Ok(())
    }
}
