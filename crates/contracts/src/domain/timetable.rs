use serde::{Deserialize, Serialize};

/// A generated timetable; lessons are attached through their membership
/// rows, not embedded here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timetable {
    pub id: String,
    pub name: String,
}

/// Payload for creating a timetable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableRequest {
    pub name: String,
}

impl TimetableRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("The timetable name is blank".into());
        }
        Ok(())
    }
}
