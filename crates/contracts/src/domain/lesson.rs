use serde::{Deserialize, Serialize};

/// A scheduled lesson. Ids are numeric and supplied by the caller; the
/// timetable reference is optional until the lesson is placed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: i64,
    pub year: i32,
    pub room_id: String,
    pub timeslot_id: String,
    pub timetable_id: Option<String>,
}

/// Payload for creating or updating a lesson.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonRequest {
    pub id: i64,
    pub year: i32,
    pub room_id: String,
    pub timeslot_id: String,
    pub timetable_id: Option<String>,
}

impl LessonRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.room_id.trim().is_empty() {
            return Err("The room id is blank".into());
        }
        if self.timeslot_id.trim().is_empty() {
            return Err("The timeslot id is blank".into());
        }
        if self.year <= 0 {
            return Err("The year must be positive".into());
        }
        Ok(())
    }
}
