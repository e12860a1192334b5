use serde::{Deserialize, Serialize};

use super::tag::Tag;
use crate::enums::day::Day;

/// A slot in the weekly grid, taggable like rooms.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeslot {
    pub id: String,
    pub day: Day,
    pub slot: i32,
    pub tags: Vec<Tag>,
}

/// Payload for creating or updating a timeslot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeslotRequest {
    pub day: Day,
    pub slot: i32,
    #[serde(default)]
    pub tag_ids: Vec<String>,
}

impl TimeslotRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.slot < 0 {
            return Err("The slot index must not be negative".into());
        }
        Ok(())
    }
}
