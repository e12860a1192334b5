use serde::{Deserialize, Serialize};

use super::tag::Tag;

/// A room that lessons are scheduled into.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: String,
    pub name: String,
    pub building_name: String,
    pub capacity: i32,
    pub tags: Vec<Tag>,
}

/// Payload for creating or updating a room.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomRequest {
    pub name: String,
    pub building_name: String,
    pub capacity: i32,
    #[serde(default)]
    pub tag_ids: Vec<String>,
}

impl RoomRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() || self.building_name.trim().is_empty() {
            return Err("The name or building name is blank".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, building: &str) -> RoomRequest {
        RoomRequest {
            name: name.into(),
            building_name: building.into(),
            capacity: 30,
            tag_ids: vec![],
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(request("100", "Main").validate().is_ok());
    }

    #[test]
    fn test_blank_name_rejected() {
        assert!(request("   ", "Main").validate().is_err());
    }

    #[test]
    fn test_blank_building_rejected() {
        assert!(request("100", "").validate().is_err());
    }
}
