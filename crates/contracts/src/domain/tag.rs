use serde::{Deserialize, Serialize};

/// A tag attachable to rooms and timeslots. Equality is identity by id;
/// the collections referencing a tag live on the owning side.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: String,
    pub name: String,
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Tag {}

/// Payload for creating or updating a tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagRequest {
    pub name: String,
}

impl TagRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("The tag name is blank".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_by_id_only() {
        let a = Tag {
            id: "t1".into(),
            name: "projector".into(),
        };
        let b = Tag {
            id: "t1".into(),
            name: "renamed".into(),
        };
        assert_eq!(a, b);
    }

    #[test]
    fn test_blank_name_rejected() {
        let request = TagRequest { name: "  ".into() };
        assert!(request.validate().is_err());
    }
}
