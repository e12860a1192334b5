use serde::{Deserialize, Serialize};

/// A constraint rule known to the solver, identified by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintSignature {
    pub id: String,
    pub name: String,
    pub description: String,
}

/// One application of a constraint rule with concrete argument values.
///
/// Arguments are plain strings; a value may reference another entity's id
/// without any foreign-key enforcement, so instances referencing a deleted
/// entity must be purged by the deletion cascade.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintInstance {
    pub id: String,
    pub signature_id: String,
    pub arguments: Vec<String>,
}

impl ConstraintInstance {
    /// Whether any stored argument equals one of the given ids.
    pub fn references_any(&self, ids: &[String]) -> bool {
        self.arguments.iter().any(|argument| ids.contains(argument))
    }
}
