use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A person assigned to evaluate one or more projects.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Evaluator {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    /// IDs of assigned projects, sorted.
    pub project_ids: Vec<String>,
}
