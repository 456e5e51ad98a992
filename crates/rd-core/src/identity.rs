use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Authenticated staff member, passed from the HTTP layer into the service.
///
/// Produced by `rd-server`'s auth middleware from a configured bearer token.
/// Contains only data fields, no auth logic.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StaffIdentity {
    pub username: String,
}

impl StaffIdentity {
    #[must_use]
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}
