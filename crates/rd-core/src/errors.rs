//! Cross-cutting error types for the research dashboard.
//!
//! Domain-specific errors (e.g., `DatabaseError`, `SurveyError`) are defined in
//! their respective crates. Delivery crates (`rd-server`, `rd-cli`) map all of
//! them onto their own response shapes.

use thiserror::Error;

/// Errors that can be raised by any dashboard crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// A state machine transition was attempted that is not allowed.
    #[error("Invalid state transition: {entity_type} {id} from {from} to {to}")]
    InvalidTransition {
        entity_type: String,
        id: String,
        from: String,
        to: String,
    },

    /// Data failed validation. Each entry is one user-facing message.
    #[error("Validation error: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoreError {
    /// Convenience constructor for a single validation message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(vec![message.into()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_are_joined() {
        let err = CoreError::Validation(vec!["a is bad".into(), "b is bad".into()]);
        assert_eq!(err.to_string(), "Validation error: a is bad; b is bad");
    }

    #[test]
    fn not_found_names_the_entity() {
        let err = CoreError::NotFound {
            entity_type: "project".into(),
            id: "prj-00000000".into(),
        };
        assert_eq!(err.to_string(), "Entity not found: project prj-00000000");
    }
}
