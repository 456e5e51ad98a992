//! HTTP error mapping.
//!
//! Every handler returns `Result<_, ApiError>`. Validation failures use the
//! form-error shape `{"success": false, "errors": [...]}`; everything else
//! uses `{"error": "..."}`.

use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use rd_db::error::DatabaseError;
use rd_survey::SurveyError;
use serde_json::json;
use thiserror::Error;

pub const BOUNDARIES_UNAVAILABLE: &str = "County boundary data could not be loaded";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("Validation error: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Authentication required")]
    Unauthorized,

    #[error("Upload exceeds {limit} bytes")]
    PayloadTooLarge { limit: u64 },

    #[error("County boundary data could not be loaded")]
    Boundaries(#[source] SurveyError),

    #[error("Survey data could not be loaded: {0}")]
    Survey(#[from] SurveyError),

    #[error("Database error: {0}")]
    Database(DatabaseError),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(vec![message.into()])
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Boundaries(_) | Self::Survey(_) | Self::Database(_) | Self::Storage(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound { .. } | DatabaseError::NoResult => {
                Self::NotFound(err.to_string())
            }
            DatabaseError::Validation(errors) => Self::Validation(errors),
            DatabaseError::InvalidState(message) => Self::Validation(vec![message]),
            other => Self::Database(other),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::validation(rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        Self::validation(err.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        match self {
            Self::Validation(errors) => {
                (status, Json(json!({"success": false, "errors": errors}))).into_response()
            }
            Self::Unauthorized => {
                let mut response =
                    (status, Json(json!({"error": "Authentication required"}))).into_response();
                response
                    .headers_mut()
                    .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
                response
            }
            Self::Boundaries(_) => {
                (status, Json(json!({"error": BOUNDARIES_UNAVAILABLE}))).into_response()
            }
            Self::Database(_) | Self::Storage(_) => {
                (status, Json(json!({"error": "Internal server error"}))).into_response()
            }
            other => (status, Json(json!({"error": other.to_string()}))).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_not_found_maps_to_404() {
        let err = ApiError::from(DatabaseError::NotFound {
            entity: "project".into(),
            id: "prj-00000000".into(),
        });
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn database_validation_keeps_messages() {
        let err = ApiError::from(DatabaseError::Validation(vec!["Title is required".into()]));
        match err {
            ApiError::Validation(errors) => assert_eq!(errors, vec!["Title is required"]),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn query_failure_is_internal() {
        let err = ApiError::from(DatabaseError::Query("syntax".into()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn unauthorized_carries_challenge() {
        let response = ApiError::Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Bearer");
    }
}
