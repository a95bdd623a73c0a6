use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::domain::errors::{PagingError, RepositoryError};

/// API error type with HTTP status code and message
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    /// Creates a new API error
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Creates a 400 Bad Request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Creates a 404 Not Found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Creates a 500 Internal Server Error
    pub fn internal_server_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, "{}", self.message);
        }

        let body = Json(json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl From<RepositoryError> for ApiError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::NotFound { .. } => Self::not_found(error.to_string()),
            RepositoryError::TransientReference { .. } => Self::bad_request(error.to_string()),
            RepositoryError::NonUniqueResult { .. } | RepositoryError::Database(_) => {
                Self::internal_server_error(error.to_string())
            }
        }
    }
}

impl From<PagingError> for ApiError {
    fn from(error: PagingError) -> Self {
        Self::bad_request(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let error = ApiError::from(RepositoryError::not_found("Member", 1));

        assert_eq!(error.status, StatusCode::NOT_FOUND);
        assert_eq!(error.message, "Member not found: 1");
    }

    #[test]
    fn non_unique_maps_to_500() {
        let error = ApiError::from(RepositoryError::NonUniqueResult { count: 3 });
        assert_eq!(error.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn transient_reference_maps_to_400() {
        let error = ApiError::from(RepositoryError::TransientReference {
            entity: "Member",
            target: "Team",
        });
        assert_eq!(error.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn paging_error_maps_to_400() {
        let error = ApiError::from(PagingError::UnknownSortProperty("x".to_string()));

        assert_eq!(error.status, StatusCode::BAD_REQUEST);
        assert_eq!(error.message, "Unknown sort property: x");
    }

    #[test]
    fn response_carries_status() {
        let response = ApiError::not_found("gone").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
