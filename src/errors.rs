use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

/// Error taxonomy for the web API
///
/// Validation failures are reported before any storage mutation, not-found
/// errors name the missing resource, and storage errors are logged
/// server-side but surfaced to clients as an opaque message.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Database error: {0}")]
    Database(#[from] anyhow::Error),
    #[error("{0} not found")]
    NotFound(String),
    #[error("Validation failed")]
    Validation(#[from] ValidationErrors),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Database(err) => {
                // Log the real cause; the client only sees an opaque message.
                error!("storage error: {err:#}");
                let body = Json(serde_json::json!({
                    "error": "internal storage error"
                }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
            ApiError::NotFound(resource) => {
                let body = Json(serde_json::json!({
                    "error": format!("{resource} not found")
                }));
                (StatusCode::NOT_FOUND, body).into_response()
            }
            ApiError::Validation(errors) => {
                let body = Json(serde_json::json!({
                    "error": "validation failed",
                    "fields": errors
                }));
                (StatusCode::BAD_REQUEST, body).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::ValidationError;

    #[test]
    fn test_not_found_maps_to_404() {
        let response = ApiError::NotFound("point".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_database_maps_to_500() {
        let response = ApiError::Database(anyhow::anyhow!("pool exhausted")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_validation_maps_to_400() {
        let mut errors = ValidationErrors::new();
        errors.add("name".into(), ValidationError::new("length"));
        let response = ApiError::Validation(errors).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
