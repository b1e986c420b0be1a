//! API error responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use mcpcatalog_core::{CatalogError, TemplateError};
use serde::Serialize;
use tracing::error;

/// JSON error body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable code
    pub error: String,
    pub error_description: String,
    /// Parameter the error refers to (missing_parameter only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
}

/// Error returned by handlers; maps catalog failures to HTTP statuses
#[derive(Debug)]
pub struct ApiError(pub CatalogError);

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        Self(err)
    }
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match &self.0 {
            CatalogError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            CatalogError::NotInstalled { .. } => (StatusCode::NOT_FOUND, "not_installed"),
            CatalogError::AlreadyExists(_) => (StatusCode::CONFLICT, "already_exists"),
            CatalogError::AlreadyInstalled { .. } => (StatusCode::CONFLICT, "already_installed"),
            CatalogError::InvalidEntry(_) => (StatusCode::BAD_REQUEST, "invalid_entry"),
            CatalogError::Template(TemplateError::MissingParameter { .. }) => {
                (StatusCode::BAD_REQUEST, "missing_parameter")
            }
            CatalogError::Template(TemplateError::InvalidParameter { .. }) => {
                (StatusCode::BAD_REQUEST, "invalid_parameter")
            }
            CatalogError::Repository(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let description = if status.is_server_error() {
            error!(error = ?self.0, "[Api] Request failed");
            "internal server error".to_string()
        } else {
            self.0.to_string()
        };

        let parameter = match &self.0 {
            CatalogError::Template(e) => e.parameter_name().map(str::to_string),
            _ => None,
        };

        let body = ErrorBody {
            error: code.to_string(),
            error_description: description,
            parameter,
        };

        (status, Json(body)).into_response()
    }
}
