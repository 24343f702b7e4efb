//! Translation of crate errors into HTTP responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use crate::core::Error;
use crate::system::metrics::Metrics;

/// Error returned by request handlers
#[derive(Debug)]
pub struct ApiError(pub Error);

impl ApiError {
    /// HTTP status for the wrapped error
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::DuplicateKey(_) => StatusCode::CONFLICT,
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let metrics = Metrics::global();
        match &self.0 {
            Error::NotFound { .. } => metrics.operations.misses.inc(),
            Error::Validation(_) => metrics.operations.rejected.inc(),
            _ => {}
        }

        if self.0.is_client_error() {
            tracing::debug!("Request failed with {}: {}", status, self.0);
        } else {
            tracing::error!("Request failed with {}: {}", status, self.0);
        }

        (status, Json(json!({ "message": self.0.to_string() }))).into_response()
    }
}
