//! HTTP error mapping for pairrank-ui
//!
//! Engine errors become plain-text responses with the matching status code;
//! server-side failures are logged and reported as 500 without detail.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

use pairrank_common::Error;

/// Wrapper giving `pairrank_common::Error` an HTTP representation.
#[derive(Debug)]
pub struct AppError(pub Error);

pub type AppResult<T> = std::result::Result<T, AppError>;

impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Unauthorized(_) => StatusCode::FORBIDDEN,
            Error::StaleOrInvalidPair(_) => StatusCode::BAD_REQUEST,
            Error::AlreadyFinished => StatusCode::CONFLICT,
            Error::ConflictingRelation { .. }
            | Error::TokenSpaceExhausted(_)
            | Error::Config(_)
            | Error::Io(_)
            | Error::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            error!("Request failed: {}", self.0);
            return (status, "Internal error".to_string()).into_response();
        }

        (status, self.0.to_string()).into_response()
    }
}
