//! HTTP error envelope.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use super::response::MessageResponse;
use crate::error::Error;

/// Failures surfaced to HTTP callers.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Please login first")]
    Unauthorized,

    #[error("Invalid post event")]
    InvalidEvent(String),

    #[error("Error fetching trending topics")]
    Trending(#[source] Error),
}

impl ApiError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::InvalidEvent(_) => StatusCode::BAD_REQUEST,
            Self::Trending(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match &self {
            Self::Unauthorized => None,
            Self::InvalidEvent(reason) => Some(reason.clone()),
            Self::Trending(e) => Some(e.to_string()),
        };

        let body = MessageResponse {
            success: false,
            message: self.to_string(),
            error: detail,
        };
        (status, Json(body)).into_response()
    }
}
