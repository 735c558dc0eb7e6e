//! The API error surface.
//!
//! Every handler collapses its internal failures into one of four error
//! kinds, each rendered as the fixed JSON envelope
//! `{"success": false, "error": <code>, "message": <text>}`. No internal
//! detail reaches the client; failures are logged server-side instead.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use thiserror::Error;

/// API-visible failure kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("bad request")]
    BadRequest,

    #[error("resource not found")]
    NotFound,

    // "uprocessable" is the message existing clients match on; the spelling
    // is part of the wire contract.
    #[error("uprocessable")]
    Unprocessable,

    #[error("internal server error")]
    Internal,
}

impl ApiError {
    /// The HTTP status code for this error kind.
    pub fn status(self) -> StatusCode {
        match self {
            ApiError::BadRequest => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({
            "success": false,
            "error": status.as_u16(),
            "message": self.to_string(),
        }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_kinds() {
        assert_eq!(ApiError::BadRequest.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Unprocessable.status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(ApiError::Internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn messages_are_fixed_strings() {
        assert_eq!(ApiError::BadRequest.to_string(), "bad request");
        assert_eq!(ApiError::NotFound.to_string(), "resource not found");
        // Preserved misspelling.
        assert_eq!(ApiError::Unprocessable.to_string(), "uprocessable");
        assert_eq!(ApiError::Internal.to_string(), "internal server error");
    }
}
