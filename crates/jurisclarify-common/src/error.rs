//! Error surface shared by all HTTP handlers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

/// Error surfaced to HTTP clients as `{"error": …}`, the wire shape every
/// JurisClarify endpoint uses for failures.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, message: message.into() }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self { status: StatusCode::UNAUTHORIZED, message: message.into() }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self { status: StatusCode::INTERNAL_SERVER_ERROR, message: message.into() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.message }));
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_carry_status_and_message() {
        let e = ApiError::bad_request("no text");
        assert_eq!(e.status, StatusCode::BAD_REQUEST);
        assert_eq!(e.message, "no text");
        assert_eq!(ApiError::unauthorized("nope").status, StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::internal("boom").status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
