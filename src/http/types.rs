use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// A 4xx response with a short human-readable message, serialized as
/// `{"error": "..."}`. Never carries internal state.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: &'static str,
}

impl ApiError {
    pub fn not_found() -> Self {
        Self { status: StatusCode::NOT_FOUND, message: "Todo not found" }
    }

    pub fn bad_request(message: &'static str) -> Self {
        Self { status: StatusCode::BAD_REQUEST, message }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, axum::Json(serde_json::json!({ "error": self.message }))).into_response()
    }
}
