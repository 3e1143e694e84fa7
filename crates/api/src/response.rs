//! Shared response envelope types for API handlers.
//!
//! Success: `{ "status": "success", "message": ..., "data": ... }`
//! Failure: `{ "status": "error", "message": ..., "error": ... }`

use serde::Serialize;

/// Success envelope wrapping any serializable payload.
///
/// # Example
///
/// ```ignore
/// Ok(Json(ApiResponse::success("successfully get all farm", farms)))
/// ```
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub status: &'static str,
    pub message: &'static str,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: &'static str, data: T) -> Self {
        Self {
            status: "success",
            message,
            data,
        }
    }
}

/// Failure envelope. Built by [`crate::error::AppError`]'s `IntoResponse`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: &'static str, error: String) -> Self {
        Self {
            status: "error",
            message,
            error,
        }
    }
}
