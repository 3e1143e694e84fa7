use aquafarm_core::error::CoreError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::response::ErrorResponse;

/// Message used for every request that fails to bind or validate.
pub const BIND_FAILED: &str = "failed to bind request";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for usecase errors and adds a binding variant for
/// malformed requests. Implements [`IntoResponse`] to produce the error
/// envelope.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A usecase error from `aquafarm_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The request body or path could not be bound or failed validation.
    #[error("{message}: {detail}")]
    BadRequest {
        message: &'static str,
        detail: String,
    },
}

impl AppError {
    pub fn bind(detail: impl Into<String>) -> Self {
        Self::BadRequest {
            message: BIND_FAILED,
            detail: detail.into(),
        }
    }
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, error) = match &self {
            AppError::Core(core) => {
                let status = match core {
                    CoreError::Conflict { .. } => StatusCode::CONFLICT,
                    CoreError::BadRequest { .. } => StatusCode::BAD_REQUEST,
                    CoreError::NotFound { .. } => StatusCode::NOT_FOUND,
                    CoreError::Internal { .. } => {
                        tracing::error!(error = %core, "Internal usecase error");
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                };
                (status, core.message(), core.cause().to_string())
            }
            AppError::BadRequest { message, detail } => {
                (StatusCode::BAD_REQUEST, *message, detail.clone())
            }
        };

        (status, Json(ErrorResponse::new(message, error))).into_response()
    }
}
