//! Handler for the `/api-calls` audit summary.

use aquafarm_core::models::api_call::ApiCallSummary;
use axum::extract::State;
use axum::Json;

use crate::error::AppResult;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/api-calls
pub async fn summary(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ApiCallSummary>>> {
    let summary = state.api_calls.summary().await?;
    Ok(Json(ApiResponse::success(
        "successfully get all api call",
        summary,
    )))
}
