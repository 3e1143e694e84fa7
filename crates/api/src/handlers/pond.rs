//! Handlers for the `/ponds` resource.

use aquafarm_core::models::pond::{Pond, PondBind, PondWithFarm};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::error::AppResult;
use crate::extract::{IdPath, ValidatedJson};
use crate::response::ApiResponse;
use crate::state::AppState;

/// POST /api/ponds
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<PondBind>,
) -> AppResult<(StatusCode, Json<ApiResponse<Pond>>)> {
    let pond = state.ponds.create(&input).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("successfully create pond", pond)),
    ))
}

/// GET /api/ponds
pub async fn list(State(state): State<AppState>) -> AppResult<Json<ApiResponse<Vec<Pond>>>> {
    let ponds = state.ponds.list().await?;
    Ok(Json(ApiResponse::success("successfully get all pond", ponds)))
}

/// GET /api/ponds/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<ApiResponse<PondWithFarm>>> {
    let pond = state.ponds.get_by_id(&id).await?;
    Ok(Json(ApiResponse::success("successfully get pond by id", pond)))
}

/// PUT /api/ponds/{id}
pub async fn update(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<PondBind>,
) -> AppResult<Json<ApiResponse<Pond>>> {
    let pond = state.ponds.update(&id, &input).await?;
    Ok(Json(ApiResponse::success("successfully update pond", pond)))
}

/// DELETE /api/ponds/{id}
pub async fn delete(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<ApiResponse<()>>> {
    state.ponds.delete(&id).await?;
    Ok(Json(ApiResponse::success("successfully delete pond", ())))
}
