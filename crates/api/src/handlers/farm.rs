//! Handlers for the `/farms` resource.

use aquafarm_core::models::farm::{Farm, FarmBind, FarmWithPonds};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::error::AppResult;
use crate::extract::{IdPath, ValidatedJson};
use crate::response::ApiResponse;
use crate::state::AppState;

/// POST /api/farms
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<FarmBind>,
) -> AppResult<(StatusCode, Json<ApiResponse<Farm>>)> {
    let farm = state.farms.create(&input).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("successfully create farm", farm)),
    ))
}

/// GET /api/farms
pub async fn list(State(state): State<AppState>) -> AppResult<Json<ApiResponse<Vec<Farm>>>> {
    let farms = state.farms.list().await?;
    Ok(Json(ApiResponse::success("successfully get all farm", farms)))
}

/// GET /api/farms/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<ApiResponse<FarmWithPonds>>> {
    let farm = state.farms.get_by_id(&id).await?;
    Ok(Json(ApiResponse::success("successfully get farm by id", farm)))
}

/// PUT /api/farms/{id}
pub async fn update(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<FarmBind>,
) -> AppResult<Json<ApiResponse<Farm>>> {
    let farm = state.farms.update(&id, &input).await?;
    Ok(Json(ApiResponse::success("successfully update farm", farm)))
}

/// DELETE /api/farms/{id}
pub async fn delete(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<ApiResponse<()>>> {
    state.farms.delete(&id).await?;
    Ok(Json(ApiResponse::success("successfully delete farm", ())))
}
