use axum::routing::get;
use axum::Router;

use crate::handlers::api_call;
use crate::state::AppState;

/// Routes mounted at `/api-calls`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(api_call::summary))
}
