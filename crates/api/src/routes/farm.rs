//! Route definitions for the `/farms` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::farm;
use crate::state::AppState;

/// Routes mounted at `/farms`.
///
/// ```text
/// GET    /          -> list
/// POST   /          -> create
/// GET    /{id}      -> get_by_id
/// PUT    /{id}      -> update
/// DELETE /{id}      -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(farm::list).post(farm::create))
        .route(
            "/{id}",
            get(farm::get_by_id)
                .put(farm::update)
                .delete(farm::delete),
        )
}
