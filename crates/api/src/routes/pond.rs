//! Route definitions for the `/ponds` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::pond;
use crate::state::AppState;

/// Routes mounted at `/ponds`.
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
        .route("/", get(pond::list).post(pond::create))
        .route(
            "/{id}",
            get(pond::get_by_id)
                .put(pond::update)
                .delete(pond::delete),
        )
}
