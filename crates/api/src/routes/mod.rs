pub mod api_call;
pub mod farm;
pub mod health;
pub mod pond;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /health-check                 service + database health
///
/// /farms                        list, create
/// /farms/{id}                   get (with ponds), update, delete (cascades)
///
/// /ponds                        list, create
/// /ponds/{id}                   get (with farm), update, delete
///
/// /api-calls                    per-endpoint call summary
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/farms", farm::router())
        .nest("/ponds", pond::router())
        .nest("/api-calls", api_call::router())
}
