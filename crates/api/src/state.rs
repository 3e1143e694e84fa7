use std::sync::Arc;

use aquafarm_core::store::{ApiCallStore, FarmStore, HealthProbe, PondStore};
use aquafarm_core::usecases::{ApiCallUsecase, FarmUsecase, PondUsecase};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (every field is behind an `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    pub farms: Arc<FarmUsecase>,
    pub ponds: Arc<PondUsecase>,
    /// Audit summary, also used by the recording middleware.
    pub api_calls: Arc<ApiCallUsecase>,
    /// Reachability probe for the health check.
    pub health: Arc<dyn HealthProbe>,
}

impl AppState {
    /// Wire every usecase to the same backing store.
    pub fn new<S>(store: Arc<S>, config: ServerConfig) -> Self
    where
        S: FarmStore + PondStore + ApiCallStore + HealthProbe + 'static,
    {
        Self {
            config: Arc::new(config),
            farms: Arc::new(FarmUsecase::new(store.clone())),
            ponds: Arc::new(PondUsecase::new(store.clone(), store.clone())),
            api_calls: Arc::new(ApiCallUsecase::new(store.clone())),
            health: store,
        }
    }
}
