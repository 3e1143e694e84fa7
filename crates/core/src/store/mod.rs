//! Persistence ports consumed by the usecases.
//!
//! Each trait is object-safe so usecases hold `Arc<dyn ...>` handles and tests
//! can swap the PostgreSQL store for [`memory::MemoryStore`]. Lookups signal
//! "absent" with `Ok(None)` / `Ok(false)`; `Err` is reserved for real failures.

pub mod memory;

use async_trait::async_trait;

use crate::error::Cause;
use crate::models::api_call::{EndpointCallStats, NewApiCall};
use crate::models::farm::{Farm, FarmBind, FarmWithPonds};
use crate::models::pond::{NewPond, Pond, PondWithFarm};
use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A write collided with a unique index (e.g. `uq_farms_name`).
    #[error("duplicate value violates unique constraint {constraint}")]
    UniqueViolation { constraint: String },

    /// Any other backend failure (connectivity, protocol, bad SQL).
    #[error("{0}")]
    Backend(#[source] Cause),
}

#[async_trait]
pub trait FarmStore: Send + Sync {
    async fn find_farm_by_id(&self, id: DbId) -> Result<Option<Farm>, StoreError>;

    async fn find_farm_by_name(&self, name: &str) -> Result<Option<Farm>, StoreError>;

    /// Insert a farm with a freshly generated id.
    async fn create_farm(&self, input: &FarmBind) -> Result<Farm, StoreError>;

    /// Overwrite the name of a live farm. `None` if no live farm has `id`.
    async fn update_farm(&self, id: DbId, input: &FarmBind) -> Result<Option<Farm>, StoreError>;

    async fn list_farms(&self) -> Result<Vec<Farm>, StoreError>;

    async fn find_farm_with_ponds(&self, id: DbId) -> Result<Option<FarmWithPonds>, StoreError>;

    /// Soft-delete every pond of the farm, then the farm, atomically.
    ///
    /// Returns `false` if no live farm has `id`.
    async fn delete_farm_cascading(&self, id: DbId) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait PondStore: Send + Sync {
    async fn find_pond_by_id(&self, id: DbId) -> Result<Option<Pond>, StoreError>;

    async fn find_pond_by_name(&self, name: &str) -> Result<Option<Pond>, StoreError>;

    async fn create_pond(&self, input: &NewPond) -> Result<Pond, StoreError>;

    /// Overwrite name and farm of a live pond. `None` if no live pond has `id`.
    async fn update_pond(&self, id: DbId, input: &NewPond) -> Result<Option<Pond>, StoreError>;

    async fn list_ponds(&self) -> Result<Vec<Pond>, StoreError>;

    async fn find_pond_with_farm(&self, id: DbId) -> Result<Option<PondWithFarm>, StoreError>;

    /// Soft-delete a pond. Returns `false` if no live pond has `id`.
    async fn delete_pond(&self, id: DbId) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait ApiCallStore: Send + Sync {
    async fn record_api_call(&self, input: &NewApiCall) -> Result<(), StoreError>;

    /// Audit rows grouped by `(endpoint, method)`, ordered by endpoint then method.
    async fn aggregate_api_calls(&self) -> Result<Vec<EndpointCallStats>, StoreError>;
}

#[async_trait]
pub trait HealthProbe: Send + Sync {
    async fn ping(&self) -> Result<(), StoreError>;
}
