//! Repository layer.
//!
//! Each submodule implements one store port for [`PgStore`]. Every read
//! filters out soft-deleted rows (`deleted_at IS NULL`).

mod api_call_repo;
mod farm_repo;
mod pond_repo;

use async_trait::async_trait;
use aquafarm_core::store::{HealthProbe, StoreError};

use crate::DbPool;

/// PostgreSQL SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

/// Map a sqlx error onto the store port's error, singling out unique-index
/// collisions.
pub fn classify(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            return StoreError::UniqueViolation {
                constraint: db_err.constraint().unwrap_or("unknown").to_string(),
            };
        }
    }
    StoreError::Backend(Box::new(err))
}

/// PostgreSQL-backed store. Cheap to clone (the pool is reference counted).
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl HealthProbe for PgStore {
    async fn ping(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await.map_err(classify)
    }
}
