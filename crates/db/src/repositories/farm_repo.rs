//! Queries for the `farms` table.

use async_trait::async_trait;
use aquafarm_core::models::farm::{Farm, FarmBind, FarmWithPonds};
use aquafarm_core::store::{FarmStore, StoreError};
use aquafarm_core::types::DbId;
use uuid::Uuid;

use super::{classify, PgStore};
use crate::models::farm::FarmRow;
use crate::models::pond::PondRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, created_at, updated_at";

const POND_COLUMNS: &str = "id, farm_id, name, created_at, updated_at";

#[async_trait]
impl FarmStore for PgStore {
    async fn find_farm_by_id(&self, id: DbId) -> Result<Option<Farm>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM farms WHERE id = $1 AND deleted_at IS NULL");
        let row = sqlx::query_as::<_, FarmRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)?;
        Ok(row.map(Farm::from))
    }

    async fn find_farm_by_name(&self, name: &str) -> Result<Option<Farm>, StoreError> {
        let query =
            format!("SELECT {COLUMNS} FROM farms WHERE name = $1 AND deleted_at IS NULL");
        let row = sqlx::query_as::<_, FarmRow>(&query)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)?;
        Ok(row.map(Farm::from))
    }

    async fn create_farm(&self, input: &FarmBind) -> Result<Farm, StoreError> {
        let query = format!(
            "INSERT INTO farms (id, name)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, FarmRow>(&query)
            .bind(Uuid::new_v4())
            .bind(&input.name)
            .fetch_one(&self.pool)
            .await
            .map_err(classify)?;
        Ok(row.into())
    }

    async fn update_farm(&self, id: DbId, input: &FarmBind) -> Result<Option<Farm>, StoreError> {
        let query = format!(
            "UPDATE farms SET name = $2, updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, FarmRow>(&query)
            .bind(id)
            .bind(&input.name)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)?;
        Ok(row.map(Farm::from))
    }

    async fn list_farms(&self) -> Result<Vec<Farm>, StoreError> {
        let query = format!(
            "SELECT {COLUMNS} FROM farms WHERE deleted_at IS NULL ORDER BY created_at, id"
        );
        let rows = sqlx::query_as::<_, FarmRow>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(classify)?;
        Ok(rows.into_iter().map(Farm::from).collect())
    }

    async fn find_farm_with_ponds(&self, id: DbId) -> Result<Option<FarmWithPonds>, StoreError> {
        let Some(farm) = self.find_farm_by_id(id).await? else {
            return Ok(None);
        };

        let query = format!(
            "SELECT {POND_COLUMNS} FROM ponds
             WHERE farm_id = $1 AND deleted_at IS NULL
             ORDER BY created_at, id"
        );
        let ponds = sqlx::query_as::<_, PondRow>(&query)
            .bind(id)
            .fetch_all(&self.pool)
            .await
            .map_err(classify)?;

        Ok(Some(FarmWithPonds {
            farm,
            ponds: ponds.into_iter().map(Into::into).collect(),
        }))
    }

    async fn delete_farm_cascading(&self, id: DbId) -> Result<bool, StoreError> {
        let mut tx = self.pool.begin().await.map_err(classify)?;

        let ponds = sqlx::query(
            "UPDATE ponds SET deleted_at = NOW() WHERE farm_id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(classify)?;

        let farm = sqlx::query(
            "UPDATE farms SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(classify)?;

        if farm.rows_affected() == 0 {
            // Dropping the transaction rolls back the pond updates.
            return Ok(false);
        }

        tx.commit().await.map_err(classify)?;
        tracing::debug!(farm_id = %id, ponds = ponds.rows_affected(), "Farm cascade committed");
        Ok(true)
    }
}
