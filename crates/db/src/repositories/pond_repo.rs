//! Queries for the `ponds` table.

use async_trait::async_trait;
use aquafarm_core::models::farm::Farm;
use aquafarm_core::models::pond::{NewPond, Pond, PondWithFarm};
use aquafarm_core::store::{PondStore, StoreError};
use aquafarm_core::types::DbId;
use uuid::Uuid;

use super::{classify, PgStore};
use crate::models::farm::FarmRow;
use crate::models::pond::PondRow;

const COLUMNS: &str = "id, farm_id, name, created_at, updated_at";

#[async_trait]
impl PondStore for PgStore {
    async fn find_pond_by_id(&self, id: DbId) -> Result<Option<Pond>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM ponds WHERE id = $1 AND deleted_at IS NULL");
        let row = sqlx::query_as::<_, PondRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)?;
        Ok(row.map(Pond::from))
    }

    async fn find_pond_by_name(&self, name: &str) -> Result<Option<Pond>, StoreError> {
        let query =
            format!("SELECT {COLUMNS} FROM ponds WHERE name = $1 AND deleted_at IS NULL");
        let row = sqlx::query_as::<_, PondRow>(&query)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)?;
        Ok(row.map(Pond::from))
    }

    async fn create_pond(&self, input: &NewPond) -> Result<Pond, StoreError> {
        let query = format!(
            "INSERT INTO ponds (id, farm_id, name)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, PondRow>(&query)
            .bind(Uuid::new_v4())
            .bind(input.farm_id)
            .bind(&input.name)
            .fetch_one(&self.pool)
            .await
            .map_err(classify)?;
        Ok(row.into())
    }

    async fn update_pond(&self, id: DbId, input: &NewPond) -> Result<Option<Pond>, StoreError> {
        let query = format!(
            "UPDATE ponds SET farm_id = $2, name = $3, updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, PondRow>(&query)
            .bind(id)
            .bind(input.farm_id)
            .bind(&input.name)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)?;
        Ok(row.map(Pond::from))
    }

    async fn list_ponds(&self) -> Result<Vec<Pond>, StoreError> {
        let query = format!(
            "SELECT {COLUMNS} FROM ponds WHERE deleted_at IS NULL ORDER BY created_at, id"
        );
        let rows = sqlx::query_as::<_, PondRow>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(classify)?;
        Ok(rows.into_iter().map(Pond::from).collect())
    }

    async fn find_pond_with_farm(&self, id: DbId) -> Result<Option<PondWithFarm>, StoreError> {
        let Some(pond) = self.find_pond_by_id(id).await? else {
            return Ok(None);
        };

        let farm = sqlx::query_as::<_, FarmRow>(
            "SELECT id, name, created_at, updated_at FROM farms
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(pond.farm_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(classify)?;

        Ok(Some(PondWithFarm {
            pond,
            farm: farm.map(Farm::from),
        }))
    }

    async fn delete_pond(&self, id: DbId) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "UPDATE ponds SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(classify)?;
        Ok(result.rows_affected() > 0)
    }
}
