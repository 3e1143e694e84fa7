//! Queries for the append-only `api_calls` table.

use async_trait::async_trait;
use aquafarm_core::models::api_call::{EndpointCallStats, NewApiCall};
use aquafarm_core::store::{ApiCallStore, StoreError};

use super::{classify, PgStore};
use crate::models::api_call::EndpointCallStatsRow;

#[async_trait]
impl ApiCallStore for PgStore {
    async fn record_api_call(&self, input: &NewApiCall) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO api_calls (endpoint, method, caller_address) VALUES ($1, $2, $3)")
            .bind(&input.endpoint)
            .bind(&input.method)
            .bind(&input.caller_address)
            .execute(&self.pool)
            .await
            .map_err(classify)?;
        Ok(())
    }

    async fn aggregate_api_calls(&self) -> Result<Vec<EndpointCallStats>, StoreError> {
        let rows = sqlx::query_as::<_, EndpointCallStatsRow>(
            "SELECT endpoint, method,
                    COUNT(*) AS count,
                    COUNT(DISTINCT caller_address) AS unique_callers
             FROM api_calls
             GROUP BY endpoint, method
             ORDER BY endpoint, method",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(classify)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
