use aquafarm_core::models::api_call::EndpointCallStats;
use sqlx::FromRow;

/// One `GROUP BY endpoint, method` row from `api_calls`.
#[derive(Debug, Clone, FromRow)]
pub struct EndpointCallStatsRow {
    pub endpoint: String,
    pub method: String,
    pub count: i64,
    pub unique_callers: i64,
}

impl From<EndpointCallStatsRow> for EndpointCallStats {
    fn from(row: EndpointCallStatsRow) -> Self {
        Self {
            endpoint: row.endpoint,
            method: row.method,
            count: row.count,
            unique_callers: row.unique_callers,
        }
    }
}
