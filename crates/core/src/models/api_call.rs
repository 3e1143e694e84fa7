//! API-call audit models.
//!
//! Audit rows are append-only. The read side only ever sees them grouped by
//! `(endpoint, method)`.

use std::collections::BTreeMap;

use serde::Serialize;

/// DTO for recording one inbound HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewApiCall {
    pub endpoint: String,
    pub method: String,
    pub caller_address: String,
}

/// One `GROUP BY endpoint, method` row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointCallStats {
    pub endpoint: String,
    pub method: String,
    pub count: i64,
    pub unique_callers: i64,
}

/// Call statistics for a single `"METHOD endpoint"` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EndpointSummary {
    pub count: i64,
    pub unique_callers: i64,
}

/// Per-endpoint call statistics keyed by `"METHOD endpoint"`.
pub type ApiCallSummary = BTreeMap<String, EndpointSummary>;

/// Reshape grouped rows into the keyed summary.
pub fn summarize(rows: Vec<EndpointCallStats>) -> ApiCallSummary {
    rows.into_iter()
        .map(|row| {
            (
                format!("{} {}", row.method, row.endpoint),
                EndpointSummary {
                    count: row.count,
                    unique_callers: row.unique_callers,
                },
            )
        })
        .collect()
}
