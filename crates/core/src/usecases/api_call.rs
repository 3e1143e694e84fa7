//! API-call audit: recording requests and summarizing them per endpoint.

use std::sync::Arc;

use crate::error::CoreError;
use crate::models::api_call::{summarize, ApiCallSummary, NewApiCall};
use crate::store::ApiCallStore;

const SUMMARY_FAILED: &str = "failed to get api calls";
const RECORD_FAILED: &str = "failed to record api call";

pub struct ApiCallUsecase {
    api_calls: Arc<dyn ApiCallStore>,
}

impl ApiCallUsecase {
    pub fn new(api_calls: Arc<dyn ApiCallStore>) -> Self {
        Self { api_calls }
    }

    /// Append one audit row.
    pub async fn record(&self, call: &NewApiCall) -> Result<(), CoreError> {
        self.api_calls
            .record_api_call(call)
            .await
            .map_err(|e| CoreError::internal(RECORD_FAILED, e))
    }

    /// Call counts and distinct callers keyed by `"METHOD endpoint"`.
    ///
    /// An empty audit table is reported as `NotFound`.
    pub async fn summary(&self) -> Result<ApiCallSummary, CoreError> {
        let rows = self
            .api_calls
            .aggregate_api_calls()
            .await
            .map_err(|e| CoreError::internal(SUMMARY_FAILED, e))?;
        if rows.is_empty() {
            return Err(CoreError::not_found(SUMMARY_FAILED, "api call not found"));
        }
        Ok(summarize(rows))
    }
}
