mod client;
#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::models::{CanonicalTransaction, RowError, UploadResult};

pub use client::HttpSyncApi;

/// Wire body for `POST /transactions/sync`.
#[derive(Debug, Serialize)]
pub struct SyncRequest<'a> {
    pub transactions: &'a [CanonicalTransaction],
}

#[derive(Debug, Deserialize)]
pub struct SyncResponse {
    pub results: SyncOutcome,
}

/// The server's own per-row accounting. Passed through verbatim; the
/// aggregator never recomputes or re-validates it.
#[derive(Debug, Clone, Deserialize)]
pub struct SyncOutcome {
    pub success: u32,
    #[serde(default)]
    pub errors: Vec<RowError>,
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("Sync request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Sync endpoint returned status {0}")]
    Status(u16),
    #[error("Sync endpoint returned an unreadable body: {0}")]
    MalformedBody(String),
}

/// Seam between the pipeline and the backend sync endpoint.
pub trait SyncApi {
    fn submit(
        &self,
        transactions: &[CanonicalTransaction],
    ) -> impl Future<Output = Result<SyncOutcome, SubmitError>>;
}

/// Performs the single batch submission and folds the outcome into the
/// operator report. Any transport-level failure collapses to the row-0
/// whole-batch sentinel.
pub async fn submit_batch<S: SyncApi>(
    api: &S,
    transactions: &[CanonicalTransaction],
) -> UploadResult {
    match api.submit(transactions).await {
        Ok(outcome) => UploadResult::new(outcome.success, outcome.errors),
        Err(error) => {
            warn!("Batch submission failed: {error}");
            UploadResult::whole_batch_failure(error.to_string())
        }
    }
}
