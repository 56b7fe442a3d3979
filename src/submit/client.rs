use tracing::debug;

use crate::models::CanonicalTransaction;
use crate::submit::{SubmitError, SyncApi, SyncOutcome, SyncRequest, SyncResponse};

/// Production transport for the sync endpoint. Attaches the bearer
/// credential on every request; timeouts, if any, are the transport
/// layer's concern, not this subsystem's.
pub struct HttpSyncApi {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl HttpSyncApi {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            client: reqwest::Client::new(),
            base_url,
            token: token.into(),
        }
    }
}

impl SyncApi for HttpSyncApi {
    async fn submit(
        &self,
        transactions: &[CanonicalTransaction],
    ) -> Result<SyncOutcome, SubmitError> {
        let url = format!("{}/transactions/sync", self.base_url);

        debug!("Submitting {} transactions to {url}", transactions.len());

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&SyncRequest { transactions })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubmitError::Status(status.as_u16()));
        }

        let body: SyncResponse = response
            .json()
            .await
            .map_err(|error| SubmitError::MalformedBody(error.to_string()))?;

        Ok(body.results)
    }
}
