use std::time::Duration;

use reqwest::Client;
use tracing::info;

use crate::{
    api::models::FilterRequest,
    config::Config,
    error::{AppError, AppResult},
    filter::FilterResult,
};

/// Remote transport variant: talks to a filter API hosted next to the HDB.
///
/// Used when the HDB lives on another server. Produces the same
/// `FilterResult` shape as the in-process `SettlementFilter`, so the
/// issuance workflow does not care which transport is behind it.
pub struct HdbFilterClient {
    http: Client,
    endpoint: String,
}

impl HdbFilterClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    /// Builds the client from the service configuration
    /// (`HDB_FILTER_URL`, `HDB_FILTER_TIMEOUT_SECS`).
    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(
            config.hdb_filter_url.clone(),
            Duration::from_secs(config.hdb_filter_timeout_secs),
        )
    }

    pub async fn filter(&self, serials: &[String]) -> AppResult<FilterResult> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&FilterRequest {
                ipn_serials: serials.to_vec(),
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::External(format!(
                "HDB filter API returned {}",
                status
            )));
        }

        let result = response.json::<FilterResult>().await?;
        info!(
            "Remote HDB filter excluded {} of {} serials",
            result.excluded_count, result.total_input
        );
        Ok(result)
    }
}
