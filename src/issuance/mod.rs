use async_trait::async_trait;
use tracing::{info, warn};

use crate::{
    client::HdbFilterClient,
    error::AppResult,
    filter::{FilterResult, SettlementFilter},
};

/// Transport-agnostic seam for the HDB settlement check.
///
/// LN issuance does not care whether the HDB is on the same host or behind
/// the filter API; both transports answer with the same result shape.
#[async_trait]
pub trait SettlementScreen: Send + Sync {
    async fn screen(&self, serials: &[String]) -> AppResult<FilterResult>;
}

#[async_trait]
impl SettlementScreen for SettlementFilter {
    async fn screen(&self, serials: &[String]) -> AppResult<FilterResult> {
        Ok(self.filter(serials).await)
    }
}

#[async_trait]
impl SettlementScreen for HdbFilterClient {
    async fn screen(&self, serials: &[String]) -> AppResult<FilterResult> {
        self.filter(serials).await
    }
}

/// Candidate list after the HDB pass, plus the count dropped by it.
///
/// `excluded_by_hdb` is reported on the issuance result view alongside the
/// separately tracked cre.db exclusion count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HdbScreening {
    pub serials: Vec<String>,
    pub excluded_by_hdb: usize,
}

/// Drops settled serials from the issuance candidate list.
///
/// Any screening failure keeps the full candidate list; issuance proceeds
/// even when the HDB cannot be consulted.
pub async fn filter_by_hdb(screen: &dyn SettlementScreen, serials: &[String]) -> HdbScreening {
    if serials.is_empty() {
        return HdbScreening {
            serials: Vec::new(),
            excluded_by_hdb: 0,
        };
    }

    match screen.screen(serials).await {
        Ok(result) => {
            if result.excluded_count > 0 {
                info!(
                    "[LN issuance] {} serials excluded by HDB",
                    result.excluded_count
                );
            }
            let excluded_by_hdb = serials.len().saturating_sub(result.filtered.len());
            HdbScreening {
                serials: result.filtered,
                excluded_by_hdb,
            }
        }
        Err(e) => {
            warn!(
                "[LN issuance] HDB filter failed, continuing unfiltered: {}",
                e
            );
            HdbScreening {
                serials: serials.to_vec(),
                excluded_by_hdb: 0,
            }
        }
    }
}
