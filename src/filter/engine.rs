use std::collections::HashSet;

use tracing::{info, warn};

use crate::hdb::HdbRepository;

use super::models::FilterResult;

/// Partitions IPN serial candidates into not-yet-settled and settled sets
/// by consulting the HDB.
///
/// Filtering is advisory. Any trouble reaching the HDB degrades to a full
/// passthrough with a warning instead of an error, so LN issuance is never
/// blocked on the reference store.
pub struct SettlementFilter {
    hdb: HdbRepository,
}

impl SettlementFilter {
    pub fn new(hdb: HdbRepository) -> Self {
        Self { hdb }
    }

    pub async fn filter(&self, serials: &[String]) -> FilterResult {
        if serials.is_empty() {
            return FilterResult::empty();
        }

        let unique = dedup_keep_order(serials);
        let total_input = unique.len();

        if !self.hdb.available() {
            warn!(
                "HDB not found at {}, returning serials unfiltered",
                self.hdb.path().display()
            );
            return FilterResult::passthrough(unique, "HDB not found, no filtering applied");
        }

        let settled = match self.hdb.settled_serials(&unique).await {
            Ok(settled) => settled,
            Err(e) => {
                warn!("HDB unreachable, returning serials unfiltered: {}", e);
                return FilterResult::passthrough(unique, "HDB unavailable, no filtering applied");
            }
        };

        let mut filtered = Vec::with_capacity(total_input);
        let mut excluded = Vec::new();
        for serial in unique {
            if settled.contains(&serial) {
                excluded.push(serial);
            } else {
                filtered.push(serial);
            }
        }

        if !excluded.is_empty() {
            info!(
                "{} of {} serials excluded as settled",
                excluded.len(),
                total_input
            );
        }

        FilterResult {
            excluded_count: excluded.len(),
            total_input,
            filtered,
            excluded,
            warning: None,
        }
    }
}

/// First occurrence wins; relative order of first occurrences is kept.
fn dedup_keep_order(serials: &[String]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(serials.len());
    serials
        .iter()
        .filter(|s| seen.insert(s.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hdb::repository::SETTLED_STATUS;
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool};
    use std::path::Path;
    use tempfile::TempDir;

    async fn seed_hdb(path: &Path, settled: &[&str], open: &[&str]) {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .journal_mode(SqliteJournalMode::Delete)
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await.unwrap();

        sqlx::query("CREATE TABLE human (hn_id INTEGER PRIMARY KEY, settlement_status TEXT)")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("CREATE TABLE h_disclosure (ipn_id TEXT, hn_id INTEGER)")
            .execute(&pool)
            .await
            .unwrap();

        let mut hn_id = 1i64;
        let rows = settled
            .iter()
            .map(|s| (*s, SETTLED_STATUS))
            .chain(open.iter().map(|s| (*s, "交渉中")));
        for (serial, status) in rows {
            sqlx::query("INSERT INTO human (hn_id, settlement_status) VALUES (?, ?)")
                .bind(hn_id)
                .bind(status)
                .execute(&pool)
                .await
                .unwrap();
            sqlx::query("INSERT INTO h_disclosure (ipn_id, hn_id) VALUES (?, ?)")
                .bind(serial)
                .bind(hn_id)
                .execute(&pool)
                .await
                .unwrap();
            hn_id += 1;
        }

        pool.close().await;
    }

    fn serials(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn empty_input_returns_zero_result() {
        let filter = SettlementFilter::new(HdbRepository::new("/nonexistent/hdb.db", 900));
        let result = filter.filter(&[]).await;
        assert_eq!(result, FilterResult::empty());
    }

    #[tokio::test]
    async fn missing_hdb_fails_open() {
        let dir = TempDir::new().unwrap();
        let filter = SettlementFilter::new(HdbRepository::new(dir.path().join("missing.db"), 900));

        let result = filter.filter(&serials(&["A", "A", "B"])).await;

        assert_eq!(result.filtered, serials(&["A", "B"]));
        assert!(result.excluded.is_empty());
        assert_eq!(result.excluded_count, 0);
        assert_eq!(result.total_input, 2);
        assert!(result.warning.is_some());
    }

    #[tokio::test]
    async fn partitions_settled_serials() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hdb.db");
        seed_hdb(&path, &["B"], &["A"]).await;

        let filter = SettlementFilter::new(HdbRepository::new(&path, 900));
        let result = filter.filter(&serials(&["A", "B", "C"])).await;

        assert_eq!(result.filtered, serials(&["A", "C"]));
        assert_eq!(result.excluded, serials(&["B"]));
        assert_eq!(result.excluded_count, 1);
        assert_eq!(result.total_input, 3);
        assert!(result.warning.is_none());
        assert_eq!(
            result.filtered.len() + result.excluded.len(),
            result.total_input
        );
    }

    #[tokio::test]
    async fn chunk_boundaries_do_not_change_the_partition() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hdb.db");
        seed_hdb(&path, &["B"], &[]).await;

        let filter = SettlementFilter::new(HdbRepository::new(&path, 2));
        let result = filter.filter(&serials(&["A", "B", "C"])).await;

        assert_eq!(result.filtered, serials(&["A", "C"]));
        assert_eq!(result.excluded, serials(&["B"]));
        assert_eq!(result.excluded_count, 1);
        assert_eq!(result.total_input, 3);
    }

    #[tokio::test]
    async fn duplicates_collapse_before_querying() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hdb.db");
        seed_hdb(&path, &[], &["A"]).await;

        let filter = SettlementFilter::new(HdbRepository::new(&path, 900));
        let result = filter.filter(&serials(&["A", "A", "B"])).await;

        assert_eq!(result.total_input, 2);
        assert_eq!(result.filtered, serials(&["A", "B"]));
        assert!(result.excluded.is_empty());
    }

    #[tokio::test]
    async fn repeated_calls_are_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hdb.db");
        seed_hdb(&path, &["X2"], &["X1"]).await;

        let filter = SettlementFilter::new(HdbRepository::new(&path, 900));
        let input = serials(&["X1", "X2", "X3"]);

        let first = filter.filter(&input).await;
        let second = filter.filter(&input).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn broken_schema_under_excludes_without_warning() {
        // HDB file exists but every batch query fails: the settled set
        // stays empty, everything passes through, and no warning is set
        // because the store itself was reachable.
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hdb.db");
        let options = SqliteConnectOptions::new()
            .filename(&path)
            .journal_mode(SqliteJournalMode::Delete)
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await.unwrap();
        sqlx::query("CREATE TABLE unrelated (x TEXT)")
            .execute(&pool)
            .await
            .unwrap();
        pool.close().await;

        let filter = SettlementFilter::new(HdbRepository::new(&path, 2));
        let result = filter.filter(&serials(&["A", "B", "C"])).await;

        assert_eq!(result.filtered, serials(&["A", "B", "C"]));
        assert!(result.excluded.is_empty());
        assert!(result.warning.is_none());
    }
}
