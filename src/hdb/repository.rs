use std::collections::HashSet;
use std::path::{Path, PathBuf};

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use tracing::warn;

use crate::error::{AppError, AppResult};

/// Settlement status literal marking a person as settled in the HDB.
pub const SETTLED_STATUS: &str = "和解成立";

/// Read-only repository over the HDB reference store.
///
/// The HDB records which persons have reached settlement. This side only
/// ever reads it; the primary IPNDB is never touched from here.
pub struct HdbRepository {
    path: PathBuf,
    pool: SqlitePool,
    chunk_size: usize,
}

impl HdbRepository {
    /// `chunk_size` caps how many placeholders a single statement binds,
    /// keeping each batch under SQLite's variable limit.
    pub fn new(path: impl Into<PathBuf>, chunk_size: usize) -> Self {
        let path = path.into();

        let options = SqliteConnectOptions::new()
            .filename(&path)
            .read_only(true)
            .journal_mode(SqliteJournalMode::Delete)
            .create_if_missing(false);

        // Lazy pool: nothing connects until the first query, so a missing
        // HDB file surfaces per call instead of failing startup.
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_lazy_with(options);

        Self {
            path,
            pool,
            chunk_size: chunk_size.max(1),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the HDB file is present at all.
    pub fn available(&self) -> bool {
        self.path.exists()
    }

    /// Returns the subset of `serials` whose associated person has reached
    /// settlement.
    ///
    /// One pooled connection is held for the whole call and released on
    /// every exit path. A batch whose query fails is logged and skipped;
    /// the remaining batches still contribute, so partial store trouble
    /// under-excludes rather than failing the call.
    pub async fn settled_serials(&self, serials: &[String]) -> AppResult<HashSet<String>> {
        let mut settled = HashSet::new();

        if serials.is_empty() {
            return Ok(settled);
        }

        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| AppError::StoreUnavailable(e.to_string()))?;

        for batch in serials.chunks(self.chunk_size) {
            let placeholders = vec!["?"; batch.len()].join(",");
            let sql = format!(
                "SELECT DISTINCT hd.ipn_id \
                 FROM h_disclosure hd \
                 JOIN human h ON hd.hn_id = h.hn_id \
                 WHERE hd.ipn_id IN ({}) \
                 AND h.settlement_status = ?",
                placeholders
            );

            let mut query = sqlx::query(&sql);
            for serial in batch {
                query = query.bind(serial);
            }
            query = query.bind(SETTLED_STATUS);

            match query.fetch_all(&mut *conn).await {
                Ok(rows) => {
                    for row in rows {
                        settled.insert(row.get::<String, _>("ipn_id"));
                    }
                }
                Err(e) => {
                    warn!(
                        "HDB settled lookup failed for a batch of {}: {}",
                        batch.len(),
                        e
                    );
                    continue;
                }
            }
        }

        Ok(settled)
    }
}
