use std::sync::Arc;

use tracing::info;

use crate::{
    api::handler::AppState, config::Config, error::AppResult, filter::SettlementFilter,
    hdb::HdbRepository,
};

pub fn initialize_app_state(config: &Config) -> AppResult<AppState> {
    info!("Initializing application components ...");

    let hdb = HdbRepository::new(&config.hdb_path, config.chunk_size);
    if hdb.available() {
        info!("✅ HDB found at {}", config.hdb_path);
    } else {
        // A missing HDB is not a startup error; the filter degrades to
        // passthrough on every call until the file appears.
        info!(
            "⚠️  HDB not found at {} - serials will pass through unfiltered",
            config.hdb_path
        );
    }

    let filter = Arc::new(SettlementFilter::new(hdb));
    info!(
        "✅ Settlement filter initialized (chunk size {})",
        config.chunk_size
    );

    Ok(AppState { filter })
}
