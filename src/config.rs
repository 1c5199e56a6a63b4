use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub hdb_path: String,
    pub bind_address: String,
    pub chunk_size: usize,
    pub hdb_filter_url: String,
    pub hdb_filter_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Ok(Self {
            hdb_path: std::env::var("HDB_PATH")
                .unwrap_or_else(|_| "/var/lib/hdb/hdb.db".to_string()),
            bind_address: std::env::var("BIND_ADDRESS")
                .unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            // SQLite caps bound variables per statement; 900 stays safely under it
            chunk_size: std::env::var("HDB_CHUNK_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(900),
            hdb_filter_url: std::env::var("HDB_FILTER_URL")
                .unwrap_or_else(|_| "http://localhost:8080/filter".to_string()),
            hdb_filter_timeout_secs: std::env::var("HDB_FILTER_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        })
    }
}
