use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use tracing::warn;

/// Application configuration driven by environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub dataset_path: PathBuf,
    pub bind_addr: SocketAddr,
    pub omdb_api_key: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let dataset_path = env::var("FILMMUSE_DATASET")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data/movies.jsonl"));

        let bind_addr: SocketAddr = env::var("FILMMUSE_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
            .parse()?;

        let omdb_api_key = env::var("OMDB_API_KEY")
            .ok()
            .filter(|value| !value.trim().is_empty());
        if omdb_api_key.is_none() {
            warn!("OMDB_API_KEY missing; poster lookups will always resolve to null");
        }

        Ok(Self {
            dataset_path,
            bind_addr,
            omdb_api_key,
        })
    }
}
