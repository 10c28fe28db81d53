mod file_config;

pub use file_config::{CacheConfig, FileConfig};

use anyhow::{bail, Result};
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_PRUNE_INTERVAL_SECS: u64 = 300;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub cache: CacheSettings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheBackend {
    Memory,
    Sqlite { db_path: PathBuf },
}

#[derive(Debug, Clone)]
pub struct CacheSettings {
    pub backend: CacheBackend,
    /// How often expired entries are evicted. `None` disables the pruner.
    pub prune_interval: Option<Duration>,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            backend: CacheBackend::Memory,
            prune_interval: Some(Duration::from_secs(DEFAULT_PRUNE_INTERVAL_SECS)),
        }
    }
}

impl AppConfig {
    /// Resolve configuration from an optional TOML file, filling in defaults.
    pub fn resolve(file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let log_level = file
            .log_level
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        let cache_file = file.cache.unwrap_or_default();
        let backend = match cache_file.backend.as_deref().unwrap_or("memory") {
            "memory" => CacheBackend::Memory,
            "sqlite" => {
                let db_path = cache_file.db_path.map(PathBuf::from).ok_or_else(|| {
                    anyhow::anyhow!("cache.db_path must be specified for the sqlite backend")
                })?;
                if let Some(parent) = db_path.parent() {
                    if !parent.as_os_str().is_empty() && !parent.is_dir() {
                        bail!("Cache database directory does not exist: {:?}", parent);
                    }
                }
                CacheBackend::Sqlite { db_path }
            }
            other => bail!("Unknown cache backend: {}", other),
        };

        let prune_interval = match cache_file
            .prune_interval_secs
            .unwrap_or(DEFAULT_PRUNE_INTERVAL_SECS)
        {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };

        Ok(Self {
            log_level,
            cache: CacheSettings {
                backend,
                prune_interval,
            },
        })
    }
}
