//! # Backend Configuration
//!
//! Which table API the ERP talks to, and how to reach it.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Priority (highest first)                                               │
//! │                                                                         │
//! │  1. Environment      CELLPARTS_BACKEND, CELLPARTS_API_URL, ...          │
//! │  2. Config file      {config_dir}/erp.toml                              │
//! │  3. Defaults         memory backend, 20 s timeout                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # erp.toml
//! backend = "rest"          # rest | sqlite | memory
//! timeout_secs = 20
//!
//! [rest]
//! url = "https://xyz.supabase.co"
//! api_key = "public-anon-key"
//!
//! [sqlite]
//! path = "/var/lib/cellparts/erp.db"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::backend::sqlite::SqliteConfig;
use crate::backend::{MemoryTableApi, RestTableApi, SqliteTableApi, TableApi};
use crate::error::{DataError, DataResult};

// =============================================================================
// Backend Kind
// =============================================================================

/// The table API implementation to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Hosted PostgREST endpoint.
    Rest,

    /// Local SQLite document store.
    Sqlite,

    /// In-process store (demo data, tests).
    #[default]
    Memory,
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendKind::Rest => write!(f, "rest"),
            BackendKind::Sqlite => write!(f, "sqlite"),
            BackendKind::Memory => write!(f, "memory"),
        }
    }
}

impl std::str::FromStr for BackendKind {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rest" | "supabase" | "hosted" => Ok(BackendKind::Rest),
            "sqlite" | "local" => Ok(BackendKind::Sqlite),
            "memory" | "demo" => Ok(BackendKind::Memory),
            other => Err(DataError::InvalidConfig(format!(
                "Unknown backend: '{}'. Valid options: rest, sqlite, memory",
                other
            ))),
        }
    }
}

// =============================================================================
// Sections
// =============================================================================

/// Hosted API endpoint settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RestSettings {
    /// Project URL, e.g. `https://xyz.supabase.co`.
    #[serde(default)]
    pub url: Option<String>,

    /// Public (anon) API key.
    #[serde(default)]
    pub api_key: Option<String>,
}

/// Local store settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SqliteSettings {
    /// Database file. Defaults to `{data_dir}/erp.db`.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

// =============================================================================
// Data Config
// =============================================================================

/// Complete backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default)]
    pub backend: BackendKind,

    /// Request timeout for the hosted API (seconds).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub rest: RestSettings,

    #[serde(default)]
    pub sqlite: SqliteSettings,
}

fn default_timeout() -> u64 {
    20
}

impl Default for DataConfig {
    fn default() -> Self {
        DataConfig {
            backend: BackendKind::default(),
            timeout_secs: default_timeout(),
            rest: RestSettings::default(),
            sqlite: SqliteSettings::default(),
        }
    }
}

impl DataConfig {
    /// Loads configuration from file (if present) and the environment.
    pub fn load(config_path: Option<PathBuf>) -> DataResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading ERP config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration, falling back to defaults on any error.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load ERP config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a TOML config file.
    pub fn from_file(path: &Path) -> DataResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parses TOML text.
    pub fn from_toml(contents: &str) -> DataResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Checks that the selected backend has what it needs.
    pub fn validate(&self) -> DataResult<()> {
        if self.timeout_secs == 0 {
            return Err(DataError::InvalidConfig("timeout_secs must be positive".into()));
        }

        if self.backend == BackendKind::Rest {
            let url = self.rest.url.as_deref().unwrap_or("");
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(DataError::InvalidConfig(format!(
                    "API URL must start with http:// or https://, got: '{}'",
                    url
                )));
            }
            if self.rest.api_key.as_deref().map_or(true, |k| k.trim().is_empty()) {
                return Err(DataError::InvalidConfig("API key is required for the rest backend".into()));
            }
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Applies overrides from any variable source (the environment in
    /// production, a map in tests).
    pub fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(backend) = var("CELLPARTS_BACKEND") {
            match backend.parse() {
                Ok(parsed) => {
                    debug!(backend = %backend, "Overriding backend from environment");
                    self.backend = parsed;
                }
                Err(e) => warn!("{}", e),
            }
        }

        if let Some(url) = var("CELLPARTS_API_URL") {
            debug!(url = %url, "Overriding API URL from environment");
            self.rest.url = Some(url);
        }

        if let Some(key) = var("CELLPARTS_API_KEY") {
            self.rest.api_key = Some(key);
        }

        if let Some(path) = var("CELLPARTS_DB_PATH") {
            self.sqlite.path = Some(PathBuf::from(path));
        }

        if let Some(timeout) = var("CELLPARTS_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) => self.timeout_secs = secs,
                Err(_) => warn!(timeout = %timeout, "Ignoring invalid CELLPARTS_TIMEOUT_SECS"),
            }
        }
    }

    /// Request timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Local database path, falling back to the platform data directory.
    pub fn sqlite_path(&self) -> PathBuf {
        self.sqlite
            .path
            .clone()
            .or_else(|| project_dirs().map(|dirs| dirs.data_dir().join("erp.db")))
            .unwrap_or_else(|| PathBuf::from("cellparts-erp.db"))
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("erp.toml"))
    }

    /// Builds the configured backend.
    ///
    /// ## Returns
    /// The backend behind a shared handle, plus the concrete memory store
    /// when that backend was chosen (so the caller can seed it).
    pub async fn connect(&self) -> DataResult<(Arc<dyn TableApi>, Option<Arc<MemoryTableApi>>)> {
        info!(backend = %self.backend, "Connecting table API");
        match self.backend {
            BackendKind::Rest => {
                let url = self.rest.url.clone().unwrap_or_default();
                let key = self.rest.api_key.clone().unwrap_or_default();
                let api = RestTableApi::new(url, key, self.timeout())?;
                Ok((Arc::new(api), None))
            }
            BackendKind::Sqlite => {
                let path = self.sqlite_path();
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent)?;
                }
                let api = SqliteTableApi::connect(SqliteConfig::new(path)).await?;
                Ok((Arc::new(api), None))
            }
            BackendKind::Memory => {
                let api = Arc::new(MemoryTableApi::new());
                let shared: Arc<dyn TableApi> = api.clone();
                Ok((shared, Some(api)))
            }
        }
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "cellparts", "cellparts")
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = DataConfig::default();
        assert_eq!(config.backend, BackendKind::Memory);
        assert_eq!(config.timeout(), Duration::from_secs(20));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_toml() {
        let config = DataConfig::from_toml(
            r#"
            backend = "rest"
            timeout_secs = 5

            [rest]
            url = "https://demo.supabase.co"
            api_key = "anon"
            "#,
        )
        .unwrap();
        assert_eq!(config.backend, BackendKind::Rest);
        assert_eq!(config.timeout_secs, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_malformed_toml_is_invalid_config() {
        let err = DataConfig::from_toml("backend = [").unwrap_err();
        assert!(matches!(err, DataError::InvalidConfig(_)));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("CELLPARTS_BACKEND", "sqlite"),
            ("CELLPARTS_DB_PATH", "/tmp/erp.db"),
            ("CELLPARTS_TIMEOUT_SECS", "abc"),
        ]);
        let mut config = DataConfig::default();
        config.apply_overrides(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(config.backend, BackendKind::Sqlite);
        assert_eq!(config.sqlite_path(), PathBuf::from("/tmp/erp.db"));
        assert_eq!(config.timeout_secs, 20);
    }

    #[test]
    fn test_rest_backend_requires_url_and_key() {
        let mut config = DataConfig {
            backend: BackendKind::Rest,
            ..DataConfig::default()
        };
        assert!(config.validate().is_err());

        config.rest.url = Some("https://demo.supabase.co".into());
        assert!(config.validate().is_err());

        config.rest.api_key = Some("anon".into());
        assert!(config.validate().is_ok());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_config_file_lives_under_cellparts_dir() {
        // No home directory in some CI sandboxes.
        if let Some(path) = DataConfig::default_config_path() {
            assert!(path.ends_with("cellparts/erp.toml"), "{}", path.display());
        }
    }

    #[tokio::test]
    async fn test_memory_backend_is_returned_for_seeding() {
        let (api, memory) = DataConfig::default().connect().await.unwrap();
        assert_eq!(api.backend_name(), "memory");
        assert!(memory.is_some());
    }
}
