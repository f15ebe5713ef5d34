use crate::core::path::{config_file, ensure_dir};
use crate::core::{SourceError, SourceResult};
use crate::di::SettingsProvider;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Maximum number of tag releases reported per package (0 = unlimited)
    #[serde(default)]
    pub max_releases: usize,

    /// Whether readme lookups during `repo-info` may reuse a cached
    /// directory listing instead of issuing a fresh request
    #[serde(default)]
    pub readme_prefer_cached: bool,

    /// Timeout for a single Bitbucket API request, in seconds
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,

    /// User agent sent with every API request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_http_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("bitbucket-source/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_releases: 0,
            readme_prefer_cached: false,
            http_timeout_secs: default_http_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl Config {
    /// Load config from platform-specific config directory, creating default if it doesn't exist
    ///
    /// Config locations:
    /// - Windows: %APPDATA%\bitbucket-source\config.yaml
    /// - Linux: ~/.config/bitbucket-source/config.yaml
    /// - macOS: ~/Library/Application Support/bitbucket-source/config.yaml
    pub fn load() -> SourceResult<Self> {
        let config_path = config_file()?;

        if !config_path.exists() {
            let config = Self::default();
            config.save_to(&config_path)?;
            return Ok(config);
        }

        Self::load_from(&config_path)
    }

    /// Load config from an explicit file
    pub fn load_from(path: &Path) -> SourceResult<Self> {
        let content = fs::read_to_string(path)?;
        serde_yaml::from_str(&content)
            .map_err(|e| SourceError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Save config to an explicit file, creating its directory
    pub fn save_to(&self, path: &Path) -> SourceResult<()> {
        let config_dir = path
            .parent()
            .ok_or_else(|| SourceError::Path("Invalid config path".to_string()))?;
        ensure_dir(config_dir)?;

        let content = serde_yaml::to_string(self)
            .map_err(|e| SourceError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, content)?;
        Ok(())
    }
}

impl SettingsProvider for Config {
    fn max_releases(&self) -> usize {
        self.max_releases
    }

    fn readme_prefer_cached(&self) -> bool {
        self.readme_prefer_cached
    }
}
