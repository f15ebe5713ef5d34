use crate::core::error::{SourceError, SourceResult};
use std::path::{Path, PathBuf};

/// Directory name used under the platform config directory
pub const APP_DIR_NAME: &str = "bitbucket-source";

/// Get the bitbucket-source home directory
///
/// Platform-specific locations:
/// - Windows: %APPDATA%\bitbucket-source
/// - Linux: ~/.config/bitbucket-source
/// - macOS: ~/Library/Application Support/bitbucket-source
pub fn source_home() -> SourceResult<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| SourceError::Path("Could not determine config directory".to_string()))?;
    Ok(config_dir.join(APP_DIR_NAME))
}

/// Get the config file path
pub fn config_file() -> SourceResult<PathBuf> {
    Ok(source_home()?.join("config.yaml"))
}

/// Create a directory (and its parents) if it does not exist
pub fn ensure_dir(path: &Path) -> SourceResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}
