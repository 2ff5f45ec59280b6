use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    errors::{Result, WizardError},
    utils::paths::{self, ensure_dir, write_atomic},
};

pub const DEFAULT_SNAPSHOT_KEY: &str = "formData";
pub const DEFAULT_THEME_KEY: &str = "theme";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Store entry holding the serialized in-progress session.
    pub snapshot_key: String,
    /// Store entry holding the `"dark"`/`"light"` preference.
    pub theme_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            snapshot_key: DEFAULT_SNAPSHOT_KEY.into(),
            theme_key: DEFAULT_THEME_KEY.into(),
            data_dir: None,
        }
    }
}

impl Config {
    /// Directory used by the file-backed key-value store.
    pub fn store_dir(&self, base: &Path) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| paths::store_dir_in(base))
    }
}

pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(paths::app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        Ok(Self {
            path: paths::config_file_in(&base),
            base,
        })
    }

    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        serde_json::from_str(&data).map_err(|err| {
            WizardError::ConfigError(format!("`{}`: {}", self.path.display(), err))
        })
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.snapshot_key, "formData");
        assert_eq!(config.theme_key, "theme");
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        fs::write(manager.path(), r#"{ "snapshot_key": "draft" }"#).unwrap();

        let config = manager.load().unwrap();
        assert_eq!(config.snapshot_key, "draft");
        assert_eq!(config.theme_key, DEFAULT_THEME_KEY);
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        fs::write(manager.path(), "not json").unwrap();
        assert!(matches!(manager.load(), Err(WizardError::ConfigError(_))));
    }

    #[test]
    fn store_dir_prefers_explicit_data_dir() {
        let base = Path::new("/base");
        let mut config = Config::default();
        assert_eq!(config.store_dir(base), PathBuf::from("/base/store"));
        config.data_dir = Some(PathBuf::from("/elsewhere"));
        assert_eq!(config.store_dir(base), PathBuf::from("/elsewhere"));
    }
}
