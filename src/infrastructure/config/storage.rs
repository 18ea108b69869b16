use super::app_config::AppConfig;
use directories::ProjectDirs;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

const CONFIG_FILE_NAME: &str = "config.toml";

/// Failure while locating, reading or writing the configuration file.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ConfigError {
    #[error("no home directory to place the configuration in")]
    ConfigDirNotFound,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

/// Locates `config.toml` and turns it into an [`AppConfig`].
pub struct StorageManager {
    config_dir: PathBuf,
}

impl StorageManager {
    /// Uses the platform configuration directory (e.g. ~/.config/emojibox/).
    ///
    /// # Errors
    /// Returns `ConfigDirNotFound` when no home directory is known.
    pub fn new() -> Result<Self, ConfigError> {
        ProjectDirs::from("com", "linuxmobile", crate::NAME)
            .map(|dirs| Self::with_dir(dirs.config_dir().to_path_buf()))
            .ok_or(ConfigError::ConfigDirNotFound)
    }

    /// Uses `config_dir` instead of the platform directory.
    #[must_use]
    pub const fn with_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    /// Reads the configuration from `path_override` or the default file.
    ///
    /// A missing file is created with defaults. A file that does not parse
    /// is left alone and defaults are used for this run.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or the default cannot be written.
    pub fn load_config(&self, path_override: Option<&Path>) -> Result<AppConfig, ConfigError> {
        let path = path_override.map_or_else(|| self.config_dir.join(CONFIG_FILE_NAME), Path::to_path_buf);

        let mut config = if path.exists() {
            Self::parse(&path)?
        } else {
            info!(path = %path.display(), "No config file, writing defaults");
            let config = AppConfig::default();
            Self::write_atomically(&path, &config)?;
            config
        };

        if config.normalizer.sanitize() {
            warn!(
                path = %path.display(),
                max_dimension = config.normalizer.max_dimension,
                "max_dimension must be positive, using default"
            );
        }

        Ok(config)
    }

    fn parse(path: &Path) -> Result<AppConfig, ConfigError> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "Config file is malformed, using defaults");
            AppConfig::default()
        }))
    }

    fn write_atomically(path: &Path, config: &AppConfig) -> Result<(), ConfigError> {
        let parent = path
            .parent()
            .ok_or_else(|| std::io::Error::other("config path has no parent directory"))?;
        fs::create_dir_all(parent)?;

        let mut staged = tempfile::NamedTempFile::new_in(parent)?;
        staged.write_all(toml::to_string_pretty(config)?.as_bytes())?;
        staged.persist(path).map_err(|e| e.error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_config_dir_is_created() {
        let dir = tempdir().unwrap();
        let config_dir = dir.path().join("emojibox");
        let manager = StorageManager::with_dir(config_dir.clone());

        manager.load_config(None).unwrap();

        assert!(config_dir.join(CONFIG_FILE_NAME).exists());
    }

    #[test]
    fn test_load_config_creates_default_if_missing() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().to_path_buf());

        let config = manager.load_config(None).unwrap();
        assert_eq!(config.normalizer.max_dimension, 50);

        let written = fs::read_to_string(dir.path().join(CONFIG_FILE_NAME)).unwrap();
        let reparsed: AppConfig = toml::from_str(&written).unwrap();
        assert_eq!(reparsed.api_base_url, config.api_base_url);
    }

    #[test]
    fn test_load_config_handles_malformed_file() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().to_path_buf());
        let config_file = dir.path().join(CONFIG_FILE_NAME);

        fs::write(&config_file, "invalid_toml = [").unwrap();

        let config = manager.load_config(None).unwrap();
        assert_eq!(config.request_timeout_secs, 30);
        let content = fs::read_to_string(&config_file).unwrap();
        assert_eq!(content, "invalid_toml = [");
    }

    #[test]
    fn test_load_config_from_override_path() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().join("unused"));
        let custom = dir.path().join("custom.toml");

        fs::write(&custom, "[normalizer]\ngifsicle_program = \"/opt/gifsicle\"\n").unwrap();

        let config = manager.load_config(Some(&custom)).unwrap();
        assert_eq!(config.normalizer.gifsicle_program, "/opt/gifsicle");
        assert!(!dir.path().join("unused").exists());
    }

    #[test]
    fn test_zero_max_dimension_is_replaced() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().to_path_buf());
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[normalizer]\nmax_dimension = 0\n",
        )
        .unwrap();

        let config = manager.load_config(None).unwrap();

        assert_eq!(config.normalizer.max_dimension, 50);
    }
}
