//! Application configuration loaded from a TOML file.

use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::notify::domain::NotificationSettings;
use crate::task::ports::Credentials;

/// Name of the configuration file inside the configuration directory.
pub const CONFIG_FILE_NAME: &str = "planme.toml";

const APP_DIR_NAME: &str = ".planme";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The home directory could not be determined.
    #[error("cannot locate the home directory")]
    NoHomeDir,
    /// The home directory path is not valid UTF-8.
    #[error("home directory path is not valid UTF-8")]
    NonUtf8Path,
    /// The file exists but could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// Path that failed.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The file is not valid configuration.
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        /// Path that failed.
        path: Utf8PathBuf,
        /// Underlying TOML error.
        source: toml::de::Error,
    },
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Where tasks come from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Task source API key.
    pub api_key: String,
    /// Task source database identifier.
    pub database_id: String,
    /// Directory holding `<database_id>.json` exports. Defaults to
    /// `<data_dir>/exports`.
    pub export_dir: Option<Utf8PathBuf>,
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding persisted state. Relative paths resolve against the
    /// configuration file's directory.
    pub data_dir: Utf8PathBuf,
    /// Seconds between overtime checks while a timer runs.
    pub tick_interval_secs: u64,
    /// Task source settings.
    pub source: SourceConfig,
    /// Notification preferences.
    pub notifications: NotificationSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: Utf8PathBuf::from("."),
            tick_interval_secs: 1,
            source: SourceConfig::default(),
            notifications: NotificationSettings::default(),
        }
    }
}

impl AppConfig {
    /// Returns `$HOME/.planme`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the home directory is unknown or not
    /// UTF-8.
    pub fn default_dir() -> ConfigResult<Utf8PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        let home = Utf8PathBuf::from_path_buf(home).map_err(|_| ConfigError::NonUtf8Path)?;
        Ok(home.join(APP_DIR_NAME))
    }

    /// Returns `$HOME/.planme/planme.toml`.
    ///
    /// # Errors
    ///
    /// See [`AppConfig::default_dir`].
    pub fn default_path() -> ConfigResult<Utf8PathBuf> {
        Ok(Self::default_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Loads the file at `path`; a missing file yields defaults. Relative
    /// directories are resolved against the file's directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file exists but cannot be read or
    /// parsed.
    pub fn load(path: &Utf8Path) -> ConfigResult<Self> {
        let config = match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml(&contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(%path, "no config file; using defaults");
                Self::default()
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let base = path.parent().unwrap_or_else(|| Utf8Path::new("."));
        Ok(config.resolved_against(base))
    }

    /// Parses configuration text.
    ///
    /// # Errors
    ///
    /// Returns [`toml::de::Error`] for malformed text.
    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Returns the tick period, at least one second.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(self.tick_interval_secs.max(1))
    }

    /// Returns the task source credentials.
    #[must_use]
    pub fn credentials(&self) -> Credentials {
        Credentials::new(
            self.source.api_key.clone(),
            self.source.database_id.clone(),
        )
    }

    /// Returns the directory holding task exports.
    #[must_use]
    pub fn export_dir(&self) -> Utf8PathBuf {
        self.source
            .export_dir
            .clone()
            .unwrap_or_else(|| self.data_dir.join("exports"))
    }

    fn resolved_against(mut self, base: &Utf8Path) -> Self {
        if self.data_dir.is_relative() {
            self.data_dir = base.join(&self.data_dir);
        }
        if let Some(dir) = self.source.export_dir.take() {
            self.source.export_dir = Some(if dir.is_relative() {
                base.join(dir)
            } else {
                dir
            });
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn missing_file_yields_defaults_rooted_at_config_dir() -> eyre::Result<()> {
        let dir = tempfile::tempdir()?;
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .map_err(|_| eyre::eyre!("non UTF-8 temp dir"))?;
        let config = AppConfig::load(&root.join(CONFIG_FILE_NAME))?;

        eyre::ensure!(config.data_dir == root.join("."));
        eyre::ensure!(config.tick_interval() == Duration::from_secs(1));
        eyre::ensure!(config.notifications == NotificationSettings::default());
        eyre::ensure!(!config.credentials().is_configured());
        Ok(())
    }

    #[rstest]
    fn file_values_override_defaults() -> eyre::Result<()> {
        let dir = tempfile::tempdir()?;
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .map_err(|_| eyre::eyre!("non UTF-8 temp dir"))?;
        let path = root.join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            r#"
data_dir = "state"
tick_interval_secs = 0

[source]
api_key = "secret"
database_id = "board"

[notifications]
enable_overtime_sound = false
"#,
        )?;

        let config = AppConfig::load(&path)?;
        eyre::ensure!(config.data_dir == root.join("state"));
        eyre::ensure!(config.export_dir() == root.join("state").join("exports"));
        eyre::ensure!(config.tick_interval() == Duration::from_secs(1));
        eyre::ensure!(config.credentials().is_configured());
        eyre::ensure!(config.notifications.silent());
        eyre::ensure!(config.notifications.enable_overtime_notifications);
        Ok(())
    }

    #[rstest]
    fn malformed_file_is_a_parse_error() -> eyre::Result<()> {
        let dir = tempfile::tempdir()?;
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .map_err(|_| eyre::eyre!("non UTF-8 temp dir"))?;
        let path = root.join(CONFIG_FILE_NAME);
        std::fs::write(&path, "tick_interval_secs = \"soon\"")?;

        let result = AppConfig::load(&path);
        eyre::ensure!(matches!(result, Err(ConfigError::Parse { .. })));
        Ok(())
    }
}
