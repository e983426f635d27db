use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing_subscriber::filter::LevelFilter;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
pub(crate) struct Config {
    /// Settings about diagnostic logging
    #[serde(default)]
    pub(crate) logging: LoggingConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("prismsnake").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(try_from = "RawLoggingConfig")]
pub(crate) struct LoggingConfig {
    /// File to append log messages to.  If unset, nothing is logged.
    pub(crate) file: Option<PathBuf>,

    /// Most verbose level of messages to log
    pub(crate) level: LevelFilter,
}

impl Default for LoggingConfig {
    fn default() -> LoggingConfig {
        LoggingConfig {
            file: None,
            level: LevelFilter::INFO,
        }
    }
}

#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
struct RawLoggingConfig {
    file: Option<PathBuf>,
    level: Option<String>,
}

impl TryFrom<RawLoggingConfig> for LoggingConfig {
    type Error = ParseLevelError;

    fn try_from(value: RawLoggingConfig) -> Result<LoggingConfig, ParseLevelError> {
        let level = match value.level {
            Some(s) => s
                .parse::<LevelFilter>()
                .map_err(|_| ParseLevelError(s))?,
            None => LevelFilter::INFO,
        };
        Ok(LoggingConfig {
            file: value.file,
            level,
        })
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("invalid log level {0:?}; expected one of trace, debug, info, warn, error, off")]
pub(crate) struct ParseLevelError(String);

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}
