use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use packager_core::FormVariant;
use packager_engine::{ServiceSettings, TransportError};
use packager_logging::{LogDestination, DEFAULT_LOG_FILE};
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "packager.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("invalid service endpoint: {0}")]
    Endpoint(#[from] TransportError),
}

/// Optional settings, as read from a RON file or collected from flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub base_url: Option<String>,
    pub endpoint: Option<String>,
    pub collect_app_name: Option<bool>,
    pub request_timeout_secs: Option<u64>,
    pub log_to_file: Option<bool>,
}

impl FileConfig {
    /// Values set in `over` win.
    pub fn layer(self, over: FileConfig) -> FileConfig {
        FileConfig {
            base_url: over.base_url.or(self.base_url),
            endpoint: over.endpoint.or(self.endpoint),
            collect_app_name: over.collect_app_name.or(self.collect_app_name),
            request_timeout_secs: over.request_timeout_secs.or(self.request_timeout_secs),
            log_to_file: over.log_to_file.or(self.log_to_file),
        }
    }
}

/// Reads the config file. An explicit path must exist; the default one may not.
pub fn load_file_config(explicit: Option<&Path>) -> Result<FileConfig, ConfigError> {
    let (path, required) = match explicit {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };

    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if !required && err.kind() == io::ErrorKind::NotFound => {
            return Ok(FileConfig::default());
        }
        Err(source) => return Err(ConfigError::Read { path, source }),
    };

    ron::from_str(&content).map_err(|source| ConfigError::Parse { path, source })
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub service: ServiceSettings,
    pub variant: FormVariant,
    pub log_to_file: bool,
}

impl Settings {
    pub fn resolve(config_path: Option<&Path>, overrides: FileConfig) -> Result<Self, ConfigError> {
        let file = load_file_config(config_path)?;
        Self::from_config(file.layer(overrides))
    }

    pub fn from_config(config: FileConfig) -> Result<Self, ConfigError> {
        let defaults = ServiceSettings::default();
        let service = ServiceSettings {
            base_url: config.base_url.unwrap_or(defaults.base_url),
            endpoint: config.endpoint.unwrap_or(defaults.endpoint),
            request_timeout: config.request_timeout_secs.map(Duration::from_secs),
            ..defaults
        };
        // Fail at startup rather than on the first submit.
        service.endpoint_url()?;

        let variant = if config.collect_app_name.unwrap_or(true) {
            FormVariant::WithAppName
        } else {
            FormVariant::UrlOnly
        };

        Ok(Self {
            service,
            variant,
            log_to_file: config.log_to_file.unwrap_or(false),
        })
    }

    pub fn log_destination(&self) -> LogDestination {
        if self.log_to_file {
            LogDestination::Both(PathBuf::from(DEFAULT_LOG_FILE))
        } else {
            LogDestination::Terminal
        }
    }
}
