use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use suggester_core::CanvasBounds;
use suggester_engine::LookupSettings;
use thiserror::Error;

use super::logging::{LogDestination, LogLevel};

const CONFIG_ENV: &str = "SUGGESTER_CONFIG";
const CONFIG_FILENAME: &str = "suggester.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// How the results area is written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Aligned plain-text table or message.
    #[default]
    Text,
    /// HTML snapshot of the page (results area and canvas).
    Html,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service_base_url: String,
    pub connect_timeout_ms: Option<u64>,
    pub request_timeout_ms: Option<u64>,
    pub max_response_bytes: u64,
    pub log_level: LogLevel,
    pub log_destination: LogDestination,
    pub output: OutputFormat,
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub tick_interval_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        let lookup = LookupSettings::default();
        Self {
            service_base_url: lookup.base_url,
            connect_timeout_ms: None,
            request_timeout_ms: None,
            max_response_bytes: lookup.max_bytes,
            log_level: LogLevel::default(),
            log_destination: LogDestination::default(),
            output: OutputFormat::default(),
            canvas_width: 1280.0,
            canvas_height: 720.0,
            tick_interval_ms: 50,
        }
    }
}

impl AppConfig {
    pub fn lookup_settings(&self) -> LookupSettings {
        LookupSettings {
            base_url: self.service_base_url.clone(),
            connect_timeout: self.connect_timeout_ms.map(Duration::from_millis),
            request_timeout: self.request_timeout_ms.map(Duration::from_millis),
            max_bytes: self.max_response_bytes,
        }
    }

    pub fn canvas_bounds(&self) -> CanvasBounds {
        CanvasBounds {
            width: self.canvas_width.max(0.0),
            height: self.canvas_height.max(0.0),
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }
}

/// `$SUGGESTER_CONFIG` when set, else `./suggester.ron`.
pub fn config_path() -> PathBuf {
    std::env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME))
}

/// Loads the config at `path`. A missing file yields the defaults.
pub fn load(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(AppConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    ron::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}
