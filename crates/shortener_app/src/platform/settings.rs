use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use engine_logging::engine_info;
use serde::{Deserialize, Serialize};
use shortener_engine::{ClientSettings, DEFAULT_SERVICE_URL};
use thiserror::Error;

use super::logging::LogDestination;

const SETTINGS_FILENAME: &str = "shortener.ron";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse settings from {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub service_url: String,
    pub connect_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub log: LogSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.to_string(),
            connect_timeout_secs: None,
            request_timeout_secs: None,
            log: LogSettings::default(),
        }
    }
}

impl Settings {
    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            service_url: self.service_url.clone(),
            connect_timeout: self.connect_timeout_secs.map(Duration::from_secs),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub destination: LogDestination,
    pub file: PathBuf,
    pub level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            destination: LogDestination::File,
            file: PathBuf::from("./shortener.log"),
            level: "info".to_string(),
        }
    }
}

/// Loads settings from `explicit`, or from `./shortener.ron` when no path is given.
///
/// A missing default file yields defaults; a missing explicit file is an error.
pub fn load(explicit: Option<&Path>) -> Result<Settings, SettingsError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(SETTINGS_FILENAME),
    };

    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound && explicit.is_none() => {
            return Ok(Settings::default());
        }
        Err(source) => return Err(SettingsError::Read { path, source }),
    };

    let settings = ron::from_str(&content).map_err(|source| SettingsError::Parse {
        path: path.clone(),
        source,
    })?;
    engine_info!("Loaded settings from {:?}", path);
    Ok(settings)
}
