use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::dashboard::DashboardPaths;
use crate::error::{DashboardError, Result};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub paths: PathsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub refresh_interval_secs: u64,
    pub cpu_sample_ms: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            refresh_interval_secs: 30,
            cpu_sample_ms: 100,
        }
    }
}

impl GeneralConfig {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    pub fn cpu_sample_window(&self) -> Duration {
        Duration::from_millis(self.cpu_sample_ms)
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub template: PathBuf,
    pub output: PathBuf,
    /// Relative paths are taken from the home directory.
    pub analysis_folder: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        PathsConfig {
            template: PathBuf::from("template.html"),
            output: PathBuf::from("index.html"),
            analysis_folder: PathBuf::from("Documents"),
        }
    }
}

impl PathsConfig {
    pub fn resolve(&self, home: Option<&Path>) -> Result<DashboardPaths> {
        let analysis_folder = if self.analysis_folder.is_absolute() {
            self.analysis_folder.clone()
        } else {
            home.ok_or(DashboardError::HomeDirUnavailable)?
                .join(&self.analysis_folder)
        };
        Ok(DashboardPaths {
            template: self.template.clone(),
            output: self.output.clone(),
            analysis_folder,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
            json: false,
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("snapdash").join("config.toml"))
}

pub fn load_config() -> Config {
    match config_path() {
        Some(path) if path.exists() => load_config_from_path(&path),
        _ => Config::default(),
    }
}

pub fn load_config_from_path(path: &Path) -> Config {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_default(),
        Err(_) => Config::default(),
    }
}
