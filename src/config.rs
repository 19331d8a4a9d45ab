use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;
use crate::notifier::ToastTiming;
use crate::persistence::FileStore;
use crate::scoreboard::BoardSettings;

/// Application folder under the platform config/data directories
pub const APP_DIR: &str = "TeamScoreboard";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the board state is stored; platform data dir when unset
    pub storage_dir: Option<PathBuf>,

    /// Where exports are written; current directory when unset
    pub export_dir: Option<PathBuf>,

    /// Prefix for generated team names ("Team" -> "Team 3")
    pub default_team_prefix: String,

    /// Teams created on a fresh board
    pub seed_team_count: usize,

    /// How long a toast stays fully visible
    pub toast_duration_ms: u64,

    /// Fade-out after the display time
    pub toast_fade_ms: u64,

    /// Score highlight after a gain
    pub score_emphasis_ms: u64,

    /// Tracing filter used when RUST_LOG is not set
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_dir: None,
            export_dir: None,
            default_team_prefix: "Team".to_string(),
            seed_team_count: 2,
            toast_duration_ms: 3000,
            toast_fade_ms: 300,
            score_emphasis_ms: 200,
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the platform-specific config directory.
    /// Creates default config if file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from an explicit path, writing defaults there when it is missing
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            let config = Config::default();
            config.save_to(path)?;
            tracing::info!("Created default config at: {}", path.display());
            return Ok(config);
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.display().to_string(),
            source: Box::new(e),
        })?;
        let config: Config = serde_json::from_str(&content).map_err(|e| ConfigError::LoadFailed {
            path: path.display().to_string(),
            source: Box::new(e),
        })?;
        config.validate()?;

        tracing::info!("Loaded config from: {}", path.display());
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::DirectoryCreationFailed {
                path: parent.display().to_string(),
                source,
            })?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.display().to_string(),
            source: Box::new(e),
        })?;
        fs::write(path, json).map_err(|e| ConfigError::SaveFailed {
            path: path.display().to_string(),
            source: Box::new(e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_team_prefix.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "default_team_prefix must not be blank".to_string(),
            ));
        }
        if self.seed_team_count == 0 {
            return Err(ConfigError::Invalid(
                "seed_team_count must be at least 1".to_string(),
            ));
        }
        if self.toast_duration_ms == 0 {
            return Err(ConfigError::Invalid(
                "toast_duration_ms must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(Self::app_config_dir()?.join("config.json"))
    }

    pub fn app_config_dir() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Get the config path for display purposes
    pub fn config_path_display() -> String {
        Self::config_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| "unknown".to_string())
    }

    pub fn storage_dir(&self) -> Result<PathBuf, ConfigError> {
        match &self.storage_dir {
            Some(dir) => Ok(dir.clone()),
            None => FileStore::default_dir().map_err(|e| ConfigError::Invalid(e.to_string())),
        }
    }

    pub fn export_dir(&self) -> PathBuf {
        self.export_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn board_settings(&self) -> BoardSettings {
        BoardSettings {
            team_prefix: self.default_team_prefix.clone(),
            seed_team_count: self.seed_team_count,
            toast_timing: ToastTiming {
                display: Duration::from_millis(self.toast_duration_ms),
                fade: Duration::from_millis(self.toast_fade_ms),
            },
            score_emphasis: Duration::from_millis(self.score_emphasis_ms),
        }
    }
}
