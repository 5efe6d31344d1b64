use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::settings::AppConfig;

/// Environment variable that points at an alternative config file.
pub const CONFIG_ENV_VAR: &str = "SLOTLOG_CONFIG";

const DATABASE_FILE: &str = "slotlog.db";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "Ken24T", "SlotLog")
}

pub struct ConfigService;

impl ConfigService {
    /// Config file location: `$SLOTLOG_CONFIG`, else the platform config dir.
    pub fn config_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
            return Some(PathBuf::from(path));
        }
        project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load the config, falling back to defaults when no file exists.
    pub fn load() -> Result<AppConfig> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            Some(path) => {
                log::info!("No config at {}; using defaults", path.display());
                Ok(AppConfig::default())
            }
            None => {
                log::warn!("Could not determine config directory; using defaults");
                Ok(AppConfig::default())
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<AppConfig> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: AppConfig = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        config
            .validate()
            .map_err(|e| anyhow!("Invalid config {}: {}", path.display(), e))?;
        Ok(config)
    }

    pub fn save_to(config: &AppConfig, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let raw = toml::to_string_pretty(config).context("Failed to serialize config")?;
        fs::write(path, raw).with_context(|| format!("Failed to write config {}", path.display()))
    }

    /// Database file to open, creating its directory when needed.
    pub fn resolve_database_path(config: &AppConfig) -> Result<PathBuf> {
        let path = match &config.database_path {
            Some(path) => path.clone(),
            None => project_dirs()
                .map(|dirs| dirs.data_dir().join(DATABASE_FILE))
                .unwrap_or_else(|| PathBuf::from(DATABASE_FILE)),
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create data directory {}", parent.display()))?;
        }
        Ok(path)
    }
}
