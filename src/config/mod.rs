//! Configuration management module
//!
//! Provides configuration management with:
//! - TOML-based configuration files
//! - Environment variable overrides (`ACTION_SHEET__SHEET__WRAP_TEXT=false`)
//! - Validation of the values the host application depends on

pub mod sheet;

pub use sheet::{IconSize, SharedConfiguration, SheetConfiguration, TextFont};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

use crate::error::{AppError, AppResult};

/// File looked up in the working directory before the user config directory
pub const LOCAL_CONFIG_FILE: &str = "./action-sheet.toml";

/// Prefix of environment overrides, nested keys separated by `__`
pub const ENV_PREFIX: &str = "ACTION_SHEET";

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Host application settings
    pub app: AppConfig,
    /// Action sheet style
    pub sheet: SheetConfiguration,
}

impl Config {
    /// Load configuration from default locations
    ///
    /// Search order:
    /// 1. ./action-sheet.toml
    /// 2. ~/.config/action-sheet/config.toml
    /// 3. Default configuration
    ///
    /// Environment overrides are applied on top of whichever source wins.
    pub async fn load() -> AppResult<Self> {
        info!("Loading application configuration");

        let mut candidates = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
        if let Some(path) = Self::get_user_config_path() {
            candidates.push(path);
        }

        for path in candidates {
            if fs::try_exists(&path).await.unwrap_or(false) {
                info!("Loaded configuration from {}", path.display());
                return Self::load_layered(Some(&path));
            }
        }

        info!("Using default configuration");
        Self::load_layered(None)
    }

    /// Build the configuration from an optional file plus the environment
    pub fn load_layered(path: Option<&Path>) -> AppResult<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path.to_path_buf()));
        }

        let config: Config = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file, without environment overrides
    pub async fn load_from_file<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let path = path.as_ref();
        debug!("Loading configuration from: {}", path.display());

        let content = fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;

        config.validate()?;

        Ok(config)
    }

    /// Save configuration to a file
    pub async fn save_to_file<P: AsRef<Path>>(&self, path: P) -> AppResult<()> {
        let path = path.as_ref();
        debug!("Saving configuration to: {}", path.display());

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).await?;

        info!("Configuration saved to: {}", path.display());
        Ok(())
    }

    /// Validate configuration
    ///
    /// Only host settings are checked; sheet style values are accepted as is.
    pub fn validate(&self) -> AppResult<()> {
        debug!("Validating configuration");

        if self.app.tick_rate_ms == 0 {
            return Err(AppError::application("tick_rate_ms must be greater than 0"));
        }

        debug!("Configuration validation passed");
        Ok(())
    }

    /// Get user configuration directory path
    fn get_user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut path| {
            path.push("action-sheet");
            path.push("config.toml");
            path
        })
    }
}

/// Host application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Application name shown in the host screen title
    pub name: String,
    /// Log level used when RUST_LOG is unset
    pub log_level: String,
    /// Frame/tick interval in milliseconds (drives animations)
    pub tick_rate_ms: u64,
    /// Enable mouse support
    pub enable_mouse: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: "Action Sheet".to_string(),
            log_level: if cfg!(debug_assertions) {
                "debug"
            } else {
                "info"
            }
            .to_string(),
            tick_rate_ms: 16,
            enable_mouse: true,
        }
    }
}
