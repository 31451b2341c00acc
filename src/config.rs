//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`RSYNC_SECTION__KEY`)

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use rigidsync_core::{SyncError, VisualKey, World, WorldConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Simulation world configuration
    #[serde(default)]
    pub world: WorldConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`RSYNC_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // RSYNC_WORLD__TIME_STEP=0.01 -> world.time_step = 0.01
        figment = figment.merge(Env::prefixed("RSYNC_").split("__"));

        let config: Self = figment.extract()?;
        log::debug!("Loaded configuration from {}: {:?}", config_dir.display(), config);
        Ok(config)
    }

    /// Build a world for the bundled [`Scene`](rigidsync_core::Scene)
    pub fn build_world(&self) -> Result<World<VisualKey>, ConfigError> {
        Ok(World::from_config(&self.world)?)
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Load(#[from] figment::Error),
    #[error("Invalid world configuration: {0}")]
    World(#[from] SyncError),
}
