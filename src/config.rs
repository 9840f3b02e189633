use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::encounter::GameSystem;

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub rules: RulesConfig,
    pub logging: LoggingConfig,
}

/// Table rules applied when building encounters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Game system for new encounters.
    pub default_system: GameSystem,
    /// Minions in a swarm added without an explicit count.
    pub minion_swarm_size: u32,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
    /// Directory for daily JSON log files. No file logging when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            default_system: GameSystem::Dnd5e,
            minion_swarm_size: 4,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            log_dir: None,
        }
    }
}

impl EngineConfig {
    /// Load configuration from `~/.config/encounter-engine/config.toml`.
    /// Returns `Default` if the file is missing or unparseable.
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path, with the same fallbacks as
    /// [`EngineConfig::load`].
    pub fn load_from(config_path: &Path) -> Self {
        match std::fs::read_to_string(config_path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    log::info!("Loaded config from {}", config_path.display());
                    config
                }
                Err(e) => {
                    log::warn!(
                        "Failed to parse config at {}: {e}, using defaults",
                        config_path.display()
                    );
                    Self::default()
                }
            },
            Err(_) => {
                log::debug!(
                    "No config file at {}, using defaults",
                    config_path.display()
                );
                Self::default()
            }
        }
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("encounter-engine").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}
