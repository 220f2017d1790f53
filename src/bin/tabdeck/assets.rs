//! Embedded default config and config file resolution.

use rust_embed::RustEmbed;
use std::path::{Path, PathBuf};
use tabdeck::{ConfigError, DashboardConfig};
use thiserror::Error;

/// Embeds the assets/ directory into the binary.
/// In debug mode, assets are loaded from the filesystem for faster iteration.
#[derive(RustEmbed)]
#[folder = "assets/"]
pub struct Assets;

const DEFAULT_CONFIG_FILE: &str = "dashboard.ron";
const APP_DIR: &str = "tabdeck";

/// Errors that can occur when loading the bundled config.
#[derive(Error, Debug)]
pub enum AssetError {
    #[error("dashboard.ron not found in embedded assets")]
    DefaultConfigMissing,
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Where the active config came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Embedded,
    File(PathBuf),
}

/// Outcome of config resolution. `error` holds a failure that forced a
/// fallback; it's surfaced to the user once the UI is up.
pub struct LoadedConfig {
    pub config: DashboardConfig,
    pub source: ConfigSource,
    pub error: Option<String>,
}

/// Loads the config bundled with the binary.
pub fn default_config() -> Result<DashboardConfig, AssetError> {
    let file = Assets::get(DEFAULT_CONFIG_FILE).ok_or(AssetError::DefaultConfigMissing)?;
    Ok(DashboardConfig::from_bytes(&file.data)?)
}

/// Per-user config location, e.g. `~/.config/tabdeck/dashboard.ron`.
pub fn user_config_path() -> Option<PathBuf> {
    Some(dirs::config_dir()?.join(APP_DIR).join(DEFAULT_CONFIG_FILE))
}

/// Resolves the config: explicit path, then the per-user file, then the
/// embedded default.
pub fn load_config(explicit: Option<&Path>) -> LoadedConfig {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => user_config_path().filter(|path| path.exists()),
    };

    let Some(path) = path else {
        return embedded_fallback(ConfigSource::Embedded, None);
    };

    match DashboardConfig::from_path(&path) {
        Ok(config) => {
            log::info!("Loaded config from {}", path.display());
            LoadedConfig {
                config,
                source: ConfigSource::File(path),
                error: None,
            }
        }
        Err(err) => {
            log::error!("{err}");
            // Keep watching the broken file so fixing it takes effect.
            embedded_fallback(ConfigSource::File(path), Some(err.to_string()))
        }
    }
}

fn embedded_fallback(source: ConfigSource, error: Option<String>) -> LoadedConfig {
    match default_config() {
        Ok(config) => LoadedConfig {
            config,
            source,
            error,
        },
        Err(err) => {
            log::error!("Falling back to built-in defaults: {err}");
            LoadedConfig {
                config: DashboardConfig::default(),
                source,
                error: Some(error.unwrap_or_else(|| err.to_string())),
            }
        }
    }
}
