//! Dashboard configuration, stored as RON.

use crate::drag::SIDEBAR_DEFAULT_WIDTH;
use crate::tabs::TabId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading a dashboard config.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid UTF-8 in config: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::de::SpannedError),
    #[error("config must list at least one tab")]
    NoTabs,
    #[error("tab '{0}' is listed more than once")]
    DuplicateTab(TabId),
}

/// Top-level dashboard configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Window title
    #[serde(default = "default_title")]
    pub title: String,
    /// Tabs in display order
    pub tabs: Vec<TabConfig>,
    /// URLs "Get Image" draws from
    #[serde(default)]
    pub image_pool: Vec<String>,
    /// Built-in profile pictures offered before any upload
    #[serde(default)]
    pub profile_pictures: Vec<String>,
    /// Initial sidebar width in pixels (clamped to 100..=500)
    #[serde(default = "default_sidebar_width")]
    pub sidebar_width: f32,
    /// Initial profile fields
    #[serde(default)]
    pub profile: ProfileDefaults,
    /// Start with dark visuals
    #[serde(default)]
    pub dark_mode: bool,
}

/// One entry of the tab bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabConfig {
    pub id: TabId,
    /// Button label; empty uses the tab's default label
    #[serde(default)]
    pub label: String,
}

impl TabConfig {
    pub fn new(id: TabId) -> Self {
        Self {
            id,
            label: String::new(),
        }
    }

    pub fn display_label(&self) -> &str {
        if self.label.trim().is_empty() {
            self.id.default_label()
        } else {
            &self.label
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileDefaults {
    pub name: String,
    pub email: String,
}

impl Default for ProfileDefaults {
    fn default() -> Self {
        Self {
            name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
        }
    }
}

fn default_title() -> String {
    "Dashboard".to_string()
}

fn default_sidebar_width() -> f32 {
    SIDEBAR_DEFAULT_WIDTH
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            tabs: TabId::ALL.into_iter().map(TabConfig::new).collect(),
            image_pool: Vec::new(),
            profile_pictures: Vec::new(),
            sidebar_width: default_sidebar_width(),
            profile: ProfileDefaults::default(),
            dark_mode: false,
        }
    }
}

impl DashboardConfig {
    /// Parses and validates a RON document.
    pub fn from_ron(source: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates RON bytes, e.g. from embedded assets.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        Self::from_ron(std::str::from_utf8(bytes)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let bytes = std::fs::read(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(&bytes)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tabs.is_empty() {
            return Err(ConfigError::NoTabs);
        }
        let mut seen = HashSet::new();
        for tab in &self.tabs {
            if !seen.insert(tab.id) {
                return Err(ConfigError::DuplicateTab(tab.id));
            }
        }
        Ok(())
    }

    pub fn has_tab(&self, id: TabId) -> bool {
        self.tabs.iter().any(|tab| tab.id == id)
    }

    /// First configured tab. Validation guarantees there is one.
    pub fn first_tab(&self) -> TabId {
        self.tabs.first().map_or(TabId::Home, |tab| tab.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_config() {
        let config = DashboardConfig::from_ron("(tabs: [(id: home), (id: game, label: \"Play\")])")
            .unwrap();
        assert_eq!(config.tabs.len(), 2);
        assert_eq!(config.tabs[0].display_label(), "Home");
        assert_eq!(config.tabs[1].display_label(), "Play");
        assert_eq!(config.sidebar_width, SIDEBAR_DEFAULT_WIDTH);
        assert_eq!(config.profile, ProfileDefaults::default());
        assert!(!config.dark_mode);
    }

    #[test]
    fn bundled_default_is_valid() {
        let config =
            DashboardConfig::from_ron(include_str!("../assets/dashboard.ron")).unwrap();
        assert_eq!(config.tabs.len(), TabId::ALL.len());
        assert_eq!(config.first_tab(), TabId::Home);
        assert_eq!(config.image_pool.len(), 4);
        assert_eq!(config.sidebar_width, 180.0);
    }

    #[test]
    fn rejects_empty_tab_list() {
        let err = DashboardConfig::from_ron("(tabs: [])").unwrap_err();
        assert!(matches!(err, ConfigError::NoTabs));
    }

    #[test]
    fn rejects_duplicate_tabs() {
        let err = DashboardConfig::from_ron("(tabs: [(id: music), (id: home), (id: music)])")
            .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateTab(TabId::Music)));
    }

    #[test]
    fn rejects_unknown_tab_names() {
        let err = DashboardConfig::from_ron("(tabs: [(id: clicker)])").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn default_lists_every_tab() {
        let config = DashboardConfig::default();
        assert!(config.validate().is_ok());
        assert!(TabId::ALL.iter().all(|tab| config.has_tab(*tab)));
        assert_eq!(config.first_tab(), TabId::Home);
    }
}
