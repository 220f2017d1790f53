//! Tab identifiers for the dashboard panels.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A panel selectable from the tab bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabId {
    Home,
    Profile,
    Settings,
    Music,
    Game,
}

impl TabId {
    /// Every known tab, in default display order.
    pub const ALL: [TabId; 5] = [
        TabId::Home,
        TabId::Profile,
        TabId::Settings,
        TabId::Music,
        TabId::Game,
    ];

    /// Lowercase name used on the command line and in config files.
    pub fn as_str(self) -> &'static str {
        match self {
            TabId::Home => "home",
            TabId::Profile => "profile",
            TabId::Settings => "settings",
            TabId::Music => "music",
            TabId::Game => "game",
        }
    }

    /// Label shown when the config doesn't provide one.
    pub fn default_label(self) -> &'static str {
        match self {
            TabId::Home => "Home",
            TabId::Profile => "Profile",
            TabId::Settings => "Settings",
            TabId::Music => "Music",
            TabId::Game => "Game",
        }
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown tab '{0}' (expected one of: home, profile, settings, music, game)")]
pub struct UnknownTab(pub String);

impl FromStr for TabId {
    type Err = UnknownTab;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        TabId::ALL
            .into_iter()
            .find(|tab| tab.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| UnknownTab(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_names_case_insensitively() {
        assert_eq!("home".parse::<TabId>(), Ok(TabId::Home));
        assert_eq!(" Music ".parse::<TabId>(), Ok(TabId::Music));
        assert_eq!("GAME".parse::<TabId>(), Ok(TabId::Game));
    }

    #[test]
    fn rejects_unknown_names() {
        let err = "clicker".parse::<TabId>().unwrap_err();
        assert_eq!(err, UnknownTab("clicker".to_string()));
    }

    #[test]
    fn display_matches_config_name() {
        for tab in TabId::ALL {
            assert_eq!(tab.to_string().parse::<TabId>(), Ok(tab));
        }
    }
}
