//! Reloads the dashboard config when its file changes on disk.
//!
//! The parent directory is watched rather than the file itself, since most
//! editors save by writing a temporary file and renaming it over the original.

use eframe::egui;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use tabdeck::{ConfigError, DashboardConfig};

pub struct ConfigWatcher {
    /// Receiver for freshly parsed configs
    config_rx: Receiver<Result<DashboardConfig, ConfigError>>,
    /// The watcher must be kept alive for events to fire
    _watcher: RecommendedWatcher,
}

impl ConfigWatcher {
    /// Starts watching `path`.
    ///
    /// Returns `None` if the containing folder doesn't exist or watching fails.
    pub fn new(ctx: egui::Context, path: PathBuf) -> Option<Self> {
        let path = std::path::absolute(path).ok()?;
        let folder = path.parent()?.to_path_buf();

        if !folder.is_dir() {
            log::warn!("Config folder does not exist: {}", folder.display());
            return None;
        }

        let (config_tx, config_rx) = mpsc::channel();
        let watched = path.clone();

        let mut watcher = notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
            let event = match res {
                Ok(event) => event,
                Err(err) => {
                    log::warn!("Config watcher error: {err}");
                    return;
                }
            };

            if !matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_))
                || !event.paths.iter().any(|p| same_file_name(p, &watched))
            {
                return;
            }

            // Editors can briefly leave the file empty mid-save; a later event
            // carries the finished content.
            let result = DashboardConfig::from_path(&watched);
            match &result {
                Ok(_) => log::info!("Config changed: {}", watched.display()),
                Err(err) => log::warn!("Ignoring config change: {err}"),
            }
            let _ = config_tx.send(result);
            ctx.request_repaint();
        })
        .ok()?;

        watcher.watch(&folder, RecursiveMode::NonRecursive).ok()?;

        log::info!("Watching config file: {}", path.display());

        Some(Self {
            config_rx,
            _watcher: watcher,
        })
    }

    /// Drains pending reloads and returns the newest one.
    pub fn poll(&mut self) -> Option<Result<DashboardConfig, ConfigError>> {
        let mut latest = None;
        loop {
            match self.config_rx.try_recv() {
                Ok(result) => latest = Some(result),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    log::warn!("Config watcher channel disconnected");
                    break;
                }
            }
        }
        latest
    }
}

fn same_file_name(candidate: &Path, watched: &Path) -> bool {
    candidate.file_name().is_some() && candidate.file_name() == watched.file_name()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_on_file_name_only() {
        let watched = Path::new("/home/me/.config/tabdeck/dashboard.ron");
        assert!(same_file_name(
            Path::new("/home/me/.config/tabdeck/dashboard.ron"),
            watched
        ));
        assert!(!same_file_name(
            Path::new("/home/me/.config/tabdeck/.dashboard.ron.swp"),
            watched
        ));
        assert!(!same_file_name(Path::new("/"), watched));
    }
}
