#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod assets;
mod colors;
mod config_watcher;
mod constants;
mod ui;
mod uploads;

use assets::{ConfigSource, load_config};
use clap::Parser;
use config_watcher::ConfigWatcher;
use constants::WINDOW_SIZE;
use eframe::egui;
use egui_toast::{Toast, ToastKind, ToastOptions, Toasts};
use rand::Rng;
use std::path::PathBuf;
use tabdeck::game::TARGET_RANGE;
use tabdeck::{Action, DashboardState, Notice, NoticeKind, Outcome, TabId};
use ui::EmbeddedImages;
use uploads::UploadQueue;

#[derive(Parser)]
#[command(name = "tabdeck", version, about = "Tabbed dashboard with an image preview and profile picture uploads")]
struct Cli {
    /// Dashboard config (RON). Defaults to the per-user config, then the bundled one.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Tab to open on start
    #[arg(long)]
    tab: Option<TabId>,
    /// Start in dark mode
    #[arg(long)]
    dark: bool,
}

/// Main application state for the dashboard window.
pub struct TabdeckApp {
    state: DashboardState,
    toasts: Toasts,
    uploads: UploadQueue,
    config_watcher: Option<ConfigWatcher>,
    embedded: EmbeddedImages,
    guess_input: String,
    applied_dark_mode: Option<bool>,
}

impl TabdeckApp {
    fn new(cc: &eframe::CreationContext<'_>, cli: Cli, loaded: assets::LoadedConfig) -> Self {
        egui_extras::install_image_loaders(&cc.egui_ctx);

        let toasts = Toasts::new()
            .anchor(egui::Align2::RIGHT_TOP, (-10.0, 10.0))
            .direction(egui::Direction::TopDown);

        let config_watcher = match &loaded.source {
            ConfigSource::File(path) => ConfigWatcher::new(cc.egui_ctx.clone(), path.clone()),
            ConfigSource::Embedded => None,
        };

        let target = rand::thread_rng().gen_range(TARGET_RANGE);

        let mut app = Self {
            state: DashboardState::new(loaded.config, target),
            toasts,
            uploads: UploadQueue::default(),
            config_watcher,
            embedded: EmbeddedImages::default(),
            guess_input: String::new(),
            applied_dark_mode: None,
        };

        if let Some(err) = loaded.error {
            app.notify(Notice::error(err));
        }

        if let Some(tab) = cli.tab {
            if app.state.config().has_tab(tab) {
                app.dispatch(Action::SelectTab(tab));
            } else {
                log::warn!("Tab '{tab}' is not in the config, starting on the first tab");
            }
        }

        if cli.dark && !app.state.dark_mode() {
            app.dispatch(Action::ToggleDarkMode);
        }

        app
    }

    /// Applies an action and surfaces any notice it produced.
    pub fn dispatch(&mut self, action: Action) {
        if let Outcome::Notice(notice) = self.state.apply(action) {
            self.notify(notice);
        }
    }

    fn notify(&mut self, notice: Notice) {
        let (kind, duration) = match notice.kind {
            NoticeKind::Info => {
                log::info!("{}", notice.text);
                (ToastKind::Info, 4.0)
            }
            NoticeKind::Error => {
                log::warn!("{}", notice.text);
                (ToastKind::Error, 8.0)
            }
        };

        self.toasts.add(Toast {
            kind,
            text: notice.text.into(),
            options: ToastOptions::default()
                .duration_in_seconds(duration)
                .show_icon(true),
            ..Default::default()
        });
    }

    /// Hands finished file reads to the dashboard, even if the profile
    /// panel has been closed since.
    fn poll_uploads(&mut self) {
        for result in self.uploads.poll() {
            self.dispatch(Action::UploadFinished(result));
        }
    }

    fn poll_config(&mut self) {
        let Some(result) = self.config_watcher.as_mut().and_then(|w| w.poll()) else {
            return;
        };
        match result {
            Ok(config) => self.dispatch(Action::ReloadConfig(config)),
            Err(err) => self.notify(Notice::error(err.to_string())),
        }
    }

    fn sync_theme(&mut self, ctx: &egui::Context) {
        let dark = self.state.dark_mode();
        if self.applied_dark_mode != Some(dark) {
            ctx.set_theme(if dark {
                egui::Theme::Dark
            } else {
                egui::Theme::Light
            });
            self.applied_dark_mode = Some(dark);
        }
    }
}

impl eframe::App for TabdeckApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_uploads();
        self.poll_config();
        self.embedded.sync(self.state.custom_pictures());
        self.track_pointer(ctx);
        self.handle_keyboard_input(ctx);
        self.sync_theme(ctx);

        self.show_header(ctx);
        self.show_central_panel(ctx);
        self.show_preview(ctx);

        self.toasts.show(ctx);
    }
}

fn main() -> eframe::Result {
    env_logger::init();

    let cli = Cli::parse();
    let loaded = load_config(cli.config.as_deref());
    let title = loaded.config.title.clone();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size(WINDOW_SIZE),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(|cc| Ok(Box::new(TabdeckApp::new(cc, cli, loaded)))),
    )
}
