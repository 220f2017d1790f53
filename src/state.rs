//! Dashboard state and the reducer that mutates it.
//!
//! All user interaction is expressed as an [`Action`]. The rendering layer
//! reads the state and dispatches actions, and never mutates fields directly.

use crate::config::DashboardConfig;
use crate::drag::{Axis, DragTracker, PointerSample, SidebarWidth};
use crate::game::GuessingGame;
use crate::media::MediaLink;
use crate::preview::PreviewState;
use crate::tabs::TabId;
use crate::upload::{Picture, UploadError};
use eframe::egui::{Pos2, vec2};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// A message for the user, shown as a toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}

/// Result of applying an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Unchanged,
    Changed,
    Notice(Notice),
}

impl Outcome {
    fn changed_if(changed: bool) -> Self {
        if changed {
            Outcome::Changed
        } else {
            Outcome::Unchanged
        }
    }
}

#[derive(Debug)]
pub enum Action {
    SelectTab(TabId),
    /// Shows or hides the tab bar together with the panel content.
    ToggleTabs,
    /// Appends a pool image; `roll` picks the entry modulo the pool size.
    GetImage { roll: usize },
    OpenPreview(usize),
    ClosePreview,
    ZoomIn,
    ZoomOut,
    ZoomBy(f32),
    RotateClockwise,
    RotateCounterClockwise,
    ResetView,
    BeginSidebarResize(Pos2),
    BeginPan(Pos2),
    /// Window-wide pointer state, fed once per frame.
    Pointer(PointerSample),
    SetName(String),
    SetEmail(String),
    SaveProfile,
    /// Selects a profile picture by URI.
    SelectPfp(String),
    UploadFinished(Result<Picture, UploadError>),
    ToggleDarkMode,
    SetMusicLink(String),
    SubmitGuess(String),
    NewGame { target: u32 },
    ReloadConfig(DashboardConfig),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub name: String,
    pub email: String,
}

/// Everything the dashboard shows.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    config: DashboardConfig,
    active_tab: TabId,
    tabs_visible: bool,
    images: Vec<String>,
    sidebar_width: SidebarWidth,
    sidebar_drag: DragTracker,
    preview: PreviewState,
    profile: Profile,
    pfp_selector_open: bool,
    default_pictures: Vec<Picture>,
    custom_pictures: Vec<Picture>,
    selected_pfp: Option<String>,
    dark_mode: bool,
    music_input: String,
    music_link: Option<MediaLink>,
    game: GuessingGame,
}

impl DashboardState {
    pub fn new(config: DashboardConfig, game_target: u32) -> Self {
        Self {
            active_tab: config.first_tab(),
            tabs_visible: true,
            images: Vec::new(),
            sidebar_width: SidebarWidth::new(config.sidebar_width),
            sidebar_drag: DragTracker::new(Axis::Horizontal),
            preview: PreviewState::default(),
            profile: Profile {
                name: config.profile.name.clone(),
                email: config.profile.email.clone(),
            },
            pfp_selector_open: false,
            default_pictures: default_pictures(&config),
            custom_pictures: Vec::new(),
            selected_pfp: None,
            dark_mode: config.dark_mode,
            music_input: String::new(),
            music_link: None,
            game: GuessingGame::new(game_target),
            config,
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn active_tab(&self) -> TabId {
        self.active_tab
    }

    pub fn tabs_visible(&self) -> bool {
        self.tabs_visible
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn sidebar_width(&self) -> f32 {
        self.sidebar_width.get()
    }

    pub fn is_resizing_sidebar(&self) -> bool {
        self.sidebar_drag.is_active()
    }

    pub fn preview(&self) -> &PreviewState {
        &self.preview
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn pfp_selector_open(&self) -> bool {
        self.pfp_selector_open
    }

    /// Built-in pictures followed by uploads, in upload order.
    pub fn profile_pictures(&self) -> impl Iterator<Item = &Picture> {
        self.default_pictures.iter().chain(&self.custom_pictures)
    }

    pub fn custom_pictures(&self) -> &[Picture] {
        &self.custom_pictures
    }

    pub fn selected_pfp(&self) -> Option<&str> {
        self.selected_pfp.as_deref()
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn music_input(&self) -> &str {
        &self.music_input
    }

    pub fn music_link(&self) -> Option<&MediaLink> {
        self.music_link.as_ref()
    }

    pub fn game(&self) -> &GuessingGame {
        &self.game
    }

    pub fn apply(&mut self, action: Action) -> Outcome {
        match action {
            Action::SelectTab(tab) => {
                if tab == self.active_tab || !self.config.has_tab(tab) {
                    return Outcome::Unchanged;
                }
                self.active_tab = tab;
                Outcome::Changed
            }
            Action::ToggleTabs => {
                self.tabs_visible = !self.tabs_visible;
                Outcome::Changed
            }
            Action::GetImage { roll } => {
                let pool = &self.config.image_pool;
                if pool.is_empty() {
                    return Outcome::Notice(Notice::error("No images configured"));
                }
                self.images.push(pool[roll % pool.len()].clone());
                Outcome::Changed
            }
            Action::OpenPreview(index) => match self.images.get(index) {
                Some(image) => {
                    self.preview.open(image.clone());
                    Outcome::Changed
                }
                None => Outcome::Unchanged,
            },
            Action::ClosePreview => {
                let was_open = self.preview.is_open();
                self.preview.close();
                Outcome::changed_if(was_open)
            }
            Action::ZoomIn => self.transform_preview(PreviewState::zoom_in),
            Action::ZoomOut => self.transform_preview(PreviewState::zoom_out),
            Action::ZoomBy(factor) => self.transform_preview(|preview| preview.zoom_by(factor)),
            Action::RotateClockwise => self.transform_preview(PreviewState::rotate_clockwise),
            Action::RotateCounterClockwise => {
                self.transform_preview(PreviewState::rotate_counter_clockwise)
            }
            Action::ResetView => self.transform_preview(PreviewState::reset_view),
            Action::BeginSidebarResize(pointer) => {
                self.sidebar_drag
                    .start(pointer, vec2(self.sidebar_width.get(), 0.0));
                Outcome::Changed
            }
            Action::BeginPan(pointer) => {
                self.preview.begin_pan(pointer);
                Outcome::changed_if(self.preview.is_panning())
            }
            Action::Pointer(sample) => self.follow_pointer(sample),
            Action::SetName(name) => {
                let changed = self.profile.name != name;
                self.profile.name = name;
                Outcome::changed_if(changed)
            }
            Action::SetEmail(email) => {
                let changed = self.profile.email != email;
                self.profile.email = email;
                Outcome::changed_if(changed)
            }
            Action::SaveProfile => {
                self.pfp_selector_open = true;
                Outcome::Notice(Notice::info("Select your profile picture"))
            }
            Action::SelectPfp(uri) => {
                if self.selected_pfp.as_deref() == Some(uri.as_str())
                    || !self.profile_pictures().any(|picture| picture.uri() == uri)
                {
                    return Outcome::Unchanged;
                }
                self.selected_pfp = Some(uri);
                Outcome::Changed
            }
            Action::UploadFinished(result) => self.finish_upload(result),
            Action::ToggleDarkMode => {
                self.dark_mode = !self.dark_mode;
                Outcome::Changed
            }
            Action::SetMusicLink(input) => {
                if input == self.music_input {
                    return Outcome::Unchanged;
                }
                self.music_link = MediaLink::classify(&input);
                self.music_input = input;
                Outcome::Changed
            }
            Action::SubmitGuess(input) => {
                self.game.guess(&input);
                Outcome::Changed
            }
            Action::NewGame { target } => {
                self.game = GuessingGame::new(target);
                Outcome::Changed
            }
            Action::ReloadConfig(config) => self.reload_config(config),
        }
    }

    fn transform_preview(&mut self, transform: impl FnOnce(&mut PreviewState)) -> Outcome {
        if !self.preview.is_open() {
            return Outcome::Unchanged;
        }
        let before = self.preview.clone();
        transform(&mut self.preview);
        Outcome::changed_if(self.preview != before)
    }

    fn follow_pointer(&mut self, sample: PointerSample) -> Outcome {
        let mut changed = false;

        if self.sidebar_drag.is_active() {
            if let Some(offset) = self.sidebar_drag.follow(sample) {
                let width = SidebarWidth::new(offset.x);
                changed |= width != self.sidebar_width;
                self.sidebar_width = width;
            }
            changed |= !self.sidebar_drag.is_active();
        }

        if self.preview.is_panning() {
            changed |= self.preview.follow_pointer(sample);
            changed |= !self.preview.is_panning();
        }

        Outcome::changed_if(changed)
    }

    fn finish_upload(&mut self, result: Result<Picture, UploadError>) -> Outcome {
        match result {
            Ok(picture) => {
                let text = match &picture {
                    Picture::Uploaded { name, .. } => format!("Uploaded {name}"),
                    Picture::Remote(url) => format!("Added {url}"),
                };
                self.selected_pfp = Some(picture.uri().to_string());
                self.custom_pictures.push(picture);
                Outcome::Notice(Notice::info(text))
            }
            Err(err) => Outcome::Notice(Notice::error(err.to_string())),
        }
    }

    fn reload_config(&mut self, config: DashboardConfig) -> Outcome {
        if config == self.config {
            return Outcome::Unchanged;
        }

        if !config.has_tab(self.active_tab) {
            self.active_tab = config.first_tab();
        }
        self.default_pictures = default_pictures(&config);
        self.config = config;

        let still_listed = self
            .selected_pfp
            .as_deref()
            .is_none_or(|selected| self.profile_pictures().any(|picture| picture.uri() == selected));
        if !still_listed {
            self.selected_pfp = None;
        }

        Outcome::Notice(Notice::info("Configuration reloaded"))
    }
}

fn default_pictures(config: &DashboardConfig) -> Vec<Picture> {
    config
        .profile_pictures
        .iter()
        .cloned()
        .map(Picture::Remote)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TabConfig;
    use crate::drag::{SIDEBAR_MAX_WIDTH, SIDEBAR_MIN_WIDTH};
    use crate::game::GuessOutcome;
    use crate::upload::picture_from_bytes;
    use eframe::egui::{Vec2, pos2};

    fn config() -> DashboardConfig {
        DashboardConfig {
            image_pool: vec![
                "https://img.example/cat.png".to_string(),
                "https://img.example/dog.png".to_string(),
            ],
            profile_pictures: vec!["https://img.example/pfp.png".to_string()],
            ..DashboardConfig::default()
        }
    }

    fn state() -> DashboardState {
        DashboardState::new(config(), 50)
    }

    #[test]
    fn selecting_active_tab_changes_nothing() {
        let mut state = state();
        assert_eq!(state.active_tab(), TabId::Home);
        let before = state.clone();

        assert_eq!(state.apply(Action::SelectTab(TabId::Home)), Outcome::Unchanged);
        assert_eq!(state, before);

        assert_eq!(state.apply(Action::SelectTab(TabId::Music)), Outcome::Changed);
        assert_eq!(state.apply(Action::SelectTab(TabId::Music)), Outcome::Unchanged);
        assert_eq!(state.active_tab(), TabId::Music);
    }

    #[test]
    fn unconfigured_tab_cannot_be_selected() {
        let mut state = DashboardState::new(
            DashboardConfig {
                tabs: vec![TabConfig::new(TabId::Home), TabConfig::new(TabId::Profile)],
                ..config()
            },
            50,
        );
        assert_eq!(state.apply(Action::SelectTab(TabId::Game)), Outcome::Unchanged);
        assert_eq!(state.active_tab(), TabId::Home);
    }

    #[test]
    fn get_image_appends_from_pool() {
        let mut state = state();
        state.apply(Action::GetImage { roll: 3 });
        state.apply(Action::GetImage { roll: 0 });
        assert_eq!(
            state.images(),
            ["https://img.example/dog.png", "https://img.example/cat.png"]
        );
    }

    #[test]
    fn get_image_with_empty_pool_reports_error() {
        let mut state = DashboardState::new(DashboardConfig::default(), 1);
        let outcome = state.apply(Action::GetImage { roll: 7 });
        assert!(matches!(
            outcome,
            Outcome::Notice(Notice { kind: NoticeKind::Error, .. })
        ));
        assert!(state.images().is_empty());
    }

    #[test]
    fn opening_preview_resets_transform() {
        let mut state = state();
        state.apply(Action::GetImage { roll: 0 });
        state.apply(Action::GetImage { roll: 1 });

        state.apply(Action::OpenPreview(0));
        state.apply(Action::ZoomIn);
        state.apply(Action::RotateClockwise);
        state.apply(Action::BeginPan(pos2(0.0, 0.0)));
        state.apply(Action::Pointer(PointerSample::released(Some(pos2(12.0, 34.0)))));
        assert_ne!(state.preview().pan(), Vec2::ZERO);

        state.apply(Action::OpenPreview(1));
        let preview = state.preview();
        assert_eq!(preview.image(), Some("https://img.example/dog.png"));
        assert_eq!(preview.zoom(), 1.0);
        assert_eq!(preview.rotation(), 0);
        assert_eq!(preview.pan(), Vec2::ZERO);
    }

    #[test]
    fn preview_controls_need_open_preview() {
        let mut state = state();
        assert_eq!(state.apply(Action::ZoomIn), Outcome::Unchanged);
        assert_eq!(state.apply(Action::OpenPreview(5)), Outcome::Unchanged);
        assert_eq!(state.apply(Action::ClosePreview), Outcome::Unchanged);
        assert_eq!(state.preview().zoom(), 1.0);
    }

    #[test]
    fn sidebar_resize_is_clamped() {
        let mut state = state();
        state.apply(Action::BeginSidebarResize(pos2(180.0, 50.0)));
        assert!(state.is_resizing_sidebar());

        state.apply(Action::Pointer(PointerSample::held_at(pos2(1000.0, 50.0))));
        assert_eq!(state.sidebar_width(), SIDEBAR_MAX_WIDTH);

        state.apply(Action::Pointer(PointerSample::held_at(pos2(-400.0, 80.0))));
        assert_eq!(state.sidebar_width(), SIDEBAR_MIN_WIDTH);

        state.apply(Action::Pointer(PointerSample::held_at(pos2(230.0, 80.0))));
        assert_eq!(state.sidebar_width(), 230.0);
    }

    #[test]
    fn sidebar_resize_ends_on_release_outside_window() {
        let mut state = state();
        state.apply(Action::BeginSidebarResize(pos2(180.0, 50.0)));
        state.apply(Action::Pointer(PointerSample::held_at(pos2(260.0, 50.0))));

        let outcome = state.apply(Action::Pointer(PointerSample::released(None)));
        assert_eq!(outcome, Outcome::Changed);
        assert!(!state.is_resizing_sidebar());
        assert_eq!(state.sidebar_width(), 260.0);

        // Moving afterwards doesn't resize.
        state.apply(Action::Pointer(PointerSample::held_at(pos2(400.0, 50.0))));
        assert_eq!(state.sidebar_width(), 260.0);
    }

    #[test]
    fn rejected_upload_leaves_pictures_untouched() {
        let mut state = state();
        let before = state.profile_pictures().count();

        let result = picture_from_bytes("notes.txt", b"plain text");
        let outcome = state.apply(Action::UploadFinished(result));

        assert!(matches!(
            outcome,
            Outcome::Notice(Notice { kind: NoticeKind::Error, .. })
        ));
        assert_eq!(state.profile_pictures().count(), before);
        assert!(state.custom_pictures().is_empty());
        assert_eq!(state.selected_pfp(), None);
    }

    #[test]
    fn accepted_upload_is_appended_and_selected() {
        let mut state = state();
        let picture = picture_from_bytes("me.gif", b"GIF89a\x01\0\x01\0").unwrap();
        let uri = picture.uri().to_string();

        state.apply(Action::UploadFinished(Ok(picture)));
        assert_eq!(state.custom_pictures().len(), 1);
        assert_eq!(state.profile_pictures().count(), 2);
        assert_eq!(state.selected_pfp(), Some(uri.as_str()));
    }

    #[test]
    fn upload_lands_even_when_selector_hidden() {
        let mut state = state();
        assert!(!state.pfp_selector_open());
        state.apply(Action::SelectTab(TabId::Settings));

        let picture = picture_from_bytes("doc.pdf", b"%PDF-1.4").unwrap();
        state.apply(Action::UploadFinished(Ok(picture)));
        assert_eq!(state.custom_pictures().len(), 1);
        assert!(state.custom_pictures()[0].shows_placeholder());
    }

    #[test]
    fn save_profile_reveals_selector() {
        let mut state = state();
        state.apply(Action::SetName("Ada".to_string()));
        let outcome = state.apply(Action::SaveProfile);
        assert_eq!(
            outcome,
            Outcome::Notice(Notice::info("Select your profile picture"))
        );
        assert!(state.pfp_selector_open());
        assert_eq!(state.profile().name, "Ada");
    }

    #[test]
    fn selecting_unknown_picture_is_ignored() {
        let mut state = state();
        assert_eq!(
            state.apply(Action::SelectPfp("https://elsewhere/x.png".to_string())),
            Outcome::Unchanged
        );
        assert_eq!(
            state.apply(Action::SelectPfp("https://img.example/pfp.png".to_string())),
            Outcome::Changed
        );
        assert_eq!(state.selected_pfp(), Some("https://img.example/pfp.png"));
    }

    #[test]
    fn guessing_game_feedback() {
        let mut state = state();
        let mut guess = |input: &str| {
            state.apply(Action::SubmitGuess(input.to_string()));
            state
                .game()
                .last_outcome()
                .map(GuessOutcome::message)
                .unwrap_or_default()
        };

        assert!(guess("10").contains("Too low"));
        assert!(guess("90").contains("Too high"));
        assert!(guess("abc").contains("valid number"));
        assert!(guess("50").starts_with("Correct!"));
        assert_eq!(state.game().target(), 50);
        assert_eq!(state.game().attempts(), 3);

        state.apply(Action::NewGame { target: 7 });
        assert_eq!(state.game().target(), 7);
        assert_eq!(state.game().attempts(), 0);
        assert_eq!(state.game().last_outcome(), None);
    }

    #[test]
    fn music_link_is_classified_on_input() {
        let mut state = state();
        state.apply(Action::SetMusicLink("https://youtu.be/VIDEOID".to_string()));
        assert_eq!(
            state.music_link().map(MediaLink::embed_url).as_deref(),
            Some("https://www.youtube.com/embed/VIDEOID")
        );

        state.apply(Action::SetMusicLink(String::new()));
        assert_eq!(state.music_link(), None);
    }

    #[test]
    fn reload_falls_back_when_active_tab_removed() {
        let mut state = state();
        state.apply(Action::SelectTab(TabId::Game));
        state.apply(Action::SelectPfp("https://img.example/pfp.png".to_string()));
        state.apply(Action::GetImage { roll: 0 });

        let reloaded = DashboardConfig {
            tabs: vec![TabConfig::new(TabId::Settings), TabConfig::new(TabId::Home)],
            profile_pictures: Vec::new(),
            ..config()
        };
        let outcome = state.apply(Action::ReloadConfig(reloaded.clone()));

        assert!(matches!(outcome, Outcome::Notice(_)));
        assert_eq!(state.active_tab(), TabId::Settings);
        assert_eq!(state.selected_pfp(), None);
        assert_eq!(state.images().len(), 1);
        assert_eq!(state.apply(Action::ReloadConfig(reloaded)), Outcome::Unchanged);
    }

    #[test]
    fn toggles_flip_flags() {
        let mut state = state();
        state.apply(Action::ToggleTabs);
        state.apply(Action::ToggleDarkMode);
        assert!(!state.tabs_visible());
        assert!(state.dark_mode());
    }
}
