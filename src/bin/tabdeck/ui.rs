//! UI rendering methods for the dashboard.

use crate::TabdeckApp;
use crate::colors;
use crate::constants::{
    PFP_SIZE, PREVIEW_MAX_FRACTION, SCROLL_ZOOM_SPEED, SIDEBAR_HANDLE_WIDTH, THUMBNAIL_HEIGHT,
};
use crate::uploads::pick_picture;
use eframe::egui::{self, load::Bytes};
use rand::Rng;
use tabdeck::game::TARGET_RANGE;
use tabdeck::upload::decode_data_url;
use tabdeck::{Action, GuessOutcome, Picture, PointerSample, TabId};

/// Decoded bytes of uploaded pictures, kept in step with the dashboard's
/// append-only upload list so each data URL is decoded once.
#[derive(Default)]
pub struct EmbeddedImages {
    uploads: Vec<Option<(String, Bytes)>>,
}

impl EmbeddedImages {
    pub fn sync(&mut self, pictures: &[Picture]) {
        let start = self.uploads.len();
        for (index, picture) in pictures.iter().enumerate().skip(start) {
            self.uploads.push(Self::decode(index, picture));
        }
    }

    fn decode(index: usize, picture: &Picture) -> Option<(String, Bytes)> {
        let Picture::Uploaded { kind, data_url, .. } = picture else {
            return None;
        };
        if kind.shows_placeholder() {
            return None;
        }
        match decode_data_url(data_url) {
            Ok((_, bytes)) => {
                let ext = kind.extensions().first().copied().unwrap_or("bin");
                Some((format!("bytes://upload-{index}.{ext}"), Bytes::from(bytes)))
            }
            Err(err) => {
                log::error!("Upload {index}: {err}");
                None
            }
        }
    }

    /// Image widget for a picture; `None` means draw the placeholder.
    fn image(&self, picture: &Picture, upload_index: Option<usize>) -> Option<egui::Image<'static>> {
        match picture {
            Picture::Remote(url) => Some(egui::Image::new(url.clone())),
            Picture::Uploaded { .. } => {
                let (uri, bytes) = self.uploads.get(upload_index?)?.as_ref()?;
                Some(egui::Image::from_bytes(uri.clone(), bytes.clone()))
            }
        }
    }
}

impl TabdeckApp {
    /// Feeds window-wide pointer state to any active drag, so a release
    /// anywhere (even outside the window) ends it.
    pub fn track_pointer(&mut self, ctx: &egui::Context) {
        if !self.state.is_resizing_sidebar() && !self.state.preview().is_panning() {
            return;
        }

        let sample = ctx.input(|i| PointerSample {
            position: i.pointer.latest_pos(),
            primary_down: i.pointer.primary_down(),
        });
        self.dispatch(Action::Pointer(sample));

        if self.state.is_resizing_sidebar() {
            ctx.set_cursor_icon(egui::CursorIcon::ResizeHorizontal);
        } else if self.state.preview().is_panning() {
            ctx.set_cursor_icon(egui::CursorIcon::Grabbing);
        }
    }

    /// Handles preview shortcuts while no text field has focus.
    pub fn handle_keyboard_input(&mut self, ctx: &egui::Context) {
        if !self.state.preview().is_open() || ctx.memory(|m| m.focused().is_some()) {
            return;
        }

        let actions = ctx.input(|i| {
            let mut actions = Vec::new();
            if i.key_pressed(egui::Key::Escape) {
                actions.push(Action::ClosePreview);
            }
            if i.key_pressed(egui::Key::Plus) || i.key_pressed(egui::Key::Equals) {
                actions.push(Action::ZoomIn);
            }
            if i.key_pressed(egui::Key::Minus) {
                actions.push(Action::ZoomOut);
            }
            if i.key_pressed(egui::Key::R) {
                actions.push(if i.modifiers.shift {
                    Action::RotateCounterClockwise
                } else {
                    Action::RotateClockwise
                });
            }
            if i.key_pressed(egui::Key::Num0) {
                actions.push(Action::ResetView);
            }
            actions
        });

        for action in actions {
            self.dispatch(action);
        }
    }

    /// Renders the top bar with the panel toggle and the tab buttons.
    pub fn show_header(&mut self, ctx: &egui::Context) {
        let mut actions = Vec::new();

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                let visible = self.state.tabs_visible();
                let toggle_label = if visible {
                    "Hide General Settings"
                } else {
                    "Show General Settings"
                };
                if ui.button(toggle_label).clicked() {
                    actions.push(Action::ToggleTabs);
                }

                if !visible {
                    return;
                }

                ui.separator();
                for tab in &self.state.config().tabs {
                    let label = tab.display_label();
                    if ui
                        .selectable_label(self.state.active_tab() == tab.id, label)
                        .on_hover_text(label)
                        .clicked()
                    {
                        actions.push(Action::SelectTab(tab.id));
                    }
                }
            });
            ui.add_space(4.0);
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.label("Click a thumbnail: Preview | Drag: Pan | +/-: Zoom | R: Rotate | 0: Reset | Esc: Close");
        });

        for action in actions {
            self.dispatch(action);
        }
    }

    /// Renders the active panel.
    pub fn show_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            if !self.state.tabs_visible() {
                return;
            }

            match self.state.active_tab() {
                TabId::Home => self.show_home(ui),
                TabId::Profile => self.show_profile(ui),
                TabId::Settings => self.show_settings(ui),
                TabId::Music => self.show_music(ui),
                TabId::Game => self.show_game(ui),
            }
        });
    }

    /// Image sidebar with its resize handle, plus the welcome area.
    fn show_home(&mut self, ui: &mut egui::Ui) {
        let mut actions = Vec::new();

        let sidebar = egui::SidePanel::left("image_sidebar")
            .resizable(false)
            .exact_width(self.state.sidebar_width())
            .show_inside(ui, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    if self.state.images().is_empty() {
                        ui.vertical_centered(|ui| {
                            ui.colored_label(colors::MUTED_TEXT, "No images yet");
                        });
                    }

                    for (index, src) in self.state.images().iter().enumerate() {
                        let size = egui::vec2(ui.available_width(), THUMBNAIL_HEIGHT);
                        let thumbnail = egui::Image::new(src.clone())
                            .fit_to_exact_size(size)
                            .corner_radius(8.0)
                            .sense(egui::Sense::click());
                        if ui
                            .add(thumbnail)
                            .on_hover_cursor(egui::CursorIcon::PointingHand)
                            .clicked()
                        {
                            actions.push(Action::OpenPreview(index));
                        }
                        ui.add_space(12.0);
                    }
                });
            });

        let panel_rect = sidebar.response.rect;
        let handle_rect = egui::Rect::from_min_max(
            egui::pos2(panel_rect.right() - SIDEBAR_HANDLE_WIDTH, panel_rect.top()),
            panel_rect.right_bottom(),
        );
        let handle = ui
            .interact(handle_rect, ui.id().with("sidebar_handle"), egui::Sense::drag())
            .on_hover_cursor(egui::CursorIcon::ResizeHorizontal);
        ui.painter()
            .rect_filled(handle_rect, 0.0, colors::SIDEBAR_HANDLE);
        if handle.drag_started()
            && let Some(origin) = drag_origin(ui, &handle)
        {
            actions.push(Action::BeginSidebarResize(origin));
        }

        ui.vertical(|ui| {
            ui.add_space(8.0);
            ui.heading("Welcome Home!");
            ui.label("This is your dashboard where you can start your day.");
            ui.add_space(8.0);
            if ui
                .add(accent_button("Get Image", colors::ACCENT_GREEN))
                .clicked()
            {
                actions.push(Action::GetImage {
                    roll: rand::random(),
                });
            }
        });

        for action in actions {
            self.dispatch(action);
        }
    }

    /// Profile form and the profile picture selector.
    fn show_profile(&mut self, ui: &mut egui::Ui) {
        let mut actions = Vec::new();
        let mut name = self.state.profile().name.clone();
        let mut email = self.state.profile().email.clone();

        ui.heading("Your Profile");
        egui::Grid::new("profile_form")
            .num_columns(2)
            .spacing([8.0, 8.0])
            .show(ui, |ui| {
                ui.label("Name:");
                if ui.text_edit_singleline(&mut name).changed() {
                    actions.push(Action::SetName(name.clone()));
                }
                ui.end_row();

                ui.label("Email:");
                if ui.text_edit_singleline(&mut email).changed() {
                    actions.push(Action::SetEmail(email.clone()));
                }
                ui.end_row();
            });

        ui.add_space(12.0);
        if ui
            .add(accent_button("Save Profile", colors::ACCENT_BLUE))
            .clicked()
        {
            actions.push(Action::SaveProfile);
        }

        if self.state.pfp_selector_open() {
            ui.add_space(20.0);
            ui.heading("Select your profile picture:");
            ui.add_space(8.0);
            self.show_picture_selector(ui, &mut actions);
        }

        for action in actions {
            self.dispatch(action);
        }
    }

    fn show_picture_selector(&mut self, ui: &mut egui::Ui, actions: &mut Vec<Action>) {
        let mut upload_clicked = false;

        ui.horizontal_wrapped(|ui| {
            ui.spacing_mut().item_spacing = egui::vec2(12.0, 12.0);

            let defaults = self.state.config().profile_pictures.len();
            for (index, picture) in self.state.profile_pictures().enumerate() {
                let upload_index = index.checked_sub(defaults);
                let selected = self.state.selected_pfp() == Some(picture.uri());
                let image = self.embedded.image(picture, upload_index);

                if picture_choice(ui, image, selected).clicked() {
                    actions.push(Action::SelectPfp(picture.uri().to_string()));
                }
            }

            upload_clicked = ui
                .add_sized(
                    [PFP_SIZE, PFP_SIZE],
                    egui::Button::new(egui::RichText::new("+").size(28.0)),
                )
                .on_hover_text("Upload Custom Pic")
                .clicked();

            if self.uploads.in_flight() > 0 {
                ui.spinner();
            }
        });

        if upload_clicked && let Some(path) = pick_picture() {
            self.uploads.start(ui.ctx(), path);
        }
    }

    fn show_settings(&mut self, ui: &mut egui::Ui) {
        ui.heading("Settings");
        ui.add_space(8.0);

        let toggled = ui
            .horizontal(|ui| {
                ui.label("White Mode & Dark Mode");
                toggle_switch(ui, self.state.dark_mode()).clicked()
            })
            .inner;

        if toggled {
            self.dispatch(Action::ToggleDarkMode);
        }
    }

    /// Link input with its classification. Playback happens in the browser.
    fn show_music(&mut self, ui: &mut egui::Ui) {
        ui.heading("Music");
        ui.add_space(8.0);

        let mut input = self.state.music_input().to_string();
        let changed = ui
            .add(
                egui::TextEdit::singleline(&mut input)
                    .hint_text("Paste a YouTube, Spotify or audio link")
                    .desired_width(420.0),
            )
            .changed();

        ui.add_space(8.0);
        match self.state.music_link() {
            Some(link) => {
                let url = link.embed_url();
                ui.horizontal(|ui| {
                    ui.strong(link.provider());
                    ui.hyperlink_to(url.as_str(), url.as_str());
                });
            }
            None => {
                ui.colored_label(colors::MUTED_TEXT, "No link yet");
            }
        }

        if changed {
            self.dispatch(Action::SetMusicLink(input));
        }
    }

    fn show_game(&mut self, ui: &mut egui::Ui) {
        let mut actions = Vec::new();

        ui.heading("Guess the Number");
        ui.label(format!(
            "I'm thinking of a number between {} and {}.",
            TARGET_RANGE.start(),
            TARGET_RANGE.end()
        ));
        ui.add_space(8.0);

        // A finished round only accepts "New Game".
        let won = self
            .state
            .game()
            .last_outcome()
            .is_some_and(GuessOutcome::is_win);

        ui.add_enabled_ui(!won, |ui| {
            ui.horizontal(|ui| {
                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.guess_input)
                        .hint_text("Your guess")
                        .desired_width(120.0),
                );
                let submitted =
                    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if (ui.button("Guess").clicked() || submitted) && !won {
                    actions.push(Action::SubmitGuess(std::mem::take(&mut self.guess_input)));
                }
            });
        });

        let game = self.state.game();
        if let Some(outcome) = game.last_outcome() {
            ui.add_space(8.0);
            ui.label(outcome.message());
        }
        ui.label(format!("Attempts: {}", game.attempts()));

        ui.add_space(8.0);
        if ui.button("New Game").clicked() {
            actions.push(Action::NewGame {
                target: rand::thread_rng().gen_range(TARGET_RANGE),
            });
        }

        for action in actions {
            self.dispatch(action);
        }
    }

    /// Renders the preview overlay and its floating controls.
    pub fn show_preview(&mut self, ctx: &egui::Context) {
        let Some(uri) = self.state.preview().image().map(str::to_owned) else {
            return;
        };

        let mut actions = Vec::new();
        #[allow(deprecated)]
        let screen = ctx.screen_rect();

        egui::Area::new(egui::Id::new("preview_overlay"))
            .order(egui::Order::Foreground)
            .fixed_pos(screen.min)
            .show(ctx, |ui| {
                let backdrop = ui.allocate_rect(screen, egui::Sense::click());
                ui.painter().rect_filled(screen, 0.0, colors::BACKDROP);

                self.show_preview_image(ui, screen, &uri, &mut actions);

                if backdrop.clicked() {
                    actions.push(Action::ClosePreview);
                }
            });

        egui::Area::new(egui::Id::new("preview_controls"))
            .order(egui::Order::Tooltip)
            .anchor(egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -24.0))
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    self.show_preview_controls(ui, &mut actions);
                });
            });

        for action in actions {
            self.dispatch(action);
        }
    }

    fn show_preview_image(
        &self,
        ui: &mut egui::Ui,
        screen: egui::Rect,
        uri: &str,
        actions: &mut Vec<Action>,
    ) {
        let preview = self.state.preview();
        let image = egui::Image::new(uri.to_owned());
        let max_size = screen.size() * PREVIEW_MAX_FRACTION;

        let natural_size = match image.load_for_size(ui.ctx(), max_size) {
            Ok(poll) => poll.size(),
            Err(err) => {
                ui.put(
                    egui::Rect::from_center_size(screen.center(), egui::vec2(400.0, 40.0)),
                    egui::Label::new(format!("Failed to load image: {err}")),
                );
                return;
            }
        };

        let Some(natural_size) = natural_size else {
            ui.put(
                egui::Rect::from_center_size(screen.center(), egui::Vec2::splat(32.0)),
                egui::Spinner::new(),
            );
            return;
        };

        // Fit into the screen like a CSS max-width/max-height, never upscale.
        let fit = (max_size.x / natural_size.x)
            .min(max_size.y / natural_size.y)
            .min(1.0);
        let display_size = natural_size * fit * preview.zoom();
        let image_rect =
            egui::Rect::from_center_size(screen.center() + preview.pan(), display_size);

        let cursor = if preview.is_panning() {
            egui::CursorIcon::Grabbing
        } else {
            egui::CursorIcon::Grab
        };
        let response = ui
            .interact(
                image_rect,
                egui::Id::new("preview_image"),
                egui::Sense::click_and_drag(),
            )
            .on_hover_cursor(cursor);

        if response.drag_started()
            && let Some(origin) = drag_origin(ui, &response)
        {
            actions.push(Action::BeginPan(origin));
        }

        if response.hovered() {
            let scroll = ui.input(|i| i.raw_scroll_delta.y);
            if scroll > 0.0 {
                actions.push(Action::ZoomBy(SCROLL_ZOOM_SPEED));
            } else if scroll < 0.0 {
                actions.push(Action::ZoomBy(1.0 / SCROLL_ZOOM_SPEED));
            }
        }

        image
            .corner_radius(12.0)
            .rotate(preview.rotation_radians(), egui::Vec2::splat(0.5))
            .paint_at(ui, image_rect);
    }

    fn show_preview_controls(&self, ui: &mut egui::Ui, actions: &mut Vec<Action>) {
        let preview = self.state.preview();

        ui.horizontal(|ui| {
            if ui.button("−").on_hover_text("Zoom out (-)").clicked() {
                actions.push(Action::ZoomOut);
            }
            ui.label(format!("{:.0}%", preview.zoom() * 100.0));
            if ui.button("+").on_hover_text("Zoom in (+)").clicked() {
                actions.push(Action::ZoomIn);
            }

            ui.separator();

            if ui.button("⟲").on_hover_text("Rotate left (Shift+R)").clicked() {
                actions.push(Action::RotateCounterClockwise);
            }
            ui.label(format!("{}°", preview.normalized_rotation()));
            if ui.button("⟳").on_hover_text("Rotate right (R)").clicked() {
                actions.push(Action::RotateClockwise);
            }

            ui.separator();

            if ui.button("Reset").on_hover_text("Reset view (0)").clicked() {
                actions.push(Action::ResetView);
            }
            if ui.button("Close").on_hover_text("Close (Esc)").clicked() {
                actions.push(Action::ClosePreview);
            }
        });
    }
}

/// Where the press that started a drag landed. egui reports `drag_started`
/// only after the pointer has moved past a small threshold.
fn drag_origin(ui: &egui::Ui, response: &egui::Response) -> Option<egui::Pos2> {
    ui.input(|i| i.pointer.press_origin())
        .or_else(|| response.interact_pointer_pos())
}

fn accent_button(text: &str, fill: egui::Color32) -> egui::Button<'static> {
    egui::Button::new(egui::RichText::new(text.to_owned()).color(egui::Color32::WHITE)).fill(fill)
}

/// Renders one round profile picture; `None` draws the document placeholder.
fn picture_choice(
    ui: &mut egui::Ui,
    image: Option<egui::Image<'static>>,
    selected: bool,
) -> egui::Response {
    let (rect, response) =
        ui.allocate_exact_size(egui::Vec2::splat(PFP_SIZE), egui::Sense::click());
    let center = rect.center();
    let radius = PFP_SIZE / 2.0;

    match image {
        Some(image) => {
            image
                .fit_to_exact_size(rect.size())
                .corner_radius(radius)
                .paint_at(ui, rect);
        }
        None => {
            ui.painter()
                .circle_filled(center, radius, colors::PFP_PLACEHOLDER_FILL);
            ui.painter().text(
                center,
                egui::Align2::CENTER_CENTER,
                "PDF",
                egui::FontId::proportional(20.0),
                egui::Color32::DARK_GRAY,
            );
        }
    }

    let stroke = if selected {
        egui::Stroke::new(3.0, colors::ACCENT_BLUE)
    } else {
        egui::Stroke::new(2.0, colors::PFP_BORDER)
    };
    ui.painter().circle_stroke(center, radius, stroke);

    response.on_hover_cursor(egui::CursorIcon::PointingHand)
}

/// Pill-shaped on/off switch.
fn toggle_switch(ui: &mut egui::Ui, on: bool) -> egui::Response {
    let desired_size = ui.spacing().interact_size.y * egui::vec2(2.0, 1.0);
    let (rect, response) = ui.allocate_exact_size(desired_size, egui::Sense::click());

    if ui.is_rect_visible(rect) {
        let visuals = ui.style().interact_selectable(&response, on);
        let rect = rect.expand(visuals.expansion);
        let radius = 0.5 * rect.height();
        ui.painter().rect(
            rect,
            radius,
            visuals.bg_fill,
            visuals.bg_stroke,
            egui::StrokeKind::Inside,
        );
        let thumb_x = if on {
            rect.right() - radius
        } else {
            rect.left() + radius
        };
        ui.painter().circle(
            egui::pos2(thumb_x, rect.center().y),
            0.75 * radius,
            visuals.bg_fill,
            visuals.fg_stroke,
        );
    }

    response
}
