//! Color constants for buttons, the preview backdrop and the picture selector.

use eframe::egui::Color32;

// Buttons
pub const ACCENT_GREEN: Color32 = Color32::from_rgb(76, 175, 80);
pub const ACCENT_BLUE: Color32 = Color32::from_rgb(0, 123, 255);

// Sidebar
pub const SIDEBAR_HANDLE: Color32 = Color32::from_rgba_premultiplied(40, 40, 40, 102);
pub const MUTED_TEXT: Color32 = Color32::from_rgb(119, 119, 119);

// Preview overlay
pub const BACKDROP: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 77);

// Profile pictures
pub const PFP_BORDER: Color32 = Color32::from_rgb(204, 204, 204);
pub const PFP_PLACEHOLDER_FILL: Color32 = Color32::from_rgb(230, 230, 230);
