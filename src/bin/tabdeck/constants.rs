/// Initial window size in logical pixels.
pub const WINDOW_SIZE: [f32; 2] = [1280.0, 720.0];

/// Width of the grab strip on the sidebar's right edge.
pub const SIDEBAR_HANDLE_WIDTH: f32 = 6.0;

/// Height of each thumbnail in the image sidebar.
pub const THUMBNAIL_HEIGHT: f32 = 120.0;

/// Diameter of a profile picture in the selector.
pub const PFP_SIZE: f32 = 80.0;

/// Fraction of the screen the preview image may cover at zoom 1.0.
pub const PREVIEW_MAX_FRACTION: f32 = 0.8;

/// Zoom multiplier per scroll step over the preview.
pub const SCROLL_ZOOM_SPEED: f32 = 1.1;
