//! Image preview overlay state: zoom, rotation and pan.

use crate::drag::{Axis, DragTracker, PointerSample};
use eframe::egui::{Pos2, Vec2};

/// Minimum zoom factor.
pub const ZOOM_MIN: f32 = 0.25;

/// Maximum zoom factor.
pub const ZOOM_MAX: f32 = 4.0;

/// Zoom change per button press.
pub const ZOOM_STEP: f32 = 0.25;

/// Rotation change per button press, in degrees.
pub const ROTATION_STEP: i32 = 90;

/// State of the preview overlay. Closed when no image is set.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewState {
    image: Option<String>,
    zoom: f32,
    rotation: i32,
    pan: Vec2,
    pan_drag: DragTracker,
}

impl Default for PreviewState {
    fn default() -> Self {
        Self {
            image: None,
            zoom: 1.0,
            rotation: 0,
            pan: Vec2::ZERO,
            pan_drag: DragTracker::new(Axis::Both),
        }
    }
}

impl PreviewState {
    /// Opens `image`, discarding any transform from a previous preview.
    pub fn open(&mut self, image: impl Into<String>) {
        self.image = Some(image.into());
        self.reset_view();
    }

    pub fn close(&mut self) {
        self.image = None;
        self.pan_drag.end();
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    pub fn is_open(&self) -> bool {
        self.image.is_some()
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Accumulated rotation in degrees. May exceed a full turn.
    pub fn rotation(&self) -> i32 {
        self.rotation
    }

    /// Rotation folded into `0..360`.
    pub fn normalized_rotation(&self) -> i32 {
        self.rotation.rem_euclid(360)
    }

    pub fn rotation_radians(&self) -> f32 {
        (self.normalized_rotation() as f32).to_radians()
    }

    pub fn pan(&self) -> Vec2 {
        self.pan
    }

    pub fn is_panning(&self) -> bool {
        self.pan_drag.is_active()
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        if zoom.is_finite() {
            self.zoom = zoom.clamp(ZOOM_MIN, ZOOM_MAX);
        }
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom + ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom - ZOOM_STEP);
    }

    /// Multiplies the zoom, e.g. for scroll wheel input.
    pub fn zoom_by(&mut self, factor: f32) {
        if factor > 0.0 {
            self.set_zoom(self.zoom * factor);
        }
    }

    pub fn rotate_clockwise(&mut self) {
        self.rotation = self.rotation.wrapping_add(ROTATION_STEP);
    }

    pub fn rotate_counter_clockwise(&mut self) {
        self.rotation = self.rotation.wrapping_sub(ROTATION_STEP);
    }

    /// Returns zoom to 1, rotation to 0 and pan to the origin.
    pub fn reset_view(&mut self) {
        self.zoom = 1.0;
        self.rotation = 0;
        self.pan = Vec2::ZERO;
        self.pan_drag.end();
    }

    pub fn begin_pan(&mut self, pointer: Pos2) {
        if self.is_open() {
            self.pan_drag.start(pointer, self.pan);
        }
    }

    /// Applies one frame of pointer state to an active pan. Returns whether
    /// the pan offset moved.
    pub fn follow_pointer(&mut self, sample: PointerSample) -> bool {
        match self.pan_drag.follow(sample) {
            Some(pan) if pan != self.pan => {
                self.pan = pan;
                true
            }
            _ => false,
        }
    }
}
