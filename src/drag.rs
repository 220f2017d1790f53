//! Pointer drag tracking shared by sidebar resizing and preview panning.
//!
//! A drag captures the pointer position and the dragged element's offset on
//! press, then reports `pointer - start_pointer + start_offset` on every move
//! until the primary button is released. Release is detected from window-wide
//! pointer state, so a button let go outside the window still ends the drag.

use eframe::egui::{Pos2, Vec2};

/// Smallest allowed sidebar width in pixels.
pub const SIDEBAR_MIN_WIDTH: f32 = 100.0;

/// Largest allowed sidebar width in pixels.
pub const SIDEBAR_MAX_WIDTH: f32 = 500.0;

/// Sidebar width used when the config doesn't specify one.
pub const SIDEBAR_DEFAULT_WIDTH: f32 = 180.0;

/// Axes a drag is allowed to move along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Only the x component follows the pointer.
    Horizontal,
    /// Both components follow the pointer.
    Both,
}

/// Window-wide pointer state for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    /// Latest known pointer position, `None` once the pointer left the window.
    pub position: Option<Pos2>,
    /// Whether the primary button is still held.
    pub primary_down: bool,
}

impl PointerSample {
    pub fn held_at(position: Pos2) -> Self {
        Self {
            position: Some(position),
            primary_down: true,
        }
    }

    pub fn released(position: Option<Pos2>) -> Self {
        Self {
            position,
            primary_down: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct DragSession {
    pointer_origin: Pos2,
    offset_origin: Vec2,
}

/// Tracks a single press-move-release interaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragTracker {
    axis: Axis,
    session: Option<DragSession>,
}

impl DragTracker {
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            session: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Begins a drag at `pointer` for an element currently at `offset`.
    ///
    /// Starting while a drag is active restarts it from the new origin.
    pub fn start(&mut self, pointer: Pos2, offset: Vec2) {
        self.session = Some(DragSession {
            pointer_origin: pointer,
            offset_origin: offset,
        });
    }

    /// Returns the element offset for the current pointer position.
    pub fn update(&self, pointer: Pos2) -> Option<Vec2> {
        let session = self.session?;
        let delta = pointer - session.pointer_origin;
        let delta = match self.axis {
            Axis::Horizontal => Vec2::new(delta.x, 0.0),
            Axis::Both => delta,
        };
        Some(session.offset_origin + delta)
    }

    /// Stops tracking. Returns whether a drag was in progress.
    pub fn end(&mut self) -> bool {
        self.session.take().is_some()
    }

    /// Feeds one frame of window-wide pointer state into the tracker.
    ///
    /// Returns the new offset while the button is held over the window. A
    /// released button ends the drag wherever the pointer is, and yields
    /// the offset at the release position when one is known.
    pub fn follow(&mut self, sample: PointerSample) -> Option<Vec2> {
        if !self.is_active() {
            return None;
        }

        let offset = sample.position.and_then(|pos| self.update(pos));
        if !sample.primary_down {
            self.end();
        }
        offset
    }
}

/// Sidebar width in whole pixels, always within
/// [`SIDEBAR_MIN_WIDTH`, `SIDEBAR_MAX_WIDTH`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SidebarWidth(f32);

impl SidebarWidth {
    pub fn new(px: f32) -> Self {
        if px.is_nan() {
            return Self::default();
        }
        Self(px.round().clamp(SIDEBAR_MIN_WIDTH, SIDEBAR_MAX_WIDTH))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for SidebarWidth {
    fn default() -> Self {
        Self(SIDEBAR_DEFAULT_WIDTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::{pos2, vec2};

    #[test]
    fn idle_tracker_reports_nothing() {
        let mut tracker = DragTracker::new(Axis::Both);
        assert!(!tracker.is_active());
        assert_eq!(tracker.update(pos2(10.0, 10.0)), None);
        assert_eq!(tracker.follow(PointerSample::held_at(pos2(10.0, 10.0))), None);
        assert!(!tracker.end());
    }

    #[test]
    fn offset_follows_pointer_delta() {
        let mut tracker = DragTracker::new(Axis::Both);
        tracker.start(pos2(200.0, 150.0), vec2(20.0, -5.0));

        let offset = tracker.follow(PointerSample::held_at(pos2(230.0, 100.0)));
        assert_eq!(offset, Some(vec2(50.0, -55.0)));
        assert!(tracker.is_active());
    }

    #[test]
    fn horizontal_axis_ignores_vertical_motion() {
        let mut tracker = DragTracker::new(Axis::Horizontal);
        tracker.start(pos2(180.0, 40.0), vec2(180.0, 0.0));

        let offset = tracker.follow(PointerSample::held_at(pos2(260.0, 400.0)));
        assert_eq!(offset, Some(vec2(260.0, 0.0)));
    }

    #[test]
    fn release_ends_drag_and_freezes_offset() {
        let mut tracker = DragTracker::new(Axis::Both);
        tracker.start(pos2(0.0, 0.0), Vec2::ZERO);
        tracker.follow(PointerSample::held_at(pos2(5.0, 5.0)));

        let last = tracker.follow(PointerSample::released(Some(pos2(8.0, 9.0))));
        assert_eq!(last, Some(vec2(8.0, 9.0)));
        assert!(!tracker.is_active());

        // Later moves no longer report anything.
        assert_eq!(tracker.follow(PointerSample::held_at(pos2(50.0, 50.0))), None);
    }

    #[test]
    fn release_outside_window_still_ends_drag() {
        let mut tracker = DragTracker::new(Axis::Horizontal);
        tracker.start(pos2(300.0, 20.0), vec2(300.0, 0.0));
        tracker.follow(PointerSample::held_at(pos2(320.0, 20.0)));

        // Pointer left the window, then the button was released out there.
        assert_eq!(tracker.follow(PointerSample::released(None)), None);
        assert!(!tracker.is_active());
    }

    #[test]
    fn sidebar_width_is_clamped_and_rounded() {
        assert_eq!(SidebarWidth::new(20.0).get(), SIDEBAR_MIN_WIDTH);
        assert_eq!(SidebarWidth::new(9000.0).get(), SIDEBAR_MAX_WIDTH);
        assert_eq!(SidebarWidth::new(250.4).get(), 250.0);
        assert_eq!(SidebarWidth::new(f32::NAN), SidebarWidth::default());
        assert_eq!(SidebarWidth::default().get(), 180.0);
    }

    #[test]
    fn sidebar_width_stays_in_bounds_for_any_delta() {
        let mut tracker = DragTracker::new(Axis::Horizontal);
        let start = SidebarWidth::default();
        tracker.start(pos2(180.0, 10.0), vec2(start.get(), 0.0));

        for dx in (-2000..=2000).step_by(37) {
            let pointer = pos2(180.0 + dx as f32, 10.0);
            let offset = tracker.update(pointer).unwrap();
            let width = SidebarWidth::new(offset.x).get();
            assert!((SIDEBAR_MIN_WIDTH..=SIDEBAR_MAX_WIDTH).contains(&width));
        }
    }
}
