//! State and logic for the tabdeck dashboard.
//!
//! Rendering lives in the `tabdeck` binary. Everything here is plain data
//! driven through [`DashboardState::apply`].

pub mod config;
pub mod drag;
pub mod game;
pub mod media;
pub mod preview;
pub mod state;
pub mod tabs;
pub mod upload;

pub use config::{ConfigError, DashboardConfig, TabConfig};
pub use drag::{Axis, DragTracker, PointerSample, SidebarWidth};
pub use game::{GuessOutcome, GuessingGame};
pub use media::MediaLink;
pub use preview::PreviewState;
pub use state::{Action, DashboardState, Notice, NoticeKind, Outcome};
pub use tabs::{TabId, UnknownTab};
pub use upload::{FileKind, Picture, UploadError};
