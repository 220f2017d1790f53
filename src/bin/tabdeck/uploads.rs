//! Background reading of picked profile pictures.

use eframe::egui;
use rfd::FileDialog;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use tabdeck::upload::{UploadError, accepted_extensions, read_picture};
use tabdeck::Picture;

/// Shows the native picker for a profile picture.
pub fn pick_picture() -> Option<PathBuf> {
    FileDialog::new()
        .set_title("Upload Custom Pic")
        .add_filter("Pictures", accepted_extensions().as_slice())
        .add_filter("All files", &["*"])
        .pick_file()
}

/// A read running on a worker thread.
struct PendingUpload {
    path: PathBuf,
    rx: Receiver<Result<Picture, UploadError>>,
}

/// Reads that have started but not yet been handed to the dashboard.
#[derive(Default)]
pub struct UploadQueue {
    pending: Vec<PendingUpload>,
}

impl UploadQueue {
    /// Starts reading `path` on a worker thread. The read can't be
    /// cancelled; its result is picked up by [`UploadQueue::poll`].
    pub fn start(&mut self, ctx: &egui::Context, path: PathBuf) {
        let (tx, rx) = mpsc::channel();
        let ctx = ctx.clone();
        let read_path = path.clone();

        thread::spawn(move || {
            let result = read_picture(&read_path);
            let _ = tx.send(result);
            ctx.request_repaint();
        });

        log::info!("Reading {}", path.display());
        self.pending.push(PendingUpload { path, rx });
    }

    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }

    /// Collects finished reads in the order they were started.
    pub fn poll(&mut self) -> Vec<Result<Picture, UploadError>> {
        let mut finished = Vec::new();

        self.pending.retain(|upload| match upload.rx.try_recv() {
            Ok(result) => {
                finished.push(result);
                false
            }
            Err(TryRecvError::Empty) => true,
            Err(TryRecvError::Disconnected) => {
                log::error!("{}: upload worker exited without a result", upload.path.display());
                false
            }
        });

        finished
    }
}
