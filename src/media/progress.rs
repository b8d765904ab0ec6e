use std::time::Duration;

use tokio::sync::watch;
use tracing::debug;
use wpmoly_common::MovieId;

/// Status text shown once a session has finished.
pub const DONE: &str = "Done!";

/// Picker state as seen by whoever drives the progress bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    /// Progress bar width, 0 to 100.
    pub percent: u8,
    /// Status line.
    pub status: String,
    /// The picker has been closed.
    pub closed: bool,
}

impl Progress {
    fn start(status: &str, percent: u8) -> Self {
        Self {
            percent,
            status: status.to_string(),
            closed: false,
        }
    }

    pub fn is_done(&self) -> bool {
        self.status == DONE
    }
}

/// One picker session: the movie being edited and the progress channel.
#[derive(Debug)]
pub struct Session {
    pub post_id: MovieId,
    pub tmdb_id: u64,
    pub title: String,
    close_delay: Duration,
    progress: watch::Sender<Progress>,
}

impl Session {
    pub fn new(post_id: MovieId, tmdb_id: u64, title: impl Into<String>, close_delay: Duration) -> Self {
        let (progress, _) = watch::channel(Progress::start("", 0));
        Self {
            post_id,
            tmdb_id,
            title: title.into(),
            close_delay,
            progress,
        }
    }

    /// Watch the session's progress.
    pub fn subscribe(&self) -> watch::Receiver<Progress> {
        self.progress.subscribe()
    }

    /// Current progress.
    pub fn progress(&self) -> Progress {
        self.progress.borrow().clone()
    }

    pub(crate) fn begin(&self, status: &str, percent: u8) {
        self.progress.send_replace(Progress::start(status, percent));
    }

    pub(crate) fn set_percent(&self, percent: u8) {
        self.progress.send_modify(|p| p.percent = percent.min(100));
    }

    pub(crate) fn append_status(&self, suffix: &str) {
        self.progress.send_modify(|p| p.status.push_str(suffix));
    }

    /// Mark the session done, then close it after the configured delay.
    pub(crate) async fn finish(&self) {
        self.progress.send_modify(|p| p.status = DONE.to_string());
        debug!(post_id = %self.post_id, delay_ms = self.close_delay.as_millis() as u64, "closing picker");
        tokio::time::sleep(self.close_delay).await;
        self.progress.send_modify(|p| p.closed = true);
    }
}
