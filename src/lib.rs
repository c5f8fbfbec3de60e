pub mod commands;
pub mod error;
pub mod leaderboard;
pub mod logs;
pub mod notify;
pub mod reminder;
pub mod roast;
pub mod store;
pub mod util;

use std::path::PathBuf;

use tokio::sync::{mpsc, Mutex};

use commands::reminders::ReminderScheduler;
use logs::SessionLogger;
use roast::{RandomRoasts, RoastSource};
use store::DiaryStore;

/// Shared context for every diary command: the persisted collections, the
/// volatile reminder timers, the roast randomness seam and the session log.
pub struct App {
    pub store: DiaryStore,
    pub scheduler: ReminderScheduler,
    pub(crate) source: Mutex<Box<dyn RoastSource>>,
    logger: Option<SessionLogger>,
    /// Speech is best-effort and can be switched off entirely.
    pub speech: bool,
}

impl App {
    /// Opens the diary rooted at `dir`, creating the session logger.
    /// Persisted reminders are not re-armed here; call
    /// [`App::restore_reminders`] once the caller is ready for timers.
    pub async fn open(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let logger = SessionLogger::new(&dir).await;
        Self {
            store: DiaryStore::open(dir),
            scheduler: ReminderScheduler::default(),
            source: Mutex::new(Box::new(RandomRoasts)),
            logger,
            speech: true,
        }
    }

    /// Replaces the roast source, e.g. with a deterministic sequence.
    pub fn with_source(mut self, source: Box<dyn RoastSource>) -> Self {
        self.source = Mutex::new(source);
        self
    }

    pub fn without_speech(mut self) -> Self {
        self.speech = false;
        self
    }

    /// Re-arms timers for persisted future reminders and returns how many
    /// were armed. Already-past reminders stay in storage un-armed; they
    /// never fire retroactively.
    pub async fn restore_reminders(&self) -> usize {
        self.scheduler
            .rearm_all(&self.store, self.log_sender(), self.speech)
            .await
    }

    pub(crate) fn log(&self, prefix: &str, line: &str) {
        if let Some(logger) = &self.logger {
            logger.log(prefix, line);
        }
    }

    /// Sender for timer tasks that outlive the current borrow of the app.
    pub fn log_sender(&self) -> Option<mpsc::UnboundedSender<String>> {
        self.logger.as_ref().map(|l| l.sender())
    }
}
