use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;

use crate::error::Result;
use crate::logs::send_log;
use crate::notify;
use crate::reminder::{self, Reminder};
use crate::store::DiaryStore;
use crate::App;

/// Longest delay a single one-shot timer will sleep, in milliseconds.
const MAX_TIMER_MS: u64 = i32::MAX as u64;

// ── Scheduler ───────────────────────────────────────────────────────────────

/// Volatile timer table for pending reminders, keyed by reminder id.
///
/// Timers live only as long as the process; persisted records are the
/// source of truth and are re-armed via [`ReminderScheduler::rearm_all`]
/// on startup. Cancellation aborts the timer task, so a deleted reminder
/// can never fire late.
#[derive(Default)]
pub struct ReminderScheduler {
    timers: Arc<Mutex<HashMap<String, JoinHandle<()>>>>,
}

impl ReminderScheduler {
    /// Arms a one-shot timer for a pending reminder. Reminders whose time
    /// has already passed are silently not armed.
    pub async fn arm(
        &self,
        store: DiaryStore,
        rem: Reminder,
        log: Option<mpsc::UnboundedSender<String>>,
        speech: bool,
    ) {
        let delay_ms = (rem.fire_at - Utc::now()).num_milliseconds();
        if delay_ms <= 0 {
            return;
        }
        let delay = Duration::from_millis((delay_ms as u64).min(MAX_TIMER_MS));

        let timers = Arc::clone(&self.timers);
        let id = rem.id.clone();
        let task_id = rem.id.clone();

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            fire(&store, &rem, log.as_ref(), speech).await;
            timers.lock().await.remove(&task_id);
        });

        self.timers.lock().await.insert(id, handle);
    }

    /// Aborts the timer for `id`. Returns false when no timer was armed.
    pub async fn cancel(&self, id: &str) -> bool {
        match self.timers.lock().await.remove(id) {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    /// Re-arms timers for every persisted future reminder and returns how
    /// many were armed. Past records stay in storage but never fire.
    pub async fn rearm_all(
        &self,
        store: &DiaryStore,
        log: Option<mpsc::UnboundedSender<String>>,
        speech: bool,
    ) -> usize {
        let now = Utc::now();
        let mut armed = 0;
        for rem in store.load_reminders() {
            if rem.fire_at <= now {
                continue;
            }
            self.arm(store.clone(), rem, log.clone(), speech).await;
            armed += 1;
        }
        armed
    }

    pub async fn is_armed(&self, id: &str) -> bool {
        self.timers.lock().await.contains_key(id)
    }

    pub async fn armed_count(&self) -> usize {
        self.timers.lock().await.len()
    }

    /// Abort every armed timer without awaiting, for shutdown paths.
    pub fn kill_sync(&self) {
        if let Ok(mut guard) = self.timers.try_lock() {
            for (_, handle) in guard.drain() {
                handle.abort();
            }
        }
    }
}

/// Fires a reminder: notify, then remove the record so a repeat fire is
/// impossible. Falls back to a terminal alert when no desktop notifier
/// responds.
async fn fire(
    store: &DiaryStore,
    rem: &Reminder,
    log: Option<&mpsc::UnboundedSender<String>>,
    speech: bool,
) {
    if let Some(tx) = log {
        send_log(tx, "reminder", &format!("firing {}: {}", rem.id, rem.text));
    }

    if !notify::desktop_notify("Diary Reminder", &rem.text).await {
        notify::terminal_alert("Diary Reminder", &rem.text);
    }
    if speech {
        notify::speak(&rem.text);
    }

    let _ = store
        .update_reminders(|reminders| reminders.retain(|r| r.id != rem.id))
        .await;
}

// ── Commands ────────────────────────────────────────────────────────────────

/// Validates, persists and arms a new reminder. Rejections (unparseable or
/// non-future time) mutate nothing.
pub async fn set_reminder(app: &App, text: &str, when: &str) -> Result<Reminder> {
    let fire_at = reminder::parse_fire_at(when)?;
    let rem = Reminder::create(text, fire_at, Utc::now())?;

    app.store
        .update_reminders(|reminders| reminders.push(rem.clone()))
        .await?;

    app.scheduler
        .arm(app.store.clone(), rem.clone(), app.log_sender(), app.speech)
        .await;

    app.log(
        "reminder",
        &format!("set {} for {}", rem.id, rem.fire_at.to_rfc3339()),
    );
    Ok(rem)
}

/// Persisted reminders, soonest first.
pub fn list_reminders(app: &App) -> Vec<Reminder> {
    let mut reminders = app.store.load_reminders();
    reminders.sort_by_key(|r| r.fire_at);
    reminders
}

/// Cancels the timer first, then removes the record, so a stale fire is
/// impossible. Returns false when the id is unknown.
pub async fn delete_reminder(app: &App, id: &str) -> Result<bool> {
    app.scheduler.cancel(id).await;

    let removed = app
        .store
        .update_reminders(|reminders| {
            let before = reminders.len();
            reminders.retain(|r| r.id != id);
            before != reminders.len()
        })
        .await?;
    if !removed {
        return Ok(false);
    }

    app.log("reminder", &format!("deleted {id}"));
    Ok(true)
}
