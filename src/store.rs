use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::error::Result;
use crate::reminder::Reminder;

const HISTORY_FILE: &str = "entry_history.json";
const ROASTS_FILE: &str = "roast_history.json";
const REMINDERS_FILE: &str = "reminders.json";

/// One saved diary submission, newest-first in storage.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// On-disk repository for the three diary collections.
///
/// Each collection lives in its own JSON file under the data directory.
/// A missing or corrupt file reads as an empty collection; reads never fail.
#[derive(Clone, Debug)]
pub struct DiaryStore {
    dir: PathBuf,
    /// Serializes reminder-file mutations. History and roasts are only
    /// written from the surface task, but reminder timer tasks rewrite
    /// `reminders.json` concurrently with it.
    reminders_lock: Arc<Mutex<()>>,
}

impl DiaryStore {
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            reminders_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Default data directory: `~/.roastdiary`, or relative to the working
    /// directory when no home can be resolved.
    pub fn default_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".roastdiary")
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn load_history(&self) -> Vec<HistoryEntry> {
        self.read_collection(HISTORY_FILE)
    }

    pub fn save_history(&self, entries: &[HistoryEntry]) -> Result<()> {
        self.write_collection(HISTORY_FILE, entries)
    }

    pub fn load_roasts(&self) -> Vec<String> {
        self.read_collection(ROASTS_FILE)
    }

    pub fn save_roasts(&self, roasts: &[String]) -> Result<()> {
        self.write_collection(ROASTS_FILE, roasts)
    }

    pub fn load_reminders(&self) -> Vec<Reminder> {
        self.read_collection(REMINDERS_FILE)
    }

    pub fn save_reminders(&self, reminders: &[Reminder]) -> Result<()> {
        self.write_collection(REMINDERS_FILE, reminders)
    }

    /// Applies `f` to the reminder collection under the store's write lock
    /// and persists the result. Every writer — the surface task and each
    /// firing timer — goes through here, so two load-modify-save cycles can
    /// never interleave and resurrect an already-removed record.
    pub async fn update_reminders<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&mut Vec<Reminder>) -> R,
    {
        let _guard = self.reminders_lock.lock().await;
        let mut reminders = self.load_reminders();
        let out = f(&mut reminders);
        self.save_reminders(&reminders)?;
        Ok(out)
    }

    fn read_collection<T: DeserializeOwned>(&self, file: &str) -> Vec<T> {
        let path = self.dir.join(file);
        let Ok(content) = std::fs::read_to_string(&path) else {
            return Vec::new();
        };
        serde_json::from_str(&content).unwrap_or_default()
    }

    fn write_collection<T: Serialize>(&self, file: &str, items: &[T]) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(items)?;
        std::fs::write(self.dir.join(file), json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::TempDir;

    fn entry(text: &str) -> HistoryEntry {
        HistoryEntry {
            text: text.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn missing_files_read_as_empty() {
        let tmp = TempDir::new().unwrap();
        let store = DiaryStore::open(tmp.path());
        assert!(store.load_history().is_empty());
        assert!(store.load_roasts().is_empty());
        assert!(store.load_reminders().is_empty());
    }

    #[test]
    fn corrupt_file_reads_as_empty() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("roast_history.json"), "{not json!").unwrap();
        let store = DiaryStore::open(tmp.path());
        assert!(store.load_roasts().is_empty());
    }

    #[test]
    fn history_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let store = DiaryStore::open(tmp.path());
        store.save_history(&[entry("second"), entry("first")]).unwrap();

        let loaded = store.load_history();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].text, "second");
        assert_eq!(loaded[1].text, "first");
    }

    #[test]
    fn collections_are_independent() {
        let tmp = TempDir::new().unwrap();
        let store = DiaryStore::open(tmp.path());

        store.save_roasts(&["Lukewarm tea at best.".to_string()]).unwrap();
        store.save_history(&[]).unwrap();

        // Clearing history leaves roast occurrences untouched.
        assert_eq!(store.load_roasts().len(), 1);
        assert!(store.load_history().is_empty());
    }
}
