use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{DiaryError, Result};

/// A user-scheduled one-shot notification. The record is removed when it
/// fires or when the user deletes it.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: String,
    pub text: String,
    pub fire_at: DateTime<Utc>,
}

impl Reminder {
    /// Builds a reminder after checking the firing time is strictly in the
    /// future relative to `now`.
    pub fn create(text: &str, fire_at: DateTime<Utc>, now: DateTime<Utc>) -> Result<Self> {
        if fire_at <= now {
            return Err(DiaryError::PastReminder);
        }
        let text = text.trim();
        let text = if text.is_empty() { "Diary Reminder" } else { text };
        Ok(Self {
            id: new_id(now),
            text: text.to_string(),
            fire_at,
        })
    }
}

fn new_id(now: DateTime<Utc>) -> String {
    let suffix: u16 = rand::thread_rng().gen();
    format!("r-{}-{:04x}", now.timestamp_millis(), suffix)
}

/// Parses a reminder time: RFC 3339, or a local wall-clock
/// `YYYY-MM-DDTHH:MM[:SS]` as produced by a datetime picker.
pub fn parse_fire_at(raw: &str) -> Result<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            if let Some(local) = Local.from_local_datetime(&naive).earliest() {
                return Ok(local.with_timezone(&Utc));
            }
        }
    }

    Err(DiaryError::BadTime(raw.to_string()))
}
