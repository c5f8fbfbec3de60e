use chrono::Utc;

use crate::error::{DiaryError, Result};
use crate::notify;
use crate::roast;
use crate::store::HistoryEntry;
use crate::util;
use crate::App;

/// Hard cap on entry length. Longer input is rejected, never truncated.
pub const WORD_LIMIT: usize = 30;

/// What a successful save produced.
#[derive(Clone, Debug)]
pub struct SaveOutcome {
    /// The entry with one roast appended after every sentence chunk.
    pub roasted_text: String,
    /// The roasts, in chunk order.
    pub picks: Vec<String>,
    /// The entry mentioned being bored; the surface turns this into a
    /// touch-grass callout.
    pub touch_grass: bool,
}

/// Roasts and persists one diary entry.
///
/// Rejections (empty input, over the word limit) mutate nothing. Every
/// sentence chunk draws one roast, spoken best-effort and appended to the
/// occurrence collection; the original entry is saved to history once,
/// newest-first.
pub async fn save_entry(app: &App, entry: &str) -> Result<SaveOutcome> {
    let entry = entry.trim();
    if entry.is_empty() {
        return Err(DiaryError::EmptyEntry);
    }

    let count = util::word_count(entry);
    if count > WORD_LIMIT {
        if app.speech {
            notify::speak("That's enough for today");
        }
        return Err(DiaryError::WordLimit {
            count,
            limit: WORD_LIMIT,
        });
    }

    let touch_grass = entry.to_lowercase().contains("bored");

    let roasted = {
        let mut source = app.source.lock().await;
        roast::roast_entry(entry, source.as_mut())
    };

    if app.speech {
        for pick in &roasted.picks {
            notify::speak(pick);
        }
    }

    let mut occurrences = app.store.load_roasts();
    occurrences.extend(roasted.picks.iter().cloned());
    app.store.save_roasts(&occurrences)?;

    let mut history = app.store.load_history();
    history.insert(
        0,
        HistoryEntry {
            text: entry.to_string(),
            created_at: Utc::now(),
        },
    );
    app.store.save_history(&history)?;

    app.log(
        "save",
        &format!("saved entry ({count} words, {} roasts)", roasted.picks.len()),
    );

    Ok(SaveOutcome {
        roasted_text: roasted.text,
        picks: roasted.picks,
        touch_grass,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roast::test_support::SequentialRoasts;
    use crate::roast::ROASTS;
    use tempfile::TempDir;

    async fn test_app(tmp: &TempDir) -> App {
        App::open(tmp.path())
            .await
            .without_speech()
            .with_source(Box::new(SequentialRoasts::new()))
    }

    #[tokio::test]
    async fn save_appends_one_history_record_and_one_roast_per_chunk() {
        let tmp = TempDir::new().unwrap();
        let app = test_app(&tmp).await;

        let outcome = save_entry(&app, "Hi there. How are you?").await.unwrap();

        assert_eq!(outcome.picks.len(), 2);
        assert_eq!(
            outcome.roasted_text,
            format!("Hi there. {} How are you? {}", ROASTS[0], ROASTS[1])
        );
        assert_eq!(app.store.load_history().len(), 1);
        assert_eq!(app.store.load_roasts().len(), 2);
    }

    #[tokio::test]
    async fn history_is_newest_first() {
        let tmp = TempDir::new().unwrap();
        let app = test_app(&tmp).await;

        save_entry(&app, "first entry").await.unwrap();
        save_entry(&app, "second entry").await.unwrap();

        let history = app.store.load_history();
        assert_eq!(history[0].text, "second entry");
        assert_eq!(history[1].text, "first entry");
    }

    #[tokio::test]
    async fn over_limit_entry_is_rejected_without_mutation() {
        let tmp = TempDir::new().unwrap();
        let app = test_app(&tmp).await;

        let long = vec!["x"; 31].join(" ");
        let err = save_entry(&app, &long).await.unwrap_err();

        assert!(matches!(err, DiaryError::WordLimit { count: 31, limit: 30 }));
        assert!(app.store.load_history().is_empty());
        assert!(app.store.load_roasts().is_empty());
    }

    #[tokio::test]
    async fn exactly_thirty_words_saves() {
        let tmp = TempDir::new().unwrap();
        let app = test_app(&tmp).await;

        let entry = vec!["word"; 30].join(" ");
        save_entry(&app, &entry).await.unwrap();
        assert_eq!(app.store.load_history().len(), 1);
    }

    #[tokio::test]
    async fn empty_entry_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let app = test_app(&tmp).await;

        assert!(matches!(
            save_entry(&app, "   ").await,
            Err(DiaryError::EmptyEntry)
        ));
        assert!(app.store.load_history().is_empty());
    }

    #[tokio::test]
    async fn bored_entries_get_the_callout() {
        let tmp = TempDir::new().unwrap();
        let app = test_app(&tmp).await;

        let outcome = save_entry(&app, "I am bored today.").await.unwrap();
        assert!(outcome.touch_grass);

        // Saving still went through.
        assert_eq!(app.store.load_history().len(), 1);
    }
}
