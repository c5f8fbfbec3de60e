use crate::error::Result;
use crate::store::HistoryEntry;
use crate::App;

/// Saved entries, newest first.
pub fn list(app: &App) -> Vec<HistoryEntry> {
    app.store.load_history()
}

/// Deletes the entry at `index`, preserving the order of the rest.
/// Out-of-range is a no-op returning false.
pub fn delete_at(app: &App, index: usize) -> Result<bool> {
    let mut history = app.store.load_history();
    if index >= history.len() {
        return Ok(false);
    }
    history.remove(index);
    app.store.save_history(&history)?;
    app.log("history", &format!("deleted entry #{index}"));
    Ok(true)
}

/// Clears all saved entries. Roast occurrences are kept: the leaderboard
/// is an all-time tally, not a view of the current history.
pub fn clear(app: &App) -> Result<()> {
    app.store.save_history(&[])?;
    app.log("history", "cleared all entries");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::entry::save_entry;
    use crate::roast::test_support::SequentialRoasts;
    use tempfile::TempDir;

    async fn app_with_entries(tmp: &TempDir, entries: &[&str]) -> App {
        let app = App::open(tmp.path())
            .await
            .without_speech()
            .with_source(Box::new(SequentialRoasts::new()));
        for entry in entries {
            save_entry(&app, entry).await.unwrap();
        }
        app
    }

    #[tokio::test]
    async fn delete_removes_exactly_one_and_keeps_order() {
        let tmp = TempDir::new().unwrap();
        let app = app_with_entries(&tmp, &["one", "two", "three"]).await;

        // Newest-first: ["three", "two", "one"]; drop the middle.
        assert!(delete_at(&app, 1).unwrap());

        let history = list(&app);
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].text, "three");
        assert_eq!(history[1].text, "one");
    }

    #[tokio::test]
    async fn out_of_range_delete_is_a_noop() {
        let tmp = TempDir::new().unwrap();
        let app = app_with_entries(&tmp, &["only one"]).await;

        assert!(!delete_at(&app, 5).unwrap());
        assert_eq!(list(&app).len(), 1);
    }

    #[tokio::test]
    async fn clear_keeps_roast_occurrences() {
        let tmp = TempDir::new().unwrap();
        let app = app_with_entries(&tmp, &["Hi there. How are you?"]).await;
        assert_eq!(app.store.load_roasts().len(), 2);

        clear(&app).unwrap();

        assert!(list(&app).is_empty());
        assert_eq!(app.store.load_roasts().len(), 2);
    }
}
