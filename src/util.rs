/// Expands a leading `~` in a path to the user's home directory.
/// Used for the `--data-dir` override.
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") || path == "~" {
        if let Some(home) = dirs::home_dir() {
            let rest = &path[1..];
            return home
                .join(rest.trim_start_matches('/'))
                .to_string_lossy()
                .to_string();
        }
    }
    path.to_string()
}

/// Counts words the way the save limit is enforced: whitespace-separated,
/// empty fragments ignored.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
