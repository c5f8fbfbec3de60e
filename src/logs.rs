use std::path::Path;

use chrono::Utc;
use tokio::sync::mpsc;

/// Async session logger that writes timestamped lines to
/// `<data-dir>/logs/latest.log`.
///
/// Uses an mpsc channel so callers never block on disk I/O — `log()` just
/// sends through the channel, and a background task does the actual writing.
pub struct SessionLogger {
    tx: mpsc::UnboundedSender<String>,
}

impl SessionLogger {
    /// Create a new session logger under the given data directory.
    ///
    /// - Creates `logs/` if it doesn't exist
    /// - Rotates `latest.log` → `session-{timestamp}.log`
    /// - Cleans up old sessions (keeps max 10)
    /// - Spawns a background writer task
    pub async fn new(data_dir: &Path) -> Option<Self> {
        let logs_dir = data_dir.join("logs");

        if tokio::fs::create_dir_all(&logs_dir).await.is_err() {
            return None;
        }

        let latest = logs_dir.join("latest.log");

        if latest.exists() {
            let ts = Utc::now().timestamp();
            let rotated = logs_dir.join(format!("session-{ts}.log"));
            let _ = tokio::fs::rename(&latest, &rotated).await;
        }

        cleanup_old_sessions(&logs_dir).await;

        let file = match tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&latest)
            .await
        {
            Ok(f) => f,
            Err(_) => return None,
        };

        let (tx, rx) = mpsc::unbounded_channel::<String>();
        tokio::spawn(writer_task(file, rx));

        let header = format!("=== Roast diary session — {} ===\n\n", timestamp());
        let _ = tx.send(header);

        Some(Self { tx })
    }

    /// Send a log line. Never blocks — just pushes to the channel.
    pub fn log(&self, prefix: &str, line: &str) {
        send_log(&self.tx, prefix, line);
    }

    /// Clone the sender so timer tasks can log without holding the app.
    pub fn sender(&self) -> mpsc::UnboundedSender<String> {
        self.tx.clone()
    }
}

/// Format a log line and send it through a sender. Convenience for
/// reminder timer tasks that carry a cloned sender.
pub fn send_log(tx: &mpsc::UnboundedSender<String>, prefix: &str, line: &str) {
    let formatted = format!("[{}] [{prefix}] {line}\n", timestamp());
    let _ = tx.send(formatted);
}

fn timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Background task that receives lines from the channel and writes to disk.
async fn writer_task(file: tokio::fs::File, mut rx: mpsc::UnboundedReceiver<String>) {
    use tokio::io::AsyncWriteExt;
    let mut writer = tokio::io::BufWriter::new(file);

    while let Some(line) = rx.recv().await {
        let _ = writer.write_all(line.as_bytes()).await;
        // Flush each line so logs are readable in real-time
        let _ = writer.flush().await;
    }

    let footer = format!("\n=== Session ended — {} ===\n", timestamp());
    let _ = writer.write_all(footer.as_bytes()).await;
    let _ = writer.flush().await;
}

/// Keep only the 10 most recent `session-*.log` files.
async fn cleanup_old_sessions(logs_dir: &Path) {
    let mut entries = match tokio::fs::read_dir(logs_dir).await {
        Ok(rd) => rd,
        Err(_) => return,
    };

    let mut session_files: Vec<std::path::PathBuf> = Vec::new();
    while let Ok(Some(entry)) = entries.next_entry().await {
        let name = entry.file_name();
        let name_str = name.to_string_lossy();
        if name_str.starts_with("session-") && name_str.ends_with(".log") {
            session_files.push(entry.path());
        }
    }

    // Timestamp is embedded in the name, so lexicographic = chronological
    session_files.sort();

    while session_files.len() > 10 {
        if let Some(oldest) = session_files.first() {
            let _ = tokio::fs::remove_file(oldest).await;
        }
        session_files.remove(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn writes_lines_to_latest_log() {
        let tmp = TempDir::new().unwrap();
        let logger = SessionLogger::new(tmp.path()).await.unwrap();
        logger.log("save", "roasted one entry");

        // Give the writer task a moment to flush.
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;

        let content =
            std::fs::read_to_string(tmp.path().join("logs").join("latest.log")).unwrap();
        assert!(content.contains("[save] roasted one entry"));
    }

    #[tokio::test]
    async fn rotates_previous_session() {
        let tmp = TempDir::new().unwrap();
        let logs_dir = tmp.path().join("logs");
        std::fs::create_dir_all(&logs_dir).unwrap();
        std::fs::write(logs_dir.join("latest.log"), "old session\n").unwrap();

        let _logger = SessionLogger::new(tmp.path()).await.unwrap();

        let rotated = std::fs::read_dir(&logs_dir)
            .unwrap()
            .flatten()
            .any(|e| e.file_name().to_string_lossy().starts_with("session-"));
        assert!(rotated);
    }
}
