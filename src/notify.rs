//! Best-effort speech and desktop notifications via system commands.
//! Every failure here degrades to a no-op or the terminal fallback.

use std::io::Write;

/// Speak `text` aloud through whichever system TTS command exists.
/// Fire-and-forget: spawn errors are ignored.
pub fn speak(text: &str) {
    if text.is_empty() {
        return;
    }

    #[cfg(target_os = "macos")]
    {
        let _ = tokio::process::Command::new("say").arg(text).spawn();
    }

    #[cfg(not(target_os = "macos"))]
    {
        // Try espeak first, then speech-dispatcher.
        if tokio::process::Command::new("espeak").arg(text).spawn().is_ok() {
            return;
        }
        let _ = tokio::process::Command::new("spd-say").arg(text).spawn();
    }
}

/// Attempt a desktop notification. Returns false when no notifier could be
/// run, so the caller can fall back to a terminal alert.
pub async fn desktop_notify(title: &str, body: &str) -> bool {
    #[cfg(target_os = "macos")]
    {
        let script = format!(
            "display notification \"{}\" with title \"{}\"",
            body.replace('"', "'"),
            title.replace('"', "'")
        );
        let result = tokio::process::Command::new("osascript")
            .args(["-e", &script])
            .output()
            .await;
        matches!(result, Ok(output) if output.status.success())
    }

    #[cfg(not(target_os = "macos"))]
    {
        let result = tokio::process::Command::new("notify-send")
            .args([title, body])
            .output()
            .await;
        matches!(result, Ok(output) if output.status.success())
    }
}

/// Terminal fallback when no desktop notifier is available: a bell plus a
/// highlighted line.
pub fn terminal_alert(title: &str, body: &str) {
    let mut out = std::io::stdout();
    let _ = writeln!(out, "\x07\n*** {title}: {body} ***");
    let _ = out.flush();
}
