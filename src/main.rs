//! roastdiary CLI entry point.
//!
//! Usage:
//!   roastdiary                       # Interactive diary session
//!   roastdiary --data-dir <path>     # Use a different data directory

use std::io::Write as _;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::Local;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use roastdiary::commands::{entry, history, reminders};
use roastdiary::store::DiaryStore;
use roastdiary::{leaderboard, util, App};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:?}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<ExitCode> {
    let args: Vec<String> = std::env::args().collect();
    let mut data_dir = DiaryStore::default_dir();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                return Ok(ExitCode::SUCCESS);
            }
            "--version" | "-V" => {
                println!("roastdiary {}", env!("CARGO_PKG_VERSION"));
                return Ok(ExitCode::SUCCESS);
            }
            "--data-dir" => {
                i += 1;
                let dir = args.get(i).context("--data-dir requires a path")?;
                data_dir = PathBuf::from(util::expand_tilde(dir));
            }
            arg if arg.starts_with("--data-dir=") => {
                let dir = &arg["--data-dir=".len()..];
                data_dir = PathBuf::from(util::expand_tilde(dir));
            }
            unknown => {
                eprintln!("Unknown option: {unknown}");
                eprintln!("Run 'roastdiary --help' for usage.");
                return Ok(ExitCode::FAILURE);
            }
        }
        i += 1;
    }

    let app = App::open(data_dir).await;
    let restored = app.restore_reminders().await;
    if restored > 0 {
        toast(&format!("Re-armed {restored} pending reminder(s)."));
    }

    println!("Roast diary — write something, get judged. Type 'help' for commands.");
    repl(&app).await?;

    app.scheduler.kill_sync();
    Ok(ExitCode::SUCCESS)
}

fn print_help() {
    println!(
        r#"roastdiary v{}

Usage:
  roastdiary [OPTIONS]             Interactive diary session

Options:
  --data-dir <path>                Data directory (default: ~/.roastdiary)
  -h, --help                       Show this help
  -V, --version                    Show version

Session commands:
  save <text>                      Save an entry (max {} words) and get roasted
  erase                            Discard whatever you were about to write
  history                          List saved entries, newest first
  delete <n>                       Delete history entry number n
  clear                            Delete all history (asks first)
  leaderboard | lb                 Most-used roasts, ranked
  remind <when> <text>             Schedule a reminder (e.g. 2026-09-01T09:00)
  reminders                        List upcoming reminders
  unremind <id>                    Delete a reminder
  quit                             Leave
"#,
        env!("CARGO_PKG_VERSION"),
        entry::WORD_LIMIT,
    );
}

async fn repl(app: &App) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        prompt()?;
        let Some(line) = lines.next_line().await? else {
            break; // EOF
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (cmd, rest) = line.split_once(' ').unwrap_or((line, ""));
        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "save" => do_save(app, rest).await,
            "erase" => toast("Erased."),
            "history" => show_history(app),
            "delete" => do_delete(app, rest),
            "clear" => do_clear(app, &mut lines).await?,
            "leaderboard" | "lb" => show_leaderboard(app),
            "remind" => do_remind(app, rest).await,
            "reminders" => show_reminders(app).await,
            "unremind" => do_unremind(app, rest).await,
            unknown => println!("Unknown command: {unknown} (try 'help')"),
        }
    }

    Ok(())
}

fn prompt() -> Result<()> {
    let mut out = std::io::stdout();
    write!(out, "> ")?;
    out.flush()?;
    Ok(())
}

/// Transient feedback line, the terminal stand-in for a toast.
fn toast(msg: &str) {
    println!("· {msg}");
}

async fn do_save(app: &App, text: &str) {
    match entry::save_entry(app, text).await {
        Ok(outcome) => {
            if outcome.touch_grass {
                toast("Go touch grass 🌱 or roast a friend!");
            }
            println!("{}", outcome.roasted_text);
            toast("Saved — roasted!");
        }
        Err(e) if e.is_rejection() => toast(&e.to_string()),
        Err(e) => eprintln!("Save failed: {e}"),
    }
}

fn show_history(app: &App) {
    let entries = history::list(app);
    if entries.is_empty() {
        toast("No saved entries yet.");
        return;
    }
    for (i, record) in entries.iter().enumerate() {
        let when = record.created_at.with_timezone(&Local);
        println!("{i:>3}. {}  ({})", record.text, when.format("%Y-%m-%d %H:%M"));
    }
}

fn do_delete(app: &App, arg: &str) {
    let Ok(index) = arg.trim().parse::<usize>() else {
        toast("Usage: delete <n>");
        return;
    };
    match history::delete_at(app, index) {
        Ok(true) => toast("Deleted."),
        Ok(false) => toast("No such entry."),
        Err(e) => eprintln!("Delete failed: {e}"),
    }
}

async fn do_clear(app: &App, lines: &mut Lines<BufReader<Stdin>>) -> Result<()> {
    print!("Delete all history? [y/N] ");
    std::io::stdout().flush()?;

    let confirmed = matches!(
        lines.next_line().await?.as_deref().map(str::trim),
        Some("y") | Some("Y") | Some("yes")
    );
    if !confirmed {
        toast("Kept.");
        return Ok(());
    }

    match history::clear(app) {
        Ok(()) => toast("History cleared."),
        Err(e) => eprintln!("Clear failed: {e}"),
    }
    Ok(())
}

fn show_leaderboard(app: &App) {
    let rows = leaderboard::compute(&app.store.load_roasts());
    if rows.is_empty() {
        toast("No roasts yet — write one!");
        return;
    }
    println!("Roast Leaderboard");
    for (i, row) in rows.iter().enumerate() {
        println!("  #{} {}  — {} pts", i + 1, row.roast, row.count);
    }
}

async fn do_remind(app: &App, rest: &str) {
    let rest = rest.trim();
    if rest.is_empty() {
        toast("Usage: remind <when> <text>");
        return;
    }
    let (when, text) = rest.split_once(' ').unwrap_or((rest, ""));

    match reminders::set_reminder(app, text, when).await {
        Ok(rem) => {
            let at = rem.fire_at.with_timezone(&Local);
            toast(&format!("Reminder set! [{}] at {}", rem.id, at.format("%Y-%m-%d %H:%M")));
        }
        Err(e) if e.is_rejection() => toast(&e.to_string()),
        Err(e) => eprintln!("Reminder failed: {e}"),
    }
}

async fn show_reminders(app: &App) {
    let listed = reminders::list_reminders(app);
    if listed.is_empty() {
        toast("No upcoming reminders.");
        return;
    }
    for rem in &listed {
        let at = rem.fire_at.with_timezone(&Local);
        let status = if app.scheduler.is_armed(&rem.id).await {
            "pending"
        } else {
            "inactive"
        };
        println!(
            "  [{}] {}  at {}  ({status})",
            rem.id,
            rem.text,
            at.format("%Y-%m-%d %H:%M")
        );
    }
}

async fn do_unremind(app: &App, arg: &str) {
    let id = arg.trim();
    if id.is_empty() {
        toast("Usage: unremind <id>");
        return;
    }
    match reminders::delete_reminder(app, id).await {
        Ok(true) => toast("Reminder deleted."),
        Ok(false) => toast("No such reminder."),
        Err(e) => eprintln!("Delete failed: {e}"),
    }
}
