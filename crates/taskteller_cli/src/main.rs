//! Command-line entry point for the extraction pipeline.
//!
//! # Responsibility
//! - Feed a model reply and the original user text through `taskteller_core`.
//! - Print resolved tasks as JSON; optionally persist them to SQLite.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, FixedOffset, Local, TimeZone, Utc};
use clap::Parser;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use taskteller_core::db::open_db;
use taskteller_core::{
    build_daily_summary_message, build_extraction_prompt, build_user_message, default_log_level,
    extract_tasks, init_logging, SaveOutcome, SqliteTaskRepository, TaskService,
    DAILY_SUMMARY_PROMPT,
};

#[derive(Debug, Parser)]
#[command(name = "taskteller", version, about = "Turn a model reply into dated tasks")]
struct Args {
    /// Original text the user spoke or typed.
    #[arg(long, required_unless_present = "daily_summary")]
    input: Option<String>,

    /// File holding the raw model reply; stdin when omitted.
    #[arg(long)]
    reply_file: Option<PathBuf>,

    /// Reference instant (RFC 3339); the local clock when omitted.
    #[arg(long)]
    now: Option<String>,

    /// Owner identity used when saving tasks.
    #[arg(long, default_value = "local")]
    owner: String,

    /// SQLite database to save the resolved tasks into.
    #[arg(long)]
    db: Option<PathBuf>,

    /// trace|debug|info|warn|error; build-mode default when omitted.
    #[arg(long)]
    log_level: Option<String>,

    /// Absolute directory for rolling log files; logging is off when omitted.
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Print the prompt and user message for the model, then exit.
    #[arg(long)]
    print_prompt: bool,

    /// Print the daily summary request for today's saved tasks (needs --db), then exit.
    #[arg(long)]
    daily_summary: bool,

    /// Calendar events today, reported in the daily summary.
    #[arg(long, default_value_t = 0)]
    event_count: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(log_dir) = &args.log_dir {
        let level = args.log_level.as_deref().unwrap_or(default_log_level());
        let log_dir = log_dir
            .to_str()
            .context("log directory must be valid UTF-8")?;
        if let Err(err) = init_logging(level, log_dir) {
            bail!("failed to initialize logging: {err}");
        }
    }

    match &args.now {
        Some(raw) => {
            let now = DateTime::<FixedOffset>::parse_from_rfc3339(raw)
                .with_context(|| format!("invalid --now value `{raw}`"))?;
            run(&args, &now)
        }
        None => run(&args, &Local::now()),
    }
}

fn run<Tz: TimeZone>(args: &Args, now: &DateTime<Tz>) -> Result<()> {
    if args.daily_summary {
        return print_daily_summary(args, now);
    }

    let input = args.input.as_deref().unwrap_or_default();
    if args.print_prompt {
        println!("{}", build_extraction_prompt(now));
        println!();
        println!("{}", build_user_message(input));
        return Ok(());
    }

    let reply = read_reply(args)?;
    let tasks = extract_tasks(&reply, input, now);
    println!("{}", serde_json::to_string_pretty(&tasks)?);

    if let Some(db_path) = &args.db {
        let conn = open_db(db_path)
            .with_context(|| format!("failed to open task database `{}`", db_path.display()))?;
        let service = TaskService::new(SqliteTaskRepository::new(&conn));
        let report = service.save_all(&args.owner, tasks, Utc::now());

        for outcome in &report.outcomes {
            match outcome {
                SaveOutcome::Saved(task_id) => eprintln!("saved {task_id}"),
                SaveOutcome::Failed { task_id, error } => eprintln!("failed {task_id}: {error}"),
            }
        }
        eprintln!(
            "{} saved, {} failed",
            report.saved_count(),
            report.failed_count()
        );
    }

    log::logger().flush();
    Ok(())
}

fn print_daily_summary<Tz: TimeZone>(args: &Args, now: &DateTime<Tz>) -> Result<()> {
    let Some(db_path) = &args.db else {
        bail!("--daily-summary requires --db");
    };
    let conn = open_db(db_path)
        .with_context(|| format!("failed to open task database `{}`", db_path.display()))?;
    let service = TaskService::new(SqliteTaskRepository::new(&conn));
    let tasks = service
        .today(&args.owner, now)
        .context("failed to load today's tasks")?;

    println!("{DAILY_SUMMARY_PROMPT}");
    println!();
    println!("{}", build_daily_summary_message(&tasks, args.event_count));
    log::logger().flush();
    Ok(())
}

fn read_reply(args: &Args) -> Result<String> {
    match &args.reply_file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read reply file `{}`", path.display())),
        None => {
            let mut reply = String::new();
            io::stdin()
                .read_to_string(&mut reply)
                .context("failed to read reply from stdin")?;
            Ok(reply)
        }
    }
}
