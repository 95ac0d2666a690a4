//! Chore Schedule - Main Entry Point
//!
//! This is the main entry point for the chore-schedule command line tool.
//! The actual implementation is in the `chore_schedule` library.

use anyhow::Result;
use chore_schedule::{ChoreHandler, local_date_today, validation};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Chore Schedule - due dates, recurrences and reminders for household chores
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the chores file (.json or .toml)
    #[arg(env = "CHORES_FILE")]
    file: PathBuf,

    /// Day to treat as today (YYYY-MM-DD); defaults to the local date
    #[arg(long, global = true)]
    as_of: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Chores relevant today, sorted by due date then priority
    Today {
        /// Include chores already marked done
        #[arg(long)]
        include_done: bool,
    },
    /// All chores, sorted by due date then priority
    List {
        /// Case-insensitive search in id, title and description
        #[arg(long)]
        keyword: Option<String>,
        /// Hide chores already marked done
        #[arg(long)]
        exclude_done: bool,
        /// Leave descriptions out of the output
        #[arg(long)]
        exclude_description: bool,
    },
    /// Chores the daily reminder sweep would notify about
    Reminders,
    /// Upcoming occurrences of one chore
    Occurrences {
        /// Chore ID
        id: String,
        /// First day to list (YYYY-MM-DD); defaults to today
        #[arg(long)]
        from: Option<String>,
        /// Last day to list (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
        /// Maximum number of occurrences to list
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
}

fn main() -> Result<()> {
    // Logs go to stderr so command output stays clean on stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    // "Today" is captured once for the whole invocation
    let today = match args.as_of {
        Some(ref date_str) => validation::parse_date_filter(date_str)?,
        None => local_date_today(),
    };
    tracing::debug!(file = %args.file.display(), %today, "loading chores");
    let handler = ChoreHandler::open(&args.file, today)?;

    let output = match args.command {
        Command::Today { include_done } => handler.handle_today(include_done),
        Command::List {
            keyword,
            exclude_done,
            exclude_description,
        } => handler.handle_list(keyword, exclude_done, exclude_description),
        Command::Reminders => handler.handle_reminders(),
        Command::Occurrences {
            id,
            from,
            to,
            limit,
        } => handler.handle_occurrences(&id, from, to, limit)?,
    };
    println!("{}", output.trim_end());
    Ok(())
}
