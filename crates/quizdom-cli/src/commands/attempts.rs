use std::path::PathBuf;

use clap::Args;
use quizdom_core::{AttemptStore, SqliteStore};

use super::default_db_path;

#[derive(Args)]
pub struct AttemptsArgs {
    /// Quiz id
    pub quiz_id: String,
    /// Taker name; omit to list anonymous attempts
    #[arg(long)]
    pub taker: Option<String>,
    /// SQLite database path (defaults to the data directory)
    #[arg(long)]
    pub store: Option<PathBuf>,
}

pub fn run(args: AttemptsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let path = match args.store {
        Some(path) => path,
        None => default_db_path()?,
    };
    let store = SqliteStore::open_at(path)?;
    let attempts = store.list_attempts(&args.quiz_id, args.taker.as_deref())?;

    if attempts.is_empty() {
        println!("no attempts recorded");
        return Ok(());
    }

    println!("{}", serde_json::to_string_pretty(&attempts)?);
    let best = attempts
        .iter()
        .filter_map(|a| a.percentage)
        .max();
    if let Some(best) = best {
        println!("best: {best}%  ({} attempts)", attempts.len());
    }
    Ok(())
}
