use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use quizdom_core::{
    AttemptEngine, AttemptState, AttemptStore, MemoryStore, Quiz, ScoreReport, SqliteStore,
};

use super::{default_db_path, load_bank};

#[derive(Args)]
pub struct TakeArgs {
    /// Quiz id from the bank
    pub quiz_id: String,
    /// Taker name; omit for an anonymous practice run
    #[arg(long)]
    pub taker: Option<String>,
    /// SQLite database path (defaults to the data directory; anonymous
    /// runs without this flag stay in memory)
    #[arg(long)]
    pub store: Option<PathBuf>,
    /// Quiz bank TOML file
    #[arg(long)]
    pub bank: Option<PathBuf>,
}

/// Store chosen for this run; anonymous runs default to memory so nothing
/// outlives the process unless a database path was given.
enum RunStore {
    Memory(MemoryStore),
    Sqlite(SqliteStore),
}

impl RunStore {
    fn open(args: &TakeArgs) -> Result<Self, Box<dyn std::error::Error>> {
        match (&args.store, &args.taker) {
            (Some(path), _) => Ok(RunStore::Sqlite(SqliteStore::open_at(path)?)),
            (None, Some(_)) => Ok(RunStore::Sqlite(SqliteStore::open_at(default_db_path()?)?)),
            (None, None) => Ok(RunStore::Memory(MemoryStore::new())),
        }
    }

    fn register(&self, quiz: &Quiz) -> Result<(), Box<dyn std::error::Error>> {
        match self {
            RunStore::Memory(store) => store.insert_quiz(quiz.clone()),
            RunStore::Sqlite(store) => store.insert_quiz(quiz)?,
        }
        Ok(())
    }

    fn as_store(&self) -> &dyn AttemptStore {
        match self {
            RunStore::Memory(store) => store,
            RunStore::Sqlite(store) => store,
        }
    }
}

pub fn run(args: TakeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let bank = load_bank(args.bank.as_deref())?;
    let quiz = bank
        .quiz(&args.quiz_id)
        .ok_or_else(|| format!("no quiz '{}' in the bank", args.quiz_id))?
        .clone();

    let run_store = RunStore::open(&args)?;
    run_store.register(&quiz)?;
    let store = run_store.as_store();

    let mut engine = AttemptEngine::new(quiz, args.taker.clone())?;
    engine.start(store)?;
    println!(
        "{} -- {} questions, {} seconds, pass at {}%",
        engine.quiz().title,
        engine.quiz().question_count(),
        engine.quiz().time_limit_secs,
        engine.quiz().passing_score,
    );
    println!("Answer with an option number; 'skip' moves on, 'submit' ends early.\n");

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let clock = Instant::now();
    let mut ticked: u64 = 0;

    let count = engine.quiz().question_count();
    'questions: for position in 0..count {
        engine.go_to(position);
        let question = match engine.current_question() {
            Some(q) => q.clone(),
            None => break,
        };
        println!(
            "[{}/{count}] ({}s left) {}",
            position + 1,
            engine.remaining_secs(),
            question.text
        );
        for (i, option) in question.options.iter().enumerate() {
            println!("  {}. {}", i + 1, option.text);
        }

        loop {
            print!("> ");
            io::stdout().flush()?;
            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                break 'questions; // stdin closed; submit what we have
            }

            // The prompt is the suspension point: account for the seconds
            // that passed while the taker was thinking.
            if drain_elapsed(&mut engine, store, &clock, &mut ticked)? {
                println!("\nTime is up.");
                break 'questions;
            }

            match line.trim() {
                "" | "skip" => continue 'questions,
                "submit" => break 'questions,
                "clear" => {
                    engine.select_answer(&question.id, None)?;
                    continue 'questions;
                }
                choice => match choice.parse::<usize>() {
                    Ok(n) if n >= 1 && n <= question.options.len() => {
                        engine.select_answer(&question.id, Some(&question.options[n - 1].id))?;
                        continue 'questions;
                    }
                    _ => {
                        println!("pick 1-{}, 'skip', 'clear' or 'submit'", question.options.len());
                    }
                },
            }
        }
    }

    let report = if engine.state() == AttemptState::Submitted {
        engine
            .result()
            .ok_or("submitted attempt has no result")?
    } else {
        engine.submit(store)?
    };
    print_report(&report);
    Ok(())
}

/// Feed the engine one tick per elapsed wall-clock second. Returns true
/// once the attempt is submitted (the expiring tick auto-submits).
fn drain_elapsed(
    engine: &mut AttemptEngine,
    store: &dyn AttemptStore,
    clock: &Instant,
    ticked: &mut u64,
) -> Result<bool, Box<dyn std::error::Error>> {
    let elapsed = clock.elapsed().as_secs();
    while *ticked < elapsed {
        *ticked += 1;
        engine.tick(store)?;
        if engine.state() == AttemptState::Submitted {
            return Ok(true);
        }
    }
    Ok(false)
}

fn print_report(report: &ScoreReport) {
    println!();
    match serde_json::to_string_pretty(report) {
        Ok(json) => println!("{json}"),
        Err(_) => println!("{report:?}"),
    }
    if report.passed {
        println!("Passed with {}%.", report.percentage);
    } else {
        println!("Failed at {}%.", report.percentage);
    }
}
