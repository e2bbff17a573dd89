use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "quizdom-cli", version, about = "Quizdom CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Quiz catalog
    Quiz {
        #[command(subcommand)]
        action: commands::quiz::QuizAction,
    },
    /// Take a quiz
    Take(commands::take::TakeArgs),
    /// Attempt history
    Attempts(commands::attempts::AttemptsArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Quiz { action } => commands::quiz::run(action),
        Commands::Take(args) => commands::take::run(args),
        Commands::Attempts(args) => commands::attempts::run(args),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
