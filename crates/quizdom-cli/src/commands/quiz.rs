use std::path::PathBuf;

use clap::Subcommand;

use super::load_bank;

#[derive(Subcommand)]
pub enum QuizAction {
    /// List quizzes in the bank
    List {
        /// Quiz bank TOML file (defaults to the configured bank)
        #[arg(long)]
        bank: Option<PathBuf>,
    },
    /// Show one quiz, questions included
    Show {
        /// Quiz id
        id: String,
        #[arg(long)]
        bank: Option<PathBuf>,
    },
}

pub fn run(action: QuizAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        QuizAction::List { bank } => {
            let bank = load_bank(bank.as_deref())?;
            for quiz in bank.iter() {
                let status = if quiz.is_active { "open" } else { "closed" };
                println!(
                    "{:24} {:40} {:>4} questions  {:>4}s  pass {:>3}%  [{status}]",
                    quiz.id,
                    quiz.title,
                    quiz.question_count(),
                    quiz.time_limit_secs,
                    quiz.passing_score,
                );
            }
        }
        QuizAction::Show { id, bank } => {
            let bank = load_bank(bank.as_deref())?;
            let quiz = bank
                .quiz(&id)
                .ok_or_else(|| format!("no quiz '{id}' in the bank"))?;
            println!("{}", serde_json::to_string_pretty(quiz)?);
        }
    }
    Ok(())
}
