pub mod attempts;
pub mod quiz;
pub mod take;

use std::path::{Path, PathBuf};

use quizdom_core::store::data_dir;
use quizdom_core::QuizBank;

/// Resolve the quiz bank: an explicit `--bank` file, then
/// `~/.config/quizdom/quizzes.toml`, then the compiled-in sample bank.
pub fn load_bank(bank_path: Option<&Path>) -> Result<QuizBank, Box<dyn std::error::Error>> {
    if let Some(path) = bank_path {
        return Ok(QuizBank::load(path)?);
    }
    if let Ok(dir) = data_dir() {
        let default = dir.join("quizzes.toml");
        if default.exists() {
            return Ok(QuizBank::load(default)?);
        }
    }
    Ok(QuizBank::builtin())
}

/// Default SQLite database path under the data directory.
pub fn default_db_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    Ok(data_dir()?.join("quizdom.db"))
}
