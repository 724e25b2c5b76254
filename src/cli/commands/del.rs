use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::food::FoodLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

use std::io::{self, Write};

/// Ask a yes/no confirmation from the user
pub(crate) fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { id } = cmd {
        let prompt = format!(
            "Delete food record #{}? Achievements already earned are kept.",
            id
        );

        if !ask_confirmation(&prompt) {
            info("Operation cancelled.");
            return Ok(());
        }

        let pool = DbPool::new(&cfg.database)?;
        let rec = FoodLogic::delete(&pool, cfg.default_user, *id)?;

        success(format!(
            "Food record #{} ({}, {}) has been deleted.",
            id,
            rec.food_name,
            rec.record_time.format("%Y-%m-%d %H:%M")
        ));
    }

    Ok(())
}
