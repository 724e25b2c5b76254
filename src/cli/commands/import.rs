use super::add::parse_meal;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::food::FoodLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::analysis::FoodAnalysis;
use crate::utils::path::expand_tilde;
use crate::utils::time::parse_optional_timestamp;
use std::fs;

/// Record a meal from an image-analysis JSON file.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Import {
        file,
        meal,
        at,
        notes,
    } = cmd
    {
        let meal_type = parse_meal(meal)?;
        let record_time = parse_optional_timestamp(at.as_ref())?;

        let content = fs::read_to_string(expand_tilde(file))?;
        let analysis = FoodAnalysis::from_json(&content)?;

        let pool = DbPool::new(&cfg.database)?;
        FoodLogic::import(
            &pool,
            cfg,
            cfg.default_user,
            &analysis,
            meal_type,
            record_time,
            notes.as_deref().unwrap_or(""),
        )?;
    }

    Ok(())
}
