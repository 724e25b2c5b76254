use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::checkin::CheckInLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::time::parse_optional_timestamp;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Checkin { content, at } = cmd {
        let at = parse_optional_timestamp(at.as_ref())?;

        let pool = DbPool::new(&cfg.database)?;
        let ci = CheckInLogic::apply(&pool, cfg.default_user, at, content)?;

        success(format!("Checked in for {}.", ci.day_str()));
    }

    Ok(())
}
