use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::achievement::{AchievementEngine, run_achievement_check};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::table::{Column, Table};
use crate::utils::time::now_local;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Achievements { check } = cmd {
        let pool = DbPool::new(&cfg.database)?;
        let user_id = cfg.default_user;

        if *check {
            run_achievement_check(&pool, cfg, user_id);
        }

        let engine = AchievementEngine::new(&pool, cfg.page_size());
        let statuses = engine.status(user_id, now_local())?;

        let mut table = Table::new(vec![
            Column::new("ACHIEVEMENT"),
            Column::new("ITEM"),
            Column::new("OWNED"),
            Column::new("CONDITION"),
        ]);

        let mut owned_count = 0;
        for s in &statuses {
            if s.owned {
                owned_count += 1;
            }
            table.add_row(vec![
                s.achievement.catalog_name().to_string(),
                s.item_id
                    .map(|id| format!("#{}", id))
                    .unwrap_or_else(|| "unbound".to_string()),
                if s.owned { "yes" } else { "no" }.to_string(),
                if s.holds { "met" } else { "-" }.to_string(),
            ]);
        }

        println!("🏅 Achievements of user {}:\n", user_id);
        print!("{}", table.render(&cfg.separator_char));
        println!("\n{}/{} unlocked", owned_count, statuses.len());
    }

    Ok(())
}
