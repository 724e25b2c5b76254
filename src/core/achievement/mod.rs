//! Achievement evaluation engine.
//!
//! One check is a straight pipeline over the user's full history:
//! gather the feeds into an [`EvaluationContext`], bind the catalog to the
//! conditions, evaluate the unowned ones and grant what newly holds.
//! Nothing is cached between checks.

pub mod catalog;
pub mod context;
pub mod evaluator;
pub mod granter;
pub mod predicates;
pub mod store;

use crate::config::Config;
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages;
use crate::utils::time::now_local;
use catalog::{Achievement, bind};
use chrono::NaiveDateTime;
use context::EvaluationContext;
use granter::GrantOutcome;
use store::AchievementStore;

/// What one check found and wrote.
#[derive(Debug, Default)]
pub struct AchievementRun {
    /// Conditions bound to a catalog item and evaluated.
    pub checked: usize,
    /// Newly satisfied item ids, ascending.
    pub newly_unlocked: Vec<u64>,
    /// Achievements with no matching catalog item.
    pub unbound: Vec<Achievement>,
    pub outcome: GrantOutcome,
}

/// State of one achievement for a user, as shown by `achievements`.
#[derive(Debug, Clone)]
pub struct AchievementStatus {
    pub achievement: Achievement,
    pub item_id: Option<u64>,
    pub owned: bool,
    pub holds: bool,
}

pub struct AchievementEngine<'s, S: AchievementStore + ?Sized> {
    store: &'s S,
    page_size: u32,
}

impl<'s, S: AchievementStore + ?Sized> AchievementEngine<'s, S> {
    pub fn new(store: &'s S, page_size: u32) -> Self {
        Self {
            store,
            page_size: page_size.max(1),
        }
    }

    /// Read every feed for `user_id`.
    pub fn gather(&self, user_id: u64, now: NaiveDateTime) -> AppResult<EvaluationContext> {
        EvaluationContext::gather(self.store, user_id, now, self.page_size)
    }

    /// Run the full pipeline. Only a failing feed is an `Err`; grant
    /// failures are reported in [`AchievementRun::outcome`].
    pub fn run(&self, user_id: u64, now: NaiveDateTime) -> AppResult<AchievementRun> {
        let ctx = self.gather(user_id, now)?;
        let table = bind(&ctx);

        if table.is_empty() {
            return Ok(AchievementRun {
                unbound: table.unbound,
                ..AchievementRun::default()
            });
        }

        let mut newly_unlocked: Vec<u64> = evaluator::evaluate(&table, &ctx.owned)
            .into_iter()
            .collect();
        newly_unlocked.sort_unstable();

        let outcome = granter::grant(self.store, user_id, &newly_unlocked, now);

        Ok(AchievementRun {
            checked: table.len(),
            newly_unlocked,
            unbound: table.unbound,
            outcome,
        })
    }

    /// Per-achievement view without granting anything.
    pub fn status(&self, user_id: u64, now: NaiveDateTime) -> AppResult<Vec<AchievementStatus>> {
        let ctx = self.gather(user_id, now)?;
        let table = bind(&ctx);

        Ok(Achievement::ALL
            .iter()
            .map(|&achievement| {
                let item_id = table.item_for(achievement);
                AchievementStatus {
                    achievement,
                    item_id,
                    owned: item_id.is_some_and(|id| ctx.owned.contains(&id)),
                    holds: achievement.holds(&ctx),
                }
            })
            .collect())
    }
}

/// Check and grant achievements after a food record was saved.
///
/// Never fails the caller: every outcome ends up on the console and in the
/// internal log.
pub fn run_achievement_check(pool: &DbPool, cfg: &Config, user_id: u64) {
    let engine = AchievementEngine::new(pool, cfg.page_size());
    let target = format!("user {}", user_id);

    let run = match engine.run(user_id, now_local()) {
        Ok(run) => run,
        Err(e) => {
            messages::warning(format!("Achievement check skipped: {}", e));
            ttlog_quiet(&pool.conn, "achievement", &target, &format!("check failed: {}", e));
            return;
        }
    };

    if cfg.warn_unbound_achievements && !run.unbound.is_empty() {
        let names: Vec<&str> = run.unbound.iter().map(|a| a.catalog_name()).collect();
        messages::warning(format!(
            "{} achievement(s) missing from the item catalog: {} (run `item --seed`)",
            names.len(),
            names.join(", ")
        ));
    }

    report_grants(pool, &target, &run.outcome);
}

fn report_grants(pool: &DbPool, target: &str, outcome: &GrantOutcome) {
    for owned in &outcome.granted {
        let name = crate::db::items::load_item(&pool.conn, owned.item_id)
            .ok()
            .flatten()
            .map(|i| i.name)
            .unwrap_or_else(|| format!("item {}", owned.item_id));

        messages::badge(format!("Achievement unlocked: {}", name));
        ttlog_quiet(
            &pool.conn,
            "achievement",
            target,
            &format!("granted '{}' (item {})", name, owned.item_id),
        );
    }

    if let Some(e) = &outcome.error {
        messages::warning(format!("Achievement grant interrupted: {}", e));
        ttlog_quiet(&pool.conn, "achievement", target, &format!("grant failed: {}", e));
    }
}
