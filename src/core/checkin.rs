use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::db::queries::{count_food_records_on, has_check_in_on, insert_check_in};
use crate::errors::{AppError, AppResult};
use crate::models::check_in::CheckIn;
use chrono::NaiveDateTime;

pub struct CheckInLogic;

impl CheckInLogic {
    /// Record the daily check-in.
    ///
    /// One per user and calendar day, and only once something was eaten
    /// that day.
    pub fn apply(pool: &DbPool, user_id: u64, at: NaiveDateTime, content: &str) -> AppResult<CheckIn> {
        let day = at.date();
        let day_str = day.format("%Y-%m-%d").to_string();

        if has_check_in_on(&pool.conn, user_id, &day)? {
            return Err(AppError::AlreadyCheckedIn {
                user_id,
                day: day_str,
            });
        }

        if count_food_records_on(&pool.conn, user_id, &day)? == 0 {
            return Err(AppError::NoFoodRecordsForDay(day_str));
        }

        let mut ci = CheckIn::new(user_id, at, content);
        ci.id = insert_check_in(&pool.conn, &ci)?;

        ttlog_quiet(
            &pool.conn,
            "checkin",
            &format!("user {}", user_id),
            &format!("checked in on {}", day_str),
        );

        Ok(ci)
    }
}
