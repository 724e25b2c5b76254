//! Achievement conditions.
//!
//! Every function here is pure and total: it only reads the history it is
//! given and answers `false` when there is not enough data. Timestamps are
//! local wall-clock times, so "day" and "hour" are the user's own.

use crate::models::check_in::CheckIn;
use crate::models::food_record::{FoodRecord, Nutrients};
use crate::utils::date::days_between;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::collections::{BTreeMap, BTreeSet, HashSet};

const SEVEN_DAYS_CHECK_INS: usize = 7;
const TWENTY_ONE_DAYS_CHECK_INS: usize = 21;
const REBOUND_STREAK: u32 = 3;
const EARLY_BREAKFAST_HOUR: u32 = 9;
const HIGH_PROTEIN_GRAMS: f64 = 20.0;
const LOW_CARB_GRAMS: f64 = 30.0;
const BALANCED_MIN_KCAL: f64 = 400.0;
const BALANCED_MAX_KCAL: f64 = 600.0;
const CONSISTENT_DAYS: u32 = 3;
const CONSISTENT_RECORDS_PER_DAY: usize = 2;
const WEEKLY_BALANCED_MEALS: usize = 3;
const WEEKLY_BREAKFASTS: usize = 4;
const LATE_NIGHT_HOUR: u32 = 21;
const WINDOW_DAYS: i64 = 7;
const DIVERSE_FOODS: usize = 20;

/// At least one food record.
pub fn first_food_record(records: &[FoodRecord]) -> bool {
    !records.is_empty()
}

/// Seven check-ins in total, consecutive or not.
pub fn seven_days_check_in(check_ins: &[CheckIn]) -> bool {
    check_ins.len() >= SEVEN_DAYS_CHECK_INS
}

/// Twenty-one check-ins in total, consecutive or not.
pub fn twenty_one_days_check_in(check_ins: &[CheckIn]) -> bool {
    check_ins.len() >= TWENTY_ONE_DAYS_CHECK_INS
}

/// After a break of at least one missed day, three consecutive check-in days.
///
/// A streak with no break before it does not count.
pub fn rebound_check_in(check_ins: &[CheckIn]) -> bool {
    if check_ins.len() < REBOUND_STREAK as usize {
        return false;
    }

    let days: Vec<NaiveDate> = check_ins
        .iter()
        .map(CheckIn::day)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut streak = 0;
    let mut has_break = false;

    for pair in days.windows(2) {
        let delta = days_between(pair[0], pair[1]);

        if delta == 1 {
            streak += 1;
            if has_break && streak >= REBOUND_STREAK {
                return true;
            }
        } else if delta > 1 {
            has_break = true;
            // the day after the break is the first of the new streak
            streak = 1;
        }
    }

    false
}

/// A breakfast recorded before 9 o'clock.
pub fn early_breakfast(records: &[FoodRecord]) -> bool {
    records
        .iter()
        .any(|r| r.meal_type.is_breakfast() && r.record_time.hour() < EARLY_BREAKFAST_HOUR)
}

/// A meal with at least 20 g of protein.
pub fn high_protein(records: &[FoodRecord]) -> bool {
    records
        .iter()
        .any(|r| r.nutrients.protein >= HIGH_PROTEIN_GRAMS)
}

/// Macro split within protein 10–35 %, fat 20–35 %, carbohydrates 45–65 %
/// of the macro grams. A portion without macros is never balanced.
pub fn has_balanced_ratio(n: &Nutrients) -> bool {
    let total = n.macro_total();
    if total <= 0.0 {
        return false;
    }

    let protein = n.protein / total;
    let fat = n.total_fat / total;
    let carbs = n.carbohydrates / total;

    (0.10..=0.35).contains(&protein)
        && (0.20..=0.35).contains(&fat)
        && (0.45..=0.65).contains(&carbs)
}

/// A 400–600 kcal meal with a balanced macro split.
pub fn balanced_meal(records: &[FoodRecord]) -> bool {
    records.iter().any(|r| {
        (BALANCED_MIN_KCAL..=BALANCED_MAX_KCAL).contains(&r.nutrients.calories)
            && has_balanced_ratio(&r.nutrients)
    })
}

/// A meal with less than 30 g of carbohydrates.
pub fn low_carb(records: &[FoodRecord]) -> bool {
    records
        .iter()
        .any(|r| r.nutrients.carbohydrates < LOW_CARB_GRAMS)
}

/// Three consecutive days with at least two records each.
///
/// Days are the distinct recording days in order. A day with fewer than two
/// records resets the run; a qualifying day that does not follow the
/// previous recording day starts a new run.
pub fn consistent_recording(records: &[FoodRecord]) -> bool {
    if records.len() < CONSISTENT_RECORDS_PER_DAY * CONSISTENT_DAYS as usize {
        return false;
    }

    let mut per_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for r in records {
        *per_day.entry(r.day()).or_default() += 1;
    }

    if per_day.len() < CONSISTENT_DAYS as usize {
        return false;
    }

    let mut run = 0;
    let mut prev: Option<NaiveDate> = None;

    for (&day, &count) in &per_day {
        if count >= CONSISTENT_RECORDS_PER_DAY {
            let adjacent = prev.is_none_or(|p| days_between(p, day) == 1);
            if adjacent {
                run += 1;
                if run >= CONSISTENT_DAYS {
                    return true;
                }
            } else {
                run = 1;
            }
        } else {
            run = 0;
        }
        prev = Some(day);
    }

    false
}

/// Records strictly after `now - 7 days`.
fn within_last_week(records: &[FoodRecord], now: NaiveDateTime) -> impl Iterator<Item = &FoodRecord> {
    let cutoff = now - Duration::days(WINDOW_DAYS);
    records.iter().filter(move |r| r.record_time > cutoff)
}

/// Three balanced meals (ratio only, any calories) in the last seven days.
pub fn balanced_weekly_meals(records: &[FoodRecord], now: NaiveDateTime) -> bool {
    within_last_week(records, now)
        .filter(|r| has_balanced_ratio(&r.nutrients))
        .count()
        >= WEEKLY_BALANCED_MEALS
}

/// Four breakfasts in the last seven days.
pub fn weekly_breakfast(records: &[FoodRecord], now: NaiveDateTime) -> bool {
    within_last_week(records, now)
        .filter(|r| r.meal_type.is_breakfast())
        .count()
        >= WEEKLY_BREAKFASTS
}

/// Nothing eaten between 21:00 and midnight on today and the six days
/// before. Without any food record there is nothing to reward.
pub fn no_late_night_eating(records: &[FoodRecord], now: NaiveDateTime) -> bool {
    if records.is_empty() {
        return false;
    }

    let Some(night_start) = NaiveTime::from_hms_opt(LATE_NIGHT_HOUR, 0, 0) else {
        return false;
    };
    let today = now.date();

    (0..WINDOW_DAYS).all(|back| {
        let day = today - Duration::days(back);
        let start = day.and_time(night_start);
        let end = (day + Duration::days(1)).and_time(NaiveTime::default());

        !records
            .iter()
            .any(|r| r.record_time >= start && r.record_time < end)
    })
}

/// Twenty different food names across the whole history.
pub fn diverse_foods(records: &[FoodRecord]) -> bool {
    records
        .iter()
        .map(|r| r.food_name.as_str())
        .collect::<HashSet<_>>()
        .len()
        >= DIVERSE_FOODS
}
