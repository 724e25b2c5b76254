use crate::config::Config;
use crate::core::achievement::run_achievement_check;
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::db::queries::{
    delete_food_record, insert_food_record, load_food_record, update_food_record,
};
use crate::errors::{AppError, AppResult};
use crate::models::analysis::FoodAnalysis;
use crate::models::food_record::{FoodRecord, Nutrients};
use crate::models::meal_type::MealType;
use crate::ui::messages::success;
use chrono::NaiveDateTime;

/// Fields given on the command line; `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct FoodChanges {
    pub food_name: Option<String>,
    pub meal_type: Option<MealType>,
    pub record_time: Option<NaiveDateTime>,
    pub weight: Option<f64>,
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub fat: Option<f64>,
    pub carbs: Option<f64>,
    pub sugar: Option<f64>,
    pub fiber: Option<f64>,
    pub notes: Option<String>,
}

impl FoodChanges {
    pub fn is_empty(&self) -> bool {
        self.food_name.is_none()
            && self.meal_type.is_none()
            && self.record_time.is_none()
            && self.weight.is_none()
            && self.calories.is_none()
            && self.protein.is_none()
            && self.fat.is_none()
            && self.carbs.is_none()
            && self.sugar.is_none()
            && self.fiber.is_none()
            && self.notes.is_none()
    }

    pub fn apply_to(&self, rec: &mut FoodRecord) {
        if let Some(name) = &self.food_name {
            rec.food_name = name.trim().to_string();
        }
        if let Some(meal) = self.meal_type {
            rec.meal_type = meal;
        }
        if let Some(at) = self.record_time {
            rec.record_time = at;
        }
        if let Some(notes) = &self.notes {
            rec.notes = notes.clone();
        }

        let n = &mut rec.nutrients;
        let fields: [(Option<f64>, &mut f64); 6] = [
            (self.calories, &mut n.calories),
            (self.protein, &mut n.protein),
            (self.fat, &mut n.total_fat),
            (self.carbs, &mut n.carbohydrates),
            (self.sugar, &mut n.sugar),
            (self.fiber, &mut n.fiber),
        ];
        for (value, slot) in fields {
            if let Some(v) = value {
                *slot = v;
            }
        }

        if let Some(w) = self.weight {
            rec.weight = w;
        }
    }
}

/// High-level business logic for food records.
pub struct FoodLogic;

impl FoodLogic {
    /// Store a new record and check achievements. Returns the new id.
    pub fn add(pool: &DbPool, cfg: &Config, mut record: FoodRecord) -> AppResult<i64> {
        if record.food_name.is_empty() {
            return Err(AppError::Other("Food name cannot be empty".into()));
        }

        record.id = insert_food_record(&pool.conn, &record)?;

        ttlog_quiet(
            &pool.conn,
            "add",
            &format!("food {}", record.id),
            &format!(
                "{} ({}) at {}",
                record.food_name,
                record.meal_type.to_db_str(),
                record.record_time
            ),
        );

        success(format!(
            "Recorded {} #{}: {} at {}.",
            record.meal_type.mt_as_str().to_lowercase(),
            record.id,
            record.food_name,
            record.record_time.format("%Y-%m-%d %H:%M")
        ));

        run_achievement_check(pool, cfg, record.user_id);

        Ok(record.id)
    }

    /// Build a record from command-line fields.
    pub fn record_from_changes(
        user_id: u64,
        food_name: &str,
        meal_type: MealType,
        record_time: NaiveDateTime,
        changes: &FoodChanges,
    ) -> FoodRecord {
        let mut rec = FoodRecord::new(
            user_id,
            record_time,
            food_name,
            meal_type,
            Nutrients::default(),
        );
        changes.apply_to(&mut rec);
        rec
    }

    /// Edit one of the user's records, then check achievements.
    pub fn edit(
        pool: &DbPool,
        cfg: &Config,
        user_id: u64,
        id: i64,
        changes: &FoodChanges,
    ) -> AppResult<()> {
        let mut rec = Self::owned_record(pool, user_id, id)?;

        if changes.is_empty() {
            return Err(AppError::Other(
                "Nothing to do: specify at least one field to change.".into(),
            ));
        }

        changes.apply_to(&mut rec);
        update_food_record(&pool.conn, &rec)?;

        ttlog_quiet(
            &pool.conn,
            "edit",
            &format!("food {}", id),
            &format!("{} ({}) at {}", rec.food_name, rec.meal_type.to_db_str(), rec.record_time),
        );
        success(format!("✏️ Food record #{} updated.", id));

        run_achievement_check(pool, cfg, user_id);
        Ok(())
    }

    /// Store the meal described by an analysis payload.
    pub fn import(
        pool: &DbPool,
        cfg: &Config,
        user_id: u64,
        analysis: &FoodAnalysis,
        meal_type: MealType,
        record_time: NaiveDateTime,
        notes: &str,
    ) -> AppResult<i64> {
        if !analysis.has_food {
            return Err(AppError::NoFoodDetected);
        }

        let record = analysis.to_record(user_id, record_time, meal_type, notes);
        Self::add(pool, cfg, record)
    }

    /// Remove one of the user's records. Earned achievements stay.
    pub fn delete(pool: &DbPool, user_id: u64, id: i64) -> AppResult<FoodRecord> {
        let rec = Self::owned_record(pool, user_id, id)?;
        delete_food_record(&pool.conn, id)?;

        ttlog_quiet(
            &pool.conn,
            "del",
            &format!("food {}", id),
            &format!("{} at {}", rec.food_name, rec.record_time),
        );
        Ok(rec)
    }

    fn owned_record(pool: &DbPool, user_id: u64, id: i64) -> AppResult<FoodRecord> {
        match load_food_record(&pool.conn, id)? {
            Some(rec) if rec.user_id == user_id => Ok(rec),
            _ => Err(AppError::FoodRecordNotFound(id)),
        }
    }
}
