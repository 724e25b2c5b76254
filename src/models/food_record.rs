use super::meal_type::MealType;
use crate::utils::time::now_local;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

/// Nutrient values of one recorded portion.
/// Macros are in grams, vitamins and minerals in mg/μg as labelled.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Nutrients {
    pub calories: f64,
    pub protein: f64,
    pub total_fat: f64,
    pub saturated_fat: f64,
    pub trans_fat: f64,
    pub unsaturated_fat: f64,
    pub carbohydrates: f64,
    pub sugar: f64,
    pub fiber: f64,

    pub vitamin_a: f64,  // μg
    pub vitamin_c: f64,  // mg
    pub vitamin_d: f64,  // μg
    pub vitamin_b1: f64, // mg
    pub vitamin_b2: f64, // mg

    pub calcium: f64,   // mg
    pub iron: f64,      // mg
    pub sodium: f64,    // mg
    pub potassium: f64, // mg
}

impl Nutrients {
    /// Protein + fat + carbohydrates, in grams.
    pub fn macro_total(&self) -> f64 {
        self.protein + self.total_fat + self.carbohydrates
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FoodRecord {
    pub id: i64,
    pub user_id: u64,
    pub record_time: NaiveDateTime, // ⇔ food_records.record_time (TEXT "YYYY-MM-DD HH:MM:SS")
    pub food_name: String,
    pub weight: f64,
    pub nutrients: Nutrients,
    pub meal_type: MealType, // ⇔ food_records.meal_type ('breakfast' | 'lunch' | 'dinner' | 'snack')
    pub notes: String,
    pub image_path: String,
    pub source: String,     // 'cli' | 'analysis'
    pub created_at: String, // ISO8601
}

impl FoodRecord {
    /// Record typed in from the CLI; `id = 0` until stored.
    pub fn new(
        user_id: u64,
        record_time: NaiveDateTime,
        food_name: &str,
        meal_type: MealType,
        nutrients: Nutrients,
    ) -> Self {
        Self {
            id: 0,
            user_id,
            record_time,
            food_name: food_name.trim().to_string(),
            weight: 0.0,
            nutrients,
            meal_type,
            notes: String::new(),
            image_path: String::new(),
            source: "cli".to_string(),
            created_at: now_local().format("%Y-%m-%dT%H:%M:%S").to_string(),
        }
    }

    pub fn day(&self) -> NaiveDate {
        self.record_time.date()
    }

    pub fn time_str(&self) -> String {
        self.record_time.format("%H:%M").to_string()
    }
}
