//! Payload returned by the food image analysis service.
//! Only deserialized: fields not present in the JSON default to zero.

use super::food_record::{FoodRecord, Nutrients};
use super::meal_type::MealType;
use chrono::NaiveDateTime;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FoodAnalysis {
    pub has_food: bool,
    pub food_type: String,
    pub weight: f64,
    pub nutrition: Nutrition,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Nutrition {
    pub calories: f64,
    pub protein: f64,
    pub total_fat: f64,
    pub saturated_fat: f64,
    pub trans_fat: f64,
    pub unsaturated_fat: f64,
    pub carbohydrates: f64,
    pub sugar: f64,
    pub fiber: f64,
    pub vitamins: Vitamins,
    pub minerals: Minerals,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Vitamins {
    pub vitamin_a: f64,
    pub vitamin_c: f64,
    pub vitamin_d: f64,
    pub vitamin_b: VitaminB,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VitaminB {
    pub b1: f64,
    pub b2: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Minerals {
    pub calcium: f64,
    pub iron: f64,
    pub sodium: f64,
    pub potassium: f64,
}

impl FoodAnalysis {
    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    /// Build the food record this analysis describes.
    pub fn to_record(
        &self,
        user_id: u64,
        record_time: NaiveDateTime,
        meal_type: MealType,
        notes: &str,
    ) -> FoodRecord {
        let n = &self.nutrition;
        let nutrients = Nutrients {
            calories: n.calories,
            protein: n.protein,
            total_fat: n.total_fat,
            saturated_fat: n.saturated_fat,
            trans_fat: n.trans_fat,
            unsaturated_fat: n.unsaturated_fat,
            carbohydrates: n.carbohydrates,
            sugar: n.sugar,
            fiber: n.fiber,
            vitamin_a: n.vitamins.vitamin_a,
            vitamin_c: n.vitamins.vitamin_c,
            vitamin_d: n.vitamins.vitamin_d,
            vitamin_b1: n.vitamins.vitamin_b.b1,
            vitamin_b2: n.vitamins.vitamin_b.b2,
            calcium: n.minerals.calcium,
            iron: n.minerals.iron,
            sodium: n.minerals.sodium,
            potassium: n.minerals.potassium,
        };

        let mut record = FoodRecord::new(user_id, record_time, &self.food_type, meal_type, nutrients);
        record.weight = self.weight;
        record.notes = notes.to_string();
        record.source = "analysis".to_string();
        record
    }
}
