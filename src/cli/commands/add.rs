use crate::cli::parser::{Commands, NutrientArgs};
use crate::config::Config;
use crate::core::food::{FoodChanges, FoodLogic};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::meal_type::MealType;
use crate::utils::time::{parse_optional_timestamp, parse_timestamp};

/// Parse a `--meal` value.
pub fn parse_meal(raw: &str) -> AppResult<MealType> {
    MealType::mt_from_str(raw).ok_or_else(|| AppError::InvalidMealType(raw.to_string()))
}

fn changes_from_args(
    food: &Option<String>,
    meal: &Option<String>,
    at: &Option<String>,
    nutrients: &NutrientArgs,
    notes: &Option<String>,
) -> AppResult<FoodChanges> {
    let meal_type = meal.as_deref().map(parse_meal).transpose()?;
    let record_time = at
        .as_deref()
        .map(|s| parse_timestamp(s).ok_or_else(|| AppError::InvalidTime(s.to_string())))
        .transpose()?;

    Ok(FoodChanges {
        food_name: food.clone(),
        meal_type,
        record_time,
        weight: nutrients.weight,
        calories: nutrients.calories,
        protein: nutrients.protein,
        fat: nutrients.fat,
        carbs: nutrients.carbs,
        sugar: nutrients.sugar,
        fiber: nutrients.fiber,
        notes: notes.clone(),
    })
}

/// Record a meal or edit an existing record.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        food,
        meal,
        at,
        nutrients,
        notes,
        edit,
    } = cmd
    {
        let user_id = cfg.default_user;
        let changes = changes_from_args(food, meal, at, nutrients, notes)?;
        let pool = DbPool::new(&cfg.database)?;

        //
        // EDIT MODE
        //
        if let Some(id) = edit {
            return FoodLogic::edit(&pool, cfg, user_id, *id, &changes);
        }

        //
        // INSERT MODE
        //
        let name = food
            .as_deref()
            .ok_or_else(|| AppError::Other("Missing food name.".into()))?;
        let meal_type = changes
            .meal_type
            .ok_or_else(|| AppError::InvalidMealType("missing --meal".into()))?;
        let record_time = parse_optional_timestamp(at.as_ref())?;

        let record =
            FoodLogic::record_from_changes(user_id, name, meal_type, record_time, &changes);
        FoodLogic::add(&pool, cfg, record)?;
    }

    Ok(())
}
