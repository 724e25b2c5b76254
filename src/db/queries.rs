use crate::errors::{AppError, AppResult};
use crate::models::check_in::CheckIn;
use crate::models::food_record::{FoodRecord, Nutrients};
use crate::models::meal_type::MealType;
use crate::utils::date::Period;
use crate::utils::time::{format_timestamp, now_local, parse_timestamp};
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{Connection, OptionalExtension, Result, Row, params, params_from_iter};

const FOOD_COLUMNS: &str = "id, user_id, record_time, food_name, weight,
    calories, protein, total_fat, saturated_fat, trans_fat, unsaturated_fat,
    carbohydrates, sugar, fiber,
    vitamin_a, vitamin_c, vitamin_d, vitamin_b1, vitamin_b2,
    calcium, iron, sodium, potassium,
    meal_type, notes, image_path, source, created_at";

/// SQLite integers are signed; ids above `i64::MAX` never occur in practice.
pub(crate) fn sql_id(id: u64) -> i64 {
    i64::try_from(id).unwrap_or(i64::MAX)
}

pub(crate) fn get_id(row: &Row, column: &str) -> Result<u64> {
    let raw: i64 = row.get(column)?;
    Ok(u64::try_from(raw).unwrap_or_default())
}

pub(crate) fn parse_ts_column(row: &Row, column: &str) -> Result<NaiveDateTime> {
    let raw: String = row.get(column)?;
    parse_timestamp(&raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidTime(raw.clone())),
        )
    })
}

pub fn map_food_row(row: &Row) -> Result<FoodRecord> {
    let meal_str: String = row.get("meal_type")?;
    let meal_type = MealType::from_db_str(&meal_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidMealType(meal_str.clone())),
        )
    })?;

    Ok(FoodRecord {
        id: row.get("id")?,
        user_id: get_id(row, "user_id")?,
        record_time: parse_ts_column(row, "record_time")?,
        food_name: row.get("food_name")?,
        weight: row.get("weight")?,
        nutrients: Nutrients {
            calories: row.get("calories")?,
            protein: row.get("protein")?,
            total_fat: row.get("total_fat")?,
            saturated_fat: row.get("saturated_fat")?,
            trans_fat: row.get("trans_fat")?,
            unsaturated_fat: row.get("unsaturated_fat")?,
            carbohydrates: row.get("carbohydrates")?,
            sugar: row.get("sugar")?,
            fiber: row.get("fiber")?,
            vitamin_a: row.get("vitamin_a")?,
            vitamin_c: row.get("vitamin_c")?,
            vitamin_d: row.get("vitamin_d")?,
            vitamin_b1: row.get("vitamin_b1")?,
            vitamin_b2: row.get("vitamin_b2")?,
            calcium: row.get("calcium")?,
            iron: row.get("iron")?,
            sodium: row.get("sodium")?,
            potassium: row.get("potassium")?,
        },
        meal_type,
        notes: row.get("notes")?,
        image_path: row.get("image_path")?,
        source: row.get("source")?,
        created_at: row.get("created_at")?,
    })
}

pub fn map_check_in_row(row: &Row) -> Result<CheckIn> {
    Ok(CheckIn {
        id: row.get("id")?,
        user_id: get_id(row, "user_id")?,
        check_in_at: parse_ts_column(row, "check_in_at")?,
        content: row.get("content")?,
    })
}

// ---------------------------
// Food records
// ---------------------------

/// Insert a food record and return its new id.
pub fn insert_food_record(conn: &Connection, rec: &FoodRecord) -> AppResult<i64> {
    let n = &rec.nutrients;
    conn.execute(
        "INSERT INTO food_records (user_id, record_time, food_name, weight,
            calories, protein, total_fat, saturated_fat, trans_fat, unsaturated_fat,
            carbohydrates, sugar, fiber,
            vitamin_a, vitamin_c, vitamin_d, vitamin_b1, vitamin_b2,
            calcium, iron, sodium, potassium,
            meal_type, notes, image_path, source, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14,
                 ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24, ?25, ?26, ?27)",
        params![
            sql_id(rec.user_id),
            format_timestamp(&rec.record_time),
            rec.food_name,
            rec.weight,
            n.calories,
            n.protein,
            n.total_fat,
            n.saturated_fat,
            n.trans_fat,
            n.unsaturated_fat,
            n.carbohydrates,
            n.sugar,
            n.fiber,
            n.vitamin_a,
            n.vitamin_c,
            n.vitamin_d,
            n.vitamin_b1,
            n.vitamin_b2,
            n.calcium,
            n.iron,
            n.sodium,
            n.potassium,
            rec.meal_type.to_db_str(),
            rec.notes,
            rec.image_path,
            rec.source,
            rec.created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Update a food record (all fields except id, user and creation time).
pub fn update_food_record(conn: &Connection, rec: &FoodRecord) -> AppResult<()> {
    let n = &rec.nutrients;
    conn.execute(
        "UPDATE food_records
         SET record_time = ?1, food_name = ?2, weight = ?3,
             calories = ?4, protein = ?5, total_fat = ?6, saturated_fat = ?7,
             trans_fat = ?8, unsaturated_fat = ?9, carbohydrates = ?10,
             sugar = ?11, fiber = ?12,
             vitamin_a = ?13, vitamin_c = ?14, vitamin_d = ?15,
             vitamin_b1 = ?16, vitamin_b2 = ?17,
             calcium = ?18, iron = ?19, sodium = ?20, potassium = ?21,
             meal_type = ?22, notes = ?23, image_path = ?24
         WHERE id = ?25",
        params![
            format_timestamp(&rec.record_time),
            rec.food_name,
            rec.weight,
            n.calories,
            n.protein,
            n.total_fat,
            n.saturated_fat,
            n.trans_fat,
            n.unsaturated_fat,
            n.carbohydrates,
            n.sugar,
            n.fiber,
            n.vitamin_a,
            n.vitamin_c,
            n.vitamin_d,
            n.vitamin_b1,
            n.vitamin_b2,
            n.calcium,
            n.iron,
            n.sodium,
            n.potassium,
            rec.meal_type.to_db_str(),
            rec.notes,
            rec.image_path,
            rec.id,
        ],
    )?;
    Ok(())
}

pub fn load_food_record(conn: &Connection, id: i64) -> AppResult<Option<FoodRecord>> {
    let sql = format!("SELECT {} FROM food_records WHERE id = ?1", FOOD_COLUMNS);
    let rec = conn.query_row(&sql, [id], map_food_row).optional()?;
    Ok(rec)
}

/// Whole history of one user, oldest first.
pub fn load_user_food_records(conn: &Connection, user_id: u64) -> AppResult<Vec<FoodRecord>> {
    let sql = format!(
        "SELECT {} FROM food_records WHERE user_id = ?1 ORDER BY record_time ASC, id ASC",
        FOOD_COLUMNS
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([sql_id(user_id)], map_food_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Food records of one user filtered by period and meal type.
pub fn load_food_records_filtered(
    conn: &Connection,
    user_id: u64,
    period: Option<&Period>,
    meal: Option<MealType>,
) -> AppResult<Vec<FoodRecord>> {
    let mut sql = format!("SELECT {} FROM food_records WHERE user_id = ?", FOOD_COLUMNS);
    let mut args: Vec<String> = vec![user_id.to_string()];

    if let Some(p) = period {
        let (cond, mut p_args) = p.sql_condition("record_time");
        sql.push_str(" AND ");
        sql.push_str(&cond);
        args.append(&mut p_args);
    }

    if let Some(m) = meal {
        sql.push_str(" AND meal_type = ?");
        args.push(m.to_db_str().to_string());
    }

    sql.push_str(" ORDER BY record_time ASC, id ASC");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(args.iter()), map_food_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn count_food_records_on(conn: &Connection, user_id: u64, day: &NaiveDate) -> AppResult<i64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM food_records WHERE user_id = ?1 AND date(record_time) = ?2",
        params![sql_id(user_id), day.format("%Y-%m-%d").to_string()],
        |row| row.get(0),
    )?;
    Ok(count)
}

pub fn delete_food_record(conn: &Connection, id: i64) -> AppResult<()> {
    conn.execute("DELETE FROM food_records WHERE id = ?1", [id])?;
    Ok(())
}

// ---------------------------
// Check-ins
// ---------------------------

pub fn insert_check_in(conn: &Connection, ci: &CheckIn) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO check_ins (user_id, check_in_at, day, content, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            sql_id(ci.user_id),
            format_timestamp(&ci.check_in_at),
            ci.day_str(),
            ci.content,
            format_timestamp(&now_local()),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn has_check_in_on(conn: &Connection, user_id: u64, day: &NaiveDate) -> AppResult<bool> {
    let mut stmt = conn.prepare("SELECT 1 FROM check_ins WHERE user_id = ?1 AND day = ?2")?;
    let exists = stmt.exists(params![sql_id(user_id), day.format("%Y-%m-%d").to_string()])?;
    Ok(exists)
}

/// Whole check-in history of one user, oldest first.
pub fn load_user_check_ins(conn: &Connection, user_id: u64) -> AppResult<Vec<CheckIn>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, check_in_at, content FROM check_ins
         WHERE user_id = ?1
         ORDER BY check_in_at ASC",
    )?;
    let rows = stmt.query_map([sql_id(user_id)], map_check_in_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
