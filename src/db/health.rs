use crate::db::queries::{get_id, parse_ts_column, sql_id};
use crate::errors::AppResult;
use crate::models::health_state::{HealthMetrics, HealthState};
use crate::utils::date::Period;
use crate::utils::time::{format_timestamp, now_local};
use rusqlite::{Connection, OptionalExtension, Result, Row, params, params_from_iter};

const HEALTH_COLUMNS: &str = "id, user_id, record_time,
    height, weight, bmi, body_fat_percentage, temperature,
    heart_rate, respiratory_rate,
    fasting_glucose, postprandial_glucose, total_cholesterol, notes";

pub fn map_health_row(row: &Row) -> Result<HealthState> {
    Ok(HealthState {
        id: row.get("id")?,
        user_id: get_id(row, "user_id")?,
        record_time: parse_ts_column(row, "record_time")?,
        metrics: HealthMetrics {
            height: row.get("height")?,
            weight: row.get("weight")?,
            bmi: row.get("bmi")?,
            body_fat_percentage: row.get("body_fat_percentage")?,
            temperature: row.get("temperature")?,
            heart_rate: row.get("heart_rate")?,
            respiratory_rate: row.get("respiratory_rate")?,
            fasting_glucose: row.get("fasting_glucose")?,
            postprandial_glucose: row.get("postprandial_glucose")?,
            total_cholesterol: row.get("total_cholesterol")?,
        },
        notes: row.get("notes")?,
    })
}

pub fn insert_health_state(conn: &Connection, hs: &HealthState) -> AppResult<i64> {
    let m = &hs.metrics;
    conn.execute(
        "INSERT INTO health_states (user_id, record_time,
            height, weight, bmi, body_fat_percentage, temperature,
            heart_rate, respiratory_rate,
            fasting_glucose, postprandial_glucose, total_cholesterol,
            notes, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
        params![
            sql_id(hs.user_id),
            format_timestamp(&hs.record_time),
            m.height,
            m.weight,
            m.bmi,
            m.body_fat_percentage,
            m.temperature,
            m.heart_rate,
            m.respiratory_rate,
            m.fasting_glucose,
            m.postprandial_glucose,
            m.total_cholesterol,
            hs.notes,
            format_timestamp(&now_local()),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Update every measured value; id and user never change.
pub fn update_health_state(conn: &Connection, hs: &HealthState) -> AppResult<()> {
    let m = &hs.metrics;
    conn.execute(
        "UPDATE health_states
         SET record_time = ?1, height = ?2, weight = ?3, bmi = ?4,
             body_fat_percentage = ?5, temperature = ?6,
             heart_rate = ?7, respiratory_rate = ?8,
             fasting_glucose = ?9, postprandial_glucose = ?10,
             total_cholesterol = ?11, notes = ?12
         WHERE id = ?13",
        params![
            format_timestamp(&hs.record_time),
            m.height,
            m.weight,
            m.bmi,
            m.body_fat_percentage,
            m.temperature,
            m.heart_rate,
            m.respiratory_rate,
            m.fasting_glucose,
            m.postprandial_glucose,
            m.total_cholesterol,
            hs.notes,
            hs.id,
        ],
    )?;
    Ok(())
}

pub fn load_health_state(conn: &Connection, id: i64) -> AppResult<Option<HealthState>> {
    let sql = format!("SELECT {} FROM health_states WHERE id = ?1", HEALTH_COLUMNS);
    let hs = conn.query_row(&sql, [id], map_health_row).optional()?;
    Ok(hs)
}

pub fn load_latest_health_state(conn: &Connection, user_id: u64) -> AppResult<Option<HealthState>> {
    let sql = format!(
        "SELECT {} FROM health_states WHERE user_id = ?1
         ORDER BY record_time DESC, id DESC LIMIT 1",
        HEALTH_COLUMNS
    );
    let hs = conn
        .query_row(&sql, [sql_id(user_id)], map_health_row)
        .optional()?;
    Ok(hs)
}

/// Health records of one user inside a period, newest first.
pub fn load_health_states(
    conn: &Connection,
    user_id: u64,
    period: &Period,
) -> AppResult<Vec<HealthState>> {
    let (cond, mut p_args) = period.sql_condition("record_time");
    let sql = format!(
        "SELECT {} FROM health_states WHERE user_id = ? AND {}
         ORDER BY record_time DESC, id DESC",
        HEALTH_COLUMNS, cond
    );
    let mut args: Vec<String> = vec![user_id.to_string()];
    args.append(&mut p_args);

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(args.iter()), map_health_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn delete_health_state(conn: &Connection, id: i64) -> AppResult<()> {
    conn.execute("DELETE FROM health_states WHERE id = ?1", [id])?;
    Ok(())
}
