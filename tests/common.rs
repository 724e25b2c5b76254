#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{NaiveDate, NaiveDateTime};
use rdietlogger::models::check_in::CheckIn;
use rdietlogger::models::food_record::{FoodRecord, Nutrients};
use rdietlogger::models::meal_type::MealType;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rdl() -> Command {
    cargo_bin_cmd!("rdietlogger")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rdietlogger.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary input file path inside tempdir and ensure it's removed
pub fn temp_file(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_in.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize DB (schema + migrations) and seed the achievement items
pub fn init_seeded_db(db_path: &str) {
    rdl()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    rdl()
        .args(["--db", db_path, "item", "--seed"])
        .assert()
        .success();
}

pub fn ts(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").expect("valid timestamp")
}

pub fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date")
}

pub fn food(at: &str, name: &str, meal: MealType) -> FoodRecord {
    FoodRecord::new(1, ts(at), name, meal, Nutrients::default())
}

pub fn meal_with(at: &str, name: &str, meal: MealType, kcal: f64, p: f64, f: f64, c: f64) -> FoodRecord {
    let nutrients = Nutrients {
        calories: kcal,
        protein: p,
        total_fat: f,
        carbohydrates: c,
        ..Nutrients::default()
    };
    FoodRecord::new(1, ts(at), name, meal, nutrients)
}

/// One check-in at noon on each given day of March 2025.
pub fn check_ins_on(days: &[u32]) -> Vec<CheckIn> {
    days.iter()
        .map(|d| CheckIn::new(1, ts(&format!("2025-03-{:02} 12:00", d)), ""))
        .collect()
}
