use rdietlogger::config::Config;
use rdietlogger::core::achievement::AchievementEngine;
use rdietlogger::core::achievement::catalog::Achievement;
use rdietlogger::core::achievement::store::AchievementStore;
use rdietlogger::core::checkin::CheckInLogic;
use rdietlogger::core::food::{FoodChanges, FoodLogic};
use rdietlogger::core::item::ItemLogic;
use rdietlogger::db::initialize::init_db;
use rdietlogger::db::items::{insert_owned_item, load_items_page, load_owned_summaries};
use rdietlogger::db::migrate::run_pending_migrations;
use rdietlogger::db::pool::DbPool;
use rdietlogger::db::queries::{insert_food_record, load_user_food_records};
use rdietlogger::errors::AppError;
use rdietlogger::models::item::{CatalogItem, OwnedItem};
use rdietlogger::models::meal_type::MealType;

mod common;
use common::{food, meal_with, ts};

fn seeded_pool() -> DbPool {
    let pool = DbPool::in_memory().expect("in-memory db");
    init_db(&pool.conn).expect("migrations");
    ItemLogic::seed(&pool).expect("seed");
    pool
}

fn catalog_id(pool: &DbPool, name: &str) -> u64 {
    let (items, _) = load_items_page(&pool.conn, 1, 100).expect("catalog");
    items
        .into_iter()
        .find(|i| i.name == name)
        .map(|i| i.id)
        .expect("item present")
}

#[test]
fn migrations_are_recorded_once() {
    let pool = DbPool::in_memory().expect("in-memory db");
    run_pending_migrations(&pool.conn).expect("first pass");
    run_pending_migrations(&pool.conn).expect("second pass");

    let applied: i64 = pool
        .conn
        .query_row(
            "SELECT COUNT(*) FROM log WHERE operation = 'migration_applied'",
            [],
            |row| row.get(0),
        )
        .expect("count");
    assert_eq!(applied, 2);
}

#[test]
fn seeding_is_idempotent() {
    let pool = seeded_pool();
    let (_, total) = load_items_page(&pool.conn, 1, 5).expect("page");
    assert_eq!(total, 13);

    assert!(ItemLogic::seed(&pool).expect("reseed").is_empty());

    let dup = ItemLogic::add(&pool, &CatalogItem::new("Sunflower", "", ""));
    assert!(matches!(dup, Err(AppError::DuplicateItem(_))));
}

#[test]
fn catalog_pages_are_one_based_and_ordered() {
    let pool = seeded_pool();

    let (first, total) = pool.catalog_page(1, 5).expect("page 1");
    let (third, _) = pool.catalog_page(3, 5).expect("page 3");
    let (fourth, _) = pool.catalog_page(4, 5).expect("page 4");

    assert_eq!(total, 13);
    assert_eq!(first.len(), 5);
    assert_eq!(first[0].name, Achievement::FirstFoodRecord.catalog_name());
    assert_eq!(third.len(), 3);
    assert!(fourth.is_empty());
}

#[test]
fn achievement_grants_are_unique_per_user_and_item() {
    let pool = seeded_pool();
    let id = catalog_id(&pool, "Sunflower");
    let now = ts("2025-03-10 08:00");

    assert!(pool
        .insert_owned_item_if_absent(&OwnedItem::achievement(1, id, now))
        .expect("first grant"));
    assert!(!pool
        .insert_owned_item_if_absent(&OwnedItem::achievement(1, id, now))
        .expect("second grant"));
    // another user is independent
    assert!(pool
        .insert_owned_item_if_absent(&OwnedItem::achievement(2, id, now))
        .expect("other user"));

    // manual grants stack
    let manual = OwnedItem {
        obtained_from: "manual".into(),
        ..OwnedItem::achievement(1, id, now)
    };
    insert_owned_item(&pool.conn, &manual).expect("manual 1");
    insert_owned_item(&pool.conn, &manual).expect("manual 2");

    let summaries = load_owned_summaries(&pool.conn, 1).expect("summaries");
    let quantities: Vec<(String, i64)> = summaries
        .iter()
        .map(|s| (s.obtained_from.clone(), s.total_quantity))
        .collect();
    assert_eq!(
        quantities,
        vec![("achievement".to_string(), 1), ("manual".to_string(), 2)]
    );

    let owned = pool.user_owned_item_ids(1).expect("owned ids");
    assert!(owned.iter().all(|r| r.normalize() == Some(id)));
}

#[test]
fn grant_of_unknown_item_fails() {
    let pool = seeded_pool();
    let res = pool.insert_owned_item_if_absent(&OwnedItem::achievement(1, 999, ts("2025-03-10 08:00")));
    assert!(res.is_err());

    assert!(matches!(
        ItemLogic::grant(&pool, 1, 999, "manual"),
        Err(AppError::ItemNotFound(999))
    ));
}

#[test]
fn check_in_rules() {
    let pool = seeded_pool();
    let at = ts("2025-03-10 21:30");

    assert!(matches!(
        CheckInLogic::apply(&pool, 1, at, "hello"),
        Err(AppError::NoFoodRecordsForDay(_))
    ));

    insert_food_record(&pool.conn, &food("2025-03-10 12:00", "rice", MealType::Lunch))
        .expect("food");

    let ci = CheckInLogic::apply(&pool, 1, at, "hello").expect("check-in");
    assert_eq!(ci.day_str(), "2025-03-10");

    assert!(matches!(
        CheckInLogic::apply(&pool, 1, ts("2025-03-10 23:00"), ""),
        Err(AppError::AlreadyCheckedIn { .. })
    ));

    assert_eq!(pool.user_check_ins(1).expect("feed").len(), 1);
    assert!(pool.user_check_ins(2).expect("feed").is_empty());
}

#[test]
fn engine_runs_against_sqlite() {
    let pool = seeded_pool();
    let now = ts("2025-03-10 20:00");

    insert_food_record(
        &pool.conn,
        &meal_with("2025-03-10 08:00", "eggs", MealType::Breakfast, 300.0, 22.0, 15.0, 5.0),
    )
    .expect("food");

    let engine = AchievementEngine::new(&pool, 4);
    let run = engine.run(1, now).expect("run");

    let names: Vec<String> = run
        .outcome
        .granted
        .iter()
        .map(|o| {
            pool.catalog_page(1, 100)
                .expect("catalog")
                .0
                .into_iter()
                .find(|i| i.id == o.item_id)
                .map(|i| i.name)
                .unwrap_or_default()
        })
        .collect();

    for expected in [
        "Rice Ball Cat's Gift",
        "Sunflower",
        "Strange Egg",
        "A Few Sugar Molecules",
        "Sleepy Night Light",
    ] {
        assert!(names.iter().any(|n| n == expected), "missing {expected}");
    }
    assert_eq!(names.len(), 5);

    let again = engine.run(1, now).expect("second run");
    assert!(again.newly_unlocked.is_empty());

    let status = engine.status(1, now).expect("status");
    assert_eq!(status.iter().filter(|s| s.owned).count(), 5);
    assert!(status.iter().all(|s| s.item_id.is_some()));
}

#[test]
fn food_edit_and_delete_are_scoped_to_the_user() {
    let pool = seeded_pool();
    let cfg = Config {
        warn_unbound_achievements: false,
        ..Config::default()
    };

    let rec = FoodLogic::record_from_changes(
        1,
        "soup",
        MealType::Dinner,
        ts("2025-03-10 19:00"),
        &FoodChanges {
            calories: Some(120.0),
            ..FoodChanges::default()
        },
    );
    let id = FoodLogic::add(&pool, &cfg, rec).expect("add");

    let changes = FoodChanges {
        food_name: Some("miso soup".into()),
        protein: Some(8.0),
        ..FoodChanges::default()
    };
    assert!(matches!(
        FoodLogic::edit(&pool, &cfg, 2, id, &changes),
        Err(AppError::FoodRecordNotFound(_))
    ));
    FoodLogic::edit(&pool, &cfg, 1, id, &changes).expect("edit");

    let stored = load_user_food_records(&pool.conn, 1).expect("records");
    assert_eq!(stored[0].food_name, "miso soup");
    assert_eq!(stored[0].nutrients.calories, 120.0);
    assert_eq!(stored[0].nutrients.protein, 8.0);

    assert!(FoodLogic::delete(&pool, 2, id).is_err());
    FoodLogic::delete(&pool, 1, id).expect("delete");
    assert!(load_user_food_records(&pool.conn, 1).expect("records").is_empty());
}
