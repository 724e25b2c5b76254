use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{init_seeded_db, rdl, setup_test_db, temp_file};

#[test]
fn init_creates_schema() {
    let db_path = setup_test_db("cli_init");

    rdl()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    rdl()
        .args(["--db", &db_path, "db", "--check"])
        .assert()
        .success()
        .stdout(contains("Integrity check passed"));
}

#[test]
fn seed_adds_achievement_items_once() {
    let db_path = setup_test_db("cli_seed");
    init_seeded_db(&db_path);

    rdl()
        .args(["--db", &db_path, "item", "--seed"])
        .assert()
        .success()
        .stdout(contains("already in the catalog"));

    rdl()
        .args(["--db", &db_path, "list", "--items"])
        .assert()
        .success()
        .stdout(contains("Rice Ball Cat's Gift"))
        .stdout(contains("Food Explorer Backpack"))
        .stdout(contains("13 item(s)"));
}

#[test]
fn first_meal_unlocks_badge_once() {
    let db_path = setup_test_db("cli_first_meal");
    init_seeded_db(&db_path);

    rdl()
        .args([
            "--db",
            &db_path,
            "add",
            "rice",
            "--meal",
            "lunch",
            "--at",
            "2025-03-10 12:30",
            "--calories",
            "350",
            "--carbs",
            "70",
        ])
        .assert()
        .success()
        .stdout(contains("Achievement unlocked: Rice Ball Cat's Gift"));

    rdl()
        .args([
            "--db",
            &db_path,
            "add",
            "apple",
            "--meal",
            "snack",
            "--at",
            "2025-03-10 16:00",
            "--carbs",
            "40",
        ])
        .assert()
        .success()
        .stdout(contains("Rice Ball Cat's Gift").not());

    rdl()
        .args(["--db", &db_path, "list", "--owned"])
        .assert()
        .success()
        .stdout(contains("Rice Ball Cat's Gift"))
        .stdout(contains("achievement"));
}

#[test]
fn unseeded_catalog_warns_about_missing_items() {
    let db_path = setup_test_db("cli_unseeded");

    rdl()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    rdl()
        .args(["--db", &db_path, "add", "rice", "--meal", "lunch"])
        .assert()
        .success()
        .stdout(contains("missing from the item catalog"))
        .stdout(contains("Achievement unlocked").not());
}

#[test]
fn checkin_requires_a_meal_and_happens_once_a_day() {
    let db_path = setup_test_db("cli_checkin");
    init_seeded_db(&db_path);

    rdl()
        .args(["--db", &db_path, "checkin", "--at", "2025-03-10 20:00"])
        .assert()
        .failure()
        .stderr(contains("No food recorded on 2025-03-10"));

    rdl()
        .args([
            "--db",
            &db_path,
            "add",
            "noodles",
            "-m",
            "D",
            "--at",
            "2025-03-10 19:00",
        ])
        .assert()
        .success();

    rdl()
        .args([
            "--db",
            &db_path,
            "checkin",
            "--at",
            "2025-03-10 20:00",
            "--content",
            "good day",
        ])
        .assert()
        .success()
        .stdout(contains("Checked in for 2025-03-10"));

    rdl()
        .args(["--db", &db_path, "checkin", "--at", "2025-03-10 22:00"])
        .assert()
        .failure()
        .stderr(contains("already checked in"));

    rdl()
        .args(["--db", &db_path, "list", "--checkins"])
        .assert()
        .success()
        .stdout(contains("good day"))
        .stdout(contains("1 check-in(s)"));
}

#[test]
fn list_filters_by_period_and_meal() {
    let db_path = setup_test_db("cli_list");
    init_seeded_db(&db_path);

    for (name, meal, at) in [
        ("porridge", "breakfast", "2025-02-28 07:30"),
        ("salad", "lunch", "2025-03-01 12:00"),
        ("tofu", "dinner", "2025-03-02 19:00"),
    ] {
        rdl()
            .args(["--db", &db_path, "add", name, "--meal", meal, "--at", at])
            .assert()
            .success();
    }

    rdl()
        .args(["--db", &db_path, "list", "--period", "2025-03"])
        .assert()
        .success()
        .stdout(contains("salad"))
        .stdout(contains("tofu"))
        .stdout(contains("porridge").not());

    rdl()
        .args(["--db", &db_path, "list", "--period", "2025-02-28:2025-03-01"])
        .assert()
        .success()
        .stdout(contains("porridge"))
        .stdout(contains("salad"))
        .stdout(contains("tofu").not());

    rdl()
        .args(["--db", &db_path, "list", "--meal", "dinner"])
        .assert()
        .success()
        .stdout(contains("tofu"))
        .stdout(contains("salad").not());

    rdl()
        .args(["--db", &db_path, "list", "--period", "2025-3"])
        .assert()
        .failure()
        .stderr(contains("Invalid period"));
}

#[test]
fn records_are_per_user() {
    let db_path = setup_test_db("cli_users");
    init_seeded_db(&db_path);

    rdl()
        .args(["--db", &db_path, "--user", "2", "add", "kimchi", "--meal", "lunch"])
        .assert()
        .success();

    rdl()
        .args(["--db", &db_path, "--user", "1", "list"])
        .assert()
        .success()
        .stdout(contains("No food records found"));

    rdl()
        .args(["--db", &db_path, "--user", "2", "list"])
        .assert()
        .success()
        .stdout(contains("kimchi"));
}

#[test]
fn import_reads_analysis_payload() {
    let db_path = setup_test_db("cli_import");
    init_seeded_db(&db_path);

    let json_path = temp_file("cli_import_analysis", "json");
    fs::write(
        &json_path,
        r#"{
            "hasFood": true,
            "foodType": "chicken salad",
            "weight": 250,
            "nutrition": {
                "calories": 480,
                "protein": 24,
                "totalFat": 16,
                "carbohydrates": 40,
                "vitamins": { "vitaminC": 12, "vitaminB": { "b1": 0.2 } },
                "minerals": { "sodium": 600 }
            }
        }"#,
    )
    .expect("write analysis");

    rdl()
        .args([
            "--db",
            &db_path,
            "import",
            "--file",
            &json_path,
            "--meal",
            "lunch",
            "--at",
            "2025-03-10 12:00",
        ])
        .assert()
        .success()
        .stdout(contains("chicken salad"))
        .stdout(contains("Strange Egg"))
        .stdout(contains("Just-Right Bowl"));

    let empty_path = temp_file("cli_import_empty", "json");
    fs::write(&empty_path, r#"{"hasFood": false}"#).expect("write analysis");

    rdl()
        .args(["--db", &db_path, "import", "--file", &empty_path, "--meal", "lunch"])
        .assert()
        .failure()
        .stderr(contains("did not detect any food"));
}

#[test]
fn edit_and_delete_food_record() {
    let db_path = setup_test_db("cli_edit_del");
    init_seeded_db(&db_path);

    rdl()
        .args([
            "--db",
            &db_path,
            "add",
            "toast",
            "--meal",
            "breakfast",
            "--at",
            "2025-03-10 10:00",
        ])
        .assert()
        .success();

    // moved before 9:00, the early breakfast now holds
    rdl()
        .args(["--db", &db_path, "add", "--edit", "1", "--at", "2025-03-10 08:15"])
        .assert()
        .success()
        .stdout(contains("Food record #1 updated"))
        .stdout(contains("Sunflower"));

    rdl()
        .args(["--db", &db_path, "del", "1"])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(contains("has been deleted"));

    rdl()
        .args(["--db", &db_path, "del", "1"])
        .write_stdin("y\n")
        .assert()
        .failure()
        .stderr(contains("Food record 1 not found"));
}

#[test]
fn achievements_command_shows_progress() {
    let db_path = setup_test_db("cli_achievements");
    init_seeded_db(&db_path);

    rdl()
        .args(["--db", &db_path, "add", "rice", "--meal", "lunch", "--carbs", "80"])
        .assert()
        .success();

    rdl()
        .args(["--db", &db_path, "achievements", "--check"])
        .assert()
        .success()
        .stdout(contains("Superhero Cape"))
        .stdout(contains("/13 unlocked"));

    rdl()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("achievement"))
        .stdout(contains("granted 'Rice Ball Cat's Gift'"));
}
