use crate::ui::messages::{success, warning};
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check if a table exists.
fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

fn create_check_ins_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS check_ins (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id      INTEGER NOT NULL,
            check_in_at  TEXT NOT NULL,          -- YYYY-MM-DD HH:MM:SS (local)
            day          TEXT NOT NULL,          -- YYYY-MM-DD
            content      TEXT NOT NULL DEFAULT '',
            created_at   TEXT NOT NULL
        );

        CREATE UNIQUE INDEX IF NOT EXISTS idx_check_ins_user_day ON check_ins(user_id, day);
        "#,
    )?;
    Ok(())
}

fn create_food_records_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS food_records (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id          INTEGER NOT NULL,
            record_time      TEXT NOT NULL,      -- YYYY-MM-DD HH:MM:SS (local)
            food_name        TEXT NOT NULL,
            weight           REAL NOT NULL DEFAULT 0,
            calories         REAL NOT NULL DEFAULT 0,
            protein          REAL NOT NULL DEFAULT 0,
            total_fat        REAL NOT NULL DEFAULT 0,
            saturated_fat    REAL NOT NULL DEFAULT 0,
            trans_fat        REAL NOT NULL DEFAULT 0,
            unsaturated_fat  REAL NOT NULL DEFAULT 0,
            carbohydrates    REAL NOT NULL DEFAULT 0,
            sugar            REAL NOT NULL DEFAULT 0,
            fiber            REAL NOT NULL DEFAULT 0,
            vitamin_a        REAL NOT NULL DEFAULT 0,
            vitamin_c        REAL NOT NULL DEFAULT 0,
            vitamin_d        REAL NOT NULL DEFAULT 0,
            vitamin_b1       REAL NOT NULL DEFAULT 0,
            vitamin_b2       REAL NOT NULL DEFAULT 0,
            calcium          REAL NOT NULL DEFAULT 0,
            iron             REAL NOT NULL DEFAULT 0,
            sodium           REAL NOT NULL DEFAULT 0,
            potassium        REAL NOT NULL DEFAULT 0,
            meal_type        TEXT NOT NULL CHECK (meal_type IN ('breakfast','lunch','dinner','snack')),
            notes            TEXT NOT NULL DEFAULT '',
            image_path       TEXT NOT NULL DEFAULT '',
            source           TEXT NOT NULL DEFAULT 'cli',
            created_at       TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_food_records_user_time ON food_records(user_id, record_time);
        "#,
    )?;
    Ok(())
}

fn create_items_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS items (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            name         TEXT NOT NULL UNIQUE,
            description  TEXT NOT NULL DEFAULT '',
            source       TEXT NOT NULL DEFAULT '',
            icon_url     TEXT NOT NULL DEFAULT '',
            image_url    TEXT NOT NULL DEFAULT '',
            created_at   TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS user_items (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id        INTEGER NOT NULL,
            item_id        INTEGER NOT NULL REFERENCES items(id),
            quantity       INTEGER NOT NULL DEFAULT 1,
            obtained_at    TEXT NOT NULL,
            obtained_from  TEXT NOT NULL DEFAULT ''
        );

        CREATE INDEX IF NOT EXISTS idx_user_items_user ON user_items(user_id);
        "#,
    )?;
    Ok(())
}

/// One achievement grant per (user, item): remove duplicates left by
/// concurrent checks, then let the index reject any further ones.
fn migrate_unique_achievement_grants(conn: &Connection) -> Result<()> {
    let version = "20250301_0002_unique_achievement_grants";

    if migration_applied(conn, version)? {
        return Ok(());
    }

    let removed = conn.execute(
        "DELETE FROM user_items
         WHERE obtained_from = 'achievement'
           AND id NOT IN (
               SELECT MIN(id) FROM user_items
               WHERE obtained_from = 'achievement'
               GROUP BY user_id, item_id
           )",
        [],
    )?;

    if removed > 0 {
        warning(format!("Removed {} duplicated achievement grants.", removed));
    }

    conn.execute_batch(
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_user_items_achievement
         ON user_items(user_id, item_id)
         WHERE obtained_from = 'achievement';",
    )?;

    mark_applied(conn, version, "Unique achievement grants per user and item")?;

    success(format!(
        "Migration applied: {} → achievement grants are now unique",
        version
    ));

    Ok(())
}

fn migrate_health_states(conn: &Connection) -> Result<()> {
    let version = "20250315_0003_health_states";

    if migration_applied(conn, version)? {
        return Ok(());
    }

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS health_states (
            id                    INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id               INTEGER NOT NULL,
            record_time           TEXT NOT NULL,      -- YYYY-MM-DD HH:MM:SS (local)
            height                REAL NOT NULL DEFAULT 0,
            weight                REAL NOT NULL DEFAULT 0,
            bmi                   REAL NOT NULL DEFAULT 0,
            body_fat_percentage   REAL NOT NULL DEFAULT 0,
            temperature           REAL NOT NULL DEFAULT 0,
            heart_rate            INTEGER NOT NULL DEFAULT 0,
            respiratory_rate      INTEGER NOT NULL DEFAULT 0,
            fasting_glucose       REAL NOT NULL DEFAULT 0,
            postprandial_glucose  REAL NOT NULL DEFAULT 0,
            total_cholesterol     REAL NOT NULL DEFAULT 0,
            notes                 TEXT NOT NULL DEFAULT '',
            created_at            TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_health_states_user_time ON health_states(user_id, record_time);
        "#,
    )?;

    mark_applied(conn, version, "Health state records")?;

    success(format!("Migration applied: {} → health_states table created", version));

    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    // 1) Ensure log table
    ensure_log_table(conn)?;

    // 2) Base tables
    if !table_exists(conn, "check_ins")? {
        create_check_ins_table(conn)?;
        success("Created check_ins table.");
    }

    if !table_exists(conn, "food_records")? {
        create_food_records_table(conn)?;
        success("Created food_records table.");
    }

    if !table_exists(conn, "items")? || !table_exists(conn, "user_items")? {
        create_items_tables(conn)?;
        success("Created items and user_items tables.");
    }

    // 3) Versioned migrations
    migrate_unique_achievement_grants(conn)?;
    migrate_health_states(conn)?;

    Ok(())
}
