use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

fn count(pool: &DbPool, sql: &str) -> rusqlite::Result<i64> {
    pool.conn.query_row(sql, [], |row| row.get(0))
}

pub fn print_db_info(pool: &DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) ROW COUNTS
    //
    let rows = [
        ("Food records", "SELECT COUNT(*) FROM food_records"),
        ("Check-ins", "SELECT COUNT(*) FROM check_ins"),
        ("Health records", "SELECT COUNT(*) FROM health_states"),
        ("Catalog items", "SELECT COUNT(*) FROM items"),
        ("Owned items", "SELECT COUNT(*) FROM user_items"),
        (
            "Achievement grants",
            "SELECT COUNT(*) FROM user_items WHERE obtained_from = 'achievement'",
        ),
    ];
    for (label, sql) in rows {
        println!(
            "{}• {}:{} {}{}{}",
            CYAN,
            label,
            RESET,
            GREEN,
            count(pool, sql)?,
            RESET
        );
    }

    //
    // 3) RECORDING RANGE
    //
    let first: Option<String> = pool
        .conn
        .query_row(
            "SELECT date(record_time) FROM food_records ORDER BY record_time ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;
    let last: Option<String> = pool
        .conn
        .query_row(
            "SELECT date(record_time) FROM food_records ORDER BY record_time DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    println!("{}• Recording range:{}", CYAN, RESET);
    println!(
        "    from: {}",
        first.unwrap_or_else(|| format!("{GREY}--{RESET}"))
    );
    println!(
        "    to:   {}",
        last.unwrap_or_else(|| format!("{GREY}--{RESET}"))
    );

    println!();
    Ok(())
}
