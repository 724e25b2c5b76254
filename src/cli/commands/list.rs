use super::add::parse_meal;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::items::{load_items_page, load_owned_summaries};
use crate::db::pool::DbPool;
use crate::db::queries::{load_food_records_filtered, load_user_check_ins};
use crate::errors::AppResult;
use crate::models::food_record::FoodRecord;
use crate::utils::date::Period;
use crate::utils::table::{Column, Table};
use crate::utils::{grams, kcal};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        period,
        meal,
        checkins,
        items,
        owned,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;
        let user_id = cfg.default_user;

        if *checkins {
            return print_check_ins(&pool, cfg, user_id);
        }
        if *items {
            return print_catalog(&pool, cfg);
        }
        if *owned {
            return print_owned(&pool, cfg, user_id);
        }

        let period = period.as_deref().map(Period::parse).transpose()?;
        let meal = meal.as_deref().map(parse_meal).transpose()?;

        let records = load_food_records_filtered(&pool.conn, user_id, period.as_ref(), meal)?;
        print_food_records(&records, cfg);
    }
    Ok(())
}

fn print_food_records(records: &[FoodRecord], cfg: &Config) {
    if records.is_empty() {
        println!("No food records found.");
        return;
    }

    let mut table = Table::new(vec![
        Column::new("ID"),
        Column::new("DATE"),
        Column::new("TIME"),
        Column::new("MEAL"),
        Column::new("FOOD"),
        Column::new("ENERGY"),
        Column::new("PROT"),
        Column::new("FAT"),
        Column::new("CARBS"),
    ]);

    let mut total_kcal = 0.0;
    for r in records {
        let n = &r.nutrients;
        total_kcal += n.calories;
        table.add_row(vec![
            r.id.to_string(),
            r.day().to_string(),
            r.time_str(),
            r.meal_type.mt_as_str().to_string(),
            r.food_name.clone(),
            kcal(n.calories),
            grams(n.protein),
            grams(n.total_fat),
            grams(n.carbohydrates),
        ]);
    }

    print!("{}", table.render(&cfg.separator_char));
    println!("\n{} record(s), {}", records.len(), kcal(total_kcal));
}

fn print_check_ins(pool: &DbPool, cfg: &Config, user_id: u64) -> AppResult<()> {
    let check_ins = load_user_check_ins(&pool.conn, user_id)?;
    if check_ins.is_empty() {
        println!("No check-ins yet.");
        return Ok(());
    }

    let mut table = Table::new(vec![
        Column::new("DAY"),
        Column::new("TIME"),
        Column::new("CONTENT"),
    ]);
    for ci in &check_ins {
        table.add_row(vec![
            ci.day_str(),
            ci.check_in_at.format("%H:%M").to_string(),
            ci.content.clone(),
        ]);
    }

    print!("{}", table.render(&cfg.separator_char));
    println!("\n{} check-in(s)", check_ins.len());
    Ok(())
}

fn print_catalog(pool: &DbPool, cfg: &Config) -> AppResult<()> {
    let size = cfg.page_size();
    let (mut items, total) = load_items_page(&pool.conn, 1, size)?;
    let mut page = 2;
    while (items.len() as u64) < total {
        let (more, _) = load_items_page(&pool.conn, page, size)?;
        if more.is_empty() {
            break;
        }
        items.extend(more);
        page += 1;
    }

    if items.is_empty() {
        println!("The item catalog is empty. Run `item --seed` to add the achievement items.");
        return Ok(());
    }

    for item in &items {
        println!("#{} {} [{}]", item.id, item.name, item.source);
        for line in textwrap::wrap(&item.description, 72) {
            println!("    {}", line);
        }
    }
    println!("\n{} item(s)", items.len());
    Ok(())
}

fn print_owned(pool: &DbPool, cfg: &Config, user_id: u64) -> AppResult<()> {
    let owned = load_owned_summaries(&pool.conn, user_id)?;
    if owned.is_empty() {
        println!("User {} owns no items yet.", user_id);
        return Ok(());
    }

    let mut table = Table::new(vec![
        Column::new("ID"),
        Column::new("ITEM"),
        Column::new("FROM"),
        Column::new("QTY"),
    ]);
    for o in &owned {
        table.add_row(vec![
            o.id.to_string(),
            o.name.clone(),
            o.obtained_from.clone(),
            o.total_quantity.to_string(),
        ]);
    }

    print!("{}", table.render(&cfg.separator_char));
    Ok(())
}
