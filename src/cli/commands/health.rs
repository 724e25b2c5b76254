use super::del::ask_confirmation;
use crate::cli::parser::{Commands, HealthAction, HealthArgs};
use crate::config::Config;
use crate::core::health::{DEFAULT_LIST_DAYS, HealthChanges, HealthLogic};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::health_state::HealthState;
use crate::ui::messages::{info, success};
use crate::utils::date::Period;
use crate::utils::table::{Column, Table};
use crate::utils::time::{now_local, parse_optional_timestamp, parse_timestamp};

fn changes_from_args(args: &HealthArgs) -> AppResult<HealthChanges> {
    let record_time = args
        .at
        .as_deref()
        .map(|s| parse_timestamp(s).ok_or_else(|| AppError::InvalidTime(s.to_string())))
        .transpose()?;

    Ok(HealthChanges {
        record_time,
        height: args.height,
        weight: args.weight,
        bmi: args.bmi,
        body_fat_percentage: args.body_fat,
        temperature: args.temperature,
        heart_rate: args.heart_rate,
        respiratory_rate: args.respiratory_rate,
        fasting_glucose: args.fasting_glucose,
        postprandial_glucose: args.postprandial_glucose,
        total_cholesterol: args.cholesterol,
        notes: args.notes.clone(),
    })
}

/// `-` for values that were not measured.
fn value(v: f64, unit: &str) -> String {
    if v == 0.0 {
        "-".to_string()
    } else {
        let s = format!("{:.1}", v);
        let s = s.strip_suffix(".0").unwrap_or(&s);
        format!("{}{}", s, unit)
    }
}

fn rate(v: i64) -> String {
    if v == 0 { "-".to_string() } else { v.to_string() }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Health { action } = cmd {
        let pool = DbPool::new(&cfg.database)?;
        let user_id = cfg.default_user;

        match action {
            HealthAction::Add { values } => {
                let changes = changes_from_args(values)?;
                if changes.is_empty() {
                    return Err(AppError::Other(
                        "Nothing to record: give at least one measurement.".into(),
                    ));
                }
                let at = parse_optional_timestamp(values.at.as_ref())?;
                let hs = HealthLogic::add(&pool, user_id, at, &changes)?;
                success(format!(
                    "Health record #{} saved for {}.",
                    hs.id,
                    hs.record_time.format("%Y-%m-%d %H:%M")
                ));
            }

            HealthAction::List { period } => {
                let period = match period {
                    Some(p) => Period::parse(p)?,
                    None => Period::last_days(now_local().date(), DEFAULT_LIST_DAYS),
                };
                let states = HealthLogic::list(&pool, user_id, &period)?;
                print_health_states(&states, cfg);
            }

            HealthAction::Latest => match HealthLogic::latest(&pool, user_id)? {
                Some(hs) => print_health_state(&hs),
                None => info("No health records yet."),
            },

            HealthAction::Edit { id, values } => {
                let changes = changes_from_args(values)?;
                HealthLogic::edit(&pool, user_id, *id, &changes)?;
                success(format!("✏️ Health record #{} updated.", id));
            }

            HealthAction::Del { id } => {
                if !ask_confirmation(&format!("Delete health record #{}?", id)) {
                    info("Operation cancelled.");
                    return Ok(());
                }
                let hs = HealthLogic::delete(&pool, user_id, *id)?;
                success(format!(
                    "Health record #{} ({}) has been deleted.",
                    id,
                    hs.record_time.format("%Y-%m-%d %H:%M")
                ));
            }
        }
    }

    Ok(())
}

fn print_health_states(states: &[HealthState], cfg: &Config) {
    if states.is_empty() {
        println!("No health records found.");
        return;
    }

    let mut table = Table::new(vec![
        Column::new("ID"),
        Column::new("DATE"),
        Column::new("TIME"),
        Column::new("WEIGHT"),
        Column::new("BMI"),
        Column::new("FAT"),
        Column::new("HR"),
        Column::new("GLUCOSE"),
        Column::new("NOTES"),
    ]);

    for hs in states {
        let m = &hs.metrics;
        table.add_row(vec![
            hs.id.to_string(),
            hs.record_time.format("%Y-%m-%d").to_string(),
            hs.record_time.format("%H:%M").to_string(),
            value(m.weight, "kg"),
            value(m.bmi, ""),
            value(m.body_fat_percentage, "%"),
            rate(m.heart_rate),
            value(m.fasting_glucose, ""),
            hs.notes.clone(),
        ]);
    }

    print!("{}", table.render(&cfg.separator_char));
    println!("\n{} health record(s)", states.len());
}

fn print_health_state(hs: &HealthState) {
    let m = &hs.metrics;
    println!(
        "🩺 Health record #{} ({}):\n",
        hs.id,
        hs.record_time.format("%Y-%m-%d %H:%M")
    );

    let lines = [
        ("Height", value(m.height, " cm")),
        ("Weight", value(m.weight, " kg")),
        ("BMI", value(m.bmi, "")),
        ("Body fat", value(m.body_fat_percentage, "%")),
        ("Temperature", value(m.temperature, " °C")),
        ("Heart rate", rate(m.heart_rate)),
        ("Respiratory rate", rate(m.respiratory_rate)),
        ("Fasting glucose", value(m.fasting_glucose, " mmol/L")),
        ("Postprandial glucose", value(m.postprandial_glucose, " mmol/L")),
        ("Total cholesterol", value(m.total_cholesterol, " mmol/L")),
    ];
    for (label, v) in lines {
        println!("  {:<21} {}", label, v);
    }
    if !hs.notes.is_empty() {
        println!("  {:<21} {}", "Notes", hs.notes);
    }
}
