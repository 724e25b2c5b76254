use crate::db::health::{
    delete_health_state, insert_health_state, load_health_state, load_health_states,
    load_latest_health_state, update_health_state,
};
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::health_state::{HealthMetrics, HealthState};
use crate::utils::date::Period;
use chrono::NaiveDateTime;

/// Default window of `health list` without `--period`.
pub const DEFAULT_LIST_DAYS: i64 = 30;

/// Values given on the command line; `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct HealthChanges {
    pub record_time: Option<NaiveDateTime>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub bmi: Option<f64>,
    pub body_fat_percentage: Option<f64>,
    pub temperature: Option<f64>,
    pub heart_rate: Option<i64>,
    pub respiratory_rate: Option<i64>,
    pub fasting_glucose: Option<f64>,
    pub postprandial_glucose: Option<f64>,
    pub total_cholesterol: Option<f64>,
    pub notes: Option<String>,
}

impl HealthChanges {
    fn measured(&self) -> [(&'static str, Option<f64>); 10] {
        [
            ("height", self.height),
            ("weight", self.weight),
            ("bmi", self.bmi),
            ("body fat", self.body_fat_percentage),
            ("temperature", self.temperature),
            ("heart rate", self.heart_rate.map(|v| v as f64)),
            ("respiratory rate", self.respiratory_rate.map(|v| v as f64)),
            ("fasting glucose", self.fasting_glucose),
            ("postprandial glucose", self.postprandial_glucose),
            ("total cholesterol", self.total_cholesterol),
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.record_time.is_none()
            && self.notes.is_none()
            && self.measured().iter().all(|(_, v)| v.is_none())
    }

    /// Measurements cannot be negative; zero clears a value.
    pub fn validate(&self) -> AppResult<()> {
        for (label, value) in self.measured() {
            if let Some(v) = value
                && (!v.is_finite() || v < 0.0)
            {
                return Err(AppError::InvalidHealthValue(format!("{} = {}", label, v)));
            }
        }
        if let Some(fat) = self.body_fat_percentage
            && fat > 100.0
        {
            return Err(AppError::InvalidHealthValue(format!("body fat = {}%", fat)));
        }
        Ok(())
    }

    /// Copy the given values into `hs`. A new height or weight refreshes the
    /// BMI unless one was given too.
    pub fn apply_to(&self, hs: &mut HealthState) {
        if let Some(at) = self.record_time {
            hs.record_time = at;
        }
        if let Some(notes) = &self.notes {
            hs.notes = notes.clone();
        }

        let m = &mut hs.metrics;
        let reals: [(Option<f64>, &mut f64); 8] = [
            (self.height, &mut m.height),
            (self.weight, &mut m.weight),
            (self.bmi, &mut m.bmi),
            (self.body_fat_percentage, &mut m.body_fat_percentage),
            (self.temperature, &mut m.temperature),
            (self.fasting_glucose, &mut m.fasting_glucose),
            (self.postprandial_glucose, &mut m.postprandial_glucose),
            (self.total_cholesterol, &mut m.total_cholesterol),
        ];
        for (value, slot) in reals {
            if let Some(v) = value {
                *slot = v;
            }
        }
        if let Some(hr) = self.heart_rate {
            m.heart_rate = hr;
        }
        if let Some(rr) = self.respiratory_rate {
            m.respiratory_rate = rr;
        }

        if self.bmi.is_none()
            && (self.height.is_some() || self.weight.is_some())
            && let Some(bmi) = m.computed_bmi()
        {
            m.bmi = bmi;
        }
    }
}

pub struct HealthLogic;

impl HealthLogic {
    /// Store a new health record for the user. Returns it with its id.
    pub fn add(
        pool: &DbPool,
        user_id: u64,
        record_time: NaiveDateTime,
        changes: &HealthChanges,
    ) -> AppResult<HealthState> {
        if user_id == 0 {
            return Err(AppError::MissingUser);
        }
        changes.validate()?;

        let mut hs = HealthState::new(user_id, record_time, HealthMetrics::default());
        changes.apply_to(&mut hs);
        hs.metrics.fill_bmi();

        hs.id = insert_health_state(&pool.conn, &hs)?;

        ttlog_quiet(
            &pool.conn,
            "add",
            &format!("health {}", hs.id),
            &format!("user {} at {}", user_id, hs.record_time),
        );
        Ok(hs)
    }

    /// Change some values of one of the user's records.
    pub fn edit(
        pool: &DbPool,
        user_id: u64,
        id: i64,
        changes: &HealthChanges,
    ) -> AppResult<HealthState> {
        let mut hs = Self::owned(pool, user_id, id)?;

        if changes.is_empty() {
            return Err(AppError::Other(
                "Nothing to do: specify at least one value to change.".into(),
            ));
        }
        changes.validate()?;

        changes.apply_to(&mut hs);
        update_health_state(&pool.conn, &hs)?;

        ttlog_quiet(
            &pool.conn,
            "edit",
            &format!("health {}", id),
            &format!("user {} at {}", user_id, hs.record_time),
        );
        Ok(hs)
    }

    pub fn delete(pool: &DbPool, user_id: u64, id: i64) -> AppResult<HealthState> {
        let hs = Self::owned(pool, user_id, id)?;
        delete_health_state(&pool.conn, id)?;

        ttlog_quiet(
            &pool.conn,
            "del",
            &format!("health {}", id),
            &format!("user {} at {}", user_id, hs.record_time),
        );
        Ok(hs)
    }

    pub fn latest(pool: &DbPool, user_id: u64) -> AppResult<Option<HealthState>> {
        load_latest_health_state(&pool.conn, user_id)
    }

    /// Records inside `period`, newest first.
    pub fn list(pool: &DbPool, user_id: u64, period: &Period) -> AppResult<Vec<HealthState>> {
        load_health_states(&pool.conn, user_id, period)
    }

    /// Records of other users are reported as missing.
    fn owned(pool: &DbPool, user_id: u64, id: i64) -> AppResult<HealthState> {
        match load_health_state(&pool.conn, id)? {
            Some(hs) if hs.user_id == user_id => Ok(hs),
            _ => Err(AppError::HealthStateNotFound(id)),
        }
    }
}
