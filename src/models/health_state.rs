use chrono::NaiveDateTime;
use serde::Serialize;

/// Body measurements taken at one point in time.
/// A zero value means "not measured".
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HealthMetrics {
    pub height: f64,              // cm
    pub weight: f64,              // kg
    pub bmi: f64,                 // kg/m²
    pub body_fat_percentage: f64, // %
    pub temperature: f64,         // °C
    pub heart_rate: i64,          // beats/min
    pub respiratory_rate: i64,    // breaths/min
    pub fasting_glucose: f64,     // mmol/L
    pub postprandial_glucose: f64, // mmol/L
    pub total_cholesterol: f64,   // mmol/L
}

impl HealthMetrics {
    /// BMI from height and weight, when both were measured.
    pub fn computed_bmi(&self) -> Option<f64> {
        if self.height > 0.0 && self.weight > 0.0 {
            let m = self.height / 100.0;
            Some((self.weight / (m * m) * 10.0).round() / 10.0)
        } else {
            None
        }
    }

    /// Fill in the BMI when it was not given explicitly.
    pub fn fill_bmi(&mut self) {
        if self.bmi == 0.0
            && let Some(bmi) = self.computed_bmi()
        {
            self.bmi = bmi;
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthState {
    pub id: i64,
    pub user_id: u64,
    pub record_time: NaiveDateTime, // ⇔ health_states.record_time (TEXT "YYYY-MM-DD HH:MM:SS")
    pub metrics: HealthMetrics,
    pub notes: String,
}

impl HealthState {
    pub fn new(user_id: u64, record_time: NaiveDateTime, metrics: HealthMetrics) -> Self {
        Self {
            id: 0,
            user_id,
            record_time,
            metrics,
            notes: String::new(),
        }
    }
}
