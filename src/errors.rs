//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use std::fmt;
use std::io;
use thiserror::Error;

/// The data feed an achievement check reads before evaluating anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feed {
    CheckIns,
    FoodRecords,
    OwnedItems,
    Catalog { page: u32 },
}

impl fmt::Display for Feed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feed::CheckIns => write!(f, "check-ins"),
            Feed::FoodRecords => write!(f, "food records"),
            Feed::OwnedItems => write!(f, "owned items"),
            Feed::Catalog { page } => write!(f, "catalog page {}", page),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid meal type: {0}")]
    InvalidMealType(String),

    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    #[error("Invalid health value: {0}")]
    InvalidHealthValue(String),

    #[error("Invalid analysis payload: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Logic errors
    // ---------------------------
    #[error("User {user_id} already checked in on {day}")]
    AlreadyCheckedIn { user_id: u64, day: String },

    #[error("No food recorded on {0}: record a meal before checking in")]
    NoFoodRecordsForDay(String),

    #[error("Food record {0} not found")]
    FoodRecordNotFound(i64),

    #[error("Health record {0} not found")]
    HealthStateNotFound(i64),

    #[error("Item {0} not found")]
    ItemNotFound(u64),

    #[error("An item named '{0}' already exists")]
    DuplicateItem(String),

    #[error("The analysis did not detect any food")]
    NoFoodDetected,

    #[error("No user selected (user id 0)")]
    MissingUser,

    // ---------------------------
    // Achievement engine
    // ---------------------------
    #[error("Failed to read {feed}: {source}")]
    Feed {
        feed: Feed,
        #[source]
        source: Box<AppError>,
    },

    #[error("Failed to grant item {item_id}: {source}")]
    Grant {
        item_id: u64,
        #[source]
        source: Box<AppError>,
    },

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    #[error("Invalid configuration file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// Wrap an error raised while reading one of the achievement feeds.
    pub fn feed(feed: Feed, source: AppError) -> Self {
        AppError::Feed {
            feed,
            source: Box::new(source),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
