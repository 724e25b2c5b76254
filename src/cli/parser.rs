use clap::{Parser, Subcommand};

/// Command-line interface definition for rDietlogger
/// CLI application to log meals and unlock achievements with SQLite
#[derive(Parser)]
#[command(
    name = "rdietlogger",
    version = env!("CARGO_PKG_VERSION"),
    about = "A simple diet logging CLI: record meals and check-ins, unlock achievement badges using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Act as another user (default: `default_user` from the config)
    #[arg(global = true, long = "user")]
    pub user: Option<u64>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Nutrient values accepted by `add`.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct NutrientArgs {
    #[arg(long, help = "Portion weight in grams")]
    pub weight: Option<f64>,

    #[arg(long, help = "Energy in kcal")]
    pub calories: Option<f64>,

    #[arg(long, help = "Protein in grams")]
    pub protein: Option<f64>,

    #[arg(long, help = "Total fat in grams")]
    pub fat: Option<f64>,

    #[arg(long, help = "Carbohydrates in grams")]
    pub carbs: Option<f64>,

    #[arg(long, help = "Sugar in grams")]
    pub sugar: Option<f64>,

    #[arg(long, help = "Fiber in grams")]
    pub fiber: Option<f64>,
}

/// Measurements accepted by `health add` and `health edit`.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct HealthArgs {
    #[arg(long, help = "Height in cm")]
    pub height: Option<f64>,

    #[arg(long, help = "Weight in kg")]
    pub weight: Option<f64>,

    #[arg(long, help = "Body mass index (default: computed from height and weight)")]
    pub bmi: Option<f64>,

    #[arg(long = "body-fat", help = "Body fat percentage")]
    pub body_fat: Option<f64>,

    #[arg(long, help = "Body temperature in °C")]
    pub temperature: Option<f64>,

    #[arg(long = "heart-rate", help = "Heart rate in beats per minute")]
    pub heart_rate: Option<i64>,

    #[arg(long = "respiratory-rate", help = "Breaths per minute")]
    pub respiratory_rate: Option<i64>,

    #[arg(long = "fasting-glucose", help = "Fasting blood glucose in mmol/L")]
    pub fasting_glucose: Option<f64>,

    #[arg(long = "postprandial-glucose", help = "Blood glucose after a meal in mmol/L")]
    pub postprandial_glucose: Option<f64>,

    #[arg(long, help = "Total cholesterol in mmol/L")]
    pub cholesterol: Option<f64>,

    #[arg(long = "notes")]
    pub notes: Option<String>,

    #[arg(long = "at", help = "Record time (YYYY-MM-DD HH:MM), default: now")]
    pub at: Option<String>,
}

#[derive(Subcommand)]
pub enum HealthAction {
    /// Record body measurements
    Add {
        #[command(flatten)]
        values: HealthArgs,
    },

    /// List health records, newest first (default: last 30 days)
    List {
        #[arg(long, short, help = "Filter by year/month/day or a custom range")]
        period: Option<String>,
    },

    /// Show the most recent health record
    Latest,

    /// Change values of a health record
    Edit {
        id: i64,

        #[command(flatten)]
        values: HealthArgs,
    },

    /// Delete a health record by ID
    Del {
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Run configuration file migrations if needed")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/vim/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print or manage the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Record a meal, or edit an existing record
    Add {
        /// Food name (required unless --edit)
        food: Option<String>,

        #[arg(
            long = "meal",
            short = 'm',
            help = "Meal type: breakfast, lunch, dinner, snack (or B/L/D/S)"
        )]
        meal: Option<String>,

        #[arg(long = "at", help = "Record time (YYYY-MM-DD HH:MM), default: now")]
        at: Option<String>,

        #[command(flatten)]
        nutrients: NutrientArgs,

        #[arg(long = "notes")]
        notes: Option<String>,

        /// Edit the food record with this id instead of creating one
        #[arg(long = "edit", value_name = "ID")]
        edit: Option<i64>,
    },

    /// Record a meal from an image-analysis JSON file
    Import {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long = "meal", short = 'm', help = "Meal type: breakfast, lunch, dinner, snack")]
        meal: String,

        #[arg(long = "at", help = "Record time (YYYY-MM-DD HH:MM), default: now")]
        at: Option<String>,

        #[arg(long = "notes")]
        notes: Option<String>,
    },

    /// Delete a food record by ID
    Del {
        id: i64,
    },

    /// Check in for the day
    Checkin {
        #[arg(long = "content", short = 'c', default_value = "")]
        content: String,

        #[arg(long = "at", help = "Check-in time (YYYY-MM-DD HH:MM), default: now")]
        at: Option<String>,
    },

    /// List food records, check-ins or items
    List {
        #[arg(long, short, help = "Filter by year/month/day or a custom range")]
        period: Option<String>,

        #[arg(long = "meal", short = 'm', help = "Filter by meal type")]
        meal: Option<String>,

        #[arg(long = "checkins", help = "List check-ins")]
        checkins: bool,

        #[arg(long = "items", help = "List the item catalog")]
        items: bool,

        #[arg(long = "owned", help = "List the items owned by the user")]
        owned: bool,
    },

    /// Manage the item catalog
    Item {
        #[arg(long = "add", value_name = "NAME", help = "Add a catalog item")]
        add: Option<String>,

        #[arg(long = "description", default_value = "")]
        description: String,

        #[arg(long = "source", default_value = "")]
        source: String,

        #[arg(long = "icon", default_value = "")]
        icon: String,

        #[arg(long = "image", default_value = "")]
        image: String,

        #[arg(long = "seed", help = "Add the missing achievement items")]
        seed: bool,

        #[arg(long = "grant", value_name = "ID", help = "Give an item to the user")]
        grant: Option<u64>,

        #[arg(long = "from", default_value = "manual", help = "Acquisition source of --grant")]
        from: String,
    },

    /// Track health metrics (weight, glucose, heart rate, ...)
    Health {
        #[command(subcommand)]
        action: HealthAction,
    },

    /// Show achievement progress
    Achievements {
        #[arg(long = "check", help = "Run the achievement check now")]
        check: bool,
    },
}
