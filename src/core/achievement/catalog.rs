//! Achievements and their binding to catalog items.

use super::context::EvaluationContext;
use super::predicates as p;
use std::collections::HashMap;

/// Source tag of the seeded achievement items.
pub const SEED_SOURCE: &str = "Rice Ball Cat";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Achievement {
    FirstFoodRecord,
    SevenDaysCheckIn,
    TwentyOneDaysCheckIn,
    ReboundCheckIn,
    EarlyBreakfast,
    HighProtein,
    BalancedMeal,
    LowCarb,
    ConsistentRecording,
    BalancedWeeklyMeals,
    WeeklyBreakfast,
    NoLateNightEating,
    DiverseFoods,
}

impl Achievement {
    pub const ALL: [Achievement; 13] = [
        Achievement::FirstFoodRecord,
        Achievement::SevenDaysCheckIn,
        Achievement::TwentyOneDaysCheckIn,
        Achievement::ReboundCheckIn,
        Achievement::EarlyBreakfast,
        Achievement::HighProtein,
        Achievement::BalancedMeal,
        Achievement::LowCarb,
        Achievement::ConsistentRecording,
        Achievement::BalancedWeeklyMeals,
        Achievement::WeeklyBreakfast,
        Achievement::NoLateNightEating,
        Achievement::DiverseFoods,
    ];

    /// Exact name of the catalog item rewarding this achievement.
    pub fn catalog_name(&self) -> &'static str {
        match self {
            Achievement::FirstFoodRecord => "Rice Ball Cat's Gift",
            Achievement::SevenDaysCheckIn => "Seventh-Day Rice Spoon",
            Achievement::TwentyOneDaysCheckIn => "Superhero Cape",
            Achievement::ReboundCheckIn => "Tumbler Plate",
            Achievement::EarlyBreakfast => "Sunflower",
            Achievement::HighProtein => "Strange Egg",
            Achievement::BalancedMeal => "Just-Right Bowl",
            Achievement::LowCarb => "A Few Sugar Molecules",
            Achievement::ConsistentRecording => "Food Journal",
            Achievement::BalancedWeeklyMeals => "Balanced Scales",
            Achievement::WeeklyBreakfast => "Woodpecker Alarm Clock",
            Achievement::NoLateNightEating => "Sleepy Night Light",
            Achievement::DiverseFoods => "Food Explorer Backpack",
        }
    }

    /// Condition text, used as the seeded item description.
    pub fn description(&self) -> &'static str {
        match self {
            Achievement::FirstFoodRecord => "Record your first meal.",
            Achievement::SevenDaysCheckIn => "Check in on 7 days.",
            Achievement::TwentyOneDaysCheckIn => "Check in on 21 days.",
            Achievement::ReboundCheckIn => {
                "Miss a check-in, then check in on 3 consecutive days."
            }
            Achievement::EarlyBreakfast => "Record a breakfast before 9:00.",
            Achievement::HighProtein => "Record a meal with at least 20 g of protein.",
            Achievement::BalancedMeal => {
                "Record a 400-600 kcal meal with balanced protein, fat and carbohydrates."
            }
            Achievement::LowCarb => "Record a meal with less than 30 g of carbohydrates.",
            Achievement::ConsistentRecording => {
                "Record at least 2 meals a day on 3 consecutive days."
            }
            Achievement::BalancedWeeklyMeals => "Record 3 balanced meals within 7 days.",
            Achievement::WeeklyBreakfast => "Record 4 breakfasts within 7 days.",
            Achievement::NoLateNightEating => "Eat nothing after 21:00 for 7 days.",
            Achievement::DiverseFoods => "Record 20 different foods.",
        }
    }

    /// Evaluate the condition against a gathered context.
    pub fn holds(&self, ctx: &EvaluationContext) -> bool {
        let recs = &ctx.food_records;
        let cis = &ctx.check_ins;

        match self {
            Achievement::FirstFoodRecord => p::first_food_record(recs),
            Achievement::SevenDaysCheckIn => p::seven_days_check_in(cis),
            Achievement::TwentyOneDaysCheckIn => p::twenty_one_days_check_in(cis),
            Achievement::ReboundCheckIn => p::rebound_check_in(cis),
            Achievement::EarlyBreakfast => p::early_breakfast(recs),
            Achievement::HighProtein => p::high_protein(recs),
            Achievement::BalancedMeal => p::balanced_meal(recs),
            Achievement::LowCarb => p::low_carb(recs),
            Achievement::ConsistentRecording => p::consistent_recording(recs),
            Achievement::BalancedWeeklyMeals => p::balanced_weekly_meals(recs, ctx.now),
            Achievement::WeeklyBreakfast => p::weekly_breakfast(recs, ctx.now),
            Achievement::NoLateNightEating => p::no_late_night_eating(recs, ctx.now),
            Achievement::DiverseFoods => p::diverse_foods(recs),
        }
    }
}

pub type Check<'a> = Box<dyn Fn() -> bool + 'a>;

/// Item id → (achievement, deferred condition) for one context.
pub struct CheckTable<'a> {
    pub checks: HashMap<u64, (Achievement, Check<'a>)>,
    /// Achievements whose item is missing from the catalog.
    pub unbound: Vec<Achievement>,
}

impl CheckTable<'_> {
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Item id bound to an achievement, if any.
    pub fn item_for(&self, achievement: Achievement) -> Option<u64> {
        self.checks
            .iter()
            .find(|(_, (a, _))| *a == achievement)
            .map(|(id, _)| *id)
    }
}

/// Resolve every achievement to a catalog item by exact name and attach its
/// condition. Names absent from the catalog register no check.
pub fn bind(ctx: &EvaluationContext) -> CheckTable<'_> {
    let by_name: HashMap<&str, u64> = ctx
        .catalog
        .iter()
        .map(|item| (item.name.as_str(), item.id))
        .collect();

    let mut checks: HashMap<u64, (Achievement, Check<'_>)> = HashMap::new();
    let mut unbound = Vec::new();

    for achievement in Achievement::ALL {
        match by_name.get(achievement.catalog_name()) {
            Some(&id) => {
                let check: Check<'_> = Box::new(move || achievement.holds(ctx));
                checks.insert(id, (achievement, check));
            }
            None => unbound.push(achievement),
        }
    }

    CheckTable { checks, unbound }
}
