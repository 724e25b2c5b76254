use super::item_id::RawItemId;
use chrono::NaiveDateTime;
use serde::Serialize;

/// Acquisition source written on grants made by the achievement engine.
pub const ACHIEVEMENT_SOURCE: &str = "achievement";

/// Reference data: one entry of the item catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogItem {
    pub id: u64,
    pub name: String, // unique
    pub description: String,
    pub source: String,
    pub icon_url: String,
    pub image_url: String,
}

impl CatalogItem {
    /// Item not yet stored (`id = 0`).
    pub fn new(name: &str, description: &str, source: &str) -> Self {
        Self {
            id: 0,
            name: name.trim().to_string(),
            description: description.to_string(),
            source: source.to_string(),
            icon_url: String::new(),
            image_url: String::new(),
        }
    }
}

/// Grant record: one row of `user_items`. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OwnedItem {
    pub user_id: u64,
    pub item_id: u64,
    pub quantity: i64,
    pub obtained_at: NaiveDateTime,
    pub obtained_from: String,
}

impl OwnedItem {
    /// A single unit earned through an achievement.
    pub fn achievement(user_id: u64, item_id: u64, obtained_at: NaiveDateTime) -> Self {
        Self {
            user_id,
            item_id,
            quantity: 1,
            obtained_at,
            obtained_from: ACHIEVEMENT_SOURCE.to_string(),
        }
    }
}

/// Owned items aggregated per item and source, as shown by `list --owned`.
#[derive(Debug, Clone, Serialize)]
pub struct OwnedItemSummary {
    pub id: RawItemId,
    pub name: String,
    pub obtained_from: String,
    pub total_quantity: i64,
}
