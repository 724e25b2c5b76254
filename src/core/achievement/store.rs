use crate::db::items;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::AppResult;
use crate::models::check_in::CheckIn;
use crate::models::food_record::FoodRecord;
use crate::models::item::{CatalogItem, OwnedItem};
use crate::models::item_id::RawItemId;

/// Everything an achievement check reads and writes.
///
/// The engine only talks to storage through this trait, so a check can run
/// against the SQLite pool or against an in-memory double.
pub trait AchievementStore {
    /// Full check-in history of a user.
    fn user_check_ins(&self, user_id: u64) -> AppResult<Vec<CheckIn>>;

    /// Full food-record history of a user.
    fn user_food_records(&self, user_id: u64) -> AppResult<Vec<FoodRecord>>;

    /// Ids of the items a user owns, as stored.
    fn user_owned_item_ids(&self, user_id: u64) -> AppResult<Vec<RawItemId>>;

    /// One page of the catalog (1-based) plus the catalog size.
    fn catalog_page(&self, page: u32, page_size: u32) -> AppResult<(Vec<CatalogItem>, u64)>;

    /// Persist a grant unless an equivalent one exists; `true` when written.
    fn insert_owned_item_if_absent(&self, item: &OwnedItem) -> AppResult<bool>;
}

impl AchievementStore for DbPool {
    fn user_check_ins(&self, user_id: u64) -> AppResult<Vec<CheckIn>> {
        queries::load_user_check_ins(&self.conn, user_id)
    }

    fn user_food_records(&self, user_id: u64) -> AppResult<Vec<FoodRecord>> {
        queries::load_user_food_records(&self.conn, user_id)
    }

    fn user_owned_item_ids(&self, user_id: u64) -> AppResult<Vec<RawItemId>> {
        items::load_owned_item_ids(&self.conn, user_id)
    }

    fn catalog_page(&self, page: u32, page_size: u32) -> AppResult<(Vec<CatalogItem>, u64)> {
        items::load_items_page(&self.conn, page, page_size)
    }

    fn insert_owned_item_if_absent(&self, item: &OwnedItem) -> AppResult<bool> {
        items::insert_owned_item_if_absent(&self.conn, item)
    }
}
