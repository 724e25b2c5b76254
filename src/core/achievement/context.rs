use super::store::AchievementStore;
use crate::errors::{AppError, AppResult, Feed};
use crate::models::check_in::CheckIn;
use crate::models::food_record::FoodRecord;
use crate::models::item::CatalogItem;
use crate::models::item_id::normalize_ids;
use chrono::NaiveDateTime;
use std::collections::HashSet;

/// Everything one evaluation pass looks at, for a single user.
/// Built fresh for every check and dropped afterwards.
#[derive(Debug, Clone, Default)]
pub struct EvaluationContext {
    pub user_id: u64,
    pub now: NaiveDateTime,
    pub check_ins: Vec<CheckIn>,
    pub food_records: Vec<FoodRecord>,
    pub catalog: Vec<CatalogItem>,
    pub owned: HashSet<u64>,
}

impl EvaluationContext {
    /// Read the four feeds. Any failing feed aborts the whole check.
    pub fn gather<S: AchievementStore + ?Sized>(
        store: &S,
        user_id: u64,
        now: NaiveDateTime,
        page_size: u32,
    ) -> AppResult<Self> {
        let check_ins = store
            .user_check_ins(user_id)
            .map_err(|e| AppError::feed(Feed::CheckIns, e))?;

        let food_records = store
            .user_food_records(user_id)
            .map_err(|e| AppError::feed(Feed::FoodRecords, e))?;

        let raw_owned = store
            .user_owned_item_ids(user_id)
            .map_err(|e| AppError::feed(Feed::OwnedItems, e))?;

        let catalog = drain_catalog(store, page_size)?;

        Ok(Self {
            user_id,
            now,
            check_ins,
            food_records,
            catalog,
            owned: normalize_ids(&raw_owned),
        })
    }
}

/// Read every catalog page; the binder needs the complete catalog.
fn drain_catalog<S: AchievementStore + ?Sized>(
    store: &S,
    page_size: u32,
) -> AppResult<Vec<CatalogItem>> {
    let page_size = page_size.max(1);

    let (mut items, total) = store
        .catalog_page(1, page_size)
        .map_err(|e| AppError::feed(Feed::Catalog { page: 1 }, e))?;

    let pages = total.div_ceil(u64::from(page_size));
    let mut page: u32 = 2;

    while u64::from(page) <= pages {
        let (more, _) = store
            .catalog_page(page, page_size)
            .map_err(|e| AppError::feed(Feed::Catalog { page }, e))?;

        // catalog shrank while paging
        if more.is_empty() {
            break;
        }
        items.extend(more);
        page += 1;
    }

    Ok(items)
}
