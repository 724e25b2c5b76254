use crate::core::achievement::catalog::{Achievement, SEED_SOURCE};
use crate::db::items::{insert_item, insert_owned_item, item_exists_by_name, load_item};
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::item::{CatalogItem, OwnedItem};
use crate::utils::time::now_local;

pub struct ItemLogic;

impl ItemLogic {
    pub fn add(pool: &DbPool, item: &CatalogItem) -> AppResult<u64> {
        if item.name.is_empty() {
            return Err(AppError::Other("Item name cannot be empty".into()));
        }

        let id = insert_item(&pool.conn, item)?;
        ttlog_quiet(&pool.conn, "add", &format!("item {}", id), &item.name);
        Ok(id)
    }

    /// Add the achievement items missing from the catalog.
    /// Returns the names actually inserted.
    pub fn seed(pool: &DbPool) -> AppResult<Vec<&'static str>> {
        let mut added = Vec::new();

        for achievement in Achievement::ALL {
            let name = achievement.catalog_name();
            if item_exists_by_name(&pool.conn, name)? {
                continue;
            }

            let item = CatalogItem::new(name, achievement.description(), SEED_SOURCE);
            insert_item(&pool.conn, &item)?;
            added.push(name);
        }

        if !added.is_empty() {
            ttlog_quiet(
                &pool.conn,
                "seed",
                "items",
                &format!("{} achievement item(s) added", added.len()),
            );
        }

        Ok(added)
    }

    /// Give one unit of an item to a user, outside the achievement engine.
    pub fn grant(pool: &DbPool, user_id: u64, item_id: u64, from: &str) -> AppResult<CatalogItem> {
        if user_id == 0 {
            return Err(AppError::MissingUser);
        }

        let item = load_item(&pool.conn, item_id)?.ok_or(AppError::ItemNotFound(item_id))?;

        let owned = OwnedItem {
            user_id,
            item_id,
            quantity: 1,
            obtained_at: now_local(),
            obtained_from: from.to_string(),
        };
        insert_owned_item(&pool.conn, &owned)?;

        ttlog_quiet(
            &pool.conn,
            "grant",
            &format!("user {}", user_id),
            &format!("'{}' (item {}) from {}", item.name, item_id, from),
        );

        Ok(item)
    }
}
