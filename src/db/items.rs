//! Catalog items and the items users own.

use crate::db::queries::{get_id, sql_id};
use crate::errors::{AppError, AppResult};
use crate::models::item::{CatalogItem, OwnedItem, OwnedItemSummary};
use crate::models::item_id::RawItemId;
use crate::utils::time::{format_timestamp, now_local};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

fn map_item_row(row: &Row) -> Result<CatalogItem> {
    Ok(CatalogItem {
        id: get_id(row, "id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        source: row.get("source")?,
        icon_url: row.get("icon_url")?,
        image_url: row.get("image_url")?,
    })
}

pub fn item_exists_by_name(conn: &Connection, name: &str) -> AppResult<bool> {
    let mut stmt = conn.prepare_cached("SELECT 1 FROM items WHERE name = ?1")?;
    Ok(stmt.exists([name])?)
}

/// Insert a catalog item and return its id. Names are unique.
pub fn insert_item(conn: &Connection, item: &CatalogItem) -> AppResult<u64> {
    if item_exists_by_name(conn, &item.name)? {
        return Err(AppError::DuplicateItem(item.name.clone()));
    }

    conn.execute(
        "INSERT INTO items (name, description, source, icon_url, image_url, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            item.name,
            item.description,
            item.source,
            item.icon_url,
            item.image_url,
            format_timestamp(&now_local()),
        ],
    )?;

    Ok(u64::try_from(conn.last_insert_rowid()).unwrap_or_default())
}

pub fn load_item(conn: &Connection, id: u64) -> AppResult<Option<CatalogItem>> {
    let item = conn
        .query_row(
            "SELECT id, name, description, source, icon_url, image_url FROM items WHERE id = ?1",
            [sql_id(id)],
            map_item_row,
        )
        .optional()?;
    Ok(item)
}

/// One page of the catalog (1-based) and the total number of items.
pub fn load_items_page(
    conn: &Connection,
    page: u32,
    page_size: u32,
) -> AppResult<(Vec<CatalogItem>, u64)> {
    let total: i64 = conn.query_row("SELECT COUNT(*) FROM items", [], |row| row.get(0))?;

    let offset = i64::from(page.max(1) - 1) * i64::from(page_size);
    let mut stmt = conn.prepare_cached(
        "SELECT id, name, description, source, icon_url, image_url FROM items
         ORDER BY id ASC
         LIMIT ?1 OFFSET ?2",
    )?;
    let rows = stmt.query_map(params![i64::from(page_size), offset], map_item_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }

    Ok((out, u64::try_from(total).unwrap_or_default()))
}

/// Append a grant, whatever the user already owns.
pub fn insert_owned_item(conn: &Connection, owned: &OwnedItem) -> AppResult<()> {
    conn.execute(
        "INSERT INTO user_items (user_id, item_id, quantity, obtained_at, obtained_from)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            sql_id(owned.user_id),
            sql_id(owned.item_id),
            owned.quantity,
            format_timestamp(&owned.obtained_at),
            owned.obtained_from,
        ],
    )?;
    Ok(())
}

/// Append a grant unless the unique achievement index already holds one for
/// the same user and item. Returns `true` when a row was written.
pub fn insert_owned_item_if_absent(conn: &Connection, owned: &OwnedItem) -> AppResult<bool> {
    let changed = conn.execute(
        "INSERT OR IGNORE INTO user_items (user_id, item_id, quantity, obtained_at, obtained_from)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            sql_id(owned.user_id),
            sql_id(owned.item_id),
            owned.quantity,
            format_timestamp(&owned.obtained_at),
            owned.obtained_from,
        ],
    )?;
    Ok(changed == 1)
}

/// Owned items of a user, aggregated per item and acquisition source.
pub fn load_owned_summaries(conn: &Connection, user_id: u64) -> AppResult<Vec<OwnedItemSummary>> {
    let mut stmt = conn.prepare(
        "SELECT user_items.item_id AS id,
                COALESCE(items.name, '') AS name,
                user_items.obtained_from AS obtained_from,
                SUM(user_items.quantity) AS total_quantity
         FROM user_items
         LEFT JOIN items ON items.id = user_items.item_id
         WHERE user_items.user_id = ?1
         GROUP BY user_items.item_id, user_items.obtained_from
         ORDER BY name, obtained_from",
    )?;

    let rows = stmt.query_map([sql_id(user_id)], |row| {
        let id = RawItemId::from_sql(row.get_ref("id")?)
            .unwrap_or_else(|| RawItemId::Text(String::new()));
        Ok(OwnedItemSummary {
            id,
            name: row.get("name")?,
            obtained_from: row.get("obtained_from")?,
            total_quantity: row.get("total_quantity")?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Raw `id` values of the items a user owns, one per (item, source) group.
pub fn load_owned_item_ids(conn: &Connection, user_id: u64) -> AppResult<Vec<RawItemId>> {
    Ok(load_owned_summaries(conn, user_id)?
        .into_iter()
        .map(|s| s.id)
        .collect())
}
