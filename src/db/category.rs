use crate::models::Category;
use rusqlite::{Connection, OptionalExtension, Result};
use std::collections::BTreeMap;

pub fn list_categories(conn: &Connection) -> Result<Vec<Category>> {
    let mut stmt = conn.prepare("SELECT id, type FROM categories ORDER BY id")?;

    let categories = stmt
        .query_map([], |row| {
            Ok(Category {
                id: row.get(0)?,
                kind: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>>>()?;

    Ok(categories)
}

/// Categories keyed by id, the shape listing endpoints return.
pub fn categories_by_id(conn: &Connection) -> Result<BTreeMap<i64, String>> {
    Ok(list_categories(conn)?
        .into_iter()
        .map(|c| (c.id, c.kind))
        .collect())
}

pub fn category_exists(conn: &Connection, category_id: i64) -> Result<bool> {
    Ok(conn
        .query_row(
            "SELECT 1 FROM categories WHERE id = ?",
            [category_id],
            |_| Ok(()),
        )
        .optional()?
        .is_some())
}
