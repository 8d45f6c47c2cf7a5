//! Item database queries.
//!
//! This module provides the CRUD operations for inventory items: insert,
//! lookup, listing, partial field updates, photo reference updates, and
//! deletion. "Not found" is a normal outcome (`Ok(None)` / `Ok(false)`),
//! never an error; everything else surfaces as `Error::Database`.

use rusqlite::Connection;
use stockpile_common::{Error, ItemId, Result};
use uuid::Uuid;

use crate::models::Item;

/// Parse an item from a database row.
///
/// Expects columns in order: id, name, description, photo_path, photo_url.
fn parse_item_row(row: &rusqlite::Row) -> rusqlite::Result<Item> {
    let id = Uuid::parse_str(&row.get::<_, String>(0)?).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(Item {
        id: ItemId::from(id),
        name: row.get(1)?,
        description: row.get(2)?,
        photo_path: row.get(3)?,
        photo_url: row.get(4)?,
    })
}

/// Insert a new item record.
///
/// # Arguments
///
/// * `conn` - Database connection
/// * `item` - Item to insert
///
/// # Returns
///
/// * `Ok(())` - If the row was inserted
/// * `Err(Error)` - On constraint violation (duplicate id) or database failure
pub fn insert_item(conn: &Connection, item: &Item) -> Result<()> {
    conn.execute(
        "INSERT INTO items (id, name, description, photo_path, photo_url)
         VALUES (:id, :name, :description, :photo_path, :photo_url)",
        rusqlite::named_params! {
            ":id": item.id.to_string(),
            ":name": &item.name,
            ":description": &item.description,
            ":photo_path": &item.photo_path,
            ":photo_url": &item.photo_url,
        },
    )
    .map_err(|e| Error::database(e.to_string()))?;

    Ok(())
}

/// Get an item by ID.
///
/// # Returns
///
/// * `Ok(Some(Item))` - The item if found
/// * `Ok(None)` - If the item does not exist
/// * `Err(Error)` - If a database error occurs
pub fn get_item(conn: &Connection, id: ItemId) -> Result<Option<Item>> {
    let result = conn.query_row(
        "SELECT id, name, description, photo_path, photo_url
         FROM items WHERE id = :id",
        rusqlite::named_params! { ":id": id.to_string() },
        parse_item_row,
    );

    match result {
        Ok(item) => Ok(Some(item)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(Error::database(e.to_string())),
    }
}

/// List all items. No ordering is guaranteed.
pub fn list_items(conn: &Connection) -> Result<Vec<Item>> {
    let mut stmt = conn
        .prepare("SELECT id, name, description, photo_path, photo_url FROM items")
        .map_err(|e| Error::database(e.to_string()))?;

    let items = stmt
        .query_map([], parse_item_row)
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;

    Ok(items)
}

/// Update the mutable text fields of an item.
///
/// Issues one `UPDATE` per provided non-empty field; there is no
/// cross-statement transaction. With neither field provided the row is left
/// untouched. Callers re-read the row afterwards to observe the result.
pub fn update_item_fields(
    conn: &Connection,
    id: ItemId,
    name: Option<&str>,
    description: Option<&str>,
) -> Result<()> {
    if let Some(name) = name.filter(|n| !n.is_empty()) {
        conn.execute(
            "UPDATE items SET name = :name WHERE id = :id",
            rusqlite::named_params! { ":id": id.to_string(), ":name": name },
        )
        .map_err(|e| Error::database(e.to_string()))?;
    }

    if let Some(description) = description.filter(|d| !d.is_empty()) {
        conn.execute(
            "UPDATE items SET description = :description WHERE id = :id",
            rusqlite::named_params! { ":id": id.to_string(), ":description": description },
        )
        .map_err(|e| Error::database(e.to_string()))?;
    }

    Ok(())
}

/// Overwrite both photo reference fields in a single statement.
pub fn update_item_photo(
    conn: &Connection,
    id: ItemId,
    photo_path: &str,
    photo_url: &str,
) -> Result<()> {
    conn.execute(
        "UPDATE items SET photo_path = :photo_path, photo_url = :photo_url WHERE id = :id",
        rusqlite::named_params! {
            ":id": id.to_string(),
            ":photo_path": photo_path,
            ":photo_url": photo_url,
        },
    )
    .map_err(|e| Error::database(e.to_string()))?;

    Ok(())
}

/// Delete an item by ID.
///
/// # Returns
///
/// * `Ok(true)` - If the item was deleted
/// * `Ok(false)` - If the item did not exist
/// * `Err(Error)` - If a database error occurs
pub fn delete_item(conn: &Connection, id: ItemId) -> Result<bool> {
    let rows_affected = conn
        .execute(
            "DELETE FROM items WHERE id = :id",
            rusqlite::named_params! { ":id": id.to_string() },
        )
        .map_err(|e| Error::database(e.to_string()))?;

    Ok(rows_affected > 0)
}
