//! Inventory item API routes.
//!
//! Registration, exact-id search, listing, and single-resource
//! get/update/delete. Each handler is a pipeline returning
//! `Result<_, ApiError>`; status mapping lives in [`super::error`].

use axum::{
    body::Bytes,
    extract::{Multipart, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use stockpile_common::ItemId;
use stockpile_db::models::Item;
use stockpile_db::pool::{get_conn, PooledConnection};
use stockpile_db::queries::items;

use super::error::{ApiError, ApiResult};
use super::{method_not_allowed, AppContext};

pub fn inventory_routes() -> Router<AppContext> {
    Router::new()
        .route("/register", post(register).fallback(method_not_allowed))
        .route("/search", post(search).fallback(method_not_allowed))
        .route(
            "/inventory",
            get(list_inventory).fallback(method_not_allowed),
        )
        .route(
            "/inventory/:id",
            get(get_item)
                .put(update_item)
                .delete(delete_item)
                .fallback(method_not_allowed),
        )
}

/// Look up an item by its raw path/body id, mapping both a malformed id and
/// a missing row to 404. Ids are service-generated UUIDs, so a string that
/// does not parse cannot match any stored item.
pub(super) fn find_item(conn: &PooledConnection, raw_id: &str) -> ApiResult<Item> {
    let id = ItemId::parse(raw_id).ok_or_else(|| ApiError::not_found("Not Found"))?;
    items::get_item(conn, id)?.ok_or_else(|| ApiError::not_found("Not Found"))
}

/// Public photo route for an item.
pub(super) fn photo_url(id: ItemId) -> String {
    format!("/inventory/{}/photo", id)
}

// ============================================================================
// Request types
// ============================================================================

#[derive(Deserialize)]
struct SearchRequest {
    id: Option<String>,
    /// Boolean-like flag; the note is only appended for the exact string
    /// "true".
    has_photo: Option<String>,
}

#[derive(Deserialize)]
struct UpdateItemRequest {
    name: Option<String>,
    description: Option<String>,
}

// ============================================================================
// Handlers
// ============================================================================

/// Register a new item from a multipart form.
///
/// `inventory_name` is required; `description` and a `photo` file are
/// optional. The photo, when present, is stored before the row is written.
async fn register(
    State(ctx): State<AppContext>,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<Item>)> {
    let mut name: Option<String> = None;
    let mut description: Option<String> = None;
    let mut photo: Option<(String, Bytes)> = None;

    while let Some(field) = multipart.next_field().await? {
        match field.name() {
            Some("inventory_name") => name = Some(field.text().await?),
            Some("description") => description = Some(field.text().await?),
            Some("photo") => {
                let original = field.file_name().unwrap_or_default().to_string();
                let data = field.bytes().await?;
                photo = Some((original, data));
            }
            _ => {}
        }
    }

    let name = name
        .filter(|n| !n.is_empty())
        .ok_or_else(|| ApiError::validation(r#""inventory_name" is required"#))?;

    let id = ItemId::new();
    let (photo_path, photo_url) = match photo {
        Some((original, data)) => {
            let path = ctx.blobs.save(&original, &data)?;
            (
                Some(path.to_string_lossy().into_owned()),
                Some(self::photo_url(id)),
            )
        }
        None => (None, None),
    };

    let item = Item {
        id,
        name,
        description: description.unwrap_or_default(),
        photo_path,
        photo_url,
    };

    let conn = get_conn(&ctx.db_pool)?;
    items::insert_item(&conn, &item)?;

    tracing::info!("Registered item {} ({})", item.id, item.name);
    Ok((StatusCode::CREATED, Json(item)))
}

/// Search for an item by exact id.
///
/// With `has_photo: "true"` and a photo present, the response description
/// gets a note referencing the photo URL appended; the stored description is
/// untouched.
async fn search(
    State(ctx): State<AppContext>,
    Json(req): Json<SearchRequest>,
) -> ApiResult<(StatusCode, Json<Item>)> {
    let raw_id = req
        .id
        .ok_or_else(|| ApiError::validation(r#""id" is required"#))?;

    let conn = get_conn(&ctx.db_pool)?;
    let mut item = find_item(&conn, &raw_id)?;

    if req.has_photo.as_deref() == Some("true") {
        if let Some(url) = &item.photo_url {
            item.description = format!("{} (Photo: {})", item.description, url);
        }
    }

    // Deliberate: a successful search answers 201, not 200. Existing clients
    // depend on it.
    Ok((StatusCode::CREATED, Json(item)))
}

/// List every item. No filtering, no pagination.
async fn list_inventory(State(ctx): State<AppContext>) -> ApiResult<Json<Vec<Item>>> {
    let conn = get_conn(&ctx.db_pool)?;
    let all = items::list_items(&conn)?;
    Ok(Json(all))
}

/// Get a single item by path id.
async fn get_item(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> ApiResult<Json<Item>> {
    let conn = get_conn(&ctx.db_pool)?;
    let item = find_item(&conn, &id)?;
    Ok(Json(item))
}

/// Update an item's name and/or description.
///
/// Only supplied non-empty fields change; the row is re-read afterwards so
/// the response reflects what is stored.
async fn update_item(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
    Json(req): Json<UpdateItemRequest>,
) -> ApiResult<Json<Item>> {
    let conn = get_conn(&ctx.db_pool)?;
    let existing = find_item(&conn, &id)?;

    items::update_item_fields(
        &conn,
        existing.id,
        req.name.as_deref(),
        req.description.as_deref(),
    )?;

    let updated = find_item(&conn, &id)?;
    Ok(Json(updated))
}

/// Delete an item and release its photo blob best-effort.
async fn delete_item(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> ApiResult<&'static str> {
    let conn = get_conn(&ctx.db_pool)?;
    let existing = find_item(&conn, &id)?;

    if !items::delete_item(&conn, existing.id)? {
        // Raced with a concurrent delete
        return Err(ApiError::not_found("Not Found"));
    }

    if let Some(path) = &existing.photo_path {
        ctx.blobs.remove(path);
    }

    tracing::info!("Deleted item {}", existing.id);
    Ok("Deleted")
}
