//! Photo serving and replacement routes.

use axum::{
    body::{Body, Bytes},
    extract::{Multipart, Path, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use stockpile_common::ItemId;
use stockpile_db::models::Item;
use stockpile_db::pool::get_conn;
use stockpile_db::queries::items;
use tokio_util::io::ReaderStream;

use super::error::{ApiError, ApiResult};
use super::routes_inventory::{find_item, photo_url};
use super::{method_not_allowed, AppContext};

pub fn photo_routes() -> Router<AppContext> {
    Router::new().route(
        "/inventory/:id/photo",
        get(get_photo)
            .put(replace_photo)
            .fallback(method_not_allowed),
    )
}

/// Stream an item's photo bytes.
///
/// 404 when the item is missing, has no photo reference, or the referenced
/// blob is gone from disk.
async fn get_photo(State(ctx): State<AppContext>, Path(id): Path<String>) -> ApiResult<Response> {
    let conn = get_conn(&ctx.db_pool)?;

    let item = match ItemId::parse(&id) {
        Some(item_id) => items::get_item(&conn, item_id)?,
        None => None,
    };
    let photo_path = item
        .and_then(|i| i.photo_path)
        .ok_or_else(|| ApiError::not_found("Photo Not Found"))?;

    let file = ctx
        .blobs
        .open(&photo_path)
        .await
        .ok_or_else(|| ApiError::not_found("Photo Not Found"))?;

    let stream = ReaderStream::new(file);
    let body = Body::from_stream(stream);

    // Every photo is labeled image/jpeg regardless of the uploaded format;
    // clients only get the fixed label.
    Ok(([(header::CONTENT_TYPE, "image/jpeg")], body).into_response())
}

/// Replace an item's photo from a multipart form.
///
/// The previous blob, if any, is released best-effort before the new
/// reference is recorded; a failed release never fails the request.
async fn replace_photo(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> ApiResult<Json<Item>> {
    let conn = get_conn(&ctx.db_pool)?;
    let existing = find_item(&conn, &id)?;

    let mut photo: Option<(String, Bytes)> = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("photo") {
            let original = field.file_name().unwrap_or_default().to_string();
            let data = field.bytes().await?;
            photo = Some((original, data));
        }
    }

    let (original, data) = photo.ok_or_else(|| ApiError::validation("File not uploaded"))?;

    if let Some(old_path) = &existing.photo_path {
        ctx.blobs.remove(old_path);
    }

    let path = ctx.blobs.save(&original, &data)?;
    items::update_item_photo(
        &conn,
        existing.id,
        &path.to_string_lossy(),
        &photo_url(existing.id),
    )?;

    let updated = find_item(&conn, &id)?;
    tracing::info!("Replaced photo for item {}", updated.id);
    Ok(Json(updated))
}
