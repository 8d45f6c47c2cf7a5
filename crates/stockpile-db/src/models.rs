//! Internal Rust models matching the database schema.
//!
//! This module provides the strongly-typed structure mapping to the `items`
//! table. The JSON wire shape uses camelCase keys for the photo fields on
//! every endpoint (the columns stay snake_case).

use serde::{Deserialize, Serialize};
use stockpile_common::ItemId;

/// Inventory item model.
///
/// `photo_path` and `photo_url` are either both present or both absent:
/// the path names the stored blob, the url is the public route derived from
/// the item id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    #[serde(rename = "photoPath")]
    pub photo_path: Option<String>,
    #[serde(rename = "photoUrl")]
    pub photo_url: Option<String>,
}

impl Item {
    /// Whether the item carries a photo reference.
    pub fn has_photo(&self) -> bool {
        self.photo_url.is_some()
    }
}
