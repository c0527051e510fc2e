//! Category model.

use std::collections::BTreeMap;

use brewquiz_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
}

/// The `{id: type}` mapping clients receive under `categories`.
pub fn category_map(categories: &[Category]) -> BTreeMap<DbId, String> {
    categories
        .iter()
        .map(|c| (c.id, c.kind.clone()))
        .collect()
}
