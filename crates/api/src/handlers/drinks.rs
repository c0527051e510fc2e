//! Handlers for the coffee-shop drink menu.
//!
//! `GET /drinks` is public. Every other handler sits behind the permission
//! gate, which has already verified the token by the time the handler runs.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use brewquiz_core::recipe::Recipe;
use brewquiz_core::types::DbId;
use brewquiz_db::models::drink::{DrinkChanges, DrinkLong, DrinkShort, NewDrink};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::auth::Claims;
use crate::error::{CoffeeShopError, CoffeeShopResult};
use crate::response::Success;
use crate::state::CoffeeShopState;

// ---------------------------------------------------------------------------
// Request / response shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct ShortDrinks {
    pub drinks: Vec<DrinkShort>,
}

#[derive(Debug, Serialize)]
pub struct LongDrinks {
    pub drinks: Vec<DrinkLong>,
}

#[derive(Debug, Serialize)]
pub struct DeletedDrink {
    pub delete: DbId,
}

/// Body of `POST /drinks` and `PATCH /drinks/{id}`.
///
/// `recipe` stays untyped so that `null` and `""` can be told apart from a
/// malformed ingredient list.
#[derive(Debug, Default, Deserialize)]
pub struct DrinkPayload {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub recipe: Option<Value>,
}

impl DrinkPayload {
    /// Title, treating `""` the same as absent.
    fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.is_empty())
    }

    /// Parsed recipe, or `None` when absent, `null`, `""` or an empty list.
    fn recipe(&self) -> CoffeeShopResult<Option<Recipe>> {
        match &self.recipe {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) if s.is_empty() => Ok(None),
            Some(Value::Array(items)) if items.is_empty() => Ok(None),
            Some(value) => Ok(Some(Recipe::from_value(value.clone())?)),
        }
    }

    fn into_new_drink(self) -> CoffeeShopResult<NewDrink> {
        let recipe = self.recipe()?.unwrap_or_default();
        Ok(NewDrink {
            title: self.title.unwrap_or_default(),
            recipe,
        })
    }

    fn changes(&self) -> CoffeeShopResult<DrinkChanges> {
        Ok(DrinkChanges {
            title: self.title().map(str::to_string),
            recipe: self.recipe()?,
        })
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /drinks
pub async fn list_drinks(
    State(state): State<CoffeeShopState>,
) -> CoffeeShopResult<impl IntoResponse> {
    let drinks = state.store.list_drinks().await?;
    Ok(Success::new(ShortDrinks {
        drinks: drinks.iter().map(|d| d.short()).collect(),
    }))
}

/// GET /drinks-detail (`get:drinks-details`)
pub async fn list_drink_details(
    State(state): State<CoffeeShopState>,
    Extension(claims): Extension<Claims>,
) -> CoffeeShopResult<impl IntoResponse> {
    let drinks = state.store.list_drinks().await?;
    tracing::debug!(sub = %claims.sub, count = drinks.len(), "Listed drink details");

    Ok(Success::new(LongDrinks {
        drinks: drinks.iter().map(|d| d.long()).collect(),
    }))
}

/// POST /drinks (`post:drinks`)
pub async fn create_drink(
    State(state): State<CoffeeShopState>,
    Extension(claims): Extension<Claims>,
    body: Result<Json<DrinkPayload>, JsonRejection>,
) -> CoffeeShopResult<impl IntoResponse> {
    let Json(payload) = body?;
    let new_drink = payload.into_new_drink()?;

    let drink = state.store.create_drink(&new_drink).await?;

    tracing::info!(drink_id = drink.id, title = %drink.title, sub = %claims.sub, "Drink created");

    Ok(Success::new(LongDrinks {
        drinks: vec![drink.long()],
    }))
}

/// PATCH /drinks/{id} (`patch:drinks`)
///
/// Only non-empty fields overwrite the stored drink.
pub async fn update_drink(
    State(state): State<CoffeeShopState>,
    Extension(claims): Extension<Claims>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Json<DrinkPayload>, JsonRejection>,
) -> CoffeeShopResult<impl IntoResponse> {
    let id = parse_drink_id(path)?;
    let Json(payload) = body?;
    let changes = payload.changes()?;

    let drink = state
        .store
        .update_drink(id, &changes)
        .await?
        .ok_or(CoffeeShopError::DrinkNotFound(id))?;

    tracing::info!(
        drink_id = id,
        unchanged = changes.is_empty(),
        sub = %claims.sub,
        "Drink updated",
    );

    Ok(Success::new(LongDrinks {
        drinks: vec![drink.long()],
    }))
}

/// DELETE /drinks/{id} (`delete:drinks`)
pub async fn delete_drink(
    State(state): State<CoffeeShopState>,
    Extension(claims): Extension<Claims>,
    path: Result<Path<String>, PathRejection>,
) -> CoffeeShopResult<impl IntoResponse> {
    let id = parse_drink_id(path)?;

    if !state.store.delete_drink(id).await? {
        return Err(CoffeeShopError::DrinkNotFound(id));
    }

    tracing::info!(drink_id = id, sub = %claims.sub, "Drink deleted");

    Ok(Success::new(DeletedDrink { delete: id }))
}

/// Drink routes only match integer ids.
fn parse_drink_id(path: Result<Path<String>, PathRejection>) -> CoffeeShopResult<DbId> {
    let Path(raw) = path.map_err(|_| CoffeeShopError::NotFound)?;
    raw.parse().map_err(|_| CoffeeShopError::NotFound)
}
