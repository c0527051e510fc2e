use std::sync::Arc;

use brewquiz_db::store::{DrinkStore, TriviaStore};

use crate::auth::TokenVerifier;

/// Shared state of the trivia service, available via `State<TriviaState>`.
///
/// Cheaply cloneable (everything is behind `Arc`).
#[derive(Clone)]
pub struct TriviaState {
    /// Question and category storage.
    pub store: Arc<dyn TriviaStore>,
}

/// Shared state of the coffee-shop service, available via `State<CoffeeShopState>`.
#[derive(Clone)]
pub struct CoffeeShopState {
    /// Drink storage.
    pub store: Arc<dyn DrinkStore>,
    /// Verifier used by the permission gate.
    pub verifier: Arc<TokenVerifier>,
}
