//! Unknown-route and wrong-method responses for both services.

use crate::error::{CoffeeShopError, TriviaError};

pub async fn trivia_not_found() -> TriviaError {
    TriviaError::NotFound("no such route".into())
}

pub async fn trivia_method_not_allowed() -> TriviaError {
    TriviaError::MethodNotAllowed
}

pub async fn coffee_shop_not_found() -> CoffeeShopError {
    CoffeeShopError::NotFound
}

pub async fn coffee_shop_method_not_allowed() -> CoffeeShopError {
    CoffeeShopError::MethodNotAllowed
}
