pub mod health;

use axum::routing::{delete, get, patch, post};
use axum::Router;
use brewquiz_core::permissions::{DELETE_DRINKS, GET_DRINKS_DETAIL, PATCH_DRINKS, POST_DRINKS};

use crate::handlers::{categories, drinks, questions, quizzes};
use crate::middleware::permission::guarded;
use crate::state::{CoffeeShopState, TriviaState};

/// Build the trivia route tree.
///
/// ```text
/// /categories                                   GET
/// /categories/{category_id}/questions           GET
/// /questions                                    GET (?page=N), POST
/// /questions/{id}                               DELETE
/// /questions/search                             POST
/// /quizzes                                      POST
/// ```
pub fn trivia_routes() -> Router<TriviaState> {
    Router::new()
        .route("/categories", get(categories::list_categories))
        .route(
            "/categories/{category_id}/questions",
            get(categories::list_questions_in_category),
        )
        .route(
            "/questions",
            get(questions::list_questions).post(questions::create_question),
        )
        .route("/questions/{id}", delete(questions::delete_question))
        .route("/questions/search", post(questions::search_questions))
        .route("/quizzes", post(quizzes::next_question))
}

/// Build the coffee-shop route tree. Each guarded route names the permission
/// its token must carry.
///
/// ```text
/// /drinks            GET (public), POST (post:drinks)
/// /drinks-detail     GET (get:drinks-details)
/// /drinks/{id}       PATCH (patch:drinks), DELETE (delete:drinks)
/// ```
pub fn coffee_shop_routes(state: &CoffeeShopState) -> Router<CoffeeShopState> {
    Router::new()
        .route(
            "/drinks",
            get(drinks::list_drinks).merge(guarded(post(drinks::create_drink), state, POST_DRINKS)),
        )
        .route(
            "/drinks-detail",
            guarded(get(drinks::list_drink_details), state, GET_DRINKS_DETAIL),
        )
        .route(
            "/drinks/{id}",
            guarded(patch(drinks::update_drink), state, PATCH_DRINKS)
                .merge(guarded(delete(drinks::delete_drink), state, DELETE_DRINKS)),
        )
}
