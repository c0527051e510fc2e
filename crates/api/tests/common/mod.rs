#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use brewquiz_api::auth::jwt::Audience;
use brewquiz_api::auth::{Claims, KeySet, TokenVerifier};
use brewquiz_api::config::ServerConfig;
use brewquiz_api::router::{build_coffee_shop_app, build_trivia_app};
use brewquiz_api::state::{CoffeeShopState, TriviaState};
use async_trait::async_trait;
use brewquiz_core::types::DbId;
use brewquiz_db::models::drink::{Drink, DrinkChanges, NewDrink};
use brewquiz_db::models::question::NewQuestion;
use brewquiz_db::store::{
    DrinkStore, MemoryDrinkStore, MemoryTriviaStore, StoreError, TriviaStore,
};
use http_body_util::BodyExt;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use tower::ServiceExt;

pub const PRIVATE_PEM: &str = include_str!("../fixtures/test_private_key.pem");
pub const JWKS: &str = include_str!("../fixtures/test_jwks.json");
pub const KID: &str = "brewquiz-test-key";
pub const ISSUER: &str = "https://brewquiz-test.example.com/";
pub const AUDIENCE: &str = "drinks";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["*".to_string()],
        request_timeout_secs: 30,
        database_url: None,
        db_max_connections: 1,
    }
}

// ---------------------------------------------------------------------------
// App builders
// ---------------------------------------------------------------------------

/// Trivia app backed by an in-memory store with the default categories.
pub fn build_trivia_test_app() -> (Router, Arc<MemoryTriviaStore>) {
    let store = Arc::new(MemoryTriviaStore::with_default_categories());
    (build_trivia_app_with(store.clone()), store)
}

pub fn build_trivia_app_with(store: Arc<dyn TriviaStore>) -> Router {
    build_trivia_app(TriviaState { store }, &test_config())
}

/// Coffee-shop app backed by an empty in-memory store, verifying tokens
/// against the fixture JWKS.
pub fn build_coffee_shop_test_app() -> (Router, Arc<MemoryDrinkStore>) {
    let store = Arc::new(MemoryDrinkStore::new());
    (build_coffee_shop_app_with(store.clone()), store)
}

pub fn build_coffee_shop_app_with(store: Arc<dyn DrinkStore>) -> Router {
    let keys = KeySet::from_jwks_json(JWKS).unwrap();
    let state = CoffeeShopState {
        store,
        verifier: Arc::new(TokenVerifier::new(keys, ISSUER, AUDIENCE)),
    };
    build_coffee_shop_app(state, &test_config())
}

/// Drink store whose every operation fails, as if the database were down.
pub struct UnavailableDrinkStore;

fn unavailable() -> StoreError {
    StoreError::Database(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl DrinkStore for UnavailableDrinkStore {
    async fn list_drinks(&self) -> Result<Vec<Drink>, StoreError> {
        Err(unavailable())
    }

    async fn create_drink(&self, _input: &NewDrink) -> Result<Drink, StoreError> {
        Err(unavailable())
    }

    async fn update_drink(
        &self,
        _id: DbId,
        _changes: &DrinkChanges,
    ) -> Result<Option<Drink>, StoreError> {
        Err(unavailable())
    }

    async fn delete_drink(&self, _id: DbId) -> Result<bool, StoreError> {
        Err(unavailable())
    }

    async fn reset(&self, _seed: &[NewDrink]) -> Result<(), StoreError> {
        Err(unavailable())
    }
}

/// Insert a question through the store trait and return its id.
pub async fn seed_question(store: &MemoryTriviaStore, text: &str, category: &str) -> i64 {
    store
        .create_question(&NewQuestion {
            question: text.to_string(),
            answer: "answer".to_string(),
            category: category.to_string(),
            difficulty: 1,
        })
        .await
        .unwrap()
        .id
}

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

pub fn claims(permissions: &[&str]) -> Claims {
    let now = chrono::Utc::now().timestamp();
    Claims {
        sub: "auth0|barista".to_string(),
        iss: ISSUER.to_string(),
        aud: Audience::One(AUDIENCE.to_string()),
        exp: now + 3600,
        iat: Some(now),
        permissions: Some(permissions.iter().map(|p| p.to_string()).collect()),
    }
}

pub fn sign(claims: &Claims) -> String {
    let mut header = Header::new(Algorithm::RS256);
    header.kid = Some(KID.to_string());
    let key = EncodingKey::from_rsa_pem(PRIVATE_PEM.as_bytes()).unwrap();
    encode(&header, claims, &key).unwrap()
}

/// Signed token granting `permissions`.
pub fn token(permissions: &[&str]) -> String {
    sign(&claims(permissions))
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
    token: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body), None).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None, None).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
