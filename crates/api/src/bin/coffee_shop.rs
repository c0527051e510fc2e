use std::sync::Arc;

use brewquiz_api::auth::{KeySet, TokenVerifier};
use brewquiz_api::config::{AuthSettings, CoffeeShopConfig};
use brewquiz_api::router::build_coffee_shop_app;
use brewquiz_api::state::CoffeeShopState;
use brewquiz_api::{server, telemetry};
use brewquiz_core::recipe::{Ingredient, Recipe};
use brewquiz_db::models::drink::NewDrink;
use brewquiz_db::store::{DrinkStore, MemoryDrinkStore, PgDrinkStore};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    telemetry::init_tracing();

    // --- Configuration ---
    let config = CoffeeShopConfig::from_env().expect("Invalid configuration");
    tracing::info!(
        host = %config.server.host,
        port = %config.server.port,
        issuer = %config.auth.issuer(),
        "Loaded coffee-shop configuration",
    );

    // --- Verification keys ---
    let keys = load_keys(&config.auth).await;
    let verifier = TokenVerifier::new(keys, config.auth.issuer(), config.auth.audience.clone());

    // --- Store ---
    let store: Arc<dyn DrinkStore> = match &config.server.database_url {
        Some(url) => {
            let pool = brewquiz_db::create_pool(url, config.server.db_max_connections)
                .await
                .expect("Failed to connect to database");
            tracing::info!("Database connection pool created");

            brewquiz_db::health_check(&pool)
                .await
                .expect("Database health check failed");

            brewquiz_db::run_coffee_shop_migrations(&pool)
                .await
                .expect("Failed to run database migrations");
            tracing::info!("Database migrations applied");

            Arc::new(PgDrinkStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory store");
            Arc::new(MemoryDrinkStore::new())
        }
    };

    if config.reset_drinks_on_start {
        store
            .reset(&[sample_drink()])
            .await
            .expect("Failed to reset drinks");
        tracing::info!("Drinks reset to sample menu");
    }

    let state = CoffeeShopState {
        store,
        verifier: Arc::new(verifier),
    };

    let app = build_coffee_shop_app(state, &config.server);
    server::serve(app, &config.server)
        .await
        .expect("Server error");
}

/// Local JWKS file, then local PEM key, then the provider's published JWKS.
async fn load_keys(auth: &AuthSettings) -> KeySet {
    if let Some(path) = &auth.jwks_path {
        tracing::info!(path = %path.display(), "Loading JWKS from file");
        return KeySet::load_jwks_file(path).expect("Failed to load JWKS file");
    }
    if let Some(path) = &auth.public_key_path {
        tracing::info!(path = %path.display(), "Loading PEM public key");
        return KeySet::load_pem_file(path).expect("Failed to load public key");
    }
    KeySet::fetch_jwks(&auth.jwks_url())
        .await
        .expect("Failed to download JWKS")
}

fn sample_drink() -> NewDrink {
    NewDrink {
        title: "water".to_string(),
        recipe: Recipe(vec![Ingredient {
            color: "blue".to_string(),
            name: "water".to_string(),
            parts: 1,
        }]),
    }
}
