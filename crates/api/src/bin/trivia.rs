use std::sync::Arc;

use brewquiz_api::config::{ServerConfig, TRIVIA_DEFAULT_PORT};
use brewquiz_api::router::build_trivia_app;
use brewquiz_api::state::TriviaState;
use brewquiz_api::{server, telemetry};
use brewquiz_db::store::{MemoryTriviaStore, PgTriviaStore, TriviaStore};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    telemetry::init_tracing();

    // --- Configuration ---
    let config = ServerConfig::from_env(TRIVIA_DEFAULT_PORT).expect("Invalid configuration");
    tracing::info!(host = %config.host, port = %config.port, "Loaded trivia configuration");

    // --- Store ---
    let store: Arc<dyn TriviaStore> = match &config.database_url {
        Some(url) => {
            let pool = brewquiz_db::create_pool(url, config.db_max_connections)
                .await
                .expect("Failed to connect to database");
            tracing::info!("Database connection pool created");

            brewquiz_db::health_check(&pool)
                .await
                .expect("Database health check failed");

            brewquiz_db::run_trivia_migrations(&pool)
                .await
                .expect("Failed to run database migrations");
            tracing::info!("Database migrations applied");

            Arc::new(PgTriviaStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory store");
            Arc::new(MemoryTriviaStore::with_default_categories())
        }
    };

    let state = TriviaState { store };

    let app = build_trivia_app(state, &config);
    server::serve(app, &config).await.expect("Server error");
}
