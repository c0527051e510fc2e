//! HTTP layer of the trivia and coffee-shop services.
//!
//! Exposes config, state, error handling, the auth gate and the router
//! builders so the two binaries and the integration tests share them.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod routes;
pub mod server;
pub mod state;
pub mod telemetry;
