//! Domain logic shared by the trivia and coffee-shop services.
//!
//! Nothing in here touches HTTP or the database, so every rule that shapes
//! an API response (paging, search patterns, recipe forms, quiz selection)
//! can be unit tested in isolation.

pub mod error;
pub mod pagination;
pub mod permissions;
pub mod quiz;
pub mod recipe;
pub mod scalar;
pub mod search;
pub mod types;
