//! Permission strings checked by the coffee-shop auth gate.
//!
//! These must match the permissions granted by the identity provider's API
//! configuration.

pub const GET_DRINKS_DETAIL: &str = "get:drinks-details";
pub const POST_DRINKS: &str = "post:drinks";
pub const PATCH_DRINKS: &str = "patch:drinks";
pub const DELETE_DRINKS: &str = "delete:drinks";
