//! Request guards composed onto routes.
//!
//! - [`permission::require_permission`] -- the coffee-shop auth gate, attached
//!   per route with [`permission::guarded`].

pub mod permission;
