//! Permission gate for coffee-shop routes.
//!
//! The gate is a `from_fn_with_state` middleware layered onto individual
//! method routers, so each route's required permission is visible in the
//! route table:
//!
//! ```ignore
//! .route("/drinks-detail", guarded(get(drinks::list_drink_details), &state, GET_DRINKS_DETAIL))
//! ```

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::{from_fn_with_state, Next};
use axum::response::Response;
use axum::routing::MethodRouter;

use crate::auth::jwt::{check_permission, extract_bearer};
use crate::auth::{AuthError, TokenVerifier};
use crate::error::CoffeeShopError;
use crate::state::CoffeeShopState;

/// State of one gate instance: the verifier and the permission it demands.
#[derive(Clone)]
pub struct PermissionGate {
    verifier: Arc<TokenVerifier>,
    permission: &'static str,
}

impl PermissionGate {
    pub fn new(verifier: Arc<TokenVerifier>, permission: &'static str) -> Self {
        Self {
            verifier,
            permission,
        }
    }
}

/// Verify the bearer token and required permission, then hand the decoded
/// [`Claims`](crate::auth::Claims) to the handler through request extensions.
///
/// Rejections surface as [`CoffeeShopError::Auth`].
pub async fn require_permission(
    State(gate): State<PermissionGate>,
    mut req: Request,
    next: Next,
) -> Result<Response, CoffeeShopError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .map(|v| v.to_str().map_err(|_| AuthError::not_bearer()))
        .transpose()?;

    let token = extract_bearer(header)?;
    let claims = gate.verifier.verify(token)?;
    check_permission(&claims, gate.permission)?;

    tracing::debug!(sub = %claims.sub, permission = gate.permission, "Permission granted");
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// Wrap a method router so it only runs when the caller holds `permission`.
pub fn guarded(
    method_router: MethodRouter<CoffeeShopState>,
    state: &CoffeeShopState,
    permission: &'static str,
) -> MethodRouter<CoffeeShopState> {
    let gate = PermissionGate::new(Arc::clone(&state.verifier), permission);
    method_router.route_layer(from_fn_with_state(gate, require_permission))
}
