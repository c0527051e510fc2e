//! Bearer-token parsing and RS256 verification against the identity provider.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, Algorithm, Validation};
use serde::{Deserialize, Serialize};

use super::error::AuthError;
use super::keys::KeySet;

/// `aud` may be a single string or a list, depending on the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    One(String),
    Many(Vec<String>),
}

/// Decoded payload of a verified access token.
///
/// Inserted into the request extensions by the permission gate so handlers
/// can read it with `Extension<Claims>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default)]
    pub sub: String,
    pub iss: String,
    pub aud: Audience,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    /// Granted permission strings. `None` when the claim is absent, which is
    /// reported differently from an empty grant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
}

/// Extract the token from an `Authorization: Bearer <token>` header value.
pub fn extract_bearer(header: Option<&str>) -> Result<&str, AuthError> {
    let header = header.ok_or_else(AuthError::header_missing)?;
    let parts: Vec<&str> = header.split_whitespace().collect();

    match parts.as_slice() {
        [] => Err(AuthError::not_bearer()),
        [scheme, ..] if !scheme.eq_ignore_ascii_case("bearer") => Err(AuthError::not_bearer()),
        [_] => Err(AuthError::token_missing()),
        [_, token] => Ok(*token),
        _ => Err(AuthError::malformed_header()),
    }
}

/// Require `permission` in the token's `permissions` claim.
pub fn check_permission(claims: &Claims, permission: &str) -> Result<(), AuthError> {
    let granted = claims
        .permissions
        .as_ref()
        .ok_or_else(AuthError::permissions_missing)?;

    if granted.iter().any(|p| p == permission) {
        Ok(())
    } else {
        Err(AuthError::permission_denied())
    }
}

/// Verifies RS256 tokens issued by one identity provider for one audience.
#[derive(Debug, Clone)]
pub struct TokenVerifier {
    keys: KeySet,
    issuer: String,
    audience: String,
}

impl TokenVerifier {
    pub fn new(keys: KeySet, issuer: impl Into<String>, audience: impl Into<String>) -> Self {
        Self {
            keys,
            issuer: issuer.into(),
            audience: audience.into(),
        }
    }

    /// Verify signature, expiry, issuer and audience, returning the payload.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let header = decode_header(token).map_err(|_| AuthError::unparseable_header())?;
        let key = self.keys.decoding_key(&header)?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        validation.set_required_spec_claims(&["exp", "iss", "aud"]);

        let data = decode::<Claims>(token, &key, &validation).map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::expired(),
            ErrorKind::InvalidIssuer | ErrorKind::InvalidAudience => AuthError::incorrect_claims(),
            _ => {
                tracing::debug!(error = %e, "Token verification failed");
                AuthError::unparseable_token()
            }
        })?;

        Ok(data.claims)
    }
}
