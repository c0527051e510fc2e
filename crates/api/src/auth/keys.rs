//! Identity-provider verification keys.
//!
//! Keys come either from a JWKS document (matched by the token's `kid`) or
//! from a single PEM-encoded RSA public key that verifies every token.

use std::path::Path;

use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{DecodingKey, Header};

use super::error::AuthError;

/// Errors raised while loading key material at startup.
#[derive(Debug, thiserror::Error)]
pub enum KeySetError {
    #[error("Failed to read key file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid JWKS document: {0}")]
    Jwks(#[from] serde_json::Error),

    #[error("Invalid public key: {0}")]
    Key(#[from] jsonwebtoken::errors::Error),

    #[error("Failed to download JWKS from {url}: {source}")]
    Download { url: String, source: reqwest::Error },
}

/// Key material used to verify token signatures.
#[derive(Clone)]
pub enum KeySet {
    Jwks(JwkSet),
    Pem(DecodingKey),
}

impl std::fmt::Debug for KeySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeySet::Jwks(set) => f
                .debug_struct("Jwks")
                .field("keys", &set.keys.len())
                .finish(),
            KeySet::Pem(_) => f.write_str("Pem"),
        }
    }
}

impl KeySet {
    pub fn from_jwks_json(json: &str) -> Result<Self, KeySetError> {
        Ok(KeySet::Jwks(serde_json::from_str(json)?))
    }

    pub fn from_rsa_pem(pem: &[u8]) -> Result<Self, KeySetError> {
        Ok(KeySet::Pem(DecodingKey::from_rsa_pem(pem)?))
    }

    pub fn load_jwks_file(path: &Path) -> Result<Self, KeySetError> {
        Self::from_jwks_json(&read_to_string(path)?)
    }

    pub fn load_pem_file(path: &Path) -> Result<Self, KeySetError> {
        Self::from_rsa_pem(read_to_string(path)?.as_bytes())
    }

    /// Download the provider's published JWKS document.
    pub async fn fetch_jwks(url: &str) -> Result<Self, KeySetError> {
        let download = |source| KeySetError::Download {
            url: url.to_string(),
            source,
        };
        let set = reqwest::get(url)
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(download)?
            .json::<JwkSet>()
            .await
            .map_err(download)?;
        tracing::info!(url, keys = set.keys.len(), "Downloaded JWKS");
        Ok(KeySet::Jwks(set))
    }

    /// Select the key that verifies a token with this header.
    pub fn decoding_key(&self, header: &Header) -> Result<DecodingKey, AuthError> {
        match self {
            KeySet::Pem(key) => Ok(key.clone()),
            KeySet::Jwks(set) => {
                let kid = header.kid.as_deref().ok_or_else(AuthError::key_not_found)?;
                let jwk = set.find(kid).ok_or_else(AuthError::key_not_found)?;
                DecodingKey::from_jwk(jwk).map_err(|e| {
                    tracing::warn!(kid, error = %e, "JWKS entry is not a usable key");
                    AuthError::key_not_found()
                })
            }
        }
    }
}

fn read_to_string(path: &Path) -> Result<String, KeySetError> {
    std::fs::read_to_string(path).map_err(|source| KeySetError::Io {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use assert_matches::assert_matches;
    use jsonwebtoken::Algorithm;

    use super::*;

    const JWKS: &str = include_str!("../../tests/fixtures/test_jwks.json");
    const PUBLIC_PEM: &str = include_str!("../../tests/fixtures/test_public_key.pem");

    fn header_with_kid(kid: Option<&str>) -> Header {
        let mut header = Header::new(Algorithm::RS256);
        header.kid = kid.map(str::to_string);
        header
    }

    #[test]
    fn jwks_key_is_found_by_kid() {
        let keys = KeySet::from_jwks_json(JWKS).unwrap();
        assert!(keys.decoding_key(&header_with_kid(Some("brewquiz-test-key"))).is_ok());
    }

    #[test]
    fn unknown_kid_is_rejected() {
        let keys = KeySet::from_jwks_json(JWKS).unwrap();
        let err = keys.decoding_key(&header_with_kid(Some("other"))).err().unwrap();
        assert_eq!(err, AuthError::key_not_found());

        let err = keys.decoding_key(&header_with_kid(None)).err().unwrap();
        assert_eq!(err, AuthError::key_not_found());
    }

    #[test]
    fn pem_key_ignores_kid() {
        let keys = KeySet::from_rsa_pem(PUBLIC_PEM.as_bytes()).unwrap();
        assert!(keys.decoding_key(&header_with_kid(None)).is_ok());
    }

    #[test]
    fn invalid_documents_fail_to_load() {
        assert_matches!(KeySet::from_jwks_json("{"), Err(KeySetError::Jwks(_)));
        assert_matches!(KeySet::from_rsa_pem(b"not a key"), Err(KeySetError::Key(_)));
    }

    #[test]
    fn jwks_loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(JWKS.as_bytes()).unwrap();
        assert_matches!(KeySet::load_jwks_file(file.path()), Ok(KeySet::Jwks(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = KeySet::load_pem_file(Path::new("/nonexistent/key.pem")).unwrap_err();
        assert_matches!(err, KeySetError::Io { ref path, .. } if path == "/nonexistent/key.pem");
    }
}
