use thiserror::Error;

/// Failures surfaced by signing and verification.
///
/// A signature mismatch is not an error: `verify` reports it as `Ok(None)`.
#[derive(Debug, Error)]
pub enum CipherError {
    /// No signing key is bound, or the bound key is unusable.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The token is not a well-formed HS512 compact serialization.
    #[error("malformed token: {0}")]
    TokenFormat(String),

    /// A typed value could not be serialized before signing.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The HMAC backend itself failed.
    #[error("crypto backend failure: {0}")]
    CryptoBackend(String),
}

impl CipherError {
    pub(crate) fn key_not_bound() -> Self {
        CipherError::Configuration("no signing key is bound".into())
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, CipherError::Configuration(_))
    }

    pub fn is_token_format(&self) -> bool {
        matches!(self, CipherError::TokenFormat(_))
    }

    pub fn is_serialization(&self) -> bool {
        matches!(self, CipherError::Serialization(_))
    }

    pub fn is_crypto_backend(&self) -> bool {
        matches!(self, CipherError::CryptoBackend(_))
    }
}
