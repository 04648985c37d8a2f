//! Symmetric key material for HS512 tokens.
//!
//! The secret string's UTF-8 bytes are used directly as the HMAC key. No
//! derivation or stretching is applied.

use std::fmt;

use rand::RngCore;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use crate::types::*;

/// A bound HMAC key.
/// The key bytes are wrapped in `Zeroizing` so they are automatically
/// zeroed from memory when dropped.
#[derive(Clone)]
pub struct SigningKey {
    secret: Zeroizing<Vec<u8>>,
}

impl SigningKey {
    pub fn from_bytes(secret: &[u8]) -> Self {
        SigningKey {
            secret: Zeroizing::new(secret.to_vec()),
        }
    }

    /// Key from a secret string, using its UTF-8 bytes.
    pub fn from_secret(secret: &str) -> Self {
        Self::from_bytes(secret.as_bytes())
    }

    /// Generate a random key of [`RECOMMENDED_KEY_LEN`] bytes from the OS RNG.
    pub fn generate() -> Self {
        let mut secret = Zeroizing::new(vec![0u8; RECOMMENDED_KEY_LEN]);
        rand::rngs::OsRng.fill_bytes(&mut secret);
        SigningKey { secret }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.secret
    }

    pub fn len(&self) -> usize {
        self.secret.len()
    }

    pub fn is_empty(&self) -> bool {
        self.secret.is_empty()
    }

    /// Shorter than the HS512 hash output. Still usable.
    pub fn is_weak(&self) -> bool {
        self.secret.len() < RECOMMENDED_KEY_LEN
    }

    #[must_use]
    pub fn fingerprint(&self) -> [u8; KEY_HASH_LEN] {
        compute_key_hash(&self.secret)
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("len", &self.secret.len())
            .field("fingerprint", &hex::encode(self.fingerprint()))
            .finish()
    }
}

/// Compute the 8-byte key fingerprint: SHA-256(key_material)[0..8].
#[must_use]
#[allow(clippy::indexing_slicing)] // SHA-256 always produces 32 bytes >= KEY_HASH_LEN
pub fn compute_key_hash(key_material: &[u8]) -> [u8; KEY_HASH_LEN] {
    let hash = Sha256::digest(key_material);
    let mut truncated = [0u8; KEY_HASH_LEN];
    truncated.copy_from_slice(&hash[..KEY_HASH_LEN]);
    truncated
}

/// Holder of the currently bound key. The feature is enabled iff a key is bound.
///
/// Rebinding takes `&mut self`; callers that share a `KeyMaterial` across
/// threads and rebind at runtime must put it behind their own lock.
#[derive(Debug, Clone, Default)]
pub struct KeyMaterial {
    key: Option<SigningKey>,
}

impl KeyMaterial {
    /// No key bound; the feature is disabled.
    pub fn unbound() -> Self {
        KeyMaterial { key: None }
    }

    pub fn with_key(key: SigningKey) -> Self {
        let mut material = KeyMaterial::unbound();
        material.bind_key(key);
        material
    }

    /// Bind `secret` as the signing key, replacing any previous key.
    ///
    /// Tokens signed under the replaced key no longer verify. Returns the
    /// fingerprint of the replaced key, if there was one. Empty and short
    /// secrets are accepted.
    pub fn bind(&mut self, secret: impl AsRef<[u8]>) -> Option<[u8; KEY_HASH_LEN]> {
        self.bind_key(SigningKey::from_bytes(secret.as_ref()))
    }

    #[tracing::instrument(name = "bind", skip_all)]
    pub fn bind_key(&mut self, key: SigningKey) -> Option<[u8; KEY_HASH_LEN]> {
        let fingerprint = hex::encode(key.fingerprint());
        if key.is_weak() {
            tracing::warn!(
                key_len = key.len(),
                recommended = RECOMMENDED_KEY_LEN,
                "signing key is shorter than the HS512 hash output"
            );
        }

        let previous = self.key.replace(key).map(|old| old.fingerprint());
        match previous {
            Some(old) => tracing::info!(
                previous = %hex::encode(old),
                %fingerprint,
                "signing key rebound"
            ),
            None => tracing::info!(%fingerprint, "signing key bound"),
        }
        previous
    }

    pub fn is_enabled(&self) -> bool {
        self.key.is_some()
    }

    pub fn key(&self) -> Option<&SigningKey> {
        self.key.as_ref()
    }
}
