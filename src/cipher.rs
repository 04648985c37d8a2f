//! Signing capability shared by concrete token types.
//!
//! [`SigningCipher`] works on raw bytes. Token types that carry text or
//! structured values wrap it and supply their own conversion to and from
//! bytes, exposing the same [`TokenCipher`] interface.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::CipherError;
use crate::keys::{KeyMaterial, SigningKey};
use crate::types::KEY_HASH_LEN;
use crate::{sign, verify};

/// Sign values of type `T` into tokens of type `R`, and back.
pub trait TokenCipher<T, R> {
    /// Sign `value` into a token.
    fn encode(&self, value: &T) -> Result<R, CipherError>;

    /// Verify `token` and recover the signed value.
    ///
    /// `Ok(None)` means the signature did not match. Treat the token as
    /// untrusted.
    fn decode(&self, token: &R) -> Result<Option<T>, CipherError>;

    /// Whether a signing key is bound.
    fn is_enabled(&self) -> bool;
}

/// Byte-level HS512 signer and verifier over a bindable key.
#[derive(Debug, Clone, Default)]
pub struct SigningCipher {
    keys: KeyMaterial,
}

impl SigningCipher {
    /// A cipher with no key bound. `sign` and `verify` fail until [`bind`](Self::bind).
    pub fn new() -> Self {
        SigningCipher {
            keys: KeyMaterial::unbound(),
        }
    }

    pub fn with_secret(secret: &str) -> Self {
        Self::with_key(SigningKey::from_secret(secret))
    }

    pub fn with_key(key: SigningKey) -> Self {
        SigningCipher {
            keys: KeyMaterial::with_key(key),
        }
    }

    /// Replace the signing key. Tokens signed before the call stop verifying.
    /// Returns the fingerprint of the replaced key.
    pub fn bind(&mut self, secret: &str) -> Option<[u8; KEY_HASH_LEN]> {
        self.keys.bind(secret)
    }

    pub fn is_enabled(&self) -> bool {
        self.keys.is_enabled()
    }

    pub fn key_material(&self) -> &KeyMaterial {
        &self.keys
    }

    pub fn sign(&self, payload: &[u8]) -> Result<Vec<u8>, CipherError> {
        sign::sign(&self.keys, payload)
    }

    pub fn verify(&self, token: &[u8]) -> Result<Option<Vec<u8>>, CipherError> {
        verify::verify(&self.keys, token)
    }
}

impl TokenCipher<Vec<u8>, Vec<u8>> for SigningCipher {
    fn encode(&self, value: &Vec<u8>) -> Result<Vec<u8>, CipherError> {
        self.sign(value)
    }

    fn decode(&self, token: &Vec<u8>) -> Result<Option<Vec<u8>>, CipherError> {
        self.verify(token)
    }

    fn is_enabled(&self) -> bool {
        SigningCipher::is_enabled(self)
    }
}

/// Signs strings (ticket ids, cookie values) into token strings.
#[derive(Debug, Clone, Default)]
pub struct TextCipher {
    inner: SigningCipher,
}

impl TextCipher {
    pub fn new(inner: SigningCipher) -> Self {
        TextCipher { inner }
    }

    pub fn inner_mut(&mut self) -> &mut SigningCipher {
        &mut self.inner
    }
}

impl TokenCipher<String, String> for TextCipher {
    fn encode(&self, value: &String) -> Result<String, CipherError> {
        let token = self.inner.sign(value.as_bytes())?;
        // Compact serializations are ASCII
        String::from_utf8(token)
            .map_err(|e| CipherError::CryptoBackend(format!("token is not UTF-8: {e}")))
    }

    fn decode(&self, token: &String) -> Result<Option<String>, CipherError> {
        match self.inner.verify(token.as_bytes())? {
            Some(bytes) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|e| CipherError::TokenFormat(format!("signed value is not UTF-8: {e}"))),
            None => Ok(None),
        }
    }

    fn is_enabled(&self) -> bool {
        self.inner.is_enabled()
    }
}

/// Signs any serde value as JSON.
#[derive(Debug, Clone)]
pub struct JsonCipher<T> {
    inner: TextCipher,
    _value: PhantomData<fn() -> T>,
}

impl<T> JsonCipher<T> {
    pub fn new(inner: SigningCipher) -> Self {
        JsonCipher {
            inner: TextCipher::new(inner),
            _value: PhantomData,
        }
    }

    pub fn inner_mut(&mut self) -> &mut SigningCipher {
        self.inner.inner_mut()
    }
}

impl<T> Default for JsonCipher<T> {
    fn default() -> Self {
        JsonCipher::new(SigningCipher::new())
    }
}

impl<T: Serialize + DeserializeOwned> TokenCipher<T, String> for JsonCipher<T> {
    fn encode(&self, value: &T) -> Result<String, CipherError> {
        let json = serde_json::to_string(value)
            .map_err(|e| CipherError::Serialization(format!("value is not serializable: {e}")))?;
        self.inner.encode(&json)
    }

    fn decode(&self, token: &String) -> Result<Option<T>, CipherError> {
        match self.inner.decode(token)? {
            Some(json) => serde_json::from_str(&json)
                .map(Some)
                .map_err(|e| CipherError::TokenFormat(format!("signed value is not valid JSON: {e}"))),
            None => Ok(None),
        }
    }

    fn is_enabled(&self) -> bool {
        self.inner.is_enabled()
    }
}
