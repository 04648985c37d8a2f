//! jws-cipher: symmetric signed tokens in JWS compact serialization.
//!
//! Payloads are signed with HMAC-SHA512 (`HS512`) under a shared secret and
//! carried as `base64url(header).base64url(base64(payload)).base64url(signature)`.
//! Verification recovers the payload, reports a signature mismatch as `None`,
//! and reports malformed tokens as errors.

pub mod cipher;
pub mod error;
pub mod keys;
pub mod serialize;
pub mod sign;
pub mod types;
pub mod verify;

pub use cipher::{JsonCipher, SigningCipher, TextCipher, TokenCipher};
pub use error::CipherError;
pub use keys::{KeyMaterial, SigningKey};
