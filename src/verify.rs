//! Token verification: HMAC-SHA512.

use hmac::Mac;

use crate::error::CipherError;
use crate::keys::{KeyMaterial, SigningKey};
use crate::serialize::{decode_payload, deserialize_token};
use crate::sign::hs512_mac;
use crate::types::*;

/// Verify an HS512 compact serialization under `key`.
///
/// Returns `Ok(Some(payload))` when the signature matches, `Ok(None)` when it
/// does not, and `Err(TokenFormat)` when the token cannot be parsed or names
/// an algorithm other than HS512.
pub fn verify_hs512(key: &SigningKey, token_bytes: &[u8]) -> Result<Option<Vec<u8>>, CipherError> {
    let token = deserialize_token(token_bytes)?;

    // Check algorithm matches
    match Algorithm::from_name(&token.header.alg) {
        Some(Algorithm::HmacSha512) => {}
        None => {
            return Err(CipherError::TokenFormat(format!(
                "unsupported algorithm {:?}, expected HS512",
                token.header.alg
            )));
        }
    }

    // Constant-time comparison; a wrong-length signature is a mismatch too.
    let mac = hs512_mac(key, &token.compact.signing_input())?;
    if mac.verify_slice(&token.signature).is_err() {
        return Ok(None);
    }

    decode_payload(&token.payload).map(Some)
}

/// Verify `token_bytes` under the key bound in `material`.
#[tracing::instrument(name = "verify", skip_all, fields(token_len = token_bytes.len()))]
pub fn verify(material: &KeyMaterial, token_bytes: &[u8]) -> Result<Option<Vec<u8>>, CipherError> {
    let key = material.key().ok_or_else(CipherError::key_not_bound)?;
    let verified = verify_hs512(key, token_bytes)?;
    match &verified {
        Some(payload) => tracing::debug!(payload_len = payload.len(), "token verified"),
        None => tracing::debug!("token signature mismatch"),
    }
    Ok(verified)
}
